//! CLI command for the monthly summary
//!
//! Renders the summary for the terminal or exports it in a machine-readable
//! format, to stdout or to a file.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};

use super::{load_ledger, parse_month_arg};
use crate::error::{TrackerError, TrackerResult};
use crate::reports::MonthlySummary;

/// Summary output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SummaryFormat {
    /// Human-readable report
    #[default]
    Text,
    /// JSON document
    Json,
    /// YAML document
    Yaml,
    /// CSV rows, one per category plus totals
    Csv,
}

/// Arguments for `summary`
#[derive(Args, Debug, Clone)]
pub struct SummaryArgs {
    /// Month to summarise (YYYY-MM), defaults to the current month
    #[arg(short, long)]
    pub month: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = SummaryFormat::Text)]
    pub format: SummaryFormat,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Write a summary in the given format
pub fn write_summary<W: Write>(
    summary: &MonthlySummary,
    format: SummaryFormat,
    currency_symbol: &str,
    writer: &mut W,
) -> TrackerResult<()> {
    match format {
        SummaryFormat::Text => {
            writer.write_all(summary.format_terminal(currency_symbol).as_bytes())?;
            Ok(())
        }
        SummaryFormat::Json => summary.export_json(writer),
        SummaryFormat::Yaml => summary.export_yaml(writer),
        SummaryFormat::Csv => summary.export_csv(writer),
    }
}

/// Handle `summary`
pub fn handle_summary_command(
    ledger_file: &Path,
    currency_symbol: &str,
    args: SummaryArgs,
) -> TrackerResult<()> {
    let month = parse_month_arg(args.month.as_deref())?;
    let ledger = load_ledger(ledger_file)?;
    let summary = ledger.monthly_summary(month);

    if let Some(path) = args.output {
        let file = File::create(&path).map_err(|e| {
            TrackerError::Export(format!("Failed to create file {}: {}", path.display(), e))
        })?;
        let mut writer = BufWriter::new(file);
        write_summary(&summary, args.format, currency_symbol, &mut writer)?;
        writer.flush().map_err(|e| {
            TrackerError::Export(format!("Failed to write {}: {}", path.display(), e))
        })?;
        println!("Summary exported to: {}", path.display());
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        write_summary(&summary, args.format, currency_symbol, &mut handle)?;
        handle.flush()?;
    }

    Ok(())
}
