//! CLI command handlers
//!
//! This module contains the implementation of the non-interactive commands,
//! bridging the clap argument parsing with the ledger and report layers.

pub mod category;
pub mod entry;
pub mod report;

pub use category::handle_categories_command;
pub use entry::{handle_add_command, handle_list_command, AddArgs};
pub use report::{handle_summary_command, SummaryArgs, SummaryFormat};

use std::path::Path;

use tracing::warn;

use crate::error::{TrackerError, TrackerResult};
use crate::ledger::Ledger;
use crate::models::YearMonth;

/// Load a ledger file for a one-shot command
///
/// Rejected lines are reported through the log and otherwise skipped.
pub(crate) fn load_ledger(path: &Path) -> TrackerResult<Ledger> {
    let mut ledger = Ledger::new();
    let report = ledger.load_file(path)?;
    if report.has_rejections() {
        warn!(
            path = %path.display(),
            rejected = report.rejected.len(),
            "some ledger lines were skipped"
        );
    }
    Ok(ledger)
}

/// Parse an optional `--month` argument, defaulting to the current month
pub(crate) fn parse_month_arg(month: Option<&str>) -> TrackerResult<YearMonth> {
    match month {
        Some(text) => YearMonth::parse(text).map_err(|e| {
            TrackerError::Validation(format!(
                "Invalid month '{}': {}. Use YYYY-MM (e.g., 2024-03)",
                text, e
            ))
        }),
        None => Ok(YearMonth::current()),
    }
}
