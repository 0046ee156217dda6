//! Entry CLI commands
//!
//! Implements `add` and `list` against a ledger file.

use std::path::Path;

use chrono::NaiveDate;
use clap::Args;
use tracing::info;

use super::{load_ledger, parse_month_arg};
use crate::display::format_entry_register;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{CategoryCatalog, Entry, EntryKind, Money};
use crate::storage::{append_line, parse_iso_date};

/// Arguments for `add`
#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Entry type (income or expense)
    pub kind: EntryKind,

    /// Category name (must be one of the configured categories)
    pub category: String,

    /// Amount (e.g., "12.50")
    pub amount: String,

    /// Entry date (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub date: Option<String>,

    /// Free-text description
    #[arg(short = 'm', long, default_value = "")]
    pub description: String,
}

/// Build an entry from command line arguments
///
/// Applies the same rules as interactive entry: the category must be known
/// for the kind and the amount must be strictly positive.
pub fn build_entry(
    args: &AddArgs,
    catalog: &CategoryCatalog,
    today: NaiveDate,
) -> TrackerResult<Entry> {
    if !catalog.contains(args.kind, &args.category) {
        return Err(TrackerError::Validation(format!(
            "Unknown {} category '{}'. Choose one of: {}",
            args.kind.as_str(),
            args.category,
            catalog.for_kind(args.kind).join(", ")
        )));
    }

    let amount = Money::parse(&args.amount).map_err(|_| {
        TrackerError::Validation(format!("Invalid amount '{}', enter a number", args.amount))
    })?;
    if !amount.is_positive() {
        return Err(TrackerError::Validation("Amount must be positive".into()));
    }

    let date = match args.date.as_deref().map(str::trim) {
        None | Some("") => today,
        Some(text) => parse_iso_date(text).ok_or_else(|| {
            TrackerError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", text))
        })?,
    };

    Ok(Entry::new(
        args.kind,
        date,
        args.category.trim().to_lowercase(),
        amount,
        args.description.trim(),
    ))
}

/// Handle `add`: validate and append one entry to the ledger file
pub fn handle_add_command(
    ledger_file: &Path,
    catalog: &CategoryCatalog,
    args: AddArgs,
) -> TrackerResult<()> {
    let entry = build_entry(&args, catalog, chrono::Local::now().date_naive())?;

    append_line(ledger_file, &entry.to_record_line())?;
    info!(path = %ledger_file.display(), "appended entry");

    println!("Transaction added: {}", entry);
    Ok(())
}

/// Handle `list`: print the entries of the ledger file, optionally one month
pub fn handle_list_command(
    ledger_file: &Path,
    month: Option<String>,
    currency_symbol: &str,
) -> TrackerResult<()> {
    let ledger = load_ledger(ledger_file)?;

    let output = match month {
        Some(text) => {
            let month = parse_month_arg(Some(&text))?;
            format_entry_register(ledger.entries_in(month), currency_symbol)
        }
        None => format_entry_register(ledger.entries(), currency_symbol),
    };
    print!("{}", output);
    Ok(())
}
