//! Record line parsing for ledger files
//!
//! A record is `kind,date,category,amount[,description]`. Each line is parsed
//! independently so that a malformed line can be skipped without affecting
//! the rest of the file.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{Entry, EntryKind, Money, MoneyParseError};

/// Why a single record line was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("expected at least 4 comma-separated fields, found {0}")]
    TooFewFields(usize),

    #[error("unknown transaction type '{0}'")]
    UnknownKind(String),

    #[error("invalid date '{0}'")]
    InvalidDate(String),

    #[error("invalid amount '{0}', expected a plain decimal such as 12.50")]
    InvalidAmount(String),

    #[error("amount '{0}' is larger than 92233720368547758.07")]
    AmountOutOfRange(String),

    #[error("negative amount '{0}'")]
    NegativeAmount(String),
}

/// Result of classifying one line of a ledger file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    /// Blank line or `#` comment
    Skip,
    Entry(Entry),
}

/// A line that could not be turned into an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedLine {
    /// 1-based line number within the source text
    pub line_number: usize,
    pub line: String,
    pub error: RecordError,
}

/// Parse a strict `YYYY-MM-DD` date (zero-padded month and day)
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let well_formed = s.len() == 10
        && s.bytes()
            .enumerate()
            .all(|(i, b)| if i == 4 || i == 7 { b == b'-' } else { b.is_ascii_digit() });
    if !well_formed {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Parse one line of a ledger file
///
/// Amounts of exactly zero are accepted here even though interactive entry
/// requires a positive amount.
pub fn parse_record_line(line: &str) -> Result<ParsedLine, RecordError> {
    if line.trim().is_empty() || line.starts_with('#') {
        return Ok(ParsedLine::Skip);
    }

    let fields: Vec<&str> = line.splitn(5, ',').map(str::trim).collect();
    if fields.len() < 4 {
        return Err(RecordError::TooFewFields(fields.len()));
    }

    let kind: EntryKind = fields[0]
        .parse()
        .map_err(|_| RecordError::UnknownKind(fields[0].to_string()))?;

    let date =
        parse_iso_date(fields[1]).ok_or_else(|| RecordError::InvalidDate(fields[1].to_string()))?;

    let category = fields[2].to_lowercase();

    let amount = Money::parse(fields[3]).map_err(|e| match e {
        MoneyParseError::InvalidFormat(_) => RecordError::InvalidAmount(fields[3].to_string()),
        MoneyParseError::OutOfRange(_) => RecordError::AmountOutOfRange(fields[3].to_string()),
    })?;
    if amount.is_negative() {
        return Err(RecordError::NegativeAmount(fields[3].to_string()));
    }

    let description = fields.get(4).copied().unwrap_or_default();

    Ok(ParsedLine::Entry(Entry::new(
        kind,
        date,
        category,
        amount,
        description,
    )))
}
