//! Ledger entry model
//!
//! An entry is a single income or expense record. Entries carry no identity:
//! two entries with the same fields are interchangeable.

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

use super::money::Money;

/// Whether an entry adds to or takes from the month's savings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    /// Lowercase name as written to record files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => f.pad("INCOME"),
            Self::Expense => f.pad("EXPENSE"),
        }
    }
}

impl FromStr for EntryKind {
    type Err = UnknownKind;

    /// Case-insensitive; surrounding whitespace is not stripped
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("income") {
            Ok(Self::Income)
        } else if s.eq_ignore_ascii_case("expense") {
            Ok(Self::Expense)
        } else {
            Err(UnknownKind(s.to_string()))
        }
    }
}

/// Returned when a string names neither income nor expense
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown entry type '{0}' (expected 'income' or 'expense')")]
pub struct UnknownKind(pub String);

/// A single income or expense record
///
/// Fields are fixed at construction. Callers validate amounts and categories
/// before building an entry; this type accepts whatever it is given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    kind: EntryKind,
    date: NaiveDate,
    category: String,
    amount: Money,
    description: String,
}

impl Entry {
    pub fn new(
        kind: EntryKind,
        date: NaiveDate,
        category: impl Into<String>,
        amount: Money,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            date,
            category: category.into(),
            amount,
            description: description.into(),
        }
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_income(&self) -> bool {
        self.kind == EntryKind::Income
    }

    /// Serialize as one record line: `kind,date,category,amount,description`
    ///
    /// Commas (and line breaks) in the description become spaces so the line
    /// always reloads as exactly five fields.
    pub fn to_record_line(&self) -> String {
        let description: String = self
            .description
            .chars()
            .map(|c| if matches!(c, ',' | '\n' | '\r') { ' ' } else { c })
            .collect();

        format!(
            "{},{},{},{},{}",
            self.kind.as_str(),
            self.date.format("%Y-%m-%d"),
            self.category,
            self.amount,
            description
        )
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {} | {}",
            self.kind,
            self.date.format("%Y-%m-%d"),
            self.amount,
            self.category,
            self.description
        )
    }
}
