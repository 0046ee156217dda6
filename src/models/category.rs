//! Category catalogue offered during interactive entry
//!
//! The catalogue is presentation data: it drives the numbered category menu
//! and the `add` command, but entries loaded from a file may use any category.

use super::entry::EntryKind;

/// Categories offered for income entries unless configured otherwise
pub const DEFAULT_INCOME_CATEGORIES: &[&str] = &["salary", "business", "other"];

/// Categories offered for expense entries unless configured otherwise
pub const DEFAULT_EXPENSE_CATEGORIES: &[&str] = &["food", "rent", "travel", "other"];

/// Fixed list of category names per entry kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCatalog {
    income: Vec<String>,
    expense: Vec<String>,
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        Self::new(
            DEFAULT_INCOME_CATEGORIES.iter().copied(),
            DEFAULT_EXPENSE_CATEGORIES.iter().copied(),
        )
    }
}

impl CategoryCatalog {
    /// Build a catalogue; names are trimmed, lower-cased, and empty names dropped
    ///
    /// Commas and line breaks become spaces, since a category is written as
    /// one field of a record line.
    pub fn new<I, E, S>(income: I, expense: E) -> Self
    where
        I: IntoIterator<Item = S>,
        E: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            income: normalize(income),
            expense: normalize(expense),
        }
    }

    /// Categories for a kind, in menu order
    pub fn for_kind(&self, kind: EntryKind) -> &[String] {
        match kind {
            EntryKind::Income => &self.income,
            EntryKind::Expense => &self.expense,
        }
    }

    /// Look up a category by its 1-based menu number
    pub fn by_number(&self, kind: EntryKind, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|idx| self.for_kind(kind).get(idx))
            .map(String::as_str)
    }

    /// Check if `name` (case-insensitive) is offered for `kind`
    pub fn contains(&self, kind: EntryKind, name: &str) -> bool {
        self.for_kind(kind)
            .iter()
            .any(|c| c.eq_ignore_ascii_case(name.trim()))
    }
}

fn normalize<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|n| {
            n.as_ref()
                .replace([',', '\n', '\r'], " ")
                .trim()
                .to_lowercase()
        })
        .filter(|n| !n.is_empty())
        .collect()
}
