//! Entry display formatting
//!
//! Provides register-style listings of ledger entries and the category
//! catalogue for terminal output.

use crate::models::{CategoryCatalog, Entry, EntryKind};

/// Format a single entry as a register row
pub fn format_entry_row(entry: &Entry, currency_symbol: &str) -> String {
    format!(
        "{} {:7} {:12} {:>12}  {}",
        entry.date().format("%Y-%m-%d"),
        entry.kind(),
        truncate(entry.category(), 12),
        entry.amount().format_with_symbol(currency_symbol),
        entry.description()
    )
}

/// Format a list of entries as a register
pub fn format_entry_register<'a, I>(entries: I, currency_symbol: &str) -> String
where
    I: IntoIterator<Item = &'a Entry>,
{
    let rows: Vec<String> = entries
        .into_iter()
        .map(|e| format_entry_row(e, currency_symbol))
        .collect();

    if rows.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:10} {:7} {:12} {:>12}  {}\n",
        "Date", "Type", "Category", "Amount", "Description"
    ));
    output.push_str(&"-".repeat(60));
    output.push('\n');

    for row in rows {
        output.push_str(&row);
        output.push('\n');
    }

    output
}

/// Format the category catalogue, one kind per block
pub fn format_category_list(catalog: &CategoryCatalog) -> String {
    let mut output = String::new();

    for (title, kind) in [("Income", EntryKind::Income), ("Expense", EntryKind::Expense)] {
        output.push_str(&format!("{} categories:\n", title));
        for (idx, name) in catalog.for_kind(kind).iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", idx + 1, name));
        }
    }

    output
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}
