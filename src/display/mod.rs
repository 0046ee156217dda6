//! Display formatting for terminal output
//!
//! Provides utilities for formatting ledger entries and categories for
//! terminal display.

pub mod entry;

pub use entry::{format_category_list, format_entry_register, format_entry_row};
