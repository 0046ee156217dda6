//! Core data models for the expense tracker
//!
//! This module contains the value types that describe the ledger domain:
//! entries, money amounts, calendar months, and the category catalogue.

pub mod category;
pub mod entry;
pub mod money;
pub mod period;

pub use category::CategoryCatalog;
pub use entry::{Entry, EntryKind, UnknownKind};
pub use money::{Money, MoneyParseError};
pub use period::{MonthParseError, YearMonth};
