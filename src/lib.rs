//! Expense Tracker - a personal finance ledger for the terminal
//!
//! This library provides the core functionality for the expense tracker: an
//! in-memory ledger of dated income and expense entries, a plain-text record
//! file format, and monthly summaries broken down by category.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (entries, money, months, categories)
//! - `storage`: Record line parsing and file helpers
//! - `ledger`: The in-memory ledger with load/save
//! - `reports`: Monthly summary report and its exports
//! - `display`: Terminal formatting for entries and categories
//! - `shell`: Interactive menu session
//! - `cli`: One-shot command handlers
//! - `logging`: Tracing subscriber setup
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::{Ledger, YearMonth};
//!
//! let mut ledger = Ledger::new();
//! let report = ledger.load_file("transactions.csv")?;
//! let summary = ledger.monthly_summary(YearMonth::current());
//! println!("{}", summary.format_terminal(""));
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod reports;
pub mod shell;
pub mod storage;

pub use error::{TrackerError, TrackerResult};
pub use ledger::{Ledger, LoadReport};
pub use models::{Entry, EntryKind, Money, YearMonth};
pub use reports::MonthlySummary;
