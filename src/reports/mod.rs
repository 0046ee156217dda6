//! Reports module for the expense tracker
//!
//! Provides the monthly income/expense summary and its terminal and export
//! renderings.

pub mod monthly;

pub use monthly::MonthlySummary;
