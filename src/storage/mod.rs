//! Storage layer for the expense tracker
//!
//! Ledger files are plain text, one record per line. This module holds the
//! record line parser and the low-level file helpers; the [`crate::ledger`]
//! module ties them together.

pub mod file_io;
pub mod records;

pub use file_io::{append_line, read_json, read_text_required, write_atomic, write_json_atomic};
pub use records::{parse_iso_date, parse_record_line, ParsedLine, RecordError, RejectedLine};
