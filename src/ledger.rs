//! The in-memory ledger
//!
//! A [`Ledger`] owns an ordered list of entries. Loading replaces the whole
//! list, adding appends, and saving only reads it.

use std::io::{Read, Write};
use std::path::Path;

use tracing::{info, warn};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Entry, YearMonth};
use crate::reports::MonthlySummary;
use crate::storage::{parse_record_line, read_text_required, write_atomic, ParsedLine, RejectedLine};

/// Outcome of loading ledger text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Number of lines turned into entries
    pub loaded: usize,
    /// Lines that were skipped because they could not be parsed
    pub rejected: Vec<RejectedLine>,
}

impl LoadReport {
    pub fn has_rejections(&self) -> bool {
        !self.rejected.is_empty()
    }
}

/// Ordered collection of income and expense entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    entries: Vec<Entry>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry
    pub fn add(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// All entries in insertion order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace every entry with the records parsed from `text`
    ///
    /// Malformed lines are reported and skipped; the load itself never fails.
    pub fn load_str(&mut self, text: &str) -> LoadReport {
        let mut report = LoadReport::default();
        let mut entries = Vec::new();

        for (idx, line) in text.lines().enumerate() {
            match parse_record_line(line) {
                Ok(ParsedLine::Skip) => {}
                Ok(ParsedLine::Entry(entry)) => entries.push(entry),
                Err(error) => {
                    warn!(line_number = idx + 1, %error, "skipping invalid record line");
                    report.rejected.push(RejectedLine {
                        line_number: idx + 1,
                        line: line.to_string(),
                        error,
                    });
                }
            }
        }

        report.loaded = entries.len();
        self.entries = entries;
        report
    }

    /// Read all of `reader`, then replace the entries with its records
    ///
    /// A read failure leaves the ledger untouched.
    pub fn load_from<R: Read>(&mut self, mut reader: R) -> TrackerResult<LoadReport> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(self.load_str(&text))
    }

    /// Load a ledger file, replacing the current entries
    ///
    /// Fails with a `NotFound` error if the file does not exist, in which case
    /// the ledger is left untouched.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> TrackerResult<LoadReport> {
        let path = path.as_ref();
        let text = read_text_required(path)?;
        let report = self.load_str(&text);
        info!(
            path = %path.display(),
            loaded = report.loaded,
            rejected = report.rejected.len(),
            "loaded ledger file"
        );
        Ok(report)
    }

    /// Write one record line per entry, in ledger order
    pub fn save_to<W: Write>(&self, mut writer: W) -> TrackerResult<()> {
        for entry in &self.entries {
            writeln!(writer, "{}", entry.to_record_line())
                .map_err(|e| TrackerError::Storage(format!("Failed to write record: {}", e)))?;
        }
        writer
            .flush()
            .map_err(|e| TrackerError::Storage(format!("Failed to flush records: {}", e)))
    }

    /// Save every entry to `path`, returning the number of lines written
    pub fn save_file<P: AsRef<Path>>(&self, path: P) -> TrackerResult<usize> {
        let path = path.as_ref();
        write_atomic(path, |writer| self.save_to(writer))?;
        info!(path = %path.display(), saved = self.len(), "saved ledger file");
        Ok(self.len())
    }

    /// Aggregate the entries dated within `month`
    pub fn monthly_summary(&self, month: YearMonth) -> MonthlySummary {
        MonthlySummary::from_entries(month, &self.entries)
    }

    /// Entries dated within `month`, in ledger order
    pub fn entries_in(&self, month: YearMonth) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(move |e| month.contains(e.date()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryKind, Money};
    use crate::storage::RecordError;
    use chrono::NaiveDate;
    use std::io;
    use tempfile::TempDir;

    fn entry(
        kind: EntryKind,
        ymd: (i32, u32, u32),
        category: &str,
        cents: i64,
        desc: &str,
    ) -> Entry {
        Entry::new(
            kind,
            NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2).unwrap(),
            category,
            Money::from_cents(cents),
            desc,
        )
    }

    fn saved_text(ledger: &Ledger) -> String {
        let mut buf = Vec::new();
        ledger.save_to(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk gone"))
        }
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_add_preserves_order_and_duplicates() {
        let mut ledger = Ledger::new();
        let a = entry(EntryKind::Expense, (2024, 1, 2), "food", 500, "a");
        let b = entry(EntryKind::Income, (2024, 1, 1), "salary", 100, "b");
        ledger.add(a.clone());
        ledger.add(b.clone());
        ledger.add(a.clone());

        assert_eq!(ledger.entries(), &[a.clone(), b, a]);
    }

    #[test]
    fn test_load_replaces_entries() {
        let mut ledger = Ledger::new();
        ledger.add(entry(EntryKind::Expense, (2020, 1, 1), "old", 1, ""));

        let report = ledger.load_str("income,2024-03-01,salary,1000.00,monthly pay\n");

        assert_eq!(report.loaded, 1);
        assert!(!report.has_rejections());
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.entries()[0].category(), "salary");
    }

    #[test]
    fn test_load_reports_and_skips_bad_lines() {
        let text = "\
# household ledger

income,2024-01-01,salary,2000,pay
expense,bad-date,food,10,lunch
expense,2024-01-01,food,-5,oops
expense,2024-01-01,food,0,free
income,2024-01-01,salary
bonus,2024-01-01,x,1
expense,2024-01-03,rent,800.00
";
        let mut ledger = Ledger::new();
        let report = ledger.load_str(text);

        assert_eq!(report.loaded, 3);
        assert_eq!(ledger.len(), 3);

        let rejected: Vec<_> = report
            .rejected
            .iter()
            .map(|r| (r.line_number, r.error.clone()))
            .collect();
        assert_eq!(
            rejected,
            vec![
                (4, RecordError::InvalidDate("bad-date".into())),
                (5, RecordError::NegativeAmount("-5".into())),
                (7, RecordError::TooFewFields(3)),
                (8, RecordError::UnknownKind("bonus".into())),
            ]
        );
        assert_eq!(report.rejected[0].line, "expense,bad-date,food,10,lunch");
        assert!(ledger.entries()[1].amount().is_zero());
    }

    #[test]
    fn test_load_of_only_comments_empties_ledger() {
        let mut ledger = Ledger::new();
        ledger.add(entry(EntryKind::Expense, (2024, 1, 1), "food", 1, ""));

        let report = ledger.load_str("# nothing here\n\n   \n");

        assert_eq!(report, LoadReport::default());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_load_handles_crlf() {
        let mut ledger = Ledger::new();
        let report =
            ledger.load_str("expense,2024-01-01,food,1.00,a\r\nexpense,2024-01-02,food,2.00,b\r\n");
        assert_eq!(report.loaded, 2);
        assert_eq!(ledger.entries()[0].description(), "a");
    }

    #[test]
    fn test_failed_read_leaves_ledger_untouched() {
        let mut ledger = Ledger::new();
        ledger.add(entry(EntryKind::Expense, (2024, 1, 1), "food", 1, "keep"));
        let before = ledger.clone();

        assert!(ledger.load_from(FailingReader).is_err());
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_missing_file_leaves_ledger_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let mut ledger = Ledger::new();
        ledger.add(entry(EntryKind::Expense, (2024, 1, 1), "food", 1, "keep"));

        let err = ledger.load_file(temp_dir.path().join("missing.csv")).unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_save_format() {
        let mut ledger = Ledger::new();
        ledger.add(entry(EntryKind::Income, (2024, 3, 1), "salary", 100000, "monthly pay"));
        ledger.add(entry(EntryKind::Expense, (2024, 3, 2), "food", 5, "rice, beans"));

        assert_eq!(
            saved_text(&ledger),
            "income,2024-03-01,salary,1000.00,monthly pay\n\
             expense,2024-03-02,food,0.05,rice  beans\n"
        );
    }

    #[test]
    fn test_save_of_empty_ledger_writes_nothing() {
        assert_eq!(saved_text(&Ledger::new()), "");
    }

    #[test]
    fn test_save_failure_surfaces() {
        let mut ledger = Ledger::new();
        ledger.add(entry(EntryKind::Income, (2024, 3, 1), "salary", 100, ""));
        let before = ledger.clone();

        let err = ledger.save_to(FailingWriter).unwrap_err();

        assert!(matches!(err, TrackerError::Storage(_)));
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_round_trip() {
        let mut ledger = Ledger::new();
        ledger.add(entry(EntryKind::Income, (2024, 3, 1), "salary", 100000, "monthly pay"));
        ledger.add(entry(EntryKind::Expense, (2024, 3, 2), "food", 1999, "groceries, weekly"));
        ledger.add(entry(EntryKind::Expense, (2024, 4, 30), "travel", 0, ""));

        let mut reloaded = Ledger::new();
        let report = reloaded.load_str(&saved_text(&ledger));

        assert_eq!(report.loaded, 3);
        assert_eq!(reloaded.entries()[0], ledger.entries()[0]);
        assert_eq!(reloaded.entries()[1].description(), "groceries  weekly");
        assert_eq!(reloaded.entries()[1].amount(), ledger.entries()[1].amount());
        assert_eq!(reloaded.entries()[2], ledger.entries()[2]);

        // A second cycle is stable
        assert_eq!(saved_text(&reloaded), saved_text(&ledger));
    }

    #[test]
    fn test_file_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("ledger.csv");

        let mut ledger = Ledger::new();
        ledger.add(entry(EntryKind::Income, (2024, 3, 1), "salary", 100000, "pay"));
        assert_eq!(ledger.save_file(&path).unwrap(), 1);

        let mut reloaded = Ledger::new();
        let report = reloaded.load_file(&path).unwrap();
        assert_eq!(report.loaded, 1);
        assert_eq!(reloaded, ledger);
    }

    #[test]
    fn test_entries_in_month() {
        let mut ledger = Ledger::new();
        ledger.add(entry(EntryKind::Expense, (2024, 2, 29), "food", 1, "feb"));
        ledger.add(entry(EntryKind::Expense, (2024, 3, 1), "food", 1, "mar"));

        let march = YearMonth::new(2024, 3).unwrap();
        let found: Vec<_> = ledger.entries_in(march).map(|e| e.description()).collect();
        assert_eq!(found, vec!["mar"]);
    }

    #[test]
    fn test_summary_of_near_maximum_amounts() {
        let mut ledger = Ledger::new();
        let report = ledger.load_str(
            "income,2024-03-01,salary,90000000000000000,a\n\
             income,2024-03-02,salary,90000000000000000,b\n\
             expense,2024-03-03,rent,92233720368547758.07,c\n",
        );
        assert_eq!(report.loaded, 3);
        assert!(!report.has_rejections());

        let summary = ledger.monthly_summary(YearMonth::new(2024, 3).unwrap());
        assert_eq!(summary.total_income.to_string(), "180000000000000000.00");
        assert_eq!(
            summary.income_by_category["salary"].to_string(),
            "180000000000000000.00"
        );
        assert_eq!(summary.net_savings.to_string(), "87766279631452241.93");
    }
}
