//! Interactive menu session
//!
//! A [`Session`] owns the ledger for the lifetime of one interactive run and
//! drives it from a numbered menu. Every answer is validated here, so the
//! ledger only ever receives typed values. Bad answers are re-asked, except
//! file paths, which report the problem and return to the menu.

pub mod prompt;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::error::TrackerResult;
use crate::ledger::Ledger;
use crate::models::{CategoryCatalog, Entry, EntryKind, Money, YearMonth};
use crate::storage::parse_iso_date;

pub use prompt::Prompter;

/// Whether the menu loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Strip surrounding whitespace and one pair of double quotes from a path
///
/// Returns `None` for an empty path.
pub fn normalize_path_input(input: &str) -> Option<PathBuf> {
    let trimmed = input.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);

    (!unquoted.is_empty()).then(|| PathBuf::from(unquoted))
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Interactive session over a ledger
pub struct Session<R, W> {
    ledger: Ledger,
    catalog: CategoryCatalog,
    currency_symbol: String,
    prompter: Prompter<R, W>,
    today: fn() -> NaiveDate,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(ledger: Ledger, catalog: CategoryCatalog, input: R, output: W) -> Self {
        Self {
            ledger,
            catalog,
            currency_symbol: String::new(),
            prompter: Prompter::new(input, output),
            today: local_today,
        }
    }

    /// Prefix report amounts with `symbol`
    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    /// Replace the clock used for blank dates and the default month
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn into_parts(self) -> (Ledger, R, W) {
        let (input, output) = self.prompter.into_inner();
        (self.ledger, input, output)
    }

    /// Run the menu until the user exits or input ends
    pub fn run(&mut self) -> TrackerResult<()> {
        self.prompter.say("Welcome to Expense Tracker!")?;

        loop {
            self.prompter.say("\nChoose an option:")?;
            self.prompter.say("1. Add Income/Expense")?;
            self.prompter.say("2. View Monthly Summary")?;
            self.prompter.say("3. Load transactions from file")?;
            self.prompter.say("4. Save transactions to file")?;
            self.prompter.say("5. Exit")?;

            let Some(choice) = self.prompter.ask("Your choice: ")? else {
                break;
            };

            let flow = match choice.as_str() {
                "1" => self.add_entry()?,
                "2" => self.show_summary()?,
                "3" => self.load_from_file()?,
                "4" => self.save_to_file()?,
                "5" => Flow::Quit,
                _ => {
                    self.prompter.say("Invalid choice. Try again.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Quit {
                break;
            }
        }

        self.prompter.say("Exiting... Goodbye!")
    }

    fn add_entry(&mut self) -> TrackerResult<Flow> {
        let Some(kind) = self.ask_kind()? else {
            return Ok(Flow::Quit);
        };
        let Some(category) = self.ask_category(kind)? else {
            return Ok(Flow::Quit);
        };
        let Some(amount) = self.ask_amount()? else {
            return Ok(Flow::Quit);
        };
        let Some(date) = self.ask_date()? else {
            return Ok(Flow::Quit);
        };
        let Some(description) = self.prompter.ask("Enter description (optional): ")? else {
            return Ok(Flow::Quit);
        };

        let entry = Entry::new(kind, date, category, amount, description);
        self.prompter.say(format!("Transaction added: {}", entry))?;
        self.ledger.add(entry);
        Ok(Flow::Continue)
    }

    fn ask_kind(&mut self) -> TrackerResult<Option<EntryKind>> {
        loop {
            let Some(answer) = self.prompter.ask("Enter type (income/expense): ")? else {
                return Ok(None);
            };
            match answer.parse::<EntryKind>() {
                Ok(kind) => return Ok(Some(kind)),
                Err(_) => self
                    .prompter
                    .say("Invalid type, please enter 'income' or 'expense'.")?,
            }
        }
    }

    fn ask_category(&mut self, kind: EntryKind) -> TrackerResult<Option<String>> {
        self.prompter.say("Choose category:")?;
        let listing: Vec<String> = self
            .catalog
            .for_kind(kind)
            .iter()
            .enumerate()
            .map(|(idx, name)| format!("{}. {}", idx + 1, name))
            .collect();
        for line in listing {
            self.prompter.say(line)?;
        }

        loop {
            let Some(answer) = self.prompter.ask("Category number: ")? else {
                return Ok(None);
            };
            match answer.parse::<usize>() {
                Ok(number) => match self.catalog.by_number(kind, number) {
                    Some(name) => return Ok(Some(name.to_string())),
                    None => self.prompter.say("Invalid number, try again.")?,
                },
                Err(_) => self.prompter.say("Invalid input, enter a number.")?,
            }
        }
    }

    fn ask_amount(&mut self) -> TrackerResult<Option<Money>> {
        loop {
            let Some(answer) = self.prompter.ask("Enter amount: ")? else {
                return Ok(None);
            };
            match Money::parse(&answer) {
                Ok(amount) if amount.is_positive() => return Ok(Some(amount)),
                Ok(_) => self.prompter.say("Amount must be positive.")?,
                Err(_) => self.prompter.say("Invalid amount, enter a number.")?,
            }
        }
    }

    fn ask_date(&mut self) -> TrackerResult<Option<NaiveDate>> {
        loop {
            let Some(answer) = self
                .prompter
                .ask("Enter date (yyyy-MM-dd) or leave blank for today: ")?
            else {
                return Ok(None);
            };
            if answer.is_empty() {
                return Ok(Some((self.today)()));
            }
            match parse_iso_date(&answer) {
                Some(date) => return Ok(Some(date)),
                None => self.prompter.say("Invalid date format. Please try again.")?,
            }
        }
    }

    fn show_summary(&mut self) -> TrackerResult<Flow> {
        let Some(answer) = self.prompter.ask(
            "Enter month and year to view summary (yyyy-MM), leave blank for current month: ",
        )?
        else {
            return Ok(Flow::Quit);
        };

        let current = YearMonth::from_date((self.today)());
        let month = if answer.is_empty() {
            current
        } else {
            match YearMonth::parse(&answer) {
                Ok(month) => month,
                Err(_) => {
                    self.prompter.say("Invalid format. Using current month.")?;
                    current
                }
            }
        };

        let summary = self.ledger.monthly_summary(month);
        self.prompter.say("")?;
        self.prompter
            .say(summary.format_terminal(&self.currency_symbol).trim_end())?;
        Ok(Flow::Continue)
    }

    fn ask_path(&mut self, prompt: &str) -> TrackerResult<Option<Option<PathBuf>>> {
        let Some(answer) = self.prompter.ask(prompt)? else {
            return Ok(None);
        };
        let path = normalize_path_input(&answer);
        if path.is_none() {
            self.prompter.say("Invalid file path. Please try again.")?;
        }
        Ok(Some(path))
    }

    fn load_from_file(&mut self) -> TrackerResult<Flow> {
        let Some(path) = self.ask_path("Enter file path to load transactions: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(path) = path else {
            return Ok(Flow::Continue);
        };

        if !path.exists() {
            self.prompter.say("File does not exist.")?;
            return Ok(Flow::Continue);
        }

        match self.ledger.load_file(&path) {
            Ok(report) => {
                for rejected in &report.rejected {
                    self.prompter.say(format!(
                        "Invalid line {} (skipping): {} ({})",
                        rejected.line_number, rejected.line, rejected.error
                    ))?;
                }
                self.prompter
                    .say(format!("{} transactions loaded successfully.", report.loaded))?;
            }
            Err(e) => self.prompter.say(format!("Error loading from file: {}", e))?,
        }
        Ok(Flow::Continue)
    }

    fn save_to_file(&mut self) -> TrackerResult<Flow> {
        let Some(path) = self.ask_path("Enter file path to save transactions: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(path) = path else {
            return Ok(Flow::Continue);
        };

        match self.ledger.save_file(&path) {
            Ok(_) => self.prompter.say("Transactions saved to file successfully.")?,
            Err(e) => self.prompter.say(format!("Error saving file: {}", e))?,
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    /// Run a session with `script` as stdin, returning the ledger and output
    fn run_script(ledger: Ledger, script: &str) -> (Ledger, String) {
        run_bytes(ledger, script.as_bytes())
    }

    fn run_bytes(ledger: Ledger, input: &[u8]) -> (Ledger, String) {
        let mut session = Session::new(
            ledger,
            CategoryCatalog::default(),
            Cursor::new(input.to_vec()),
            Vec::new(),
        )
        .with_today(fixed_today);
        session.run().unwrap();

        let (ledger, _, output) = session.into_parts();
        (ledger, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_normalize_path_input() {
        assert_eq!(
            normalize_path_input("  \"my file.csv\" "),
            Some(PathBuf::from("my file.csv"))
        );
        assert_eq!(normalize_path_input("plain.csv"), Some(PathBuf::from("plain.csv")));
        assert_eq!(normalize_path_input("\"half.csv"), Some(PathBuf::from("\"half.csv")));
        assert_eq!(normalize_path_input("   "), None);
        assert_eq!(normalize_path_input("\"\""), None);
    }

    #[test]
    fn test_exit_immediately() {
        let (ledger, output) = run_script(Ledger::new(), "5\n");
        assert!(ledger.is_empty());
        assert!(output.starts_with("Welcome to Expense Tracker!"));
        assert!(output.ends_with("Exiting... Goodbye!\n"));
    }

    #[test]
    fn test_end_of_input_exits() {
        let (_, output) = run_script(Ledger::new(), "");
        assert!(output.ends_with("Exiting... Goodbye!\n"));
    }

    #[test]
    fn test_invalid_menu_choice() {
        let (_, output) = run_script(Ledger::new(), "9\n5\n");
        assert!(output.contains("Invalid choice. Try again."));
    }

    #[test]
    fn test_invalid_utf8_input_is_reprompted() {
        let script = b"\xff\xfe\n1\nin\xffcome\nincome\n1\n10\n\n\n5\n";
        let (ledger, output) = run_bytes(Ledger::new(), script);
        assert_eq!(output.matches("Invalid choice. Try again.").count(), 1);
        assert!(output.contains("Invalid type, please enter 'income' or 'expense'."));
        assert!(output.ends_with("Exiting... Goodbye!\n"));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_add_entry_with_reprompts() {
        let script = "1\n\
                      transfer\n\
                      Expense\n\
                      x\n\
                      7\n\
                      2\n\
                      abc\n\
                      0\n\
                      -4\n\
                      800\n\
                      2024-13-01\n\
                      2024-03-01\n\
                      March, rent\n\
                      5\n";
        let (ledger, output) = run_script(Ledger::new(), script);

        assert_eq!(ledger.len(), 1);
        let entry = &ledger.entries()[0];
        assert_eq!(entry.kind(), EntryKind::Expense);
        assert_eq!(entry.category(), "rent");
        assert_eq!(entry.amount(), Money::from_cents(80000));
        assert_eq!(entry.date(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(entry.description(), "March, rent");

        assert!(output.contains("Invalid type, please enter 'income' or 'expense'."));
        assert!(output.contains("1. food\n2. rent\n3. travel\n4. other\n"));
        assert!(output.contains("Invalid input, enter a number."));
        assert!(output.contains("Invalid number, try again."));
        assert!(output.contains("Invalid amount, enter a number."));
        assert_eq!(output.matches("Amount must be positive.").count(), 2);
        assert!(output.contains("Invalid date format. Please try again."));
        assert!(output
            .contains("Transaction added: EXPENSE | 2024-03-01 | 800.00 | rent | March, rent"));
    }

    #[test]
    fn test_blank_date_uses_today() {
        let (ledger, _) = run_script(Ledger::new(), "1\nincome\n1\n1000\n\n\n5\n");
        assert_eq!(ledger.entries()[0].date(), fixed_today());
        assert_eq!(ledger.entries()[0].description(), "");
    }

    #[test]
    fn test_input_ending_mid_entry_adds_nothing() {
        let (ledger, output) = run_script(Ledger::new(), "1\nincome\n1\n");
        assert!(ledger.is_empty());
        assert!(output.ends_with("Exiting... Goodbye!\n"));
    }

    #[test]
    fn test_summary_for_month() {
        let mut ledger = Ledger::new();
        ledger.load_str(
            "income,2024-03-01,salary,1000.00,monthly pay\nexpense,2024-02-01,food,5,old\n",
        );

        let (_, output) = run_script(ledger, "2\n2024-03\n5\n");

        assert!(output.contains("Summary for 2024-03"));
        assert!(output.contains("Total Income: 1000.00"));
        assert!(output.contains("  salary: 1000.00"));
        assert!(output.contains("Expense by Category:\n  None"));
    }

    #[test]
    fn test_summary_blank_and_invalid_month_use_current() {
        let (_, output) = run_script(Ledger::new(), "2\n\n2\nMarch\n5\n");
        assert_eq!(output.matches("Summary for 2024-03").count(), 2);
        assert_eq!(output.matches("Invalid format. Using current month.").count(), 1);
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.csv");
        let path_str = path.display().to_string();

        let mut ledger = Ledger::new();
        ledger.load_str("income,2024-03-01,salary,1000.00,pay\n");

        let (_, output) = run_script(ledger, &format!("4\n\"{}\"\n5\n", path_str));
        assert!(output.contains("Transactions saved to file successfully."));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "income,2024-03-01,salary,1000.00,pay\n"
        );

        let (loaded, output) = run_script(Ledger::new(), &format!("3\n{}\n5\n", path_str));
        assert!(output.contains("1 transactions loaded successfully."));
        assert_eq!(loaded.len(), 1);
    }

    #[test]
    fn test_load_reports_rejected_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.csv");
        std::fs::write(
            &path,
            "# comment\nexpense,bad-date,food,10,lunch\nexpense,2024-01-01,food,10,lunch\n",
        )
        .unwrap();

        let (ledger, output) = run_script(Ledger::new(), &format!("3\n{}\n5\n", path.display()));

        assert_eq!(ledger.len(), 1);
        assert!(output.contains(
            "Invalid line 2 (skipping): expense,bad-date,food,10,lunch (invalid date 'bad-date')"
        ));
        assert!(output.contains("1 transactions loaded successfully."));
        assert!(!output.contains("# comment"));
    }

    #[test]
    fn test_load_missing_file_returns_to_menu() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.csv");

        let mut ledger = Ledger::new();
        ledger.load_str("expense,2024-01-01,food,1,keep\n");

        let (ledger, output) = run_script(ledger, &format!("3\n{}\n5\n", missing.display()));

        assert!(output.contains("File does not exist."));
        assert_eq!(ledger.len(), 1);
        assert!(output.ends_with("Exiting... Goodbye!\n"));
    }

    #[test]
    fn test_empty_path_returns_to_menu() {
        let (_, output) = run_script(Ledger::new(), "4\n\n5\n");
        assert!(output.contains("Invalid file path. Please try again."));
        assert!(output.ends_with("Exiting... Goodbye!\n"));
    }

    #[test]
    fn test_save_failure_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        // A directory cannot be replaced by the saved file
        let target = temp_dir.path().join("taken");
        std::fs::create_dir_all(target.join("child")).unwrap();

        let (_, output) = run_script(Ledger::new(), &format!("4\n{}\n5\n", target.display()));

        assert!(output.contains("Error saving file:"));
        assert!(output.ends_with("Exiting... Goodbye!\n"));
    }
}
