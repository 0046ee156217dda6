//! Monthly Summary Report
//!
//! Totals income and expenses for one calendar month, broken down by
//! category, and renders the result for the terminal or as an export.

use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Entry, EntryKind, Money, YearMonth};

/// Income and expense totals for one month
///
/// Categories without a matching entry are absent from the breakdowns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlySummary {
    pub month: YearMonth,
    pub total_income: Money,
    pub total_expense: Money,
    pub net_savings: Money,
    pub income_by_category: BTreeMap<String, Money>,
    pub expense_by_category: BTreeMap<String, Money>,
}

/// Running totals threaded through the fold
#[derive(Default)]
struct Totals {
    income: Money,
    expense: Money,
    income_by_category: BTreeMap<String, Money>,
    expense_by_category: BTreeMap<String, Money>,
}

impl Totals {
    fn with(mut self, entry: &Entry) -> Self {
        let (total, by_category) = match entry.kind() {
            EntryKind::Income => (&mut self.income, &mut self.income_by_category),
            EntryKind::Expense => (&mut self.expense, &mut self.expense_by_category),
        };
        *total += entry.amount();
        *by_category
            .entry(entry.category().to_string())
            .or_default() += entry.amount();
        self
    }
}

impl MonthlySummary {
    /// Summarize the entries dated within `month`
    pub fn from_entries<'a, I>(month: YearMonth, entries: I) -> Self
    where
        I: IntoIterator<Item = &'a Entry>,
    {
        let totals = entries
            .into_iter()
            .filter(|e| month.contains(e.date()))
            .fold(Totals::default(), Totals::with);

        Self {
            month,
            total_income: totals.income,
            total_expense: totals.expense,
            net_savings: totals.income - totals.expense,
            income_by_category: totals.income_by_category,
            expense_by_category: totals.expense_by_category,
        }
    }

    /// Check if no entry fell within the month
    pub fn is_empty(&self) -> bool {
        self.income_by_category.is_empty() && self.expense_by_category.is_empty()
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let money = |m: &Money| m.format_with_symbol(currency_symbol);
        let mut output = String::new();

        output.push_str(&format!("Summary for {}\n", self.month));
        output.push_str(&"-".repeat(25));
        output.push('\n');
        output.push_str(&format!("Total Income: {}\n", money(&self.total_income)));
        output.push_str(&format!("Total Expense: {}\n", money(&self.total_expense)));
        output.push_str(&format!("Net Savings: {}\n", money(&self.net_savings)));

        for (title, breakdown) in [
            ("Income by Category", &self.income_by_category),
            ("Expense by Category", &self.expense_by_category),
        ] {
            output.push_str(&format!("\n{}:\n", title));
            if breakdown.is_empty() {
                output.push_str("  None\n");
            }
            for (category, amount) in breakdown {
                output.push_str(&format!("  {}: {}\n", category, money(amount)));
            }
        }

        output
    }

    /// Export the summary as JSON
    pub fn export_json<W: Write>(&self, writer: &mut W) -> TrackerResult<()> {
        serde_json::to_writer_pretty(&mut *writer, self)
            .map_err(|e| TrackerError::Export(e.to_string()))?;
        writeln!(writer).map_err(|e| TrackerError::Export(e.to_string()))
    }

    /// Export the summary as YAML
    pub fn export_yaml<W: Write>(&self, writer: &mut W) -> TrackerResult<()> {
        serde_yaml::to_writer(writer, self).map_err(|e| TrackerError::Export(e.to_string()))
    }

    /// Export the summary to CSV: one row per category, then the totals
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> TrackerResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        let export_err = |e: csv::Error| TrackerError::Export(e.to_string());

        csv_writer
            .write_record(["Month", "Type", "Category", "Amount"])
            .map_err(export_err)?;

        let month = self.month.to_string();
        for (kind, breakdown) in [
            (EntryKind::Income, &self.income_by_category),
            (EntryKind::Expense, &self.expense_by_category),
        ] {
            for (category, amount) in breakdown {
                csv_writer
                    .write_record([
                        month.as_str(),
                        kind.as_str(),
                        category.as_str(),
                        amount.to_string().as_str(),
                    ])
                    .map_err(export_err)?;
            }
        }

        for (label, amount) in [
            ("TOTAL INCOME", self.total_income),
            ("TOTAL EXPENSE", self.total_expense),
            ("NET SAVINGS", self.net_savings),
        ] {
            csv_writer
                .write_record([month.as_str(), label, "", amount.to_string().as_str()])
                .map_err(export_err)?;
        }

        csv_writer
            .flush()
            .map_err(|e| TrackerError::Export(e.to_string()))
    }
}
