//! User settings for the expense tracker
//!
//! Holds the currency symbol used in reports, an optional default ledger
//! file, and the category lists offered during interactive entry.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

use super::paths::TrackerPaths;
use crate::error::TrackerError;
use crate::models::category::{DEFAULT_EXPENSE_CATEGORIES, DEFAULT_INCOME_CATEGORIES};
use crate::models::CategoryCatalog;
use crate::storage::{read_json, write_json_atomic};

/// User settings, persisted as `config.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Symbol prefixed to amounts in rendered reports (never in ledger files)
    #[serde(default)]
    pub currency_symbol: String,

    /// Ledger file used when `--file` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_ledger_file: Option<PathBuf>,

    #[serde(default = "default_income_categories")]
    pub income_categories: Vec<String>,

    #[serde(default = "default_expense_categories")]
    pub expense_categories: Vec<String>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_income_categories() -> Vec<String> {
    DEFAULT_INCOME_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

fn default_expense_categories() -> Vec<String> {
    DEFAULT_EXPENSE_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: String::new(),
            default_ledger_file: None,
            income_categories: default_income_categories(),
            expense_categories: default_expense_categories(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &TrackerPaths) -> Result<Self, TrackerError> {
        let settings_path = paths.settings_file();
        debug!(
            path = %settings_path.display(),
            exists = settings_path.exists(),
            "loading settings"
        );
        read_json(&settings_path)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TrackerPaths) -> Result<(), TrackerError> {
        write_json_atomic(paths.settings_file(), self)
    }

    /// Category lists as a catalogue, falling back to defaults for empty lists
    pub fn category_catalog(&self) -> CategoryCatalog {
        let income = if self.income_categories.is_empty() {
            default_income_categories()
        } else {
            self.income_categories.clone()
        };
        let expense = if self.expense_categories.is_empty() {
            default_expense_categories()
        } else {
            self.expense_categories.clone()
        };
        CategoryCatalog::new(income, expense)
    }

    /// The ledger file to use: explicit override, then settings, then default
    pub fn ledger_file(&self, paths: &TrackerPaths, override_path: Option<PathBuf>) -> PathBuf {
        override_path
            .or_else(|| self.default_ledger_file.clone())
            .unwrap_or_else(|| paths.default_ledger_file())
    }
}
