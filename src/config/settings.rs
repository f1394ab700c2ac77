//! User settings
//!
//! Preferences that live outside the finance document, stored as
//! `config.json` in the base directory. Missing fields take their defaults,
//! so older or hand-trimmed files keep loading.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::paths::FinancePaths;
use crate::error::{FinanceError, FinanceResult};
use crate::storage::{read_text, write_text_atomic};

/// Storage key under which the finance document is persisted
pub const DEFAULT_STORAGE_KEY: &str = "finance-data";

/// Upper bound for the budget usage percentage shown in overviews
pub const DEFAULT_BUDGET_PERCENT_CAP: u32 = 150;

/// Newest settings layout this build understands
pub const SETTINGS_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub schema_version: u32,

    pub storage_key: String,

    /// Append every mutation to the audit log
    pub audit_enabled: bool,

    pub budget_percent_cap: u32,

    /// strftime pattern for dates in listings
    pub date_format: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: SETTINGS_SCHEMA_VERSION,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            audit_enabled: true,
            budget_percent_cap: DEFAULT_BUDGET_PERCENT_CAP,
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl Settings {
    /// Read `config.json`, or return defaults without writing anything
    pub fn load_or_create(paths: &FinancePaths) -> FinanceResult<Self> {
        let path = paths.settings_file();
        let Some(text) = read_text(&path)? else {
            return Ok(Self::default());
        };

        let settings: Self = serde_json::from_str(&text).map_err(|e| {
            FinanceError::Config(format!("Invalid settings in {}: {}", path.display(), e))
        })?;
        settings.validate().map_err(|reason| {
            FinanceError::Config(format!("Invalid settings in {}: {}", path.display(), reason))
        })?;
        Ok(settings)
    }

    /// Reject values that would fail later at display time
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version > SETTINGS_SCHEMA_VERSION {
            return Err(format!(
                "schema_version {} is newer than supported version {}",
                self.schema_version, SETTINGS_SCHEMA_VERSION
            ));
        }
        if self.date_format.is_empty() || !formats_dates(&self.date_format) {
            return Err(format!("unsupported date_format '{}'", self.date_format));
        }
        Ok(())
    }

    pub fn save(&self, paths: &FinancePaths) -> FinanceResult<()> {
        let text = serde_json::to_string_pretty(self)?;
        write_text_atomic(paths.settings_file(), &text)
    }
}

/// True when `pattern` parses and renders a plain calendar date.
///
/// Time-of-day specifiers such as `%H` parse fine but cannot format a
/// `NaiveDate`, so a trial render is needed as well.
fn formats_dates(pattern: &str) -> bool {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return false;
    }
    let mut out = String::new();
    write!(out, "{}", NaiveDate::default().format(pattern)).is_ok()
}
