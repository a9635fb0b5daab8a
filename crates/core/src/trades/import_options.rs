//! Import options with documented defaults.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ACCOUNT_NAME, DEFAULT_COLUMN_SLACK, DEFAULT_ORDER_TYPE, DEFAULT_STRATEGY_NAME,
    MIN_VALID_YEAR, TRUNCATED_YEAR_FALLBACK,
};
use crate::errors::{Error, Result};

/// Options for a ledger import. Unset fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImportOptions {
    /// Order type for rows without one (default: "Buy")
    pub default_order_type: Option<String>,
    /// Strategy for rows without one (default: "Imported Strategy")
    pub default_strategy: Option<String>,
    /// Account for rows without one (default: "Imported Account")
    pub default_account: Option<String>,
    /// Year substituted for three-digit years (default: 2025)
    pub truncated_year: Option<i32>,
    /// Trailing columns a row may omit (default: 2)
    pub column_slack: Option<usize>,
}

impl ImportOptions {
    /// Parses options from JSON and validates them.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: ImportOptions =
            serde_json::from_str(json).map_err(|e| Error::ConfigIO(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Rejects blank default names and truncated years that could never be valid.
    pub fn validate(&self) -> Result<()> {
        let names = [
            ("defaultOrderType", &self.default_order_type),
            ("defaultStrategy", &self.default_strategy),
            ("defaultAccount", &self.default_account),
        ];
        for (key, value) in names {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(Error::InvalidConfigValue(format!("{} must not be blank", key)));
            }
        }
        if let Some(year) = self.truncated_year {
            if year <= MIN_VALID_YEAR {
                return Err(Error::InvalidConfigValue(format!(
                    "truncatedYear must be after {}, got {}",
                    MIN_VALID_YEAR, year
                )));
            }
        }
        Ok(())
    }

    pub fn order_type_default(&self) -> &str {
        self.default_order_type
            .as_deref()
            .unwrap_or(DEFAULT_ORDER_TYPE)
    }

    pub fn strategy_default(&self) -> &str {
        self.default_strategy
            .as_deref()
            .unwrap_or(DEFAULT_STRATEGY_NAME)
    }

    pub fn account_default(&self) -> &str {
        self.default_account
            .as_deref()
            .unwrap_or(DEFAULT_ACCOUNT_NAME)
    }

    pub fn truncated_year_fallback(&self) -> i32 {
        self.truncated_year.unwrap_or(TRUNCATED_YEAR_FALLBACK)
    }

    pub fn slack(&self) -> usize {
        self.column_slack.unwrap_or(DEFAULT_COLUMN_SLACK)
    }

    /// Fewest tokens a data row needs to be extracted at all.
    pub fn min_columns(&self, header_count: usize) -> usize {
        header_count.saturating_sub(self.slack())
    }
}
