//! Trade domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A trade assembled from one ledger row.
///
/// Dates serialize as `YYYY-MM-DD`, or `""` when absent. A missing exit date
/// marks an open position. Stop loss and target are never present in broker
/// ledgers and stay `None` on import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedTrade {
    pub symbol: String,
    #[serde(with = "iso_date_or_empty")]
    pub entry_date: Option<NaiveDate>,
    #[serde(with = "iso_date_or_empty")]
    pub exit_date: Option<NaiveDate>,
    pub entry_price: Option<Decimal>,
    pub exit_price: Option<Decimal>,
    pub quantity: u32,
    pub order_type: String,
    pub strategy: String,
    pub account: String,
    pub stop_loss: Option<Decimal>,
    pub target: Option<Decimal>,
}

impl ImportedTrade {
    /// Names of the acceptance checks this trade fails. Empty when valid.
    pub fn validation_failures(&self) -> Vec<&'static str> {
        let mut failures = Vec::new();
        if self.symbol.trim().is_empty() {
            failures.push("missing symbol");
        }
        if self.entry_date.is_none() {
            failures.push("missing entry date");
        }
        if !self.entry_price.is_some_and(|p| p > Decimal::ZERO) {
            failures.push("entry price must be positive");
        }
        if self.quantity == 0 {
            failures.push("quantity must be positive");
        }
        if self.strategy.trim().is_empty() {
            failures.push("missing strategy");
        }
        if self.account.trim().is_empty() {
            failures.push("missing account");
        }
        failures
    }

    pub fn is_valid(&self) -> bool {
        self.validation_failures().is_empty()
    }

    pub fn is_open(&self) -> bool {
        self.exit_date.is_none()
    }

    /// Profit or loss of a closed trade; `None` while the position is open.
    ///
    /// Anything other than a buy is treated as a short.
    pub fn realized_pnl(&self) -> Option<Decimal> {
        self.exit_date?;
        let exit = self.exit_price?;
        let entry = self.entry_price?;
        let pnl = (exit - entry) * Decimal::from(self.quantity);
        if self.order_type.eq_ignore_ascii_case("buy") {
            Some(pnl)
        } else {
            Some(-pnl)
        }
    }
}

/// An accepted trade after it has been handed to a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: String,
    #[serde(flatten)]
    pub details: ImportedTrade,
}

/// Why a ledger line was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RowIssueKind {
    /// Too few columns to extract a trade
    Structural,
    /// A trade was extracted but failed validation
    Validation,
}

/// A rejected ledger line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowIssue {
    /// 1-based line number in the source file (the header is line 1)
    pub line: usize,
    pub kind: RowIssueKind,
    pub message: String,
}

/// Outcome of a ledger import.
///
/// `success_count == trades.len()` and `success_count + error_count` equals
/// the number of non-blank data lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImportTradesResult {
    /// Accepted trades in input order
    pub trades: Vec<ImportedTrade>,
    pub success_count: usize,
    pub error_count: usize,
    /// One entry per rejected line
    pub issues: Vec<RowIssue>,
}

impl ImportTradesResult {
    pub fn summary(&self) -> ImportTradesSummary {
        let open_positions = self.trades.iter().filter(|t| t.is_open()).count();
        ImportTradesSummary {
            total_processed: self.success_count + self.error_count,
            success_count: self.success_count,
            error_count: self.error_count,
            open_positions,
            closed_positions: self.trades.len() - open_positions,
        }
    }
}

/// Summary statistics for a ledger import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImportTradesSummary {
    /// Non-blank data lines scanned
    pub total_processed: usize,
    pub success_count: usize,
    pub error_count: usize,
    pub open_positions: usize,
    pub closed_positions: usize,
}

impl fmt::Display for ImportTradesSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} imported, {} rejected, {} lines processed ({} open, {} closed)",
            self.success_count,
            self.error_count,
            self.total_processed,
            self.open_positions,
            self.closed_positions
        )
    }
}

mod iso_date_or_empty {
    use chrono::NaiveDate;
    use serde::{self, Deserialize, Deserializer, Serializer};

    use crate::trades::field_coercion::format_iso_date;

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_iso_date(*date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("Invalid date {}: {}", s, e)))
    }
}
