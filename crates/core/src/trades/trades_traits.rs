//! Trade repository and service traits.
//!
//! These traits define the contract for trade persistence and import without
//! any storage-specific types.

use async_trait::async_trait;
use std::path::Path;

use super::trades_model::{ImportTradesResult, ImportedTrade, Trade};
use crate::errors::Result;

/// Trait defining the contract for Trade repository operations.
///
/// Accepted trades are handed over here after an import; the repository
/// owns them from then on.
#[async_trait]
pub trait TradeRepositoryTrait: Send + Sync {
    /// Stores trades in the given order, assigning each an id.
    async fn insert_trades(&self, trades: Vec<ImportedTrade>) -> Result<Vec<Trade>>;

    /// Lists stored trades in insertion order.
    fn list_trades(&self) -> Result<Vec<Trade>>;
}

/// Trait defining the contract for ledger import operations.
#[async_trait]
pub trait TradeImportServiceTrait: Send + Sync {
    /// Imports a ledger held in memory and stores the accepted trades.
    async fn import_csv(&self, content: &str) -> Result<ImportTradesResult>;

    /// Reads a ledger file and imports it.
    async fn import_file(&self, path: &Path) -> Result<ImportTradesResult>;

    /// Serializes every stored trade to CSV.
    fn export_trades(&self) -> Result<String>;
}
