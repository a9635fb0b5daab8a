use async_trait::async_trait;
use log::{debug, info};
use std::path::Path;
use std::sync::Arc;

use super::csv_export::export_trades_csv;
use super::import_options::ImportOptions;
use super::trades_import::{import_trades_csv, import_trades_csv_bytes};
use super::trades_model::{ImportTradesResult, ImportedTrade};
use super::trades_traits::{TradeImportServiceTrait, TradeRepositoryTrait};
use crate::errors::{Error, Result, ValidationError};
use crate::registry::RegistryTrait;

/// Service for importing broker ledgers into the trade store
pub struct TradeImportService {
    registry: Arc<dyn RegistryTrait>,
    repository: Arc<dyn TradeRepositoryTrait>,
    options: ImportOptions,
}

impl TradeImportService {
    /// Creates a new TradeImportService instance
    pub fn new(
        registry: Arc<dyn RegistryTrait>,
        repository: Arc<dyn TradeRepositoryTrait>,
        options: ImportOptions,
    ) -> Self {
        Self {
            registry,
            repository,
            options,
        }
    }

    async fn persist(&self, result: ImportTradesResult) -> Result<ImportTradesResult> {
        let stored = self.repository.insert_trades(result.trades.clone()).await?;
        info!("Stored {} imported trades", stored.len());
        Ok(result)
    }
}

#[async_trait]
impl TradeImportServiceTrait for TradeImportService {
    async fn import_csv(&self, content: &str) -> Result<ImportTradesResult> {
        let result = import_trades_csv(content, self.registry.as_ref(), &self.options)?;
        self.persist(result).await
    }

    async fn import_file(&self, path: &Path) -> Result<ImportTradesResult> {
        let content = tokio::fs::read(path).await.map_err(|e| {
            Error::Validation(ValidationError::InvalidInput(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            )))
        })?;
        debug!("Read {} bytes from {}", content.len(), path.display());

        let result = import_trades_csv_bytes(&content, self.registry.as_ref(), &self.options)?;
        self.persist(result).await
    }

    fn export_trades(&self) -> Result<String> {
        let trades: Vec<ImportedTrade> = self
            .repository
            .list_trades()?
            .into_iter()
            .map(|t| t.details)
            .collect();
        export_trades_csv(&trades)
    }
}
