use async_trait::async_trait;
use std::sync::RwLock;
use uuid::Uuid;

use super::trades_model::{ImportedTrade, Trade};
use super::trades_traits::TradeRepositoryTrait;
use crate::errors::{Error, Result};

/// Trade repository kept in process memory.
#[derive(Debug, Default)]
pub struct InMemoryTradeRepository {
    trades: RwLock<Vec<Trade>>,
}

impl InMemoryTradeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> Error {
    Error::Repository("trade store lock poisoned".to_string())
}

#[async_trait]
impl TradeRepositoryTrait for InMemoryTradeRepository {
    async fn insert_trades(&self, trades: Vec<ImportedTrade>) -> Result<Vec<Trade>> {
        let stored: Vec<Trade> = trades
            .into_iter()
            .map(|details| Trade {
                id: Uuid::new_v4().to_string(),
                details,
            })
            .collect();
        self.trades
            .write()
            .map_err(poisoned)?
            .extend(stored.iter().cloned());
        Ok(stored)
    }

    fn list_trades(&self) -> Result<Vec<Trade>> {
        Ok(self.trades.read().map_err(poisoned)?.clone())
    }
}
