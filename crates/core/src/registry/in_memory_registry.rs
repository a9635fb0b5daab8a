use chrono::Utc;
use log::debug;
use std::sync::RwLock;
use uuid::Uuid;

use super::registry_model::{Account, Strategy};
use super::registry_traits::RegistryTrait;
use crate::errors::{Error, Result};

#[derive(Debug, Default)]
struct RegistryState {
    strategies: Vec<Strategy>,
    accounts: Vec<Account>,
}

/// Process-local registry backed by a single lock.
///
/// The existence check and the insert run under the same write guard, so
/// concurrent `ensure_*` calls for one name create exactly one entry.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    state: RwLock<RegistryState>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry seeded with existing strategy and account names.
    pub fn with_names(strategies: &[&str], accounts: &[&str]) -> Result<Self> {
        let registry = Self::new();
        for name in strategies {
            registry.ensure_strategy_exists(name)?;
        }
        for name in accounts {
            registry.ensure_account_exists(name)?;
        }
        Ok(registry)
    }
}

fn poisoned<T>(_: T) -> Error {
    Error::Registry("registry lock poisoned".to_string())
}

impl RegistryTrait for InMemoryRegistry {
    fn ensure_strategy_exists(&self, name: &str) -> Result<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.strategies.iter().any(|s| s.name == name) {
            return Ok(());
        }
        debug!("Registering new strategy '{}'", name);
        state.strategies.push(Strategy {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            created_at: Utc::now().naive_utc(),
        });
        Ok(())
    }

    fn ensure_account_exists(&self, name: &str) -> Result<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.accounts.iter().any(|a| a.name == name) {
            return Ok(());
        }
        debug!("Registering new account '{}'", name);
        state.accounts.push(Account {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            created_at: Utc::now().naive_utc(),
        });
        Ok(())
    }

    fn list_strategies(&self) -> Result<Vec<Strategy>> {
        Ok(self.state.read().map_err(poisoned)?.strategies.clone())
    }

    fn list_accounts(&self) -> Result<Vec<Account>> {
        Ok(self.state.read().map_err(poisoned)?.accounts.clone())
    }
}
