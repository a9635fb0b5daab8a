//! Registry trait consumed by the import pipeline.

use super::registry_model::{Account, Strategy};
use crate::errors::Result;

/// Lookup-or-create contract for strategy and account names.
///
/// Both `ensure_*` operations are idempotent upserts keyed by name. When an
/// implementation is shared between concurrent imports, the check and the
/// insert must happen atomically inside the implementation.
pub trait RegistryTrait: Send + Sync {
    /// Registers the strategy if no strategy with this name exists yet.
    fn ensure_strategy_exists(&self, name: &str) -> Result<()>;

    /// Registers the account if no account with this name exists yet.
    fn ensure_account_exists(&self, name: &str) -> Result<()>;

    /// Lists registered strategies in registration order.
    fn list_strategies(&self) -> Result<Vec<Strategy>>;

    /// Lists registered accounts in registration order.
    fn list_accounts(&self) -> Result<Vec<Account>>;
}
