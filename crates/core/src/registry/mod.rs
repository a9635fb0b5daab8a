//! Registry module - strategies and accounts referenced by imported trades.

mod in_memory_registry;
mod registry_model;
mod registry_traits;


pub use in_memory_registry::InMemoryRegistry;
pub use registry_model::{Account, Strategy};
pub use registry_traits::RegistryTrait;
