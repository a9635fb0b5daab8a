//! Trade Journal Core - trade ledger import, domain models and traits.
//!
//! This crate contains the import pipeline that turns broker-exported CSV
//! ledgers into normalized trades. It is storage-agnostic and defines the
//! traits that persistence layers implement.

pub mod constants;
pub mod errors;
pub mod registry;
pub mod trades;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
