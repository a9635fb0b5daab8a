//! Core error types for the trade journal.
//!
//! This module defines storage-agnostic error types. Collaborators (registry,
//! trade store) convert their own failures into these variants.

use thiserror::Error;

use crate::trades::TradeImportError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the trade journal.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Trade import failed: {0}")]
    Import(#[from] TradeImportError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Registry operation failed: {0}")]
    Registry(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Failed to load configuration: {0}")]
    ConfigIO(String),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),
}

// === From implementations for common error types ===

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Unexpected(format!("CSV write failed: {}", err))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
