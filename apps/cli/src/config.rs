use std::path::PathBuf;

use tradejournal_core::errors::ValidationError;
use tradejournal_core::{Error, Result};

pub struct Config {
    pub import_file: PathBuf,
    pub export_path: Option<PathBuf>,
    pub options_file: Option<PathBuf>,
}

impl Config {
    /// Reads configuration from the environment, after loading `.env`.
    ///
    /// The ledger path comes from the first command line argument, or from
    /// `TJ_IMPORT_FILE` when no argument is given.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_sources(std::env::args().nth(1), |key| std::env::var(key).ok())
    }

    fn from_sources(arg: Option<String>, var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| var(key).filter(|v| !v.trim().is_empty()).map(PathBuf::from);

        let import_file = arg
            .filter(|a| !a.trim().is_empty())
            .map(PathBuf::from)
            .or_else(|| non_empty("TJ_IMPORT_FILE"))
            .ok_or_else(|| {
                Error::Validation(ValidationError::MissingField("TJ_IMPORT_FILE".into()))
            })?;

        Ok(Self {
            import_file,
            export_path: non_empty("TJ_EXPORT_PATH"),
            options_file: non_empty("TJ_OPTIONS_FILE"),
        })
    }
}
