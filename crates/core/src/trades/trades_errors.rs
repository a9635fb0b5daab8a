use thiserror::Error;

/// Errors raised while importing a trade ledger.
///
/// `StructuralRow` and `Validation` are per-row: the importer records them
/// and moves on. `EmptyFile` aborts the whole import.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TradeImportError {
    #[error("Line {line}: expected at least {expected_min} columns, found {found}")]
    StructuralRow {
        line: usize,
        found: usize,
        expected_min: usize,
    },

    #[error("Line {line}: trade '{symbol}' failed validation ({})", .reasons.join(", "))]
    Validation {
        line: usize,
        symbol: String,
        reasons: Vec<String>,
    },

    #[error("No valid trades found: {0}")]
    EmptyFile(String),
}
