//! Trades module - ledger import pipeline, export, models, services, and traits.

mod column_mapping;
mod csv_export;
mod csv_tokenizer;
mod field_coercion;
mod import_options;
mod in_memory_repository;
mod row_extractor;
mod trades_errors;
mod trades_import;
mod trades_model;
mod trades_service;
mod trades_traits;




pub use column_mapping::{ColumnMap, TradeField, COLUMN_RULES};
pub use csv_export::export_trades_csv;
pub use csv_tokenizer::{normalize_header, normalize_headers, tokenize_line};
pub use field_coercion::{
    format_iso_date, parse_date, parse_date_with_year, parse_price, parse_quantity,
};
pub use import_options::ImportOptions;
pub use in_memory_repository::InMemoryTradeRepository;
pub use row_extractor::extract_trade;
pub use trades_errors::TradeImportError;
pub use trades_import::{import_trades_csv, import_trades_csv_bytes};
pub use trades_model::{
    ImportTradesResult, ImportTradesSummary, ImportedTrade, RowIssue, RowIssueKind, Trade,
};
pub use trades_service::TradeImportService;
pub use trades_traits::{TradeImportServiceTrait, TradeRepositoryTrait};
