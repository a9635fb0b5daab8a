//! Ledger import: tokenize, map, extract, validate and aggregate.

use log::{debug, info, warn};

use super::column_mapping::ColumnMap;
use super::csv_tokenizer::{normalize_headers, tokenize_line};
use super::import_options::ImportOptions;
use super::row_extractor::extract_trade;
use super::trades_errors::TradeImportError;
use super::trades_model::{ImportTradesResult, RowIssue, RowIssueKind};
use crate::errors::Result;
use crate::registry::RegistryTrait;

/// Imports a ledger held in memory.
///
/// The first non-blank line is the header. Blank lines are skipped without
/// being counted, and issue line numbers refer to the untrimmed input. A line
/// with too few columns, or whose trade fails validation, is recorded as an
/// issue and the import moves on. Every accepted trade has its strategy and
/// account registered before it is appended.
///
/// Fails with [`TradeImportError::EmptyFile`] when there are no data lines or
/// no line produced a valid trade. Registry failures abort the import.
pub fn import_trades_csv(
    content: &str,
    registry: &dyn RegistryTrait,
    options: &ImportOptions,
) -> Result<ImportTradesResult> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content
        .split('\n')
        .enumerate()
        .map(|(index, line)| (index + 1, line));

    let header_line = lines
        .by_ref()
        .find(|(_, line)| !line.trim().is_empty())
        .map_or("", |(_, line)| line);
    let headers = normalize_headers(&tokenize_line(header_line));
    let column_map = ColumnMap::from_headers(&headers);
    debug!("Parsed headers: {:?}", headers);
    debug!(
        "Column mapping: {:?}, unresolved: {:?}",
        column_map.resolved().collect::<Vec<_>>(),
        column_map.unresolved()
    );

    let min_columns = options.min_columns(headers.len());
    let mut result = ImportTradesResult::default();

    for (line_number, raw_line) in lines {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let values = tokenize_line(line);
        if values.len() < min_columns {
            record_issue(
                &mut result,
                line_number,
                RowIssueKind::Structural,
                TradeImportError::StructuralRow {
                    line: line_number,
                    found: values.len(),
                    expected_min: min_columns,
                },
            );
            continue;
        }

        let trade = extract_trade(&values, &headers, &column_map, options);
        let failures = trade.validation_failures();
        if !failures.is_empty() {
            record_issue(
                &mut result,
                line_number,
                RowIssueKind::Validation,
                TradeImportError::Validation {
                    line: line_number,
                    symbol: trade.symbol.clone(),
                    reasons: failures.into_iter().map(String::from).collect(),
                },
            );
            continue;
        }

        registry.ensure_strategy_exists(&trade.strategy)?;
        registry.ensure_account_exists(&trade.account)?;

        debug!("Line {}: accepted {}", line_number, trade.symbol);
        result.trades.push(trade);
        result.success_count += 1;
    }

    if result.success_count + result.error_count == 0 {
        return Err(TradeImportError::EmptyFile("the file has no data rows".to_string()).into());
    }
    if result.trades.is_empty() {
        return Err(TradeImportError::EmptyFile(format!(
            "all {} data rows were rejected",
            result.error_count
        ))
        .into());
    }

    info!("CSV import finished: {}", result.summary());
    Ok(result)
}

/// Imports a ledger from raw bytes.
///
/// A UTF-8 byte order mark is dropped. Invalid UTF-8 is decoded lossily and
/// logged rather than rejected.
pub fn import_trades_csv_bytes(
    content: &[u8],
    registry: &dyn RegistryTrait,
    options: &ImportOptions,
) -> Result<ImportTradesResult> {
    let content = content.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(content);
    match std::str::from_utf8(content) {
        Ok(text) => import_trades_csv(text, registry, options),
        Err(e) => {
            warn!(
                "Invalid UTF-8 encoding at byte {}: {}. Some characters may be replaced.",
                e.valid_up_to(),
                e
            );
            import_trades_csv(&String::from_utf8_lossy(content), registry, options)
        }
    }
}

fn record_issue(
    result: &mut ImportTradesResult,
    line: usize,
    kind: RowIssueKind,
    error: TradeImportError,
) {
    warn!("{}", error);
    result.issues.push(RowIssue {
        line,
        kind,
        message: error.to_string(),
    });
    result.error_count += 1;
}
