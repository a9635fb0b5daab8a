use log::debug;

use super::column_mapping::{ColumnMap, TradeField};
use super::field_coercion::{parse_date_with_year, parse_price, parse_quantity};
use super::import_options::ImportOptions;
use super::trades_model::ImportedTrade;

/// Builds a trade from one tokenized data row.
///
/// Mapped fields read their column directly. Unmapped fields search the
/// headers with the field's fallback names and take the first non-empty
/// value found. Empty text fields get the defaults from `options`.
pub fn extract_trade(
    row: &[String],
    headers: &[String],
    column_map: &ColumnMap,
    options: &ImportOptions,
) -> ImportedTrade {
    let value = |field: TradeField| field_value(row, headers, column_map, field);
    let text_or = |field: TradeField, default: &str| {
        let v = value(field);
        if v.is_empty() {
            default.to_string()
        } else {
            v.to_string()
        }
    };
    let truncated_year = options.truncated_year_fallback();

    ImportedTrade {
        symbol: value(TradeField::Symbol).to_string(),
        entry_date: parse_date_with_year(value(TradeField::EntryDate), truncated_year),
        exit_date: parse_date_with_year(value(TradeField::ExitDate), truncated_year),
        entry_price: parse_price(value(TradeField::EntryPrice)),
        exit_price: parse_price(value(TradeField::ExitPrice)),
        quantity: parse_quantity(value(TradeField::Quantity)),
        order_type: text_or(TradeField::OrderType, options.order_type_default()),
        strategy: text_or(TradeField::Strategy, options.strategy_default()),
        account: text_or(TradeField::Account, options.account_default()),
        stop_loss: None,
        target: None,
    }
}

fn field_value<'a>(
    row: &'a [String],
    headers: &[String],
    column_map: &ColumnMap,
    field: TradeField,
) -> &'a str {
    if let Some(index) = column_map.get(field) {
        return row.get(index).map_or("", String::as_str);
    }

    for name in field.fallback_names() {
        let Some(index) = headers.iter().position(|h| h.contains(name)) else {
            continue;
        };
        if let Some(value) = row.get(index).filter(|v| !v.is_empty()) {
            debug!(
                "Field {} read from fallback header '{}'",
                field, headers[index]
            );
            return value;
        }
    }
    ""
}
