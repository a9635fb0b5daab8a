use csv::{QuoteStyle, Terminator, WriterBuilder};
use rust_decimal::Decimal;

use super::field_coercion::format_iso_date;
use super::trades_model::ImportedTrade;
use crate::constants::EXPORT_HEADERS;
use crate::errors::{Error, Result};

fn decimal_cell(value: Option<Decimal>) -> String {
    value.map(|v| v.normalize().to_string()).unwrap_or_default()
}

/// Serializes trades to CSV with the fixed export header.
///
/// Absent values are written as empty cells. Values containing a comma or
/// quote are quoted; everything this importer produces is written plain.
pub fn export_trades_csv(trades: &[ImportedTrade]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(EXPORT_HEADERS)?;
    for trade in trades {
        writer.write_record([
            trade.symbol.clone(),
            format_iso_date(trade.entry_date),
            decimal_cell(trade.entry_price),
            decimal_cell(trade.stop_loss),
            decimal_cell(trade.target),
            format_iso_date(trade.exit_date),
            decimal_cell(trade.exit_price),
            trade.order_type.clone(),
            trade.strategy.clone(),
            trade.account.clone(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Unexpected(format!("CSV writer flush failed: {}", e)))?;
    let mut output = String::from_utf8(bytes).map_err(|e| Error::Unexpected(e.to_string()))?;
    if output.ends_with('\n') {
        output.pop();
    }
    Ok(output)
}
