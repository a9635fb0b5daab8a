//! Fuzzy, order-independent mapping from normalized headers to trade fields.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical trade attributes a ledger column can be mapped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TradeField {
    Symbol,
    EntryDate,
    ExitDate,
    EntryPrice,
    ExitPrice,
    Quantity,
    OrderType,
    Strategy,
    Account,
}

impl TradeField {
    pub const ALL: [TradeField; 9] = [
        TradeField::Symbol,
        TradeField::EntryDate,
        TradeField::ExitDate,
        TradeField::EntryPrice,
        TradeField::ExitPrice,
        TradeField::Quantity,
        TradeField::OrderType,
        TradeField::Strategy,
        TradeField::Account,
    ];

    /// Key used in logs and serialized output.
    pub fn key(self) -> &'static str {
        match self {
            TradeField::Symbol => "symbol",
            TradeField::EntryDate => "entryDate",
            TradeField::ExitDate => "exitDate",
            TradeField::EntryPrice => "entryPrice",
            TradeField::ExitPrice => "exitPrice",
            TradeField::Quantity => "quantity",
            TradeField::OrderType => "orderType",
            TradeField::Strategy => "strategy",
            TradeField::Account => "account",
        }
    }

    /// Header substrings searched, in order, when the field has no mapped column.
    pub fn fallback_names(self) -> &'static [&'static str] {
        match self {
            TradeField::Symbol => &["symbol", "stock", "scrip"],
            TradeField::EntryDate => &["entry date", "buy date", "purchase date"],
            TradeField::ExitDate => &["exit date", "sell date", "close date"],
            TradeField::EntryPrice => &["entry price", "buy price", "purchase price"],
            TradeField::ExitPrice => &["exit price", "sell price", "close price"],
            TradeField::Quantity => &["quantity", "qty", "shares"],
            TradeField::OrderType => &["order type", "type", "buy sell"],
            TradeField::Strategy => &["strategy", "method", "approach"],
            TradeField::Account => &["account", "broker", "platform"],
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for TradeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Predicate over a normalized header.
pub type HeaderPredicate = fn(&str) -> bool;

fn is_symbol_header(h: &str) -> bool {
    h.contains("symbol") || h.contains("stock") || h.contains("scrip")
}

fn is_entry_date_header(h: &str) -> bool {
    h.contains("entry") && h.contains("date")
}

fn is_exit_date_header(h: &str) -> bool {
    h.contains("exit") && h.contains("date")
}

fn is_entry_price_header(h: &str) -> bool {
    h.contains("entry") && h.contains("price")
}

fn is_exit_price_header(h: &str) -> bool {
    h.contains("exit") && h.contains("price")
}

fn is_quantity_header(h: &str) -> bool {
    h.contains("quantity") || h.contains("qty")
}

fn is_order_type_header(h: &str) -> bool {
    h.contains("order") && h.contains("type")
}

fn is_strategy_header(h: &str) -> bool {
    h.contains("strategy")
}

fn is_account_header(h: &str) -> bool {
    h.contains("account") || h.contains("broker")
}

/// Priority table: the first rule matching a header decides its field.
pub static COLUMN_RULES: [(TradeField, HeaderPredicate); 9] = [
    (TradeField::Symbol, is_symbol_header),
    (TradeField::EntryDate, is_entry_date_header),
    (TradeField::ExitDate, is_exit_date_header),
    (TradeField::EntryPrice, is_entry_price_header),
    (TradeField::ExitPrice, is_exit_price_header),
    (TradeField::Quantity, is_quantity_header),
    (TradeField::OrderType, is_order_type_header),
    (TradeField::Strategy, is_strategy_header),
    (TradeField::Account, is_account_header),
];

/// Column index per trade field, built once from the header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    indices: [Option<usize>; 9],
}

impl ColumnMap {
    /// Maps normalized headers to fields. A field keeps the first header that
    /// claims it; later matches for the same field are ignored.
    pub fn from_headers(headers: &[String]) -> Self {
        let mut map = Self::default();
        for (index, header) in headers.iter().enumerate() {
            let rule = COLUMN_RULES.iter().find(|(_, matches)| matches(header));
            let Some((field, _)) = rule else {
                continue;
            };
            let slot = &mut map.indices[field.slot()];
            if slot.is_none() {
                *slot = Some(index);
            }
        }
        map
    }

    pub fn get(&self, field: TradeField) -> Option<usize> {
        self.indices[field.slot()]
    }

    /// Fields that resolved to a column, in field order.
    pub fn resolved(&self) -> impl Iterator<Item = (TradeField, usize)> + '_ {
        TradeField::ALL
            .iter()
            .filter_map(|field| self.get(*field).map(|index| (*field, index)))
    }

    /// Fields no header matched.
    pub fn unresolved(&self) -> Vec<TradeField> {
        TradeField::ALL
            .iter()
            .copied()
            .filter(|field| self.get(*field).is_none())
            .collect()
    }
}
