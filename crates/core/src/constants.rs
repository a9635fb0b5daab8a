/// Order type assigned when a ledger row carries none
pub const DEFAULT_ORDER_TYPE: &str = "Buy";

/// Strategy assigned when a ledger row carries none
pub const DEFAULT_STRATEGY_NAME: &str = "Imported Strategy";

/// Account assigned when a ledger row carries none
pub const DEFAULT_ACCOUNT_NAME: &str = "Imported Account";

/// Quantity assigned when a ledger row has no usable quantity
pub const DEFAULT_QUANTITY: u32 = 1;

/// Year substituted for three-digit years such as `6/18/202`
pub const TRUNCATED_YEAR_FALLBACK: i32 = 2025;

/// Parsed dates must fall after this year
pub const MIN_VALID_YEAR: i32 = 1900;

/// How many trailing columns a data row may omit relative to the header row
pub const DEFAULT_COLUMN_SLACK: usize = 2;

/// Fixed column order used when exporting trades
pub const EXPORT_HEADERS: [&str; 10] = [
    "symbol",
    "entryDate",
    "buyPrice",
    "stopLoss",
    "target",
    "exitDate",
    "exitPrice",
    "orderType",
    "strategy",
    "account",
];
