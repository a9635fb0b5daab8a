//! End-to-end import of a real broker trade journal export.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use tradejournal_core::registry::{InMemoryRegistry, RegistryTrait};
use tradejournal_core::trades::{export_trades_csv, import_trades_csv, ImportOptions};

const BROKER_LEDGER: &str = include_str!("fixtures/broker_ledger.csv");

#[test]
fn imports_every_row_of_the_broker_ledger() {
    let registry = InMemoryRegistry::new();
    let result = import_trades_csv(BROKER_LEDGER, &registry, &ImportOptions::default()).unwrap();

    assert_eq!(result.success_count, 37);
    assert_eq!(result.error_count, 0);
    assert!(result.issues.is_empty());

    let summary = result.summary();
    assert_eq!(summary.total_processed, 37);
    assert_eq!(summary.open_positions, 11);
    assert_eq!(summary.closed_positions, 26);

    assert_eq!(result.trades.first().unwrap().symbol, "INDIGO");
    assert_eq!(result.trades.last().unwrap().symbol, "RPGLIFE");
}

#[test]
fn registers_strategies_and_accounts_in_first_seen_order() {
    let registry = InMemoryRegistry::new();
    import_trades_csv(BROKER_LEDGER, &registry, &ImportOptions::default()).unwrap();

    let strategies: Vec<String> = registry
        .list_strategies()
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(
        strategies,
        vec![
            "Fusion Strategy",
            "IV Strategy",
            "30 SMA",
            "Kumbhakaran Strategy",
            "Alpha 2.0",
            "ATH",
            "RE Strategy (BTST)",
            "Rabbit System",
            "Mother Candle Shorting",
        ]
    );

    let accounts: Vec<String> = registry
        .list_accounts()
        .unwrap()
        .into_iter()
        .map(|a| a.name)
        .collect();
    assert_eq!(accounts, vec!["Paytm", "Zerodha"]);
}

#[test]
fn resolves_irregular_ledger_values() {
    let registry = InMemoryRegistry::new();
    let result = import_trades_csv(BROKER_LEDGER, &registry, &ImportOptions::default()).unwrap();
    let find = |symbol: &str| result.trades.iter().find(|t| t.symbol == symbol).unwrap();

    // Truncated year
    let ccl = find("CCL");
    assert_eq!(ccl.exit_date, NaiveDate::from_ymd_opt(2025, 6, 18));
    assert_eq!(ccl.exit_price, Some(dec!(791.3)));

    // A time suffix leaves the exit date unreadable
    let lumaxtech = find("LUMAXTECH");
    assert_eq!(lumaxtech.exit_date, None);
    assert_eq!(lumaxtech.exit_price, Some(dec!(1118.10)));
    assert!(lumaxtech.is_open());

    let indigo = find("INDIGO");
    assert_eq!(indigo.entry_date, NaiveDate::from_ymd_opt(2025, 2, 24));
    assert_eq!(indigo.entry_price, Some(dec!(4568.00)));

    let cholahldng = find("CHOLAHLDNG");
    assert_eq!(cholahldng.exit_date, NaiveDate::from_ymd_opt(2025, 6, 6));

    let techm = find("TECHM");
    assert_eq!(techm.order_type, "Sell");
    assert_eq!(techm.realized_pnl(), Some(dec!(47.50)));

    for trade in &result.trades {
        assert_eq!(trade.stop_loss, None);
        assert_eq!(trade.target, None);
    }
}

#[test]
fn exports_one_line_per_imported_trade() {
    let registry = InMemoryRegistry::new();
    let result = import_trades_csv(BROKER_LEDGER, &registry, &ImportOptions::default()).unwrap();

    let csv = export_trades_csv(&result.trades).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 38);
    assert_eq!(
        lines[1],
        "INDIGO,2025-02-24,4568,,,,,Buy,Fusion Strategy,Paytm"
    );
    assert!(lines.contains(&"CCL,2025-06-04,904.5,,,2025-06-18,791.3,Buy,ATH,Zerodha"));
}
