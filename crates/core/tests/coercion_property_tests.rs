//! Property-based integration tests for ledger tokenizing and coercion.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use tradejournal_core::trades::{parse_date, parse_price, parse_quantity, tokenize_line};

// =============================================================================
// Generators
// =============================================================================

/// Formats whole units with thousands separators, e.g. `1234567` -> `1,234,567`.
fn group_thousands(units: u64) -> String {
    let digits = units.to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Plain ledger cell: no separators or quotes.
fn arb_plain_field() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 ./()&-]{0,12}".prop_map(|s| s.trim().to_string())
}

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (1901i32..2100, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_grouped_price_parses_to_its_value(cents in 1u64..100_000_000_000) {
        let raw = format!("\"{}.{:02}\"", group_thousands(cents / 100), cents % 100);
        let expected = Decimal::new(cents as i64, 2);
        prop_assert_eq!(parse_price(&raw), Some(expected));
    }

    #[test]
    fn prop_month_first_dates_parse(date in arb_date(), dashed in any::<bool>()) {
        use chrono::Datelike;
        let sep = if dashed { '-' } else { '/' };
        let raw = format!("{}{sep}{}{sep}{}", date.month(), date.day(), date.year());
        prop_assert_eq!(parse_date(&raw), Some(date));
    }

    #[test]
    fn prop_day_first_dates_swap_when_unambiguous(date in arb_date()) {
        use chrono::Datelike;
        prop_assume!(date.day() > 12);
        let raw = format!("{:02}/{:02}/{}", date.day(), date.month(), date.year());
        prop_assert_eq!(parse_date(&raw), Some(date));
    }

    #[test]
    fn prop_quantity_is_never_zero(raw in "\\PC{0,10}") {
        prop_assert!(parse_quantity(&raw) >= 1);
    }

    #[test]
    fn prop_plain_fields_tokenize_back(fields in prop::collection::vec(arb_plain_field(), 1..12)) {
        let line = fields.join(",");
        prop_assert_eq!(tokenize_line(&line), fields);
    }

    #[test]
    fn prop_quoted_fields_keep_commas(
        before in arb_plain_field(),
        units in 1_000u64..10_000_000,
        after in arb_plain_field(),
    ) {
        let grouped = group_thousands(units);
        let line = format!("{},\"{}\",{}", before, grouped, after);
        prop_assert_eq!(tokenize_line(&line), vec![before, grouped, after]);
    }
}
