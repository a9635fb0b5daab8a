//! Per-field coercion for ledger values.
//!
//! Coercers never fail: unusable input degrades to `None` or to the field
//! default, and the validator decides whether the row survives.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use log::debug;
use regex::{Captures, Regex};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::constants::{DEFAULT_QUANTITY, MIN_VALID_YEAR, TRUNCATED_YEAR_FALLBACK};

lazy_static! {
    /// M/D/YYYY with one or two digit month and day
    static ref SLASH_DATE_REGEX: Regex =
        Regex::new(r"^([0-9]{1,2})/([0-9]{1,2})/([0-9]{4})$").expect("Invalid regex pattern");

    /// M-D-YYYY with one or two digit month and day
    static ref DASH_DATE_REGEX: Regex =
        Regex::new(r"^([0-9]{1,2})-([0-9]{1,2})-([0-9]{4})$").expect("Invalid regex pattern");

    /// YYYY-M-D
    static ref ISO_DATE_REGEX: Regex =
        Regex::new(r"^([0-9]{4})-([0-9]{1,2})-([0-9]{1,2})$").expect("Invalid regex pattern");

    /// M/D/YYY, a truncated year seen in exported ledgers
    static ref TRUNCATED_YEAR_DATE_REGEX: Regex =
        Regex::new(r"^([0-9]{1,2})/([0-9]{1,2})/([0-9]{3})$").expect("Invalid regex pattern");

    /// Leading numeric literal: sign, integer digits, optional fraction
    static ref LEADING_NUMBER_REGEX: Regex =
        Regex::new(r"^(-?)([0-9]*)(?:\.([0-9]*))?").expect("Invalid regex pattern");
}

/// Formats tried, in order, once none of the ledger patterns matched.
/// Input has already lost its whitespace.
const FALLBACK_DATE_FORMATS: [&str; 6] = [
    "%Y/%m/%d", "%d-%b-%Y", "%d%b%Y", "%b%d,%Y", "%d/%b/%Y", "%Y.%m.%d",
];

const FALLBACK_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

fn is_missing(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || trimmed == "-"
}

/// Parses a price such as `"4,568.00"` or `₹ 1,926.00`.
///
/// Grouping commas, whitespace, quotes and currency noise are discarded; the
/// longest leading numeric literal of what remains is the value. Values beyond
/// the `Decimal` range (about 7.9e28) read as missing.
pub fn parse_price(raw: &str) -> Option<Decimal> {
    if is_missing(raw) {
        return None;
    }

    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    let caps = LEADING_NUMBER_REGEX.captures(&cleaned)?;
    let sign = caps.get(1).map_or("", |m| m.as_str());
    let integer = caps.get(2).map_or("", |m| m.as_str());
    let fraction = caps.get(3).map_or("", |m| m.as_str());
    if integer.is_empty() && fraction.is_empty() {
        debug!("Price '{}' has no numeric value", raw);
        return None;
    }

    let integer = if integer.is_empty() { "0" } else { integer };
    let literal = if fraction.is_empty() {
        format!("{}{}", sign, integer)
    } else {
        format!("{}{}.{}", sign, integer, fraction)
    };

    match Decimal::from_str(&literal) {
        Ok(price) => Some(price),
        Err(e) => {
            debug!("Price '{}' is out of range: {}", raw, e);
            None
        }
    }
}

/// Parses a whole-lot quantity, defaulting to 1.
///
/// Only digits are kept. Blank, unparsable and zero quantities all yield the
/// default.
pub fn parse_quantity(raw: &str) -> u32 {
    if is_missing(raw) {
        return DEFAULT_QUANTITY;
    }

    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    match digits.parse::<u32>() {
        Ok(quantity) if quantity > 0 => quantity,
        _ => {
            debug!("Quantity '{}' unusable, using {}", raw, DEFAULT_QUANTITY);
            DEFAULT_QUANTITY
        }
    }
}

/// Parses a ledger date using the default truncated-year fallback.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    parse_date_with_year(raw, TRUNCATED_YEAR_FALLBACK)
}

/// Parses a ledger date.
///
/// Rules, first success wins:
/// 1. `M/D/YYYY` or `M-D-YYYY`, swapping month and day when the month
///    exceeds 12. Day-first dates with a day of 12 or less are read
///    month-first.
/// 2. `YYYY-M-D`.
/// 3. `M/D/YYY`, same swap, year replaced by `truncated_year`.
/// 4. A fixed list of general formats.
///
/// Every result must be a real calendar date after 1900. Impossible dates
/// such as `2/29/2025` or `0/5/2025` return `None` instead of rolling into
/// a neighbouring month.
pub fn parse_date_with_year(raw: &str, truncated_year: i32) -> Option<NaiveDate> {
    if is_missing(raw) {
        return None;
    }

    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '"' && *c != '\'')
        .collect();

    let parsed = SLASH_DATE_REGEX
        .captures(&cleaned)
        .or_else(|| DASH_DATE_REGEX.captures(&cleaned))
        .and_then(|caps| {
            let year = caps[3].parse::<i32>().ok()?;
            month_first_date(&caps, year)
        })
        .or_else(|| {
            ISO_DATE_REGEX.captures(&cleaned).and_then(|caps| {
                calendar_date(
                    caps[1].parse().ok()?,
                    caps[2].parse().ok()?,
                    caps[3].parse().ok()?,
                )
            })
        })
        .or_else(|| {
            TRUNCATED_YEAR_DATE_REGEX
                .captures(&cleaned)
                .and_then(|caps| month_first_date(&caps, truncated_year))
        })
        .or_else(|| fallback_date(&cleaned));

    if parsed.is_none() {
        debug!("Could not parse date '{}'", raw);
    }
    parsed
}

fn month_first_date(caps: &Captures<'_>, year: i32) -> Option<NaiveDate> {
    let mut month = caps[1].parse::<u32>().ok()?;
    let mut day = caps[2].parse::<u32>().ok()?;
    if month > 12 {
        std::mem::swap(&mut month, &mut day);
    }
    calendar_date(year, month, day)
}

fn calendar_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).filter(|date| date.year() > MIN_VALID_YEAR)
}

fn fallback_date(cleaned: &str) -> Option<NaiveDate> {
    let date = DateTime::parse_from_rfc3339(cleaned)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| {
            FALLBACK_DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(cleaned, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            FALLBACK_DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(cleaned, fmt).ok())
        })?;

    (date.year() > MIN_VALID_YEAR).then_some(date)
}

/// ISO `YYYY-MM-DD`, or an empty string for a missing date.
pub fn format_iso_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn ymd(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, month, day)
    }

    // ==================== parse_price ====================

    #[test]
    fn test_parse_price_grouped_thousands() {
        assert_eq!(parse_price("4,568.00"), Some(dec!(4568.00)));
        assert_eq!(parse_price("\"1,634.45\""), Some(dec!(1634.45)));
        assert_eq!(parse_price("1,00,000.50"), Some(dec!(100000.50)));
    }

    #[test]
    fn test_parse_price_missing_values() {
        assert_eq!(parse_price("-"), None);
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("   "), None);
        assert_eq!(parse_price("n/a"), None);
    }

    #[test]
    fn test_parse_price_strips_currency_noise() {
        assert_eq!(parse_price("₹ 907.30"), Some(dec!(907.30)));
        assert_eq!(parse_price("INR 1,929.00"), Some(dec!(1929.00)));
        // The abbreviation dot survives cleaning and becomes a decimal point.
        assert_eq!(parse_price("Rs. 556"), Some(dec!(0.556)));
    }

    #[test]
    fn test_parse_price_takes_leading_literal() {
        assert_eq!(parse_price("12.5.7"), Some(dec!(12.5)));
        assert_eq!(parse_price("-42.10"), Some(dec!(-42.10)));
        assert_eq!(parse_price(".75"), Some(dec!(0.75)));
        assert_eq!(parse_price("85."), Some(dec!(85)));
        assert_eq!(parse_price("--5"), None);
    }

    #[test]
    fn test_parse_price_out_of_range_is_missing() {
        assert_eq!(parse_price("99999999999999999999999999999999"), None);
        assert_eq!(
            parse_price("79228162514264337593543950335"),
            Some(Decimal::MAX)
        );
    }

    // ==================== parse_quantity ====================

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("25"), 25);
        assert_eq!(parse_quantity("0"), 1);
        assert_eq!(parse_quantity(""), 1);
        assert_eq!(parse_quantity("-"), 1);
        assert_eq!(parse_quantity("abc"), 1);
        assert_eq!(parse_quantity("1,200"), 1200);
        assert_eq!(parse_quantity("\"90\""), 90);
    }

    #[test]
    fn test_parse_quantity_overflow_falls_back() {
        assert_eq!(parse_quantity("99999999999999"), 1);
    }

    // ==================== parse_date ====================

    #[test]
    fn test_parse_date_month_first() {
        assert_eq!(parse_date("2/24/2025"), ymd(2025, 2, 24));
        assert_eq!(parse_date("4/21/2025"), ymd(2025, 4, 21));
        assert_eq!(parse_date("06-04-2025"), ymd(2025, 6, 4));
    }

    #[test]
    fn test_parse_date_swaps_when_month_exceeds_twelve() {
        assert_eq!(parse_date("24/2/2025"), ymd(2025, 2, 24));
        assert_eq!(parse_date("18-06-2025"), ymd(2025, 6, 18));
    }

    #[test]
    fn test_parse_date_ambiguous_day_first_reads_month_first() {
        // 7 March written day-first is indistinguishable from 3 July.
        assert_eq!(parse_date("07-03-2025"), ymd(2025, 7, 3));
    }

    #[test]
    fn test_parse_date_iso() {
        assert_eq!(parse_date("2025-7-3"), ymd(2025, 7, 3));
        assert_eq!(parse_date("2025-12-31"), ymd(2025, 12, 31));
    }

    #[test]
    fn test_parse_date_truncated_year() {
        assert_eq!(parse_date("6/18/202"), ymd(2025, 6, 18));
        assert_eq!(parse_date("18/6/202"), ymd(2025, 6, 18));
        assert_eq!(parse_date_with_year("6/18/202", 2024), ymd(2024, 6, 18));
    }

    #[test]
    fn test_parse_date_missing_values() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("-"), None);
        assert_eq!(parse_date("  "), None);
    }

    #[test]
    fn test_parse_date_rejects_impossible_dates() {
        assert_eq!(parse_date("2/30/2025"), None);
        assert_eq!(parse_date("2/29/2025"), None);
        assert_eq!(parse_date("0/5/2025"), None);
        assert_eq!(parse_date("4/31/2025"), None);
        assert_eq!(parse_date("13/13/2025"), None);
        assert_eq!(parse_date("1/1/1900"), None);
        assert_eq!(parse_date("not a date"), None);
    }

    #[test]
    fn test_parse_date_strips_quotes_and_whitespace() {
        assert_eq!(parse_date(" \"3/28/2025\" "), ymd(2025, 3, 28));
    }

    #[test]
    fn test_parse_date_time_suffix_is_not_a_ledger_pattern() {
        // Whitespace removal glues the time onto the year.
        assert_eq!(parse_date("07-02-2025 00:00"), None);
    }

    #[test]
    fn test_parse_date_general_fallback() {
        assert_eq!(parse_date("2025/06/05"), ymd(2025, 6, 5));
        assert_eq!(parse_date("24-Feb-2025"), ymd(2025, 2, 24));
        assert_eq!(parse_date("Feb 24, 2025"), ymd(2025, 2, 24));
        assert_eq!(parse_date("2025-06-02T09:15:00"), ymd(2025, 6, 2));
        assert_eq!(parse_date("2025-06-02T09:15:00+05:30"), ymd(2025, 6, 2));
    }

    #[test]
    fn test_format_iso_date() {
        assert_eq!(format_iso_date(ymd(2025, 3, 7)), "2025-03-07");
        assert_eq!(format_iso_date(None), "");
    }
}
