//! Locale-aware formatting of money, dates and the logout countdown
//!
//! Currency symbols and minor units come from ISO 4217 data, digit grouping
//! and decimal marks from CLDR number locales. Calendar dates use a small
//! table of numeric patterns keyed by language and region; unknown locales
//! fall back to ISO dates and English number formatting.

use chrono::{DateTime, Utc};
use iso_currency::Currency;
use num_format::{Locale, ToFormattedString};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Resolve a number locale: full tag, then language subtag, then `en`
fn number_locale(locale_tag: &str) -> Locale {
    Locale::from_name(locale_tag)
        .or_else(|_| Locale::from_name(language(locale_tag)))
        .unwrap_or(Locale::en)
}

fn language(locale_tag: &str) -> &str {
    locale_tag.split(['-', '_']).next().unwrap_or(locale_tag)
}

fn region(locale_tag: &str) -> Option<String> {
    locale_tag
        .split(['-', '_'])
        .nth(1)
        .map(|r| r.to_ascii_uppercase())
}

fn symbol_first(locale_tag: &str) -> bool {
    matches!(language(locale_tag), "en" | "ja" | "zh" | "ko")
}

/// Format an amount in the given currency for the given locale
///
/// `format_money(1300, "en-US", "USD")` gives `$1,300.00`,
/// `format_money(-306.5, "de-DE", "EUR")` gives `-306,50 €`.
pub fn format_money(amount: Decimal, locale_tag: &str, currency_code: &str) -> String {
    let locale = number_locale(locale_tag);
    let currency = Currency::from_code(currency_code);
    let places = currency.and_then(|c| c.exponent()).unwrap_or(2) as u32;
    let symbol = currency
        .map(|c| c.symbol().to_string())
        .unwrap_or_else(|| currency_code.to_string());

    let rounded = amount
        .abs()
        .round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    let integer = rounded.trunc();
    let fraction = (rounded - integer) * Decimal::from(10u64.pow(places));

    // |Decimal::MAX| < 2^96, so both parts fit a u128
    let mut number = integer
        .to_u128()
        .unwrap_or_default()
        .to_formatted_string(&locale);
    if places > 0 {
        number.push_str(locale.decimal());
        number.push_str(&format!(
            "{:0width$}",
            fraction.trunc().to_u128().unwrap_or_default(),
            width = places as usize
        ));
    }

    let sign = if amount.is_sign_negative() && !rounded.is_zero() {
        locale.minus_sign()
    } else {
        ""
    };

    if symbol_first(locale_tag) {
        format!("{}{}{}", sign, symbol, number)
    } else {
        format!("{}{} {}", sign, number, symbol)
    }
}

fn date_pattern(locale_tag: &str) -> &'static str {
    match (language(locale_tag), region(locale_tag).as_deref()) {
        ("en", None) | ("en", Some("US")) => "%-m/%-d/%Y",
        ("en", _) | ("pt", _) | ("fr", _) | ("es", _) | ("it", _) => "%d/%m/%Y",
        ("de", _) => "%-d.%-m.%Y",
        _ => "%Y-%m-%d",
    }
}

fn time_pattern(locale_tag: &str) -> &'static str {
    match (language(locale_tag), region(locale_tag).as_deref()) {
        ("en", None) | ("en", Some("US")) => "%-I:%M %p",
        _ => "%H:%M",
    }
}

/// Numeric calendar date in the locale's order
pub fn format_date(date: DateTime<Utc>, locale_tag: &str) -> String {
    date.format(date_pattern(locale_tag)).to_string()
}

/// Calendar date plus time of day, as shown next to the balance
pub fn format_date_time(date: DateTime<Utc>, locale_tag: &str) -> String {
    format!(
        "{}, {}",
        format_date(date, locale_tag),
        date.format(time_pattern(locale_tag))
    )
}

/// Label a movement date relative to now
///
/// Whole days are truncated, so 47 hours ago is still YESTERDAY. Dates in
/// the future count as today.
pub fn relative_day_label(date: DateTime<Utc>, now: DateTime<Utc>, locale_tag: &str) -> String {
    let days = (now - date).num_days();
    match days {
        d if d <= 0 => "TODAY".to_string(),
        1 => "YESTERDAY".to_string(),
        2..=3 => format!("{} days ago", days),
        _ => format_date(date, locale_tag),
    }
}

/// `MM:SS` for the remaining session time
pub fn format_countdown(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_money_english() {
        assert_eq!(format_money(dec("1300"), "en-US", "USD"), "$1,300.00");
        assert_eq!(format_money(dec("-30"), "en-US", "USD"), "-$30.00");
        assert_eq!(format_money(dec("0.005"), "en-US", "USD"), "$0.01");
        assert_eq!(format_money(dec("1234567.891"), "en", "USD"), "$1,234,567.89");
    }

    #[test]
    fn test_money_beyond_u64() {
        assert_eq!(
            format_money(dec("100000000000000000000"), "en-US", "USD"),
            "$100,000,000,000,000,000,000.00"
        );
        assert_eq!(
            format_money(Decimal::MAX, "en-US", "USD"),
            "$79,228,162,514,264,337,593,543,950,335.00"
        );
        assert_eq!(
            format_money(-Decimal::MAX, "de-DE", "EUR"),
            "-79.228.162.514.264.337.593.543.950.335,00 €"
        );
    }

    #[test]
    fn test_money_german() {
        assert_eq!(format_money(dec("-306.5"), "de-DE", "EUR"), "-306,50 €");
        assert_eq!(format_money(dec("25952.59"), "de-DE", "EUR"), "25.952,59 €");
    }

    #[test]
    fn test_money_zero_exponent_currency() {
        let formatted = format_money(dec("1234.5"), "en-US", "JPY");
        assert!(formatted.ends_with("1,235"), "got {}", formatted);
    }

    #[test]
    fn test_money_unknown_currency_and_locale() {
        assert_eq!(format_money(dec("12.3"), "xx-YY", "ABC"), "12.30 ABC");
    }

    #[test]
    fn test_negative_zero_has_no_sign() {
        assert_eq!(format_money(dec("-0.001"), "en-US", "USD"), "$0.00");
    }

    #[test]
    fn test_dates_by_locale() {
        let date = Utc.with_ymd_and_hms(2020, 4, 1, 10, 17, 24).unwrap();
        assert_eq!(format_date(date, "en-US"), "4/1/2020");
        assert_eq!(format_date(date, "pt-PT"), "01/04/2020");
        assert_eq!(format_date(date, "en-GB"), "01/04/2020");
        assert_eq!(format_date(date, "de-DE"), "1.4.2020");
        assert_eq!(format_date(date, "sv-SE"), "2020-04-01");

        assert_eq!(format_date_time(date, "en-US"), "4/1/2020, 10:17 AM");
        assert_eq!(format_date_time(date, "pt-PT"), "01/04/2020, 10:17");
    }

    #[test]
    fn test_relative_labels() {
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();

        assert_eq!(relative_day_label(now - Duration::hours(5), now, "en-US"), "TODAY");
        assert_eq!(relative_day_label(now - Duration::hours(47), now, "en-US"), "YESTERDAY");
        assert_eq!(relative_day_label(now - Duration::days(2), now, "en-US"), "2 days ago");
        assert_eq!(relative_day_label(now - Duration::days(3), now, "en-US"), "3 days ago");
        assert_eq!(relative_day_label(now - Duration::days(4), now, "en-US"), "6/6/2024");
        assert_eq!(relative_day_label(now + Duration::days(1), now, "en-US"), "TODAY");
    }

    #[test]
    fn test_countdown() {
        assert_eq!(format_countdown(120), "02:00");
        assert_eq!(format_countdown(119), "01:59");
        assert_eq!(format_countdown(5), "00:05");
        assert_eq!(format_countdown(0), "00:00");
    }
}
