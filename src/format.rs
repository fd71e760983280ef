//! Locale-aware rendering of amounts and dates.
//!
//! Every amount shown to the user has exactly two fraction digits. Values are rounded on the
//! decimal value, half away from zero, before any separators are applied, so `500.005` renders as
//! `500,01` in `es-AR`.

use chrono::{DateTime, Datelike, FixedOffset};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// The locales amounts and dates can be rendered in.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Locale {
    /// Grouping `.`, decimal `,`, dates as `d/m/yyyy`.
    #[default]
    #[serde(rename = "es-AR")]
    EsAr,
    /// Grouping `,`, decimal `.`, dates as `m/d/yyyy`.
    #[serde(rename = "en-US")]
    EnUs,
}

serde_plain::derive_display_from_serialize!(Locale);
serde_plain::derive_fromstr_from_deserialize!(Locale);

impl Locale {
    pub fn decimal_separator(&self) -> char {
        match self {
            Locale::EsAr => ',',
            Locale::EnUs => '.',
        }
    }

    pub fn grouping_separator(&self) -> char {
        match self {
            Locale::EsAr => '.',
            Locale::EnUs => ',',
        }
    }
}

/// Rounds to two fraction digits, half away from zero, and pins the scale at two.
pub fn round_2(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}

/// Two fraction digits with `.` and no grouping: `1234.5` -> `1234.50`.
pub fn fixed_2(value: Decimal) -> String {
    round_2(value).to_string()
}

/// Renders `amount` with two fraction digits and the grouping and decimal separators of
/// `locale`. Negative values keep a leading `-`.
///
/// ```
/// # use equilibrium::format::{format_currency, Locale};
/// # use rust_decimal::Decimal;
/// # use std::str::FromStr;
/// let amount = Decimal::from_str("1234567.891").unwrap();
/// assert_eq!(format_currency(amount, Locale::EsAr), "1.234.567,89");
/// assert_eq!(format_currency(amount, Locale::EnUs), "1,234,567.89");
/// ```
pub fn format_currency(amount: Decimal, locale: Locale) -> String {
    let rounded = round_2(amount);
    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    let en = format_num::format_num!(",.2", rounded.abs().to_f64().unwrap_or_default());
    let localized: String = en
        .chars()
        .map(|c| match c {
            ',' => locale.grouping_separator(),
            '.' => locale.decimal_separator(),
            other => other,
        })
        .collect();
    format!("{sign}{localized}")
}

/// A currency string with the sign in front of the symbol: `-$80,00`, `$1.500,00`.
pub fn format_money(amount: Decimal, locale: Locale) -> String {
    let sign = if round_2(amount).is_sign_negative() {
        "-"
    } else {
        ""
    };
    format!("{sign}${}", format_currency(amount.abs(), locale))
}

/// The amount column of a transaction row: `-$100.00` for expenses, `$20.00` for income.
pub fn row_amount(signed: Decimal) -> String {
    if signed.is_sign_negative() && !signed.is_zero() {
        format!("-${}", fixed_2(signed.abs()))
    } else {
        format!("${}", fixed_2(signed))
    }
}

/// A short numeric date in the timestamp's own offset.
pub fn short_date(date: DateTime<FixedOffset>, locale: Locale) -> String {
    let (d, m, y) = (date.day(), date.month(), date.year());
    match locale {
        Locale::EsAr => format!("{d}/{m}/{y}"),
        Locale::EnUs => format!("{m}/{d}/{y}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parse_timestamp;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_midpoint_rounds_away_from_zero() {
        assert_eq!(format_currency(dec("500.005"), Locale::EsAr), "500,01");
        assert_eq!(format_currency(dec("-500.005"), Locale::EsAr), "-500,01");
        assert_eq!(format_currency(dec("0.125"), Locale::EnUs), "0.13");
        assert_eq!(format_currency(dec("2.675"), Locale::EnUs), "2.68");
    }

    #[test]
    fn test_below_midpoint_rounds_down() {
        assert_eq!(format_currency(dec("500.0049"), Locale::EsAr), "500,00");
    }

    #[test]
    fn test_grouping() {
        assert_eq!(format_currency(dec("1000"), Locale::EsAr), "1.000,00");
        assert_eq!(format_currency(dec("999.999"), Locale::EsAr), "1.000,00");
        assert_eq!(format_currency(dec("12345678.9"), Locale::EnUs), "12,345,678.90");
        assert_eq!(format_currency(dec("999"), Locale::EnUs), "999.00");
    }

    #[test]
    fn test_zero() {
        assert_eq!(format_currency(Decimal::ZERO, Locale::EsAr), "0,00");
        assert_eq!(format_currency(dec("-0.001"), Locale::EsAr), "0,00");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(dec("-80"), Locale::EsAr), "-$80,00");
        assert_eq!(format_money(dec("1500"), Locale::EsAr), "$1.500,00");
        assert_eq!(format_money(dec("-0.004"), Locale::EnUs), "$0.00");
    }

    #[test]
    fn test_fixed_2() {
        assert_eq!(fixed_2(dec("1234.5")), "1234.50");
        assert_eq!(fixed_2(dec("0.005")), "0.01");
        assert_eq!(fixed_2(dec("7")), "7.00");
    }

    #[test]
    fn test_row_amount() {
        assert_eq!(row_amount(dec("-100")), "-$100.00");
        assert_eq!(row_amount(dec("20")), "$20.00");
        assert_eq!(row_amount(dec("1500.255")), "$1500.26");
        assert_eq!(row_amount(Decimal::ZERO), "$0.00");
    }

    #[test]
    fn test_short_date() {
        let date = parse_timestamp("2025-03-04T10:00:00-03:00").unwrap();
        assert_eq!(short_date(date, Locale::EsAr), "4/3/2025");
        assert_eq!(short_date(date, Locale::EnUs), "3/4/2025");
    }

    #[test]
    fn test_locale_names() {
        assert_eq!(Locale::EsAr.to_string(), "es-AR");
        assert_eq!(Locale::from_str("en-US").unwrap(), Locale::EnUs);
        assert!(Locale::from_str("fr-FR").is_err());
    }
}
