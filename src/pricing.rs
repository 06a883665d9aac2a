//! Pricing
//!
//! Parsing of textual product prices and `es-CO` currency formatting.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Currency every storefront amount is held in.
pub use rusty_money::iso::COP as STORE_CURRENCY;

/// Separator between thousands groups in `es-CO`.
const GROUP_SEPARATOR: char = '.';

/// Separator before the fractional part in `es-CO`.
const DECIMAL_SEPARATOR: char = ',';

/// Errors raised while parsing a textual price.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    /// The text is not a decimal number.
    #[error("invalid price: {0:?}")]
    Invalid(String),

    /// The amount is below zero.
    #[error("price must not be negative: {0}")]
    Negative(String),

    /// The amount does not fit in minor units.
    #[error("price out of range: {0}")]
    OutOfRange(String),
}

/// Parse a product price (e.g. `"1200"` or `"1200.50"`) into store currency.
///
/// Surrounding whitespace is ignored and exponent notation (`"1.2e3"`) is
/// accepted. Amounts are rounded half-to-even to the store currency's minor
/// units.
///
/// # Errors
///
/// - [`PriceError::Invalid`]: the text is not a decimal number.
/// - [`PriceError::Negative`]: the amount is below zero.
/// - [`PriceError::OutOfRange`]: the amount cannot be held in minor units.
pub fn parse_price(text: &str) -> Result<Money<'static, Currency>, PriceError> {
    let amount = parse_amount(text)?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(PriceError::Negative(text.trim().to_string()));
    }

    to_money(amount, text)
}

/// Format an amount using the `es-CO` currency convention, e.g. `$ 4.900,00`.
///
/// The symbol is followed by a non-breaking space, as the locale prescribes.
/// The number of decimals follows the currency's exponent; currencies without
/// minor units are shown without a decimal separator.
pub fn format_price(amount: &Money<'_, Currency>) -> String {
    let minor = amount.to_minor_units();
    let exponent = amount.currency().exponent;
    let scale = 10_u64.pow(exponent);

    let abs_minor = minor.unsigned_abs();
    let major = group_thousands(abs_minor / scale);
    let fractional = abs_minor % scale;
    let sign = if minor < 0 { "-" } else { "" };
    let symbol = amount.currency().symbol;

    if exponent == 0 {
        return format!("{sign}{symbol}\u{a0}{major}");
    }

    format!(
        "{sign}{symbol}\u{a0}{major}{DECIMAL_SEPARATOR}{fractional:0width$}",
        width = exponent as usize,
    )
}

/// Format a raw price string, falling back to the text itself when it does
/// not parse as a number.
pub fn format_price_text(text: &str) -> String {
    parse_amount(text)
        .and_then(|amount| to_money(amount, text))
        .map_or_else(|_err| text.to_string(), |money| format_price(&money))
}

fn parse_amount(text: &str) -> Result<Decimal, PriceError> {
    let trimmed = text.trim();

    trimmed
        .parse::<Decimal>()
        .or_else(|_err| Decimal::from_scientific(trimmed))
        .map(|amount| {
            amount.round_dp_with_strategy(
                STORE_CURRENCY.exponent,
                RoundingStrategy::MidpointNearestEven,
            )
        })
        .map_err(|_err| PriceError::Invalid(text.to_string()))
}

fn to_money(amount: Decimal, text: &str) -> Result<Money<'static, Currency>, PriceError> {
    let minor_units = amount
        .checked_mul(Decimal::from(10_i64.pow(STORE_CURRENCY.exponent)))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| PriceError::OutOfRange(text.trim().to_string()))?;

    Ok(Money::from_minor(minor_units, STORE_CURRENCY))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (idx, digit) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }

        grouped.push(digit);
    }

    grouped
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{COP, JPY, USD};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parse_price_whole_amount() -> TestResult {
        assert_eq!(parse_price("1200")?, Money::from_minor(120_000, COP));

        Ok(())
    }

    #[test]
    fn parse_price_fractional_amount_with_whitespace() -> TestResult {
        assert_eq!(parse_price(" 1200.5 ")?, Money::from_minor(120_050, COP));

        Ok(())
    }

    #[test]
    fn parse_price_rounds_half_to_even() -> TestResult {
        assert_eq!(parse_price("0.125")?, Money::from_minor(12, COP));
        assert_eq!(parse_price("0.135")?, Money::from_minor(14, COP));

        Ok(())
    }

    #[test]
    fn parse_price_rejects_text() {
        assert_eq!(
            parse_price("gratis"),
            Err(PriceError::Invalid("gratis".to_string()))
        );
    }

    #[test]
    fn parse_price_rejects_negative() {
        assert_eq!(
            parse_price("-5"),
            Err(PriceError::Negative("-5".to_string()))
        );
    }

    #[test]
    fn parse_price_rejects_amounts_beyond_minor_units() {
        assert!(matches!(
            parse_price("79228162514264337593543950335"),
            Err(PriceError::OutOfRange(_))
        ));
    }

    #[test]
    fn format_price_groups_thousands() {
        let amount = Money::from_minor(490_000, COP);

        assert_eq!(format_price(&amount), "$\u{a0}4.900,00");
    }

    #[test]
    fn format_price_large_amount() {
        let amount = Money::from_minor(123_456_789_05, COP);

        assert_eq!(format_price(&amount), "$\u{a0}123.456.789,05");
    }

    #[test]
    fn format_price_small_amounts() {
        assert_eq!(format_price(&Money::from_minor(0, COP)), "$\u{a0}0,00");
        assert_eq!(format_price(&Money::from_minor(7, COP)), "$\u{a0}0,07");
        assert_eq!(format_price(&Money::from_minor(99_900, COP)), "$\u{a0}999,00");
    }

    #[test]
    fn format_price_negative_amount() {
        let amount = Money::from_minor(-150_000, COP);

        assert_eq!(format_price(&amount), "-$\u{a0}1.500,00");
    }

    #[test]
    fn format_price_uses_currency_symbol() {
        let amount = Money::from_minor(100, USD);

        assert_eq!(format_price(&amount), "$\u{a0}1,00");
    }

    #[test]
    fn format_price_currency_without_minor_units() {
        assert_eq!(format_price(&Money::from_minor(1200, JPY)), "¥\u{a0}1.200");
        assert_eq!(format_price(&Money::from_minor(-5, JPY)), "-¥\u{a0}5");
    }

    #[test]
    fn parse_price_accepts_exponent_notation() -> TestResult {
        assert_eq!(parse_price("1e3")?, Money::from_minor(100_000, COP));
        assert_eq!(parse_price("1.2E3")?, Money::from_minor(120_000, COP));

        Ok(())
    }

    #[test]
    fn format_price_text_formats_exponent_notation() {
        assert_eq!(format_price_text("1e3"), "$\u{a0}1.000,00");
    }

    #[test]
    fn format_price_text_formats_numbers() {
        assert_eq!(format_price_text("2500"), "$\u{a0}2.500,00");
    }

    #[test]
    fn format_price_text_passes_through_non_numeric_input() {
        assert_eq!(format_price_text("Consultar"), "Consultar");
        assert_eq!(format_price_text(""), "");
        assert_eq!(format_price_text("12,50"), "12,50");
    }

    #[test]
    fn group_thousands_boundaries() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1.000");
        assert_eq!(group_thousands(1_000_000), "1.000.000");
    }
}
