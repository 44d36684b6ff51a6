//! Currency formatting for display
//!
//! Amounts are rounded half away from zero to i64 minor units (centavos by
//! default) before rendering, so display never shows float noise.

use serde::{Deserialize, Serialize};

/// Largest supported number of decimal places
const MAX_DECIMALS: u32 = 6;

/// Minor-unit magnitudes at or above this do not fit in an i64
const MAX_MINOR_UNITS: f64 = 9.2e18;

/// Display rules for monetary amounts
///
/// # Example
/// ```
/// use esquared_estimator_core::CurrencyFormat;
///
/// let php = CurrencyFormat::default();
/// assert_eq!(php.format(3_480_000.0), "₱3,480,000.00");
///
/// let usd = CurrencyFormat::new("$", 0);
/// assert_eq!(usd.format(1234.5), "$1,235");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    /// Symbol placed before the amount
    pub symbol: String,
    /// Digits after the decimal point (capped at 6)
    pub decimals: u32,
}

impl Default for CurrencyFormat {
    /// Philippine peso with two decimals
    fn default() -> Self {
        Self::new("₱", 2)
    }
}

impl CurrencyFormat {
    pub fn new(symbol: &str, decimals: u32) -> Self {
        Self {
            symbol: symbol.to_string(),
            decimals: decimals.min(MAX_DECIMALS),
        }
    }

    /// Render an amount, e.g. `-₱1,234.50`
    pub fn format(&self, amount: f64) -> String {
        if !amount.is_finite() {
            return format!("{}{}", self.symbol, amount);
        }

        let decimals = self.decimals.min(MAX_DECIMALS);
        let scale = 10_i64.pow(decimals);
        let scaled = (amount * scale as f64).round();

        // Beyond i64 minor units the cast would saturate, render the exact
        // decimal expansion instead
        if scaled.abs() >= MAX_MINOR_UNITS {
            let sign = if amount < 0.0 { "-" } else { "" };
            let text = format!("{:.*}", decimals as usize, amount.abs());
            let (whole, fraction) = match text.split_once('.') {
                Some((whole, fraction)) => (whole, Some(fraction)),
                None => (text.as_str(), None),
            };
            return match fraction {
                Some(fraction) => format!(
                    "{}{}{}.{}",
                    sign,
                    self.symbol,
                    group_digits(whole),
                    fraction
                ),
                None => format!("{}{}{}", sign, self.symbol, group_digits(whole)),
            };
        }

        let minor = scaled as i64;
        let magnitude = minor.unsigned_abs();
        let whole = group_digits(&(magnitude / scale as u64).to_string());
        let sign = if minor < 0 { "-" } else { "" };

        if decimals == 0 {
            format!("{}{}{}", sign, self.symbol, whole)
        } else {
            let fraction = magnitude % scale as u64;
            format!(
                "{}{}{}.{:0width$}",
                sign,
                self.symbol,
                whole,
                fraction,
                width = decimals as usize
            )
        }
    }
}

/// Format an amount as Philippine pesos (`₱1,234,567.89`)
pub fn format_currency(amount: f64) -> String {
    CurrencyFormat::default().format(amount)
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_scenario_totals() {
        assert_eq!(format_currency(3_480_000.0), "₱3,480,000.00");
        assert_eq!(format_currency(5_089_500.0), "₱5,089,500.00");
        assert_eq!(format_currency(1_228_500.0), "₱1,228,500.00");
    }

    #[test]
    fn test_format_small_amounts() {
        assert_eq!(format_currency(0.0), "₱0.00");
        assert_eq!(format_currency(5.5), "₱5.50");
        assert_eq!(format_currency(999.0), "₱999.00");
        assert_eq!(format_currency(1000.0), "₱1,000.00");
    }

    #[test]
    fn test_format_rounds_float_noise() {
        assert_eq!(format_currency(1_049_999.9999999999), "₱1,050,000.00");
        assert_eq!(format_currency(999.999), "₱1,000.00");
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(format_currency(-1234.5), "-₱1,234.50");
        assert_eq!(format_currency(-0.001), "₱0.00");
    }

    #[test]
    fn test_format_non_finite() {
        assert_eq!(format_currency(f64::NAN), "₱NaN");
        assert_eq!(format_currency(f64::INFINITY), "₱inf");
    }

    #[test]
    fn test_decimals_are_capped() {
        let format = CurrencyFormat::new("$", 12);
        assert_eq!(format.decimals, MAX_DECIMALS);
        assert_eq!(format.format(1.5), "$1.500000");
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("0"), "0");
        assert_eq!(group_digits("123"), "123");
        assert_eq!(group_digits("1234"), "1,234");
        assert_eq!(group_digits("1234567890"), "1,234,567,890");
    }

    #[test]
    fn test_format_amounts_beyond_i64_minor_units() {
        assert_eq!(format_currency(1e17), "₱100,000,000,000,000,000.00");
        assert_eq!(format_currency(-1e17), "-₱100,000,000,000,000,000.00");
        assert_eq!(
            CurrencyFormat::new("$", 0).format(1e20),
            "$100,000,000,000,000,000,000"
        );
    }

    #[test]
    fn test_format_just_below_i64_boundary() {
        // 9e16 * 100 = 9e18 minor units, still on the integer path
        assert_eq!(format_currency(9e16), "₱90,000,000,000,000,000.00");
        assert_eq!(format_currency(3.48e16), "₱34,800,000,000,000,000.00");
    }
}
