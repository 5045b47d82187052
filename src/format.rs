//! Display formatting for prices, rates, dates and counters.
//!
//! Prices round halves up (`floor(x + 0.5)`). Rates use fixed-point output
//! where an exact tie rounds away from zero.

use crate::config::DisplayConfig;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::fmt::Write;

/// Shown wherever a value is absent.
pub const PLACEHOLDER: &str = "—";

/// Decimal places used for percentage rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RatePrecision {
    #[default]
    One,
    Two,
}

impl RatePrecision {
    pub fn from_decimals(decimals: u8) -> Option<Self> {
        match decimals {
            1 => Some(RatePrecision::One),
            2 => Some(RatePrecision::Two),
            _ => None,
        }
    }

    pub fn decimals(self) -> u32 {
        match self {
            RatePrecision::One => 1,
            RatePrecision::Two => 2,
        }
    }
}

/// Formats backend values for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Formatter {
    currency_symbol: String,
    rate_precision: RatePrecision,
    date_format: String,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::from_config(&DisplayConfig::default())
    }
}

impl Formatter {
    pub fn new(
        currency_symbol: impl Into<String>,
        rate_precision: RatePrecision,
        date_format: impl Into<String>,
    ) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
            rate_precision,
            date_format: date_format.into(),
        }
    }

    /// Build from display configuration. Unsupported precisions fall back to one decimal.
    pub fn from_config(config: &DisplayConfig) -> Self {
        Self::new(
            config.currency_symbol.clone(),
            RatePrecision::from_decimals(config.rate_precision).unwrap_or_default(),
            config.date_format.clone(),
        )
    }

    pub fn rate_precision(&self) -> RatePrecision {
        self.rate_precision
    }

    /// `₩1,234` style price, rounded to the nearest integer.
    pub fn price(&self, value: Option<f64>) -> String {
        match value {
            Some(v) if v.is_finite() => {
                format!("{}{}", self.currency_symbol, group_thousands(round_half_up(v)))
            }
            _ => PLACEHOLDER.to_string(),
        }
    }

    /// `+12.3%` style rate; non-negative values carry an explicit `+`.
    pub fn rate(&self, value: Option<f64>) -> String {
        match value {
            Some(v) if v.is_finite() => {
                let v = if v == 0.0 { 0.0 } else { v };
                let prefix = if v >= 0.0 { "+" } else { "" };
                format!(
                    "{}{}%",
                    prefix,
                    to_fixed(v, self.rate_precision.decimals())
                )
            }
            _ => PLACEHOLDER.to_string(),
        }
    }

    /// Short date. Strings that are not dates are returned verbatim.
    pub fn date(&self, value: Option<&str>) -> String {
        let raw = match value.map(str::trim) {
            Some(raw) if !raw.is_empty() => raw,
            _ => return PLACEHOLDER.to_string(),
        };

        match parse_date(raw) {
            Some(date) => {
                let mut out = String::new();
                match write!(out, "{}", date.format(&self.date_format)) {
                    Ok(()) => out,
                    Err(_) => raw.to_string(),
                }
            }
            None => raw.to_string(),
        }
    }

    /// Grouped share volume; zero or absent volume shows the placeholder.
    pub fn volume(&self, value: Option<i64>) -> String {
        match value {
            Some(v) if v != 0 => group_thousands(v),
            _ => PLACEHOLDER.to_string(),
        }
    }

    /// Whole-percent success rate, e.g. `75%`.
    pub fn success_rate(&self, value: Option<f64>) -> String {
        match value {
            Some(v) if v.is_finite() => format!("{}%", round_half_up(v)),
            _ => PLACEHOLDER.to_string(),
        }
    }
}

/// CSS class for a signed rate.
pub fn rate_class(value: Option<f64>) -> &'static str {
    match value {
        Some(v) if v.is_nan() => "neutral",
        Some(v) if v >= 0.0 => "positive",
        Some(_) => "negative",
        None => "neutral",
    }
}

/// Round to the nearest integer with halves going towards positive infinity.
pub fn round_half_up(value: f64) -> i64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor as i64 + 1
    } else {
        floor as i64
    }
}

/// Insert `,` every three digits.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Fixed-point formatting where an exact tie rounds away from zero.
///
/// Ties can only occur when `|value| * 10^digits` is exactly an odd multiple
/// of one half, which is checked on the binary representation.
pub fn to_fixed(value: f64, digits: u32) -> String {
    let digits_usize = digits as usize;
    if !is_exact_tie(value, digits) {
        return format!("{:.*}", digits_usize, value);
    }

    let scale = 10u64.pow(digits);
    let scaled = (value.abs() * scale as f64).ceil() as u64;
    let sign = if value < 0.0 { "-" } else { "" };
    if digits == 0 {
        return format!("{}{}", sign, scaled);
    }
    format!(
        "{}{}.{:0width$}",
        sign,
        scaled / scale,
        scaled % scale,
        width = digits_usize
    )
}

fn is_exact_tie(value: f64, digits: u32) -> bool {
    if !value.is_finite() || value == 0.0 {
        return false;
    }

    let bits = value.to_bits();
    let exponent_bits = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exponent) = if exponent_bits == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), exponent_bits - 1075)
    };

    // 2 * |value| * 10^digits = mantissa * 5^digits * 2^(exponent + digits + 1)
    // is an odd integer exactly when the power of two cancels the mantissa's
    // trailing zeros.
    mantissa.trailing_zeros() as i32 + exponent + digits as i32 + 1 == 0
}

/// Parse the date forms the backend emits.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(dt.date());
        }
    }
    None
}
