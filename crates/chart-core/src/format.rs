// File: crates/chart-core/src/format.rs
// Summary: Text formatting for legend values, tooltip dates and currency amounts.

use chrono::{DateTime, Utc};
use num_format::{Locale, ToFormattedString};

/// Host-supplied legend value formatter.
pub type LegendFormatter = Box<dyn Fn(f64) -> String + Send + Sync>;

/// Plain number stringification: integers without a fractional part,
/// shortest round-trip digits otherwise, exponent form for very large or tiny
/// magnitudes (`1e+21`, `1e-7`).
pub fn format_number(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    let a = v.abs();
    if a.is_finite() && (a >= 1e21 || a < 1e-6) {
        let s = format!("{v:e}");
        return match s.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => s,
        };
    }
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() };
    }
    v.to_string()
}

/// Default legend formatter.
pub fn default_legend_formatter() -> LegendFormatter {
    Box::new(format_number)
}

/// Tooltip date, e.g. `Feb 01, 2024`.
pub fn tooltip_date(t: DateTime<Utc>) -> String {
    t.format("%b %d, %Y").to_string()
}

/// US dollar amount with thousands grouping and cents, e.g. `-$1,234.50`.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return format_number(value);
    }
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents != 0 { "-" } else { "" };
    format!("{sign}${}.{:02}", (cents / 100).to_formatted_string(&Locale::en), cents % 100)
}
