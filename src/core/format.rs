//! Counter text formatting.
//!
//! The branch is chosen from the counter's *final* target, so a counter
//! heading for 2.5M renders `0.0M`, `0.4M`, … for its whole run rather than
//! switching styles mid-animation.

use num_format::{Locale, ToFormattedString};

use super::color::js_round;

/// Targets at or above this render in millions with one decimal.
pub const MILLIONS_THRESHOLD: f64 = 1_000_000.0;
/// Targets at or above this get thousands grouping (unless a percentage).
pub const GROUPING_THRESHOLD: f64 = 1_000.0;

/// Render `value` for a counter heading towards `target`.
pub fn format_number(value: f64, target: f64, prefix: &str, suffix: &str) -> String {
    let body = if target >= MILLIONS_THRESHOLD {
        format!("{}M", to_fixed_1(value / 1_000_000.0))
    } else if target >= GROUPING_THRESHOLD && !suffix.contains('%') {
        grouped(js_round(value))
    } else {
        number_string(js_round(value))
    };
    format!("{prefix}{body}{suffix}")
}

fn grouped(rounded: f64) -> String {
    if !rounded.is_finite() {
        return number_string(rounded);
    }
    (rounded as i64).to_formatted_string(&Locale::en)
}

/// One-decimal fixed notation of the exact double, with exact ties rounded
/// away from zero.
fn to_fixed_1(x: f64) -> String {
    if !x.is_finite() {
        return number_string(x);
    }
    let sign = if x < 0.0 { "-" } else { "" };
    let abs = x.abs();
    // A double lies exactly halfway between two tenths only at odd quarters.
    let quarters = abs * 4.0;
    let body = if quarters.fract() == 0.0 && quarters % 2.0 == 1.0 {
        let tenths = (abs * 10.0 + 0.5) as u64;
        format!("{}.{}", tenths / 10, tenths % 10)
    } else {
        format!("{abs:.1}")
    };
    format!("{sign}{body}")
}

/// Integral or non-finite value as text; negative zero prints as `0`.
fn number_string(x: f64) -> String {
    if x.is_nan() {
        "NaN".into()
    } else if x.is_infinite() {
        if x > 0.0 { "Infinity".into() } else { "-Infinity".into() }
    } else if x == 0.0 {
        "0".into()
    } else {
        format!("{x}")
    }
}
