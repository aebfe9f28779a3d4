use serde_json::{Number, Value};

use crate::classifier::FieldCategory;

/// Apply the rendering rule for `category` to a numeric leaf.
pub fn format_number(category: FieldCategory, value: &Number) -> Value {
    match category {
        FieldCategory::Dollar => Value::String(format_dollar(value)),
        FieldCategory::Multiple => format_multiple(value),
        FieldCategory::NonPercent => format_non_percent(value),
        FieldCategory::Percent => format_percent(value),
    }
}

/// Comma-grouped dollar rendering. Integers keep every digit; fractional
/// values are rounded to two decimals with trailing zeros trimmed, so
/// `1234.5` renders as `"1,234.5"` rather than `"1,234.50"`.
pub fn format_dollar(value: &Number) -> String {
    if let Some(i) = value.as_i64() {
        let grouped = group_digits(&i.unsigned_abs().to_string());
        return if i < 0 { format!("-{}", grouped) } else { grouped };
    }
    if let Some(u) = value.as_u64() {
        return group_digits(&u.to_string());
    }
    let x = value.as_f64().unwrap_or(0.0);
    if !x.is_finite() {
        return x.to_string();
    }
    let rounded = if x.fract() == 0.0 { x } else { round2(x) };
    let sign = if rounded < 0.0 { "-" } else { "" };
    let rendered = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');
    if frac_part.is_empty() {
        format!("{}{}", sign, group_digits(int_part))
    } else {
        format!("{}{}.{}", sign, group_digits(int_part), frac_part)
    }
}

/// Valuation multiples and turnover ratios: plain two-decimal numbers,
/// never strings.
pub fn format_multiple(value: &Number) -> Value {
    round_to_two(value)
}

/// Per-share metrics and counts stay numeric; fractional values are rounded
/// to two decimals.
pub fn format_non_percent(value: &Number) -> Value {
    round_to_two(value)
}

/// Ratio fields arrive as raw fractions (`0.234` meaning 23.4%). Integers
/// pass through untouched: an integer ratio is almost always a placeholder,
/// and `5` must not become `"500%"`.
pub fn format_percent(value: &Number) -> Value {
    if is_integer(value) {
        return Value::Number(value.clone());
    }
    let x = value.as_f64().unwrap_or(0.0);
    if !x.is_finite() {
        return Value::Number(value.clone());
    }
    Value::String(percent_string(x))
}

/// Render a raw fraction as a percent string with adaptive precision.
/// Magnitudes of at least 0.01% get two decimal places; below that the
/// width expands (minimum four places) so at least two significant digits
/// survive: `0.0000347` renders as `"0.0035%"`, not `"0.00%"`.
fn percent_string(x: f64) -> String {
    let percent = x * 100.0;
    let abs = percent.abs();
    let places = if abs >= 0.01 {
        2
    } else {
        two_sig_digit_places(abs).max(4)
    };
    format!("{:.*}%", places, percent)
}

/// Decimal places needed to keep two significant digits of a value below 0.01.
fn two_sig_digit_places(abs: f64) -> usize {
    if abs == 0.0 {
        return 4;
    }
    let magnitude = abs.log10().floor();
    (-magnitude) as usize + 1
}

/// Whole-share count rendering for quote payloads: rounded to an integer,
/// comma-grouped.
pub(crate) fn format_share_count(value: &Number) -> String {
    if value.is_i64() || value.is_u64() {
        return format_dollar(value);
    }
    let x = value.as_f64().unwrap_or(0.0);
    if !x.is_finite() {
        return x.to_string();
    }
    let rounded = x.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}{}", sign, group_digits(&format!("{:.0}", rounded.abs())))
}

fn round_to_two(value: &Number) -> Value {
    if is_integer(value) {
        return Value::Number(value.clone());
    }
    let x = value.as_f64().unwrap_or(0.0);
    Number::from_f64(round2(x))
        .map(Value::Number)
        .unwrap_or_else(|| Value::Number(value.clone()))
}

/// i64/u64-backed numbers, or float values with no fractional part.
fn is_integer(value: &Number) -> bool {
    if value.is_i64() || value.is_u64() {
        return true;
    }
    value.as_f64().map(|x| x.fract() == 0.0).unwrap_or(false)
}

/// Round to two decimal places, half away from zero.
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Insert comma separators into a bare digit string.
fn group_digits(digits: &str) -> String {
    let mut reversed = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            reversed.push(',');
        }
        reversed.push(c);
    }
    reversed.chars().rev().collect()
}
