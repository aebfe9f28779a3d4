use serde_json::Value;

use crate::classifier::classify;
use crate::error::FormatError;
use crate::formatter;

/// Quote-endpoint keys that get dollar-style rendering.
const QUOTE_DOLLAR_FIELDS: &[&str] = &[
    "price", "dayhigh", "daylow", "yearhigh", "yearlow", "marketcap",
    "priceavg50", "priceavg200", "volume", "avgvolume", "pe", "previousclose",
    "open",
];

/// Recursively format every numeric leaf of a statement / key-metrics /
/// ratios payload, deciding the rendering from the leaf's enclosing key.
///
/// The shape of the tree never changes: objects keep their keys in order,
/// arrays keep their length, and non-numeric leaves pass through untouched.
/// Array elements are walked fresh — the array's own key does not carry
/// into its elements.
pub fn percentify_values(value: Value, parent_key: Option<&str>) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| percentify_values(item, None))
                .collect(),
        ),
        Value::Object(fields) => Value::Object(
            fields
                .into_iter()
                .map(|(key, field)| {
                    let formatted = percentify_values(field, Some(key.as_str()));
                    (key, formatted)
                })
                .collect(),
        ),
        Value::Number(number) => {
            formatter::format_number(classify(parent_key.unwrap_or("")), &number)
        }
        scalar => scalar,
    }
}

/// One-level formatter for `/quote`-shaped payloads (objects or arrays of
/// objects). The rules here are deliberately independent from
/// [`percentify_values`]: quote output is consumed by exact-string-match UI
/// code, so the two formatters must not be unified.
pub fn format_quote_data(value: Value) -> Value {
    match value {
        Value::Array(items) => {
            Value::Array(items.into_iter().map(format_quote_data).collect())
        }
        Value::Object(fields) => Value::Object(
            fields
                .into_iter()
                .map(|(key, field)| {
                    let formatted = format_quote_field(&key, field);
                    (key, formatted)
                })
                .collect(),
        ),
        scalar => scalar,
    }
}

fn format_quote_field(key: &str, value: Value) -> Value {
    let number = match value {
        Value::Number(number) => number,
        other => return other,
    };
    let lower = key.to_lowercase();
    match lower.as_str() {
        // already a percent magnitude upstream, no scaling
        "changespercentage" => {
            Value::String(format!("{:.2}%", number.as_f64().unwrap_or(0.0)))
        }
        "sharesoutstanding" => Value::String(formatter::format_share_count(&number)),
        "eps" => Value::Number(number),
        field if QUOTE_DOLLAR_FIELDS.contains(&field) => {
            Value::String(formatter::format_dollar(&number))
        }
        _ => Value::Number(number),
    }
}

/// Parse a raw statement/metrics/ratios response body, format it, and
/// re-serialize. This is the entry point the endpoint layer calls with the
/// upstream body string.
pub fn percentify_payload(raw: &str) -> Result<String, FormatError> {
    let parsed: Value = serde_json::from_str(raw)?;
    let formatted = percentify_values(parsed, None);
    tracing::debug!("formatted statement payload ({} bytes in)", raw.len());
    Ok(serde_json::to_string(&formatted)?)
}

/// Parse a raw quote response body, format it, and re-serialize.
pub fn format_quote_payload(raw: &str) -> Result<String, FormatError> {
    let parsed: Value = serde_json::from_str(raw)?;
    let formatted = format_quote_data(parsed);
    tracing::debug!("formatted quote payload ({} bytes in)", raw.len());
    Ok(serde_json::to_string(&formatted)?)
}
