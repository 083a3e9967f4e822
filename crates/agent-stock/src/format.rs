//! Plain-text rendering of provider records

use crate::api::Record;
use serde_json::Value;

/// Render a record as `key: value` pairs joined by `", "`
///
/// Keys keep the record's order. String values are written without quotes,
/// everything else as compact JSON.
pub fn pretty_print(record: &Record) -> String {
    record
        .iter()
        .map(|(key, value)| match value {
            Value::String(text) => format!("{key}: {text}"),
            other => format!("{key}: {other}"),
        })
        .collect::<Vec<_>>()
        .join(", ")
}
