//! Select options
//!
//! Options reach us in two shapes: a JSON array, or a string holding a
//! JSON-encoded array (the backend stores them as raw text). Authors type
//! them as a comma separated list. Everything is normalized here, once.

use serde_json::Value;

/// Normalize the wire representation of a field's options.
///
/// Arrays are taken as-is (non-string items are skipped), strings are parsed
/// as a JSON array, anything else yields no options.
pub fn normalize_options(raw: Option<&Value>) -> Vec<String> {
    match raw {
        Some(Value::Array(items)) => strings_of(items),
        Some(Value::String(encoded)) => {
            let encoded = encoded.trim();
            if encoded.is_empty() {
                return Vec::new();
            }
            match serde_json::from_str::<Value>(encoded) {
                Ok(Value::Array(items)) => strings_of(&items),
                Ok(_) | Err(_) => {
                    tracing::warn!(options = encoded, "ignoring malformed field options");
                    Vec::new()
                }
            }
        }
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            tracing::warn!(options = %other, "ignoring malformed field options");
            Vec::new()
        }
    }
}

/// Split an author-typed option list such as `"Ya, Tidak"`.
pub fn split_options(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn strings_of(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(|v| v.as_str().map(String::from))
        .collect()
}
