//! Field normalizer: turns a loosely-typed stored column into clean string tokens.

use serde_json::Value;

/// A raw `required_*` column as it comes back from the store.
///
/// The workflow that writes the `metrics` table does not enforce a schema, so the same
/// column can hold a JSON array, a string containing a JSON array, a bare string, or null.
#[derive(Debug, Clone, PartialEq)]
pub enum RawField {
    Missing,
    List(Vec<Value>),
    Text(String),
    Other(Value),
}

impl From<Value> for RawField {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => RawField::Missing,
            Value::Array(items) => RawField::List(items),
            Value::String(s) => RawField::Text(s),
            other => RawField::Other(other),
        }
    }
}

impl From<Option<Value>> for RawField {
    fn from(value: Option<Value>) -> Self {
        value.map(RawField::from).unwrap_or(RawField::Missing)
    }
}

/// What to do with a string that looks like a JSON array but fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedArray {
    /// Keep the whole trimmed string as one token. Only `[...]`-enclosed strings are
    /// treated as array attempts.
    Literal,
    /// Produce no tokens. Any string containing `[` or `]` is treated as an array
    /// attempt; bare strings without brackets still yield one token.
    Drop,
}

impl MalformedArray {
    fn is_array_attempt(self, trimmed: &str) -> bool {
        match self {
            MalformedArray::Literal => trimmed.starts_with('[') && trimmed.ends_with(']'),
            MalformedArray::Drop => trimmed.contains('[') || trimmed.contains(']'),
        }
    }
}

/// Normalizes a raw field into trimmed, non-empty string tokens, preserving order.
/// Never fails: anything that is not string-like yields an empty list.
pub fn normalize_field(raw: &RawField, malformed: MalformedArray) -> Vec<String> {
    let items: Vec<Value> = match raw {
        RawField::Missing | RawField::Other(_) => return Vec::new(),
        RawField::List(items) => items.clone(),
        RawField::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Vec::new();
            }
            if malformed.is_array_attempt(trimmed) {
                match serde_json::from_str::<Value>(trimmed) {
                    Ok(Value::Array(items)) => items,
                    Ok(_) => return Vec::new(),
                    Err(_) => match malformed {
                        MalformedArray::Literal => vec![Value::String(trimmed.to_string())],
                        MalformedArray::Drop => return Vec::new(),
                    },
                }
            } else {
                vec![Value::String(trimmed.to_string())]
            }
        }
    };

    items
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
