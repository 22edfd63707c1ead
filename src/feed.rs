//! Lenient decoding of the raw JSON feeds.
//!
//! A feed is a JSON array of records. A record that fails to decode, at any nesting level, is
//! dropped with a `debug!` line and decoding continues with its siblings. Only a feed whose
//! top-level value is not an array is fatal.

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

use crate::ScriptureError;

/// Decode `value` as an array of `T`, skipping elements that do not decode.
pub fn records_from_value<T: DeserializeOwned>(
    value: Value,
    what: &str,
) -> Result<Vec<T>, ScriptureError> {
    match value {
        Value::Array(items) => Ok(decode_items(items, what)),
        Value::Null => Err(ScriptureError::Corpus(format!("{what} feed is absent (null)"))),
        other => Err(ScriptureError::Corpus(format!(
            "{what} feed must be a JSON array, found {}",
            value_kind(&other)
        ))),
    }
}

/// `deserialize_with` helper for nested record lists: the field itself must be an array, but
/// malformed elements are skipped.
pub fn skip_malformed<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = Vec::<Value>::deserialize(deserializer)?;
    Ok(decode_items(items, std::any::type_name::<T>()))
}

fn decode_items<T: DeserializeOwned>(items: Vec<Value>, what: &str) -> Vec<T> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(idx, item)| match serde_json::from_value::<T>(item) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::debug!("[feed] skipping malformed {} record #{}: {}", what, idx, e);
                None
            }
        })
        .collect()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Summary of one index build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildReport {
    /// Records that made it into the index.
    pub accepted: usize,
    /// Records dropped at build time (semantic malformation or duplicates).
    pub skipped: usize,
    /// Raw book tokens that only resolved through the title-case fallback.
    pub fallback_names: BTreeSet<String>,
}
