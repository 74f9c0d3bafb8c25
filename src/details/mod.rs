//! Cleanup of the free-form "details" mapping returned with a product.
//!
//! Scraped detail labels arrive with invisible marks, repeated labels and
//! key/value pairs packed into one string. [`normalize`] cleans text,
//! [`split`] repairs single pairs and [`DetailsReducer`] builds the final
//! deduplicated [`DetailsTable`].

pub mod normalize;
pub mod reduce;
pub mod split;

pub use normalize::normalize;
pub use reduce::{DetailsReducer, DetailsTable, KEY_FEATURES};
pub use split::split;

use serde::Serialize;
use serde_json::{Map, Value};

/// A detail pair exactly as the backend sent it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDetailEntry {
    pub key: String,
    pub value: String,
}

impl RawDetailEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: key.into(), value: value.into() }
    }
}

/// A cleaned detail pair. The key never contains a colon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailEntry {
    pub key: String,
    pub value: String,
}

impl std::fmt::Display for DetailEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.value.is_empty() {
            write!(f, "{}:", self.key)
        } else {
            write!(f, "{}: {}", self.key, self.value)
        }
    }
}

/// Converts a JSON details object into raw entries, keeping backend order.
pub fn raw_entries(details: &Map<String, Value>) -> Vec<RawDetailEntry> {
    details.iter().map(|(k, v)| RawDetailEntry::new(k.clone(), value_text(v))).collect()
}

/// Textual form of a detail value.
///
/// Strings pass through, `null` is empty, arrays join their items with
/// `", "`, anything else uses its JSON text.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(value_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}
