//! Wire models for the scraping API.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Product data returned by a successful scrape. Every field is optional.
///
/// Scalar fields are read leniently: a field of the wrong JSON type is
/// treated as missing instead of rejecting the whole product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductResult {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    /// Numeric price, when the backend could parse one
    #[serde(default, deserialize_with = "lenient_number")]
    pub price: Option<f64>,
    /// Price as shown on the product page
    #[serde(default, deserialize_with = "lenient_text")]
    pub price_text: Option<String>,
    /// Star rating (0.0 - 5.0)
    #[serde(default, deserialize_with = "lenient_number")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub rating_text: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub availability: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    /// Image URL
    #[serde(default, deserialize_with = "lenient_text")]
    pub image: Option<String>,
    /// Canonical product URL
    #[serde(default, deserialize_with = "lenient_text")]
    pub url: Option<String>,
    /// Free-form details mapping, in backend order
    #[serde(default)]
    pub details: Option<Value>,
}

/// Numbers, or strings holding a number (`"4.3"`).
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    })
}

/// Strings, with numbers and booleans rendered as text.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// Envelope of `GET /api/scrape`.
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub data: Option<ProductResult>,
}

/// Error body sent with non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorBody {
    /// The `detail` message, if it is usable text.
    ///
    /// Validation failures carry a list of objects with a `msg` field
    /// instead of a plain string.
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Array(items) => {
                let msgs: Vec<&str> =
                    items.iter().filter_map(|item| item.get("msg")?.as_str()).collect();
                (!msgs.is_empty()).then(|| msgs.join("; "))
            }
            _ => None,
        }
    }
}

/// A platform the backend knows about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    pub name: String,
    /// Implementation status, e.g. "implemented" or "coming_soon"
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub available: bool,
}

/// Body of `GET /api/platforms`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlatformList {
    #[serde(default)]
    pub platforms: Vec<Platform>,
}
