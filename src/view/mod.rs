//! View-model for a scraped product.
//!
//! [`ProductView::build`] turns a [`ProductResult`] into display-ready text:
//! price, rating, availability badge, details rows and fallbacks for every
//! missing field. It knows nothing about the output format; see
//! [`crate::format`] for rendering.

pub mod price;

use crate::api::{Platform, ProductResult};
use crate::config::Config;
use crate::details::{raw_entries, value_text, DetailEntry, DetailsReducer, KEY_FEATURES};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

pub use price::format_price;

pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/400x400?text=No+Image";
pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_DESCRIPTION: &str = "No description available";
pub const NO_DETAILS: &str = "No product details available.";

/// Price display settings.
#[derive(Debug, Clone)]
pub struct PriceStyle {
    pub currency_symbol: String,
    pub grouping: crate::config::Grouping,
}

impl Default for PriceStyle {
    fn default() -> Self {
        let config = Config::default();
        Self::from(&config)
    }
}

impl From<&Config> for PriceStyle {
    fn from(config: &Config) -> Self {
        Self { currency_symbol: config.currency_symbol.clone(), grouping: config.grouping }
    }
}

/// Display-ready product.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub title: String,
    pub image: ImageView,
    pub price: String,
    pub rating: RatingView,
    pub availability: AvailabilityView,
    pub description: String,
    pub url: Option<String>,
    pub details: DetailsView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageView {
    pub src: String,
    pub alt: String,
}

/// Rating text plus how many of the five stars to fill.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingView {
    pub text: String,
    pub stars: Option<StarFill>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StarFill {
    pub full: u8,
    pub half: bool,
}

impl StarFill {
    pub const SLOTS: u8 = 5;

    /// Full stars are the integer part; a half star shows from .5 upwards.
    pub fn from_rating(rating: f64) -> Self {
        let clamped = rating.clamp(0.0, Self::SLOTS as f64);
        let full = clamped.floor() as u8;
        let half = full < Self::SLOTS && clamped.fract() >= 0.5;
        Self { full, half }
    }

    /// Five-slot glyph string such as `★★★★½`.
    pub fn glyphs(&self) -> String {
        let mut out = String::new();
        for slot in 0..Self::SLOTS {
            if slot < self.full {
                out.push('★');
            } else if slot == self.full && self.half {
                out.push('½');
            } else {
                out.push('☆');
            }
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityView {
    pub text: String,
    pub badge: Badge,
}

impl AvailabilityView {
    pub fn from_status(status: Option<&str>) -> Self {
        let Some(status) = non_empty(status) else {
            return Self { text: NOT_AVAILABLE.to_string(), badge: Badge::Neutral };
        };

        let lower = status.to_lowercase();
        let badge = if lower.contains("in stock") || lower.contains("available") {
            Badge::Positive
        } else {
            Badge::Negative
        };

        Self { text: status.to_string(), badge }
    }
}

/// Cleaned details rows and the separate key-features list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetailsView {
    pub rows: Vec<DetailEntry>,
    pub features: Vec<String>,
    /// Shown instead of rows when the backend sent nothing at all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl DetailsView {
    /// Builds the details section from the raw `details` value.
    ///
    /// A value that is not an object cannot be shown; it is logged and the
    /// section is left empty so the rest of the product still renders.
    pub fn from_value(details: Option<&Value>) -> Self {
        let map = match details {
            None | Some(Value::Null) => None,
            Some(Value::Object(map)) => Some(map),
            Some(other) => {
                warn!("Failed to render product details: expected an object, got {}", other);
                return Self::default();
            }
        };

        let Some(map) = map else {
            return Self::empty();
        };

        let features = map.get(KEY_FEATURES).map(features_list).unwrap_or_default();
        let raw = raw_entries(map);
        let rows = DetailsReducer::new().reduce(&raw).into_entries();
        debug!("Product details: {} rows, {} features", rows.len(), features.len());

        // Mirrors the raw input: only an empty mapping gets the placeholder.
        let has_entries = raw.iter().any(|e| e.key != KEY_FEATURES);
        if !has_entries && features.is_empty() {
            return Self::empty();
        }

        Self { rows, features, placeholder: None }
    }

    fn empty() -> Self {
        Self { placeholder: Some(NO_DETAILS.to_string()), ..Self::default() }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.features.is_empty()
    }
}

fn features_list(value: &Value) -> Vec<String> {
    let items: Vec<String> = match value {
        Value::Array(items) => items.iter().map(value_text).collect(),
        other => vec![value_text(other)],
    };
    items
        .iter()
        .map(|s| crate::details::normalize(s))
        .filter(|s| !s.is_empty())
        .collect()
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

impl ProductView {
    /// Builds the view. Never fails; missing fields get fallbacks.
    pub fn build(product: &ProductResult, style: &PriceStyle) -> Self {
        let title = non_empty(product.title.as_deref());

        let image = match non_empty(product.image.as_deref()) {
            Some(src) => ImageView {
                src: src.to_string(),
                alt: title.unwrap_or("Product Image").to_string(),
            },
            None => ImageView { src: PLACEHOLDER_IMAGE.to_string(), alt: "No Image".to_string() },
        };

        Self {
            title: title.unwrap_or(NOT_AVAILABLE).to_string(),
            image,
            price: Self::price_text(product, style),
            rating: Self::rating_view(product.rating),
            availability: AvailabilityView::from_status(product.availability.as_deref()),
            description: non_empty(product.description.as_deref())
                .unwrap_or(NO_DESCRIPTION)
                .to_string(),
            url: non_empty(product.url.as_deref()).map(str::to_string),
            details: DetailsView::from_value(product.details.as_ref()),
        }
    }

    /// Numeric price first, then the page's price text, then N/A.
    ///
    /// A zero price counts as missing.
    fn price_text(product: &ProductResult, style: &PriceStyle) -> String {
        match product.price {
            Some(price) if price != 0.0 && price.is_finite() => {
                format_price(price, &style.currency_symbol, style.grouping)
            }
            _ => non_empty(product.price_text.as_deref()).unwrap_or(NOT_AVAILABLE).to_string(),
        }
    }

    fn rating_view(rating: Option<f64>) -> RatingView {
        match rating {
            Some(r) if r != 0.0 && r.is_finite() => {
                RatingView { text: format!("{:.1}", r), stars: Some(StarFill::from_rating(r)) }
            }
            _ => RatingView { text: NOT_AVAILABLE.to_string(), stars: None },
        }
    }
}

/// A platform as offered to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformOption {
    pub name: String,
    pub label: String,
    pub enabled: bool,
}

impl From<&Platform> for PlatformOption {
    fn from(platform: &Platform) -> Self {
        let display = capitalize(&platform.name);
        let label = if platform.available { display } else { format!("{} (Coming Soon)", display) };
        Self { name: platform.name.clone(), label, enabled: platform.available }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
