//! Failures surfaced to the user when a scrape cannot be shown.

use thiserror::Error;

/// Fallback message when the backend gives no usable `detail`.
pub const GENERIC_FAILURE: &str = "Failed to scrape product";

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Please enter a product URL")]
    EmptyUrl,

    #[error("Please enter a valid URL (must start with http:// or https://)")]
    MissingScheme,

    #[error("{platform} is not available yet (Coming Soon)")]
    PlatformUnavailable { platform: String },

    /// Non-2xx response; `detail` is the backend's message when it sent one.
    #[error("{}", .detail.as_deref().unwrap_or(GENERIC_FAILURE))]
    Api { status: u16, detail: Option<String> },

    #[error("Malformed response from server: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("No data received from server")]
    NoData,

    #[error("Request failed: {0}")]
    Transport(#[from] wreq::Error),
}

impl ScrapeError {
    /// True for errors raised before any network call.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ScrapeError::EmptyUrl
                | ScrapeError::MissingScheme
                | ScrapeError::PlatformUnavailable { .. }
        )
    }
}
