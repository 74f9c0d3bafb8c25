//! Product scrape command implementation.

use crate::api::{ApiClient, ScrapeError, ScraperApi};
use crate::config::Config;
use crate::format::Formatter;
use crate::view::{PriceStyle, ProductView};
use anyhow::{Context, Result};
use tracing::{info, warn};

/// Checks a product URL before any request is made.
pub fn validate_url(url: &str) -> Result<&str, ScrapeError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ScrapeError::EmptyUrl);
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ScrapeError::MissingScheme);
    }
    Ok(url)
}

/// Scrapes product URLs through the API and renders the results.
pub struct ScrapeCommand {
    config: Config,
}

impl ScrapeCommand {
    /// Creates a new scrape command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Scrapes one product and returns formatted output.
    pub async fn execute(&self, platform: &str, url: &str) -> Result<String> {
        let client = ApiClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(&client, platform, url).await
    }

    /// Scrapes one product with a provided client (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl ScraperApi,
        platform: &str,
        url: &str,
    ) -> Result<String> {
        let url = validate_url(url)?;
        let platform = platform.trim().to_lowercase();

        self.ensure_platform_available(client, &platform).await?;

        let view = self.fetch_view(client, &platform, url).await?;
        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_product(&view))
    }

    /// Scrapes several products in order.
    pub async fn execute_batch(&self, platform: &str, urls: &[String]) -> Result<String> {
        let client = ApiClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_batch_with_client(&client, platform, urls).await
    }

    /// Scrapes several products with a provided client (for testing).
    ///
    /// Failed URLs are reported on stderr and skipped.
    pub async fn execute_batch_with_client(
        &self,
        client: &impl ScraperApi,
        platform: &str,
        urls: &[String],
    ) -> Result<String> {
        let platform = platform.trim().to_lowercase();
        self.ensure_platform_available(client, &platform).await?;

        let mut views = Vec::new();
        for url in urls {
            let url = match validate_url(url) {
                Ok(url) => url,
                Err(e) => {
                    eprintln!("Skipping {:?}: {}", url, e);
                    continue;
                }
            };

            match self.fetch_view(client, &platform, url).await {
                Ok(view) => views.push(view),
                Err(e) => eprintln!("Failed to scrape {}: {}", url, e),
            }
        }

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_products(&views))
    }

    async fn fetch_view(
        &self,
        client: &impl ScraperApi,
        platform: &str,
        url: &str,
    ) -> Result<ProductView> {
        info!("Looking up {} product: {}", platform, url);
        let product = client.scrape(platform, url).await?;
        Ok(ProductView::build(&product, &PriceStyle::from(&self.config)))
    }

    /// Refuses platforms the backend lists as unavailable.
    ///
    /// The lookup is advisory: if it fails, or the platform is not listed,
    /// the scrape goes ahead and the backend has the final word.
    async fn ensure_platform_available(
        &self,
        client: &impl ScraperApi,
        platform: &str,
    ) -> Result<()> {
        let platforms = match client.platforms().await {
            Ok(platforms) => platforms,
            Err(e) => {
                warn!("Failed to fetch platform status: {}", e);
                return Ok(());
            }
        };

        match platforms.iter().find(|p| p.name.eq_ignore_ascii_case(platform)) {
            Some(p) if !p.available => {
                Err(ScrapeError::PlatformUnavailable { platform: p.name.clone() }.into())
            }
            _ => Ok(()),
        }
    }
}
