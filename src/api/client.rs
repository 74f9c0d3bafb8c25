//! HTTP client for the scraping API.

use super::error::ScrapeError;
use super::models::{ErrorBody, Platform, PlatformList, ProductResult, ScrapeResponse};
use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, warn};
use wreq::Client;

/// Trait for scraping API calls - enables mocking for tests.
#[async_trait]
pub trait ScraperApi: Send + Sync {
    /// Asks the backend to scrape a product page.
    async fn scrape(&self, platform: &str, url: &str) -> Result<ProductResult>;

    /// Lists the platforms the backend knows about.
    async fn platforms(&self) -> Result<Vec<Platform>>;
}

/// Client for the scraping API.
///
/// Each call is a single request; nothing is retried.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a new client for `config.api_url`.
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder().gzip(true).brotli(true);

        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;

        Ok(Self { client, base_url: config.api_base().to_string() })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Performs a GET request and returns the status code and body.
    async fn get(&self, url: &str) -> Result<(u16, String)> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(ScrapeError::Transport)?;

        let status = response.status();
        debug!("Response status: {}", status);

        let body = response.text().await.map_err(ScrapeError::Transport)?;
        Ok((status.as_u16(), body))
    }

    fn api_error(status: u16, body: &str) -> ScrapeError {
        let detail = serde_json::from_str::<ErrorBody>(body).ok().and_then(|b| b.message());
        warn!("API returned status {}: {}", status, detail.as_deref().unwrap_or("<no detail>"));
        ScrapeError::Api { status, detail }
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

#[async_trait]
impl ScraperApi for ApiClient {
    async fn scrape(&self, platform: &str, url: &str) -> Result<ProductResult> {
        let request_url = format!(
            "{}/api/scrape?platform={}&url={}",
            self.base_url,
            urlencoding::encode(platform),
            urlencoding::encode(url)
        );

        info!("Scraping {} product: {}", platform, url);
        let (status, body) = self.get(&request_url).await?;

        if !is_success(status) {
            return Err(Self::api_error(status, &body).into());
        }

        let response: ScrapeResponse =
            serde_json::from_str(&body).map_err(ScrapeError::Malformed)?;

        match response {
            ScrapeResponse { success: true, data: Some(data), .. } => Ok(data),
            _ => Err(ScrapeError::NoData.into()),
        }
    }

    async fn platforms(&self) -> Result<Vec<Platform>> {
        let request_url = format!("{}/api/platforms", self.base_url);

        let (status, body) = self.get(&request_url).await?;
        if !is_success(status) {
            return Err(Self::api_error(status, &body).into());
        }

        let list: PlatformList = serde_json::from_str(&body).map_err(ScrapeError::Malformed)?;
        debug!("Backend lists {} platforms", list.platforms.len());
        Ok(list.platforms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_test_config(api_url: String) -> Config {
        Config { api_url, ..Config::default() }
    }

    async fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(&make_test_config(server.uri())).unwrap()
    }

    fn scrape_error(err: &anyhow::Error) -> &ScrapeError {
        err.downcast_ref::<ScrapeError>().expect("expected a ScrapeError")
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = ApiClient::new(&make_test_config("http://localhost:8000/".to_string())).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[tokio::test]
    async fn test_scrape_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/scrape"))
            .and(query_param("platform", "amazon"))
            .and(query_param("url", "https://www.amazon.in/dp/B0TEST1234?th=1&psc=1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "platform": "amazon",
                "data": {"title": "Widget", "price": 199.5}
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let product =
            client.scrape("amazon", "https://www.amazon.in/dp/B0TEST1234?th=1&psc=1").await.unwrap();

        assert_eq!(product.title.as_deref(), Some("Widget"));
        assert_eq!(product.price, Some(199.5));
    }

    #[tokio::test]
    async fn test_scrape_success_false() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/scrape"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let err = client.scrape("amazon", "https://example.com/p").await.unwrap_err();

        assert!(matches!(scrape_error(&err), ScrapeError::NoData));
        assert_eq!(err.to_string(), "No data received from server");
    }

    #[tokio::test]
    async fn test_scrape_missing_data() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/scrape"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let err = client.scrape("amazon", "https://example.com/p").await.unwrap_err();
        assert!(matches!(scrape_error(&err), ScrapeError::NoData));
    }

    #[tokio::test]
    async fn test_scrape_404_with_detail() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/scrape"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "not found"})))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let err = client.scrape("amazon", "https://example.com/p").await.unwrap_err();

        match scrape_error(&err) {
            ScrapeError::Api { status, detail } => {
                assert_eq!(*status, 404);
                assert_eq!(detail.as_deref(), Some("not found"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(err.to_string(), "not found");
    }

    #[tokio::test]
    async fn test_scrape_501_coming_soon() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/scrape"))
            .and(query_param("platform", "flipkart"))
            .respond_with(ResponseTemplate::new(501).set_body_json(json!({
                "detail": "Flipkart scraper is coming soon! This feature is not yet implemented."
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let err = client.scrape("flipkart", "https://www.flipkart.com/p").await.unwrap_err();
        assert!(err.to_string().contains("coming soon"));
    }

    #[tokio::test]
    async fn test_scrape_500_without_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/scrape"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let err = client.scrape("amazon", "https://example.com/p").await.unwrap_err();

        assert!(matches!(scrape_error(&err), ScrapeError::Api { status: 500, detail: None }));
        assert_eq!(err.to_string(), "Failed to scrape product");
    }

    #[tokio::test]
    async fn test_scrape_malformed_json() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/scrape"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let err = client.scrape("amazon", "https://example.com/p").await.unwrap_err();

        assert!(matches!(scrape_error(&err), ScrapeError::Malformed(_)));
        assert!(err.to_string().contains("Malformed response"));
    }

    #[tokio::test]
    async fn test_scrape_connection_refused() {
        // Nothing listens on port 9 locally
        let client = ApiClient::new(&make_test_config("http://127.0.0.1:9".to_string())).unwrap();
        let err = client.scrape("amazon", "https://example.com/p").await.unwrap_err();
        assert!(matches!(scrape_error(&err), ScrapeError::Transport(_)));
    }

    #[tokio::test]
    async fn test_platforms_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/platforms"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "platforms": [
                    {"name": "amazon", "status": "implemented", "available": true},
                    {"name": "flipkart", "status": "coming_soon", "available": false},
                    {"name": "myntra", "status": "coming_soon", "available": false},
                    {"name": "ajio", "status": "coming_soon", "available": false}
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let platforms = client.platforms().await.unwrap();

        assert_eq!(platforms.len(), 4);
        assert_eq!(platforms[0].name, "amazon");
        assert!(platforms[0].available);
        assert!(platforms[1..].iter().all(|p| !p.available));
    }

    #[tokio::test]
    async fn test_platforms_http_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/platforms"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let err = client.platforms().await.unwrap_err();
        assert!(matches!(scrape_error(&err), ScrapeError::Api { status: 503, .. }));
    }
}
