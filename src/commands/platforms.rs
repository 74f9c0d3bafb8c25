//! Platform listing command implementation.

use crate::api::{ApiClient, ScraperApi};
use crate::config::Config;
use crate::format::Formatter;
use crate::view::PlatformOption;
use anyhow::{Context, Result};

/// Lists the platforms the backend supports.
pub struct PlatformsCommand {
    config: Config,
}

impl PlatformsCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn execute(&self) -> Result<String> {
        let client = ApiClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(&client).await
    }

    /// Lists platforms with a provided client (for testing).
    pub async fn execute_with_client(&self, client: &impl ScraperApi) -> Result<String> {
        let platforms = client.platforms().await.context("Failed to fetch platform status")?;
        let options: Vec<PlatformOption> = platforms.iter().map(PlatformOption::from).collect();

        Ok(Formatter::new(self.config.format).format_platforms(&options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Platform, ProductResult};
    use crate::config::OutputFormat;
    use async_trait::async_trait;

    struct MockApi {
        platforms: Vec<Platform>,
    }

    #[async_trait]
    impl ScraperApi for MockApi {
        async fn scrape(&self, _platform: &str, _url: &str) -> Result<ProductResult> {
            anyhow::bail!("not used")
        }

        async fn platforms(&self) -> Result<Vec<Platform>> {
            if self.platforms.is_empty() {
                anyhow::bail!("Simulated network error")
            }
            Ok(self.platforms.clone())
        }
    }

    fn make_platforms() -> Vec<Platform> {
        vec![
            Platform { name: "amazon".into(), status: Some("implemented".into()), available: true },
            Platform { name: "myntra".into(), status: Some("coming_soon".into()), available: false },
        ]
    }

    #[tokio::test]
    async fn test_platforms_table() {
        let client = MockApi { platforms: make_platforms() };
        let cmd = PlatformsCommand::new(Config::default());

        let output = cmd.execute_with_client(&client).await.unwrap();
        assert!(output.contains("Amazon"));
        assert!(output.contains("Myntra (Coming Soon)"));
    }

    #[tokio::test]
    async fn test_platforms_json() {
        let client = MockApi { platforms: make_platforms() };
        let config = Config { format: OutputFormat::Json, ..Config::default() };
        let cmd = PlatformsCommand::new(config);

        let output = cmd.execute_with_client(&client).await.unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed[0]["enabled"], true);
        assert_eq!(parsed[1]["label"], "Myntra (Coming Soon)");
    }

    #[tokio::test]
    async fn test_platforms_error() {
        let client = MockApi { platforms: Vec::new() };
        let cmd = PlatformsCommand::new(Config::default());

        let err = cmd.execute_with_client(&client).await.unwrap_err();
        assert!(err.to_string().contains("Failed to fetch platform status"));
    }
}
