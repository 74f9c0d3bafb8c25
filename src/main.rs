//! price-scraper - Command-line client for a product price scraping service.

use anyhow::Result;
use clap::{Parser, Subcommand};
use price_scraper::commands::{PlatformsCommand, ScrapeCommand};
use price_scraper::config::{Config, Grouping, OutputFormat};
use price_scraper::ScrapeError;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "price-scraper",
    version,
    about = "Fetch product prices and details through a scraping API"
)]
struct Cli {
    /// Base URL of the scraping API
    #[arg(long, global = true, env = "PRICE_SCRAPER_API_URL")]
    api_url: Option<String>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "PRICE_SCRAPER_PROXY")]
    proxy: Option<String>,

    /// Request timeout in seconds (no timeout by default)
    #[arg(long, global = true, env = "PRICE_SCRAPER_TIMEOUT")]
    timeout: Option<u64>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Currency symbol for numeric prices
    #[arg(long, global = true)]
    currency: Option<String>,

    /// Digit grouping for numeric prices (indian, western)
    #[arg(long, global = true)]
    grouping: Option<Grouping>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape one or more product pages
    #[command(alias = "s")]
    Scrape {
        /// Product URL(s), starting with http:// or https://
        #[arg(required = true)]
        urls: Vec<String>,

        /// Platform the URLs belong to (e.g. amazon)
        #[arg(short, long, env = "PRICE_SCRAPER_PLATFORM")]
        platform: Option<String>,
    },

    /// List supported platforms
    Platforms,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}

/// Exit status for a failed run: 2 when the input was rejected before any
/// scrape, 1 otherwise.
fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<ScrapeError>() {
        Some(e) if e.is_input_error() => 2,
        _ => 1,
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = Some(timeout);
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(currency) = cli.currency {
        config.currency_symbol = currency;
    }
    if let Some(grouping) = cli.grouping {
        config.grouping = grouping;
    }

    match cli.command {
        Commands::Scrape { urls, platform } => {
            let platform = platform.unwrap_or_else(|| config.platform.clone());
            let cmd = ScrapeCommand::new(config);

            let output = if urls.len() == 1 {
                cmd.execute(&platform, &urls[0]).await?
            } else {
                cmd.execute_batch(&platform, &urls).await?
            };

            println!("{}", output);
        }

        Commands::Platforms => {
            let output = PlatformsCommand::new(config).execute().await?;
            println!("{}", output);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_for_rejected_input() {
        assert_eq!(exit_code(&ScrapeError::MissingScheme.into()), 2);
        assert_eq!(exit_code(&ScrapeError::EmptyUrl.into()), 2);
        let unavailable = ScrapeError::PlatformUnavailable { platform: "flipkart".to_string() };
        assert_eq!(exit_code(&unavailable.into()), 2);
    }

    #[test]
    fn test_exit_code_for_failed_scrape() {
        assert_eq!(exit_code(&ScrapeError::NoData.into()), 1);
        let api = ScrapeError::Api { status: 404, detail: Some("not found".to_string()) };
        assert_eq!(exit_code(&api.into()), 1);
        assert_eq!(exit_code(&anyhow::anyhow!("Failed to load config")), 1);
    }
}
