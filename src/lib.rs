//! price-scraper - Command-line client for a product price scraping service
//!
//! Sends product URLs to a scraping backend and renders the returned
//! product data, cleaning up the free-form details mapping on the way.

pub mod api;
pub mod commands;
pub mod config;
pub mod details;
pub mod format;
pub mod view;

pub use api::{ApiClient, Platform, ProductResult, ScrapeError, ScraperApi};
pub use config::Config;
pub use details::{DetailEntry, DetailsReducer, DetailsTable, RawDetailEntry};
pub use view::ProductView;
