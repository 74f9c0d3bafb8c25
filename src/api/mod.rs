//! Scraping API client, wire models and errors.

pub mod client;
pub mod error;
pub mod models;

pub use client::{ApiClient, ScraperApi};
pub use error::ScrapeError;
pub use models::{Platform, ProductResult};
