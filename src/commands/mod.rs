//! CLI command implementations.

pub mod platforms;
pub mod scrape;

pub use platforms::PlatformsCommand;
pub use scrape::ScrapeCommand;
