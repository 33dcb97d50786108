//! Shiori: a resumable sitemap snapshot crawler
//!
//! This crate discovers target URLs from a sitemap, fetches the rendered
//! content of each page through a shared headless browser session, and
//! persists one output file per URL. Output files double as the crawl's
//! completion record: a URL whose file already exists is skipped, so an
//! interrupted run can simply be started again and picks up where it
//! left off.

pub mod config;
pub mod crawler;
pub mod sitemap;
pub mod store;

use thiserror::Error;

/// Main error type for Shiori operations
///
/// Per-URL fetch and persist failures never surface here; they are
/// contained inside the crawl loop and only reported. This type covers
/// the failures that abort a whole run.
#[derive(Debug, Error)]
pub enum ShioriError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Browser session error: {0}")]
    Session(#[from] crawler::SessionError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Shiori operations
pub type Result<T> = std::result::Result<T, ShioriError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_crawl, Coordinator, CrawlReport, FetchOutcome, Fetcher};
pub use sitemap::{dedup_preserving_order, UrlSource};
pub use store::{identifier_for, PageStore};
