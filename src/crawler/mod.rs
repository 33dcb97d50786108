//! Crawler module for sequential rendered-page fetching
//!
//! This module contains the core crawling logic, including:
//! - The fetch capability trait and its chromiumoxide implementation
//! - Text extraction from rendered HTML
//! - The sequential crawl coordinator
//! - The `run_crawl` entry point wiring discovery, store, and session

mod coordinator;
mod extract;
mod fetcher;

pub use coordinator::{Coordinator, CrawlReport};
pub use extract::extract_text;
pub use fetcher::{BrowserFetcher, BrowserSession, FetchOutcome, Fetcher, SessionError};

use crate::config::Config;
use crate::sitemap::UrlSource;
use crate::store::PageStore;
use crate::ShioriError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Fetch and parse the configured sitemap
/// 2. Short-circuit when discovery yields no URLs (no browser is
///    launched in that case)
/// 3. Open one browser session and crawl the working set in order,
///    skipping URLs whose output already exists
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(Some(report))` - Crawl completed; per-URL outcome counts
/// * `Ok(None)` - The sitemap yielded no URLs, nothing to do
/// * `Err(ShioriError)` - Configuration or session-level failure
pub async fn run_crawl(config: &Config) -> Result<Option<CrawlReport>, ShioriError> {
    let source = UrlSource::new(&config.source, &config.user_agent)?;
    let urls = source.list_urls().await;

    if urls.is_empty() {
        tracing::info!("No URLs found to crawl");
        return Ok(None);
    }

    tracing::info!("Found {} URLs to crawl", urls.len());

    let store = PageStore::new(&config.output);
    let fetcher = BrowserFetcher::new(config.browser.clone());
    let coordinator = Coordinator::new(store, fetcher);

    let report = coordinator.run(&urls).await?;
    Ok(Some(report))
}
