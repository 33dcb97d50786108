//! Crawl coordinator - main crawl orchestration logic
//!
//! This module contains the sequential crawl loop that ties the other
//! components together:
//! - Deduplicating the working set while preserving order
//! - Opening one browser session for the whole run
//! - Skipping URLs whose output already exists
//! - Fetching, persisting, and reporting per-URL outcomes
//! - Guaranteeing the session is released on every exit path
//!
//! URL *i* is fully resolved (skipped, persisted, or failure-reported)
//! before URL *i+1* begins; the only suspension point is the fetch
//! itself. Per-URL failures are contained within their loop iteration;
//! only session-level errors abort the run.

use crate::crawler::fetcher::{FetchOutcome, Fetcher};
use crate::sitemap::dedup_preserving_order;
use crate::store::{identifier_for, PageStore};
use crate::ShioriError;

/// Per-URL outcome counts for one crawl run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlReport {
    /// URLs bypassed because their output already existed
    pub skipped: usize,

    /// URLs fetched and persisted
    pub succeeded: usize,

    /// URLs that failed to fetch or persist
    pub failed: usize,
}

impl CrawlReport {
    /// Total number of URLs resolved by the run
    pub fn total(&self) -> usize {
        self.skipped + self.succeeded + self.failed
    }
}

/// Sequential crawl coordinator
///
/// Owns the output store and the fetch capability; the browser session
/// lives only for the duration of [`Coordinator::run`].
pub struct Coordinator<F: Fetcher> {
    store: PageStore,
    fetcher: F,
}

impl<F: Fetcher> Coordinator<F> {
    /// Creates a coordinator over the given store and fetch capability
    pub fn new(store: PageStore, fetcher: F) -> Self {
        Self { store, fetcher }
    }

    /// Runs the crawl over `urls`, in order, reusing one session
    ///
    /// Duplicates in the input are collapsed first (first occurrence
    /// wins). The session is opened exactly once, before the first URL,
    /// and released exactly once afterwards — also when a session-level
    /// error aborts the loop mid-run.
    ///
    /// # Arguments
    ///
    /// * `urls` - The ordered working set of crawl targets
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - Every URL was resolved; per-URL failures
    ///   are counted in the report, not returned as errors
    /// * `Err(ShioriError)` - The session could not be acquired, was
    ///   invalidated mid-run, or could not be released
    pub async fn run(&self, urls: &[String]) -> Result<CrawlReport, ShioriError> {
        let urls = dedup_preserving_order(urls.to_vec());

        let mut session = self.fetcher.open().await?;
        let outcome = self.crawl_all(&mut session, &urls).await;

        // Release on every exit path; a close failure only surfaces
        // when the run itself did not already fail.
        let close_outcome = self.fetcher.close(session).await;
        let report = outcome?;
        close_outcome?;

        Ok(report)
    }

    /// The per-URL loop; extracted so `run` can always close the session
    async fn crawl_all(
        &self,
        session: &mut F::Session,
        urls: &[String],
    ) -> Result<CrawlReport, ShioriError> {
        let mut report = CrawlReport::default();

        for url in urls {
            let id = identifier_for(url);

            if self.store.exists(&id) {
                tracing::info!("Skipping {}, output already exists", url);
                report.skipped += 1;
                continue;
            }

            match self.fetcher.fetch(session, url).await? {
                FetchOutcome::Success { content, length } => {
                    match self.store.persist(&id, &content) {
                        Ok(path) => {
                            tracing::info!(
                                "Crawled {} ({} chars), saved to {}",
                                url,
                                length,
                                path.display()
                            );
                            report.succeeded += 1;
                        }
                        Err(e) => {
                            tracing::error!("Failed to persist {}: {}", url, e);
                            report.failed += 1;
                        }
                    }
                }
                FetchOutcome::Failure { message } => {
                    tracing::warn!("Failed to crawl {}: {}", url, message);
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }
}
