//! Sitemap URL source
//!
//! This module discovers the crawl working set from a sitemap XML document
//! (`urlset` root with `url`/`loc` entries, per the sitemap protocol). It
//! handles:
//! - Building the HTTP client with a proper user agent string
//! - Fetching the configured sitemap URL
//! - Parsing `<loc>` entries out of the XML
//! - Deduplicating while preserving first-seen order
//!
//! An unreachable or malformed sitemap is not an error at the run level:
//! `list_urls` degrades to an empty working set and the caller treats
//! that as "nothing to do".

use crate::config::{SourceConfig, UserAgentConfig};
use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::Client;
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while retrieving or parsing the sitemap
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned HTTP {0}")]
    Status(u16),

    #[error("malformed XML: {0}")]
    Xml(String),

    #[error("document has no urlset root, not a sitemap")]
    NotASitemap,
}

/// Discovers crawl target URLs from a configured sitemap location
pub struct UrlSource {
    client: Client,
    sitemap_url: String,
}

impl UrlSource {
    /// Creates a URL source for the configured sitemap location
    ///
    /// # Arguments
    ///
    /// * `source` - The sitemap source configuration
    /// * `user_agent` - The user agent configuration
    ///
    /// # Returns
    ///
    /// * `Ok(UrlSource)` - Ready to list URLs
    /// * `Err(reqwest::Error)` - Failed to build the HTTP client
    pub fn new(
        source: &SourceConfig,
        user_agent: &UserAgentConfig,
    ) -> Result<Self, reqwest::Error> {
        let client = build_http_client(source, user_agent)?;
        Ok(Self {
            client,
            sitemap_url: source.sitemap_url.clone(),
        })
    }

    /// Returns the deduplicated, order-preserving list of crawl targets
    ///
    /// Any failure to fetch or parse the sitemap is logged and yields an
    /// empty list rather than propagating; an empty working set means
    /// "nothing to do", not a fatal error.
    pub async fn list_urls(&self) -> Vec<String> {
        match self.fetch_urls().await {
            Ok(urls) => urls,
            Err(e) => {
                tracing::warn!("Sitemap {} unavailable: {}", self.sitemap_url, e);
                Vec::new()
            }
        }
    }

    async fn fetch_urls(&self) -> Result<Vec<String>, SitemapError> {
        let response = self.client.get(&self.sitemap_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SitemapError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let urls = parse_sitemap(&body)?;
        Ok(dedup_preserving_order(urls))
    }
}

/// Builds the HTTP client used for sitemap retrieval
///
/// The user agent follows the `Name/Version (+contact-url)` convention so
/// site operators can identify the crawler.
pub fn build_http_client(
    source: &SourceConfig,
    config: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    let user_agent = format!(
        "{}/{} (+{})",
        config.crawler_name, config.crawler_version, config.contact_url
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(source.request_timeout))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Extracts all `<loc>` entries from a sitemap XML document
///
/// Matching is namespace-lenient: elements are matched by local name, so
/// both prefixed and default-namespace sitemaps parse. The document root
/// must still be `urlset`; anything else (an HTML error page, an RSS
/// feed) is rejected.
///
/// # Arguments
///
/// * `xml` - The sitemap document contents
///
/// # Returns
///
/// * `Ok(Vec<String>)` - The `<loc>` values in document order, entities
///   unescaped and whitespace trimmed
/// * `Err(SitemapError)` - The document is malformed or not a sitemap
pub fn parse_sitemap(xml: &str) -> Result<Vec<String>, SitemapError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut urls = Vec::new();
    let mut saw_urlset = false;
    let mut in_loc = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => match start.local_name().as_ref() {
                b"urlset" => saw_urlset = true,
                b"loc" if saw_urlset => in_loc = true,
                _ => {}
            },
            Ok(Event::End(end)) => {
                if end.local_name().as_ref() == b"loc" {
                    in_loc = false;
                }
            }
            Ok(Event::Text(text)) if in_loc => {
                let loc = text
                    .unescape()
                    .map_err(|e| SitemapError::Xml(e.to_string()))?;
                let loc = loc.trim();
                if !loc.is_empty() {
                    urls.push(loc.to_string());
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(SitemapError::Xml(e.to_string())),
        }
    }

    if !saw_urlset {
        return Err(SitemapError::NotASitemap);
    }

    Ok(urls)
}

/// Removes duplicate URLs, keeping the first occurrence of each
///
/// Order of the surviving entries is the order of their first appearance
/// (stable dedup, not set-based reordering).
pub fn dedup_preserving_order(urls: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    urls.into_iter().filter(|url| seen.insert(url.clone())).collect()
}
