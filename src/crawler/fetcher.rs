//! Fetch capability: rendered-page retrieval through a browser session
//!
//! The orchestrator only knows the [`Fetcher`] trait: open one session,
//! fetch through it URL by URL, close it exactly once. The production
//! implementation drives a headless Chrome via chromiumoxide; tests
//! substitute scripted fetchers.
//!
//! Ordinary network and render failures come back as
//! [`FetchOutcome::Failure`] and cost a single URL. An `Err(SessionError)`
//! means the shared session itself is gone and the run must abort.

use crate::config::BrowserConfig;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfigBuilder, HeadlessMode};
use chromiumoxide::Page;
use futures::StreamExt;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::timeout;

use super::extract::extract_text;

/// Fatal session-level errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to launch browser: {0}")]
    Launch(String),

    #[error("session invalidated: {0}")]
    Invalidated(String),

    #[error("failed to close browser: {0}")]
    Close(String),
}

/// Outcome of one fetch attempt
///
/// Exactly two variants, exhaustively matched at the one call site that
/// consumes it (the coordinator loop).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The page rendered; `length` is the character count of `content`
    Success { content: String, length: usize },

    /// The page could not be fetched or rendered; not fatal to the run
    Failure { message: String },
}

/// A reusable fetch capability with an explicit session lifecycle
///
/// The session is opened once per run, passed to every fetch, and
/// released exactly once, including on error paths. Reusing one session
/// amortizes the fetch engine's startup cost across all URLs in a run.
#[async_trait]
pub trait Fetcher {
    /// Opaque reusable session handle
    type Session: Send;

    /// Acquires the session; failure here is fatal to the run
    async fn open(&self) -> Result<Self::Session, SessionError>;

    /// Performs a rendering fetch of `url` through the shared session
    ///
    /// Returns `Ok(FetchOutcome)` for everything a single URL can
    /// absorb; `Err(SessionError)` only when the session itself is no
    /// longer usable.
    async fn fetch(
        &self,
        session: &mut Self::Session,
        url: &str,
    ) -> Result<FetchOutcome, SessionError>;

    /// Releases the session
    async fn close(&self, session: Self::Session) -> Result<(), SessionError>;
}

/// Chromiumoxide-backed implementation of [`Fetcher`]
pub struct BrowserFetcher {
    config: BrowserConfig,
}

/// A running browser plus the task draining its CDP event stream
pub struct BrowserSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

impl BrowserFetcher {
    pub fn new(config: BrowserConfig) -> Self {
        Self { config }
    }

    /// Navigates a tab to `url` and returns the rendered HTML
    ///
    /// Errors are stringified failure messages scoped to this URL.
    async fn render(&self, page: &Page, url: &str) -> Result<String, String> {
        let deadline = Duration::from_secs(self.config.page_timeout);
        match timeout(deadline, async {
            page.goto(url).await.map_err(|e| e.to_string())?;
            page.wait_for_navigation().await.map_err(|e| e.to_string())?;
            page.content().await.map_err(|e| e.to_string())
        })
        .await
        {
            Ok(result) => result,
            Err(_) => Err(format!(
                "page did not load within {}s",
                self.config.page_timeout
            )),
        }
    }
}

#[async_trait]
impl Fetcher for BrowserFetcher {
    type Session = BrowserSession;

    async fn open(&self) -> Result<BrowserSession, SessionError> {
        let mut builder = BrowserConfigBuilder::default()
            .request_timeout(Duration::from_secs(self.config.page_timeout));

        builder = if self.config.headless {
            builder.headless_mode(HeadlessMode::default())
        } else {
            builder.with_head()
        };

        if let Some(path) = &self.config.chrome_executable {
            builder = builder.chrome_executable(path.as_str());
        }

        for arg in &self.config.extra_args {
            builder = builder.arg(arg.as_str());
        }

        let browser_config = builder.build().map_err(SessionError::Launch)?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| SessionError::Launch(e.to_string()))?;

        // The handler stream must be drained for the browser connection
        // to make progress.
        let handler_task = tokio::task::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("Browser handler event error: {}", e);
                }
            }
        });

        tracing::info!("Browser session opened");
        Ok(BrowserSession {
            browser,
            handler_task,
        })
    }

    async fn fetch(
        &self,
        session: &mut BrowserSession,
        url: &str,
    ) -> Result<FetchOutcome, SessionError> {
        // A session that cannot open a tab anymore is dead; that aborts
        // the run rather than costing one URL.
        let page = session
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| SessionError::Invalidated(e.to_string()))?;

        let rendered = self.render(&page, url).await;

        if let Err(e) = page.close().await {
            tracing::debug!("Failed to close page for {}: {}", url, e);
        }

        match rendered {
            Ok(html) => {
                let content = extract_text(&html);
                let length = content.chars().count();
                Ok(FetchOutcome::Success { content, length })
            }
            Err(message) => Ok(FetchOutcome::Failure { message }),
        }
    }

    async fn close(&self, mut session: BrowserSession) -> Result<(), SessionError> {
        let close_result = session.browser.close().await;
        let wait_result = session.browser.wait().await;
        session.handler_task.abort();

        close_result.map_err(|e| SessionError::Close(e.to_string()))?;
        wait_result.map_err(|e| SessionError::Close(e.to_string()))?;

        tracing::info!("Browser session closed");
        Ok(())
    }
}
