use serde::Deserialize;

/// Main configuration structure for Shiori
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub source: SourceConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub browser: BrowserConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Sitemap source configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// URL of the sitemap XML document to discover crawl targets from
    #[serde(rename = "sitemap-url")]
    pub sitemap_url: String,

    /// Timeout for the sitemap HTTP request (seconds)
    #[serde(rename = "request-timeout", default = "default_request_timeout")]
    pub request_timeout: u64,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

/// Browser session configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run the browser without a visible window
    pub headless: bool,

    /// Per-page timeout covering navigation and rendering (seconds)
    #[serde(rename = "page-timeout")]
    pub page_timeout: u64,

    /// Extra command-line arguments passed to the browser process
    #[serde(rename = "extra-args")]
    pub extra_args: Vec<String>,

    /// Explicit path to the Chrome/Chromium executable; auto-detected
    /// when absent
    #[serde(rename = "chrome-executable")]
    pub chrome_executable: Option<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            page_timeout: 30,
            // Keeps the browser usable in Docker and low-memory environments
            extra_args: vec![
                "--disable-gpu".to_string(),
                "--disable-dev-shm-usage".to_string(),
                "--no-sandbox".to_string(),
            ],
            chrome_executable: None,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory where per-URL output files are written
    pub directory: String,

    /// File extension for output records (without the leading dot)
    pub extension: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "./output".to_string(),
            extension: "md".to_string(),
        }
    }
}

fn default_request_timeout() -> u64 {
    30
}
