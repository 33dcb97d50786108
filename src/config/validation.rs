use crate::config::types::{BrowserConfig, Config, OutputConfig, SourceConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_source_config(&config.source)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_browser_config(&config.browser)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the sitemap source configuration
fn validate_source_config(config: &SourceConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.sitemap_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid sitemap_url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "sitemap_url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if config.request_timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout must be >= 1 second, got {}",
            config.request_timeout
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    Ok(())
}

/// Validates browser session configuration
fn validate_browser_config(config: &BrowserConfig) -> Result<(), ConfigError> {
    if config.page_timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "page_timeout must be >= 1 second, got {}",
            config.page_timeout
        )));
    }

    if let Some(path) = &config.chrome_executable {
        if path.is_empty() {
            return Err(ConfigError::Validation(
                "chrome_executable cannot be an empty path".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    if config.extension.is_empty() {
        return Err(ConfigError::Validation(
            "output extension cannot be empty".to_string(),
        ));
    }

    if !config.extension.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ConfigError::Validation(format!(
            "output extension must be alphanumeric, got '{}'",
            config.extension
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            source: SourceConfig {
                sitemap_url: "https://docs.example.com/sitemap.xml".to_string(),
                request_timeout: 30,
            },
            user_agent: UserAgentConfig {
                crawler_name: "Shiori".to_string(),
                crawler_version: "1.0".to_string(),
                contact_url: "https://example.com/about".to_string(),
            },
            browser: BrowserConfig::default(),
            output: OutputConfig::default(),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_rejects_malformed_sitemap_url() {
        let mut config = valid_config();
        config.source.sitemap_url = "not a url".to_string();
        assert!(matches!(
            validate(&config).unwrap_err(),
            ConfigError::InvalidUrl(_)
        ));
    }

    #[test]
    fn test_rejects_non_http_sitemap_url() {
        let mut config = valid_config();
        config.source.sitemap_url = "ftp://example.com/sitemap.xml".to_string();
        assert!(matches!(
            validate(&config).unwrap_err(),
            ConfigError::Validation(_)
        ));
    }

    #[test]
    fn test_rejects_zero_request_timeout() {
        let mut config = valid_config();
        config.source.request_timeout = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_empty_crawler_name() {
        let mut config = valid_config();
        config.user_agent.crawler_name = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_crawler_name_with_spaces() {
        let mut config = valid_config();
        config.user_agent.crawler_name = "My Crawler".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_zero_page_timeout() {
        let mut config = valid_config();
        config.browser.page_timeout = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_non_alphanumeric_extension() {
        let mut config = valid_config();
        config.output.extension = "md.gz".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_empty_output_directory() {
        let mut config = valid_config();
        config.output.directory = String::new();
        assert!(validate(&config).is_err());
    }
}
