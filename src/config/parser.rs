use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use shiori::config::load_config;
///
/// let config = load_config(Path::new("config.toml")).unwrap();
/// println!("Sitemap: {}", config.source.sitemap_url);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    // Read the configuration file
    let content = std::fs::read_to_string(path)?;

    // Parse TOML
    let config: Config = toml::from_str(&content)?;

    // Validate the configuration
    validate(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[source]
sitemap-url = "https://docs.example.com/sitemap.xml"
request-timeout = 20

[user-agent]
crawler-name = "TestCrawler"
crawler-version = "1.0"
contact-url = "https://example.com/about"

[browser]
headless = true
page-timeout = 15
extra-args = ["--disable-gpu"]

[output]
directory = "./snapshots"
extension = "md"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(
            config.source.sitemap_url,
            "https://docs.example.com/sitemap.xml"
        );
        assert_eq!(config.source.request_timeout, 20);
        assert_eq!(config.user_agent.crawler_name, "TestCrawler");
        assert_eq!(config.browser.page_timeout, 15);
        assert_eq!(config.browser.extra_args, vec!["--disable-gpu"]);
        assert_eq!(config.output.directory, "./snapshots");
    }

    #[test]
    fn test_browser_and_output_sections_are_optional() {
        let config_content = r#"
[source]
sitemap-url = "https://docs.example.com/sitemap.xml"

[user-agent]
crawler-name = "TestCrawler"
crawler-version = "1.0"
contact-url = "https://example.com/about"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert!(config.browser.headless);
        assert_eq!(config.browser.page_timeout, 30);
        assert_eq!(config.source.request_timeout, 30);
        assert_eq!(config.output.directory, "./output");
        assert_eq!(config.output.extension, "md");
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let config_content = "this is not valid TOML {{{";
        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[source]
sitemap-url = "ftp://docs.example.com/sitemap.xml"

[user-agent]
crawler-name = "TestCrawler"
crawler-version = "1.0"
contact-url = "https://example.com/about"
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::Validation(_)
        ));
    }
}
