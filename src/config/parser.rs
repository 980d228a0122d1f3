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
    use crate::config::types::StorageBackend;
    use crate::records::PageType;

    const VALID_CONFIG: &str = r#"
[scraper]
base-url = "https://zakupki.gov.ru"
page-type = "auction"
date-from = "2020-01-01"
date-to = "2020-12-31"
max-result-pages = 20

[user-agent]
name = "eis-scraper"
version = "0.1.0"
contact-url = "https://example.com/about"

[storage]
backend = "sqlite"
database-path = "./scrape.db"
"#;

    #[test]
    fn test_parse_valid_config() {
        let config: Config = toml::from_str(VALID_CONFIG).unwrap();
        assert_eq!(config.scraper.page_type, PageType::Auction);
        assert_eq!(config.scraper.max_result_pages, 20);
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        // Defaults apply when omitted
        assert_eq!(config.scraper.records_per_page, 50);
        assert_eq!(config.scraper.request_delay_ms, 1000);
    }

    #[test]
    fn test_missing_section_fails() {
        let result: Result<Config, _> = toml::from_str("[scraper]\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_page_type_fails() {
        let broken = VALID_CONFIG.replace("\"auction\"", "\"tender\"");
        let result: Result<Config, _> = toml::from_str(&broken);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
