use crate::config::types::{Config, ScraperConfig, StorageBackend, StorageConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scraper_config(&config.scraper)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_storage_config(&config.storage)?;
    Ok(())
}

/// Validates scraper configuration
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|_| ConfigError::InvalidUrl(config.base_url.clone()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url must be http(s), got scheme `{}`",
            url.scheme()
        )));
    }

    if config.date_from > config.date_to {
        return Err(ConfigError::Validation(format!(
            "date-from ({}) must not be after date-to ({})",
            config.date_from, config.date_to
        )));
    }

    if config.max_result_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max-result-pages must be >= 1, got {}",
            config.max_result_pages
        )));
    }

    if config.records_per_page < 1 || config.records_per_page > 500 {
        return Err(ConfigError::Validation(format!(
            "records-per-page must be between 1 and 500, got {}",
            config.records_per_page
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.name.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent name cannot be empty".to_string(),
        ));
    }

    if config.version.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent version cannot be empty".to_string(),
        ));
    }

    if Url::parse(&config.contact_url).is_err() {
        return Err(ConfigError::InvalidUrl(config.contact_url.clone()));
    }

    Ok(())
}

/// Validates storage configuration
fn validate_storage_config(config: &StorageConfig) -> Result<(), ConfigError> {
    if config.backend == StorageBackend::Sqlite && config.database_path.is_none() {
        return Err(ConfigError::Validation(
            "database-path is required for the sqlite backend".to_string(),
        ));
    }

    Ok(())
}
