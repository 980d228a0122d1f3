use crate::records::PageType;
use chrono::NaiveDate;
use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub scraper: ScraperConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub storage: StorageConfig,
}

/// Scraper behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    /// Base URL of the procurement portal
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Which search listing to scrape
    #[serde(rename = "page-type")]
    pub page_type: PageType,

    /// Start of the publication date range (inclusive)
    #[serde(rename = "date-from")]
    pub date_from: NaiveDate,

    /// End of the publication date range (inclusive)
    #[serde(rename = "date-to")]
    pub date_to: NaiveDate,

    /// Maximum result pages the site serves per query; longer ranges are
    /// subdivided until every sub-range fits
    #[serde(rename = "max-result-pages", default = "default_max_result_pages")]
    pub max_result_pages: u32,

    /// Records per result page requested from the site
    #[serde(rename = "records-per-page", default = "default_records_per_page")]
    pub records_per_page: u32,

    /// Delay between successive requests (milliseconds)
    #[serde(rename = "request-delay-ms", default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
}

fn default_max_result_pages() -> u32 {
    100
}

fn default_records_per_page() -> u32 {
    50
}

fn default_request_delay_ms() -> u64 {
    1000
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the scraper
    pub name: String,

    /// Version of the scraper
    pub version: String,

    /// URL with information about the scraper
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// In-memory tabular store, released at process end
    Memory,
    /// File-backed SQLite store, survives restarts
    Sqlite,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,

    /// Path to the SQLite database file (required for the sqlite backend)
    #[serde(rename = "database-path")]
    pub database_path: Option<String>,

    /// Directory for CSV export when using the memory backend
    #[serde(rename = "csv-dir")]
    pub csv_dir: Option<String>,
}
