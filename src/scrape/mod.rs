//! Fetching and scrape orchestration
//!
//! This module contains the network-facing half of the scraper:
//! - HTTP client construction and page fetching with retry
//! - live result-count probing for the plan builder
//! - the sequential driving loop

mod coordinator;
mod estimator;
mod fetcher;

pub use coordinator::{run_scrape, Coordinator, ScrapeReport};
pub use estimator::HttpEstimator;
pub use fetcher::{build_http_client, fetch_page, fetch_with_retry, FetchOutcome};
