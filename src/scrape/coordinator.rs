//! Scrape coordinator - the sequential driving loop
//!
//! Plans the search slices, then fetches every result page of every slice
//! one at a time, dispatches the body to the parser for the configured
//! page type, and appends the records through the storage adapter.
//!
//! Error policy: fetch and parse failures are logged and the page is
//! skipped; storage failures propagate and halt the run.

use crate::config::Config;
use crate::parse::{parser_for, PageParser};
use crate::scrape::estimator::HttpEstimator;
use crate::scrape::fetcher::{build_http_client, fetch_with_retry, FetchOutcome};
use crate::search::{plan_slices, DateRange, SearchQuery};
use crate::storage::{open_storage, StorageAdapter};
use crate::ScrapeError;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Counters accumulated over one run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScrapeReport {
    /// Sub-ranges in the search plan
    pub slices: usize,
    /// Result pages fetched and parsed
    pub pages_fetched: u64,
    /// Result pages skipped after a fetch or parse failure
    pub pages_skipped: u64,
    /// Records handed to storage
    pub records_written: u64,
}

/// Sequential scrape driver
pub struct Coordinator {
    config: Config,
    client: Client,
    parser: Box<dyn PageParser>,
    storage: Box<dyn StorageAdapter>,
    base: Url,
}

impl Coordinator {
    /// Creates a coordinator with the storage backend named by the config
    pub fn new(config: Config) -> Result<Self, ScrapeError> {
        let storage = open_storage(&config.storage)?;
        Self::with_storage(config, storage)
    }

    /// Creates a coordinator writing through the given adapter
    ///
    /// This is the seam for third-party backends: anything implementing
    /// `StorageAdapter` can receive the records.
    pub fn with_storage(
        config: Config,
        storage: Box<dyn StorageAdapter>,
    ) -> Result<Self, ScrapeError> {
        let client = build_http_client(&config.user_agent)?;
        let parser = parser_for(config.scraper.page_type);
        let base = Url::parse(&config.scraper.base_url)?;

        Ok(Self {
            config,
            client,
            parser,
            storage,
            base,
        })
    }

    /// Runs the scrape to completion
    pub async fn run(&mut self) -> Result<ScrapeReport, ScrapeError> {
        let scraper = &self.config.scraper;
        let range = DateRange::new(scraper.date_from, scraper.date_to);
        let delay = Duration::from_millis(scraper.request_delay_ms);

        let estimator = HttpEstimator::new(
            self.client.clone(),
            self.base.clone(),
            scraper.records_per_page,
        );
        let slices = plan_slices(
            scraper.page_type,
            range,
            scraper.max_result_pages,
            scraper.records_per_page,
            &estimator,
        )
        .await;

        tracing::info!(
            "search plan ready: {} slice(s) over {range} for {}",
            slices.len(),
            scraper.page_type
        );

        let mut report = ScrapeReport {
            slices: slices.len(),
            ..ScrapeReport::default()
        };

        for slice in &slices {
            tracing::info!(
                "scraping {} ({} result page(s))",
                slice.range,
                slice.result_pages
            );

            for page_number in 1..=slice.result_pages {
                let query = SearchQuery {
                    page_type: scraper.page_type,
                    range: slice.range,
                    page_number,
                };
                let url = query.url(&self.base, scraper.records_per_page)?;

                match fetch_with_retry(&self.client, &url).await {
                    FetchOutcome::Success { body, .. } => {
                        match self.parser.parse(&body) {
                            Ok(records) => {
                                report.pages_fetched += 1;
                                if !records.is_empty() {
                                    // StorageError halts the run
                                    self.storage.write(&records)?;
                                    report.records_written += records.len() as u64;
                                }
                                tracing::debug!(
                                    "page {page_number} of {}: {} record(s)",
                                    slice.range,
                                    records.len()
                                );
                            }
                            Err(err) => {
                                tracing::warn!("parse failed for {url}: {err}");
                                report.pages_skipped += 1;
                            }
                        }
                    }
                    failure => {
                        tracing::warn!("fetch failed for {url}: {}", failure.describe());
                        report.pages_skipped += 1;
                    }
                }

                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
        }

        self.storage.finish()?;

        tracing::info!(
            "run complete: {} page(s) fetched, {} skipped, {} record(s) written",
            report.pages_fetched,
            report.pages_skipped,
            report.records_written
        );

        Ok(report)
    }
}

/// Runs a complete scrape with the configured storage backend
pub async fn run_scrape(config: Config) -> Result<ScrapeReport, ScrapeError> {
    let mut coordinator = Coordinator::new(config)?;
    coordinator.run().await
}
