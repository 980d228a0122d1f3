//! Live result-count estimation
//!
//! Probes the first result page of a sub-range and reads the portal's
//! total-results counter. Used by the plan builder to decide whether a
//! range needs subdividing.

use crate::parse::extract_total;
use crate::records::PageType;
use crate::scrape::fetcher::{fetch_with_retry, FetchOutcome};
use crate::search::{DateRange, ResultEstimator, SearchQuery};
use crate::ScrapeError;
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

/// Estimator that probes the live portal
pub struct HttpEstimator {
    client: Client,
    base: Url,
    records_per_page: u32,
}

impl HttpEstimator {
    pub fn new(client: Client, base: Url, records_per_page: u32) -> Self {
        Self {
            client,
            base,
            records_per_page,
        }
    }
}

#[async_trait]
impl ResultEstimator for HttpEstimator {
    async fn result_count(&self, page_type: PageType, range: &DateRange) -> crate::Result<u64> {
        let query = SearchQuery {
            page_type,
            range: *range,
            page_number: 1,
        };
        let url = query.url(&self.base, self.records_per_page)?;

        match fetch_with_retry(&self.client, &url).await {
            FetchOutcome::Success { body, .. } => {
                let total = extract_total(&body)?;
                tracing::debug!("{range}: {total} results");
                Ok(total)
            }
            failure => Err(ScrapeError::Fetch {
                url: url.to_string(),
                message: failure.describe(),
            }),
        }
    }
}
