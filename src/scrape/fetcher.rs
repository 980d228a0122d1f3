//! HTTP fetcher
//!
//! Builds the HTTP client and fetches result pages, classifying failures
//! so the driving loop can decide between retrying, skipping, and halting.

use crate::config::UserAgentConfig;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Delay before the single retry of a transient failure
const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Result of fetching one page
#[derive(Debug)]
pub enum FetchOutcome {
    /// Page fetched successfully
    Success {
        /// HTTP status code
        status_code: u16,
        /// Response body
        body: String,
    },

    /// Server answered with a non-success status
    HttpError {
        status_code: u16,
        /// Whether a retry is worthwhile (5xx)
        retryable: bool,
    },

    /// Request failed below HTTP (connection, TLS, timeout)
    NetworkError {
        error: String,
        /// Whether a retry is worthwhile (timeout)
        retryable: bool,
    },
}

impl FetchOutcome {
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchOutcome::Success { .. } => false,
            FetchOutcome::HttpError { retryable, .. } => *retryable,
            FetchOutcome::NetworkError { retryable, .. } => *retryable,
        }
    }

    /// Short description of a failed outcome, for logs and errors
    pub fn describe(&self) -> String {
        match self {
            FetchOutcome::Success { status_code, .. } => format!("HTTP {status_code}"),
            FetchOutcome::HttpError { status_code, .. } => format!("HTTP {status_code}"),
            FetchOutcome::NetworkError { error, .. } => error.clone(),
        }
    }
}

/// Builds an HTTP client with the configured user agent
///
/// User agent format: `Name/Version (+ContactUrl)`.
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    let user_agent = format!(
        "{}/{} (+{})",
        config.name, config.version, config.contact_url
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .build()
}

/// Fetches a single page
pub async fn fetch_page(client: &Client, url: &Url) -> FetchOutcome {
    match client.get(url.clone()).send().await {
        Ok(response) => {
            let status = response.status();
            if !status.is_success() {
                return FetchOutcome::HttpError {
                    status_code: status.as_u16(),
                    retryable: status.is_server_error(),
                };
            }

            match response.text().await {
                Ok(body) => FetchOutcome::Success {
                    status_code: status.as_u16(),
                    body,
                },
                Err(e) => FetchOutcome::NetworkError {
                    error: e.to_string(),
                    retryable: false,
                },
            }
        }
        Err(e) => FetchOutcome::NetworkError {
            error: e.to_string(),
            retryable: e.is_timeout(),
        },
    }
}

/// Fetches a page, retrying once on a transient failure
///
/// Transient means a 5xx response or a timeout; everything else (404,
/// connection refused, malformed body) fails immediately.
pub async fn fetch_with_retry(client: &Client, url: &Url) -> FetchOutcome {
    let first = fetch_page(client, url).await;
    if !first.is_retryable() {
        return first;
    }

    tracing::debug!("transient failure for {url} ({}), retrying", first.describe());
    tokio::time::sleep(RETRY_DELAY).await;
    fetch_page(client, url).await
}
