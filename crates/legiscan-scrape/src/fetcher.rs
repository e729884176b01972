//! HTTP retrieval of bill pages.

use std::time::Duration;

use reqwest::{Client, Url};
use tracing::{debug, warn};

use legiscan_core::config::ScrapeConfig;

use crate::error::ScrapeError;

/// Fetches raw bill page markup. One request per call, no retries.
#[derive(Clone)]
pub struct BillFetcher {
    client: Client,
}

impl BillFetcher {
    /// Build a fetcher with the configured user agent and timeout.
    pub fn new(config: &ScrapeConfig) -> Result<Self, ScrapeError> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder.build()?;
        Ok(Self { client })
    }

    /// GET `url` and return the body. Non-2xx statuses are errors.
    pub async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        let parsed = parse_page_url(url)?;

        debug!(url = %parsed, "Fetching bill page");

        let response = self.client.get(parsed.clone()).send().await.map_err(|e| {
            warn!(url = %parsed, error = %e, "Bill page request failed");
            ScrapeError::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %parsed, status = %status, "Bill page returned an error status");
            return Err(ScrapeError::Network(format!("HTTP {} from {}", status, parsed)));
        }

        let body = response.text().await?;
        debug!(url = %parsed, bytes = body.len(), "Bill page fetched");
        Ok(body)
    }
}

/// Accept only absolute http(s) URLs.
fn parse_page_url(url: &str) -> Result<Url, ScrapeError> {
    let parsed = Url::parse(url.trim()).map_err(|e| ScrapeError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(ScrapeError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}
