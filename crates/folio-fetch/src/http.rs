//! HTTP fetcher backed by reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use folio_core::{FetchConfig, Fetcher, FolioError, FolioResult};

/// Fetches documents over HTTP(S).
pub struct HttpFetcher {
    client: Client,
    config: FetchConfig,
}

impl HttpFetcher {
    /// Create a new HTTP fetcher.
    pub fn new(config: FetchConfig) -> FolioResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| FolioError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Get the fetch config.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Option<String> {
        let url = match Url::parse(url) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(url, error = %e, "Invalid URL");
                return None;
            }
        };

        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Fetch failed");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = %status, "Fetch returned error status");
            return None;
        }

        match response.text().await {
            Ok(body) => {
                tracing::debug!(url = %url, bytes = body.len(), "Fetched document");
                Some(body)
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Failed to read response body");
                None
            }
        }
    }
}
