//! HTTP fetcher
//!
//! Builds the shared HTTP client with the identifying user agent and wraps
//! page fetches with status checking. All crawl-level fetch errors are
//! surfaced as [`HarvestError`] values; whether they are fatal is decided
//! by the caller (crawl fetches skip and continue, downloads fail fast).

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::HarvestError;
use reqwest::Client;
use std::time::Duration;

/// Builds the HTTP client used for every request in a run
///
/// The user agent carries contact information so the site operator can
/// identify and reach the crawler's maintainer.
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `crawler` - Crawler settings providing the request timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    crawler: &CrawlerConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.format())
        .timeout(Duration::from_secs(crawler.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page body as text
///
/// Sends a GET request with the client's bounded timeout and treats any
/// non-2xx status as an error.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
///
/// # Returns
///
/// * `Ok(String)` - The response body
/// * `Err(HarvestError)` - Transport failure or non-success status
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, HarvestError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| HarvestError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(HarvestError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|source| HarvestError::Http {
        url: url.to_string(),
        source,
    })
}
