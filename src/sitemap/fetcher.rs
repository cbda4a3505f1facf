//! HTTP fetching for sitemaps

use crate::SweepError;
use reqwest::Client;
use std::time::Duration;

/// Builds the HTTP client used for sitemap requests
///
/// Certificate validation is disabled on this client: sitemap endpoints are
/// frequently staging or local hosts serving self-signed certificates. The
/// relaxation applies to sitemap requests only; page loads go through the
/// audit engine's browser.
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!("a11y-sweep/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .danger_accept_invalid_certs(true)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a sitemap body with a single GET request
///
/// # Returns
///
/// * `Ok(String)` - Response body of a 2xx response
/// * `Err(SweepError::SitemapFetch)` - Connection, TLS or body read failure
/// * `Err(SweepError::SitemapStatus)` - Non-success HTTP status
pub async fn fetch_sitemap(client: &Client, url: &str) -> Result<String, SweepError> {
    tracing::debug!("Fetching sitemap {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| SweepError::SitemapFetch {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(SweepError::SitemapStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|source| SweepError::SitemapFetch {
        url: url.to_string(),
        source,
    })
}
