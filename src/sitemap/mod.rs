//! Sitemap module: turns a sitemap endpoint into the list of pages to audit
//!
//! This module contains:
//! - The HTTP client used for sitemap requests
//! - The `<urlset>` parser

mod fetcher;
mod parser;

pub use fetcher::{build_http_client, fetch_sitemap};
pub use parser::parse_sitemap;

use crate::SweepError;
use reqwest::Client;

/// Lists page URLs from sitemap endpoints
#[derive(Debug, Clone)]
pub struct SitemapClient {
    client: Client,
}

impl SitemapClient {
    /// Creates a client with certificate validation disabled
    ///
    /// See [`build_http_client`].
    pub fn new() -> Result<Self, SweepError> {
        Ok(Self {
            client: build_http_client()?,
        })
    }

    /// Wraps an existing HTTP client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetches a sitemap and returns its page URLs in document order
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<String>)` - Page URLs; empty if the `<urlset>` lists none
    /// * `Err(SweepError::SitemapFetch)` / `Err(SweepError::SitemapStatus)` - Request failed
    /// * `Err(SweepError::SitemapParse)` - Body is not a sitemap
    pub async fn list_urls(&self, endpoint: &str) -> Result<Vec<String>, SweepError> {
        let body = fetch_sitemap(&self.client, endpoint).await?;

        let urls = parse_sitemap(&body).map_err(|message| SweepError::SitemapParse {
            url: endpoint.to_string(),
            message,
        })?;

        tracing::info!("Sitemap {} lists {} URLs", endpoint, urls.len());
        Ok(urls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SITEMAP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>https://example.com/</loc></url>
  <url><loc>https://example.com/about</loc><lastmod>2024-01-01</lastmod></url>
</urlset>"#;

    #[tokio::test]
    async fn test_list_urls() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sitemap.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SITEMAP))
            .expect(1)
            .mount(&server)
            .await;

        let client = SitemapClient::new().unwrap();
        let urls = client
            .list_urls(&format!("{}/sitemap.xml", server.uri()))
            .await
            .unwrap();

        assert_eq!(urls, vec!["https://example.com/", "https://example.com/about"]);
    }

    #[tokio::test]
    async fn test_list_urls_empty_urlset() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sitemap.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"></urlset>"#,
            ))
            .mount(&server)
            .await;

        let client = SitemapClient::new().unwrap();
        let urls = client
            .list_urls(&format!("{}/sitemap.xml", server.uri()))
            .await
            .unwrap();

        assert!(urls.is_empty());
    }

    #[tokio::test]
    async fn test_list_urls_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = SitemapClient::new().unwrap();
        let result = client
            .list_urls(&format!("{}/sitemap.xml", server.uri()))
            .await;

        assert!(matches!(
            result,
            Err(SweepError::SitemapStatus { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn test_list_urls_not_xml() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>Oops</body></html>"))
            .mount(&server)
            .await;

        let client = SitemapClient::new().unwrap();
        let result = client
            .list_urls(&format!("{}/sitemap.xml", server.uri()))
            .await;

        assert!(matches!(result, Err(SweepError::SitemapParse { .. })));
    }

    #[tokio::test]
    async fn test_list_urls_unreachable() {
        let client = SitemapClient::new().unwrap();
        let result = client.list_urls("http://127.0.0.1:1/sitemap.xml").await;

        assert!(matches!(result, Err(SweepError::SitemapFetch { .. })));
    }
}
