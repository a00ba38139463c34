//! Shared HTTP client for the scraping sources.
//!
//! One `reqwest::Client` is built per run and cloned into every adapter
//! (clones share the same connection pool).

use std::time::Duration;

use tracing::debug;

use super::domain::{SourceError, SourceKind};

/// User agent sent with every page request
const USER_AGENT: &str = concat!(
    "lyrico/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/lyrico)"
);

/// Per-request timeout. The engine itself never times out a source.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Fetches lyrics pages as text.
#[derive(Clone)]
pub struct PageClient {
    http_client: reqwest::Client,
}

impl PageClient {
    /// Create a new client
    ///
    /// The client accepts gzip-compressed responses and identifies itself
    /// with a User-Agent header.
    pub fn new() -> Result<Self, SourceError> {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SourceError::Client(e.to_string()))?;

        Ok(Self { http_client })
    }

    /// GET a page and return its body.
    ///
    /// A 404 means the site has no page for this song and maps to `Ok(None)`.
    pub async fn get_page(
        &self,
        source: SourceKind,
        url: &str,
    ) -> Result<Option<String>, SourceError> {
        debug!(target: "lyrico::sources", %source, url, "Requesting lyrics page");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = response.status();
        debug!(target: "lyrico::sources", %source, status = status.as_u16(), "Response received");

        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SourceError::RateLimited(source));
        }

        if !status.is_success() {
            return Err(SourceError::Http {
                source_kind: source,
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map(Some)
            .map_err(|e| SourceError::Parse(e.to_string()))
    }

    /// GET a page and run `extract` over it.
    pub async fn fetch_with(
        &self,
        source: SourceKind,
        url: &str,
        extract: fn(&str) -> Option<String>,
    ) -> Result<Option<String>, SourceError> {
        let Some(html) = self.get_page(source, url).await? else {
            return Ok(None);
        };
        let lyrics = extract(&html);
        if lyrics.is_none() {
            debug!(target: "lyrico::sources", %source, "Page contained no lyrics block");
        }
        Ok(lyrics)
    }
}
