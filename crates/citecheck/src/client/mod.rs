//! Metadata source clients.
//!
//! One HTTP client serves all three sources:
//! - CrossRef works (primary DOI registry, full metadata)
//! - doi.org Handle System (secondary registry, existence only)
//! - Semantic Scholar paper search (title/author corroboration)
//!
//! Connection pooling via reqwest, retry middleware with exponential backoff,
//! and a shared minimum-interval rate limiter gating every outbound call.
//! Transport errors never propagate unhandled; each lookup returns the
//! three-kind failure taxonomy from [`crate::error`].

mod limiter;

pub use limiter::RateLimiter;

use std::time::Duration;

use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};

use crate::config::{Config, SEARCH_FIELDS, api};
use crate::error::{LookupError, LookupResult};
use crate::models::{
    CrossrefWork, HandleRecord, HandleResponse, ScholarSearchResponse, SourceMetadata,
};

/// Report key for primary-registry records.
pub const SOURCE_CROSSREF: &str = "crossref";

/// Report key for secondary-registry records.
pub const SOURCE_DOI_ORG: &str = "doi_org";

/// Report key for title-search records.
pub const SOURCE_SCHOLAR: &str = "semantic_scholar";

/// HTTP client for the three metadata sources.
pub struct CitationClient {
    /// HTTP client with retry middleware.
    client: ClientWithMiddleware,

    /// Shared outbound-call gate.
    limiter: RateLimiter,

    config: Config,
}

impl CitationClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(api::USER_AGENT)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .gzip(true)
            .build()?;

        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(Duration::from_secs(1), Duration::from_secs(10))
            .build_with_max_retries(2);

        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        let limiter = RateLimiter::new(config.min_request_interval);

        Ok(Self { client, limiter, config })
    }

    /// Resolve a DOI against CrossRef.
    ///
    /// 404 maps to `NotFound`, transport problems and unexpected statuses to
    /// `Api`, and a success payload without the `message` envelope to
    /// `InvalidResponse`.
    pub async fn crossref_work(&self, doi: &str) -> LookupResult<SourceMetadata> {
        tracing::debug!(doi, "querying CrossRef");
        self.limiter.acquire().await;

        let url = format!("{}/{}", self.config.crossref_url, doi);
        let mut request = self.client.get(&url);
        if let Some(mailto) = &self.config.mailto {
            request = request.query(&[("mailto", mailto)]);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound);
        }
        if !status.is_success() {
            return Err(LookupError::api(format!("CrossRef returned status {status}")));
        }

        let body: serde_json::Value =
            response.json().await.map_err(|e| LookupError::invalid(e.to_string()))?;
        let Some(message) = body.get("message") else {
            return Err(LookupError::invalid("response lacks 'message' envelope"));
        };

        let work: CrossrefWork = serde_json::from_value(message.clone())
            .map_err(|e| LookupError::invalid(e.to_string()))?;

        Ok(SourceMetadata::from_crossref(&work, message.clone()))
    }

    /// Resolve a DOI against the doi.org Handle System.
    ///
    /// Success is the provider's `responseCode == 1` convention, not the
    /// transport status alone; any other code is `NotFound`.
    pub async fn handle_lookup(&self, doi: &str) -> LookupResult<HandleRecord> {
        tracing::debug!(doi, "querying doi.org handle system");
        self.limiter.acquire().await;

        let url = format!("{}/{}", self.config.handle_url, doi);
        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound);
        }
        if !status.is_success() {
            return Err(LookupError::api(format!("doi.org returned status {status}")));
        }

        let body: serde_json::Value =
            response.json().await.map_err(|e| LookupError::invalid(e.to_string()))?;
        let resp: HandleResponse = serde_json::from_value(body.clone())
            .map_err(|e| LookupError::invalid(e.to_string()))?;

        if resp.response_code != 1 {
            return Err(LookupError::NotFound);
        }

        Ok(HandleRecord::from_response(&resp, body))
    }

    /// Search Semantic Scholar by title, best single match.
    ///
    /// Returns the top-ranked hit, or `NotFound` on zero results.
    pub async fn scholar_search(&self, title: &str) -> LookupResult<SourceMetadata> {
        tracing::debug!(title = %truncate(title, 50), "querying Semantic Scholar");
        self.limiter.acquire().await;

        let url = format!("{}/paper/search", self.config.scholar_url);
        let mut request = self
            .client
            .get(&url)
            .query(&[("query", title), ("limit", "1"), ("fields", SEARCH_FIELDS)]);
        if let Some(key) = &self.config.scholar_api_key {
            request = request.header("x-api-key", key);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(LookupError::api(format!("Semantic Scholar returned status {status}")));
        }

        let body: serde_json::Value =
            response.json().await.map_err(|e| LookupError::invalid(e.to_string()))?;
        let search: ScholarSearchResponse = serde_json::from_value(body.clone())
            .map_err(|e| LookupError::invalid(e.to_string()))?;

        let Some(paper) = search.data.first() else {
            return Err(LookupError::NotFound);
        };

        let raw = body
            .get("data")
            .and_then(|d| d.get(0))
            .cloned()
            .unwrap_or(serde_json::Value::Null);

        Ok(SourceMetadata::from_scholar(paper, raw))
    }
}

impl std::fmt::Debug for CitationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CitationClient")
            .field("crossref_url", &self.config.crossref_url)
            .field("min_request_interval", &self.config.min_request_interval)
            .finish()
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation_succeeds() {
        let client = CitationClient::new(Config::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_debug_is_compact() {
        let client = CitationClient::new(Config::default()).unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains("crossref_url"));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo wörld", 5), "héllo");
        assert_eq!(truncate("ok", 50), "ok");
    }
}
