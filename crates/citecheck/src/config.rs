//! Configuration for the citation verifier.

use std::time::Duration;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// CrossRef works endpoint (primary DOI registry).
    pub const CROSSREF_API: &str = "https://api.crossref.org/works";

    /// doi.org Handle System endpoint (secondary registry, catches records
    /// not indexed by CrossRef such as arXiv preprints).
    pub const HANDLE_API: &str = "https://doi.org/api/handles";

    /// Semantic Scholar Graph API endpoint (title/author search).
    pub const SCHOLAR_API: &str = "https://api.semanticscholar.org/graph/v1";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Minimum interval between any two outbound calls, across all sources.
    pub const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(500);

    /// User agent sent to every source.
    pub const USER_AGENT: &str =
        concat!("citecheck/", env!("CARGO_PKG_VERSION"), " (academic research tool)");
}

/// Semantic Scholar paper fields requested for the title search.
pub const SEARCH_FIELDS: &str = "title,authors,year,venue,externalIds";

/// Verifier configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// CrossRef works base URL.
    pub crossref_url: String,

    /// doi.org handle resolution base URL.
    pub handle_url: String,

    /// Semantic Scholar Graph API base URL.
    pub scholar_url: String,

    /// Semantic Scholar API key (optional).
    pub scholar_api_key: Option<String>,

    /// Contact address appended to CrossRef queries (polite pool).
    pub mailto: Option<String>,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Minimum interval between outbound calls.
    pub min_request_interval: Duration,
}

impl Config {
    /// Create a configuration pointing at the real registries.
    #[must_use]
    pub fn new() -> Self {
        Self {
            crossref_url: api::CROSSREF_API.to_string(),
            handle_url: api::HANDLE_API.to_string(),
            scholar_url: api::SCHOLAR_API.to_string(),
            scholar_api_key: None,
            mailto: None,
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            min_request_interval: api::MIN_REQUEST_INTERVAL,
        }
    }

    /// Create a test configuration with all three sources redirected at a
    /// mock server, and no rate-limit delay.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            crossref_url: format!("{base_url}/works"),
            handle_url: format!("{base_url}/api/handles"),
            scholar_url: format!("{base_url}/graph/v1"),
            scholar_api_key: None,
            mailto: None,
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            min_request_interval: Duration::from_millis(0),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// `SEMANTIC_SCHOLAR_API_KEY` raises the search quota;
    /// `CITECHECK_MAILTO` joins the CrossRef polite pool.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::new();
        config.scholar_api_key = std::env::var("SEMANTIC_SCHOLAR_API_KEY").ok();
        config.mailto = std::env::var("CITECHECK_MAILTO").ok();
        config
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
