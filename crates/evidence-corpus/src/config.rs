//! Configuration for corpus assembly.

use std::time::Duration;

/// Provider endpoint and client tuning constants.
pub mod api {
    use std::time::Duration;

    /// arXiv Atom query endpoint.
    pub const ARXIV_URL: &str = "http://export.arxiv.org/api/query";

    /// OpenAlex works endpoint.
    pub const OPENALEX_URL: &str = "https://api.openalex.org/works";

    /// Crossref works endpoint.
    pub const CROSSREF_URL: &str = "https://api.crossref.org/works";

    /// Semantic Scholar paper search endpoint.
    pub const SEMANTIC_SCHOLAR_URL: &str =
        "https://api.semanticscholar.org/graph/v1/paper/search";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Minimum gap between arXiv requests (their robots policy asks for 3s).
    pub const ARXIV_INTERVAL: Duration = Duration::from_secs(3);

    /// Minimum gap between OpenAlex requests (100ms = 10 req/s).
    pub const OPENALEX_INTERVAL: Duration = Duration::from_millis(100);

    /// Minimum gap between Crossref requests (50ms = 20 req/s).
    pub const CROSSREF_INTERVAL: Duration = Duration::from_millis(50);

    /// Minimum gap between Semantic Scholar requests without an API key.
    pub const SEMANTIC_SCHOLAR_INTERVAL: Duration = Duration::from_secs(1);

    /// Wall-clock budget for a single provider search, including rate
    /// gate waits and transport retries.
    pub const PROVIDER_TIMEOUT: Duration = Duration::from_secs(60);

    /// Cache TTL (5 minutes).
    pub const CACHE_TTL: Duration = Duration::from_secs(300);

    /// Maximum cache size.
    pub const CACHE_MAX_SIZE: u64 = 1000;

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);
}

/// Corpus shaping constants.
pub mod corpus {
    /// Records with abstracts shorter than this are discarded at parse time.
    pub const MIN_ABSTRACT_CHARS: usize = 100;

    /// Records with abstracts at least this long are discarded before ranking.
    pub const MAX_ABSTRACT_CHARS: usize = 2000;

    /// Author lists are truncated to this length at parse time.
    pub const MAX_AUTHORS: usize = 5;

    /// Default number of records requested from each provider.
    pub const DEFAULT_PER_PROVIDER: usize = 25;

    /// Ranked corpus is truncated to this many records.
    pub const DEFAULT_TOP_N: usize = 100;

    /// A corpus smaller than this after dedup and ranking is an error.
    pub const MIN_CORPUS_SIZE: usize = 5;
}

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct CorpusConfig {
    /// arXiv endpoint (overridable for mock servers).
    pub arxiv_url: String,

    /// OpenAlex endpoint (overridable for mock servers).
    pub openalex_url: String,

    /// Crossref endpoint (overridable for mock servers).
    pub crossref_url: String,

    /// Semantic Scholar endpoint (overridable for mock servers).
    pub semantic_scholar_url: String,

    /// Semantic Scholar API key (optional, raises its rate limit).
    pub semantic_scholar_api_key: Option<String>,

    /// Contact email sent to OpenAlex and Crossref for polite-pool access.
    pub mailto: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Minimum gap between arXiv requests.
    pub arxiv_interval: Duration,

    /// Minimum gap between OpenAlex requests.
    pub openalex_interval: Duration,

    /// Minimum gap between Crossref requests.
    pub crossref_interval: Duration,

    /// Minimum gap between Semantic Scholar requests.
    pub semantic_scholar_interval: Duration,

    /// Wall-clock budget for one provider search.
    pub provider_timeout: Duration,

    /// Cache TTL.
    pub cache_ttl: Duration,

    /// Maximum cache size.
    pub cache_max_size: u64,

    /// Ranked corpus truncation length.
    pub top_n: usize,

    /// Minimum viable corpus size.
    pub min_corpus_size: usize,
}

impl CorpusConfig {
    /// Create a configuration with an optional Semantic Scholar API key
    /// and a contact email for the polite pools.
    #[must_use]
    pub fn new(semantic_scholar_api_key: Option<String>, mailto: impl Into<String>) -> Self {
        let has_key = semantic_scholar_api_key.is_some();
        Self {
            arxiv_url: api::ARXIV_URL.to_string(),
            openalex_url: api::OPENALEX_URL.to_string(),
            crossref_url: api::CROSSREF_URL.to_string(),
            semantic_scholar_url: api::SEMANTIC_SCHOLAR_URL.to_string(),
            semantic_scholar_api_key,
            mailto: mailto.into(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            arxiv_interval: api::ARXIV_INTERVAL,
            openalex_interval: api::OPENALEX_INTERVAL,
            crossref_interval: api::CROSSREF_INTERVAL,
            semantic_scholar_interval: if has_key {
                Duration::from_millis(100)
            } else {
                api::SEMANTIC_SCHOLAR_INTERVAL
            },
            provider_timeout: api::PROVIDER_TIMEOUT,
            cache_ttl: api::CACHE_TTL,
            cache_max_size: api::CACHE_MAX_SIZE,
            top_n: corpus::DEFAULT_TOP_N,
            min_corpus_size: corpus::MIN_CORPUS_SIZE,
        }
    }

    /// Create a test configuration pointing every provider at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            arxiv_url: format!("{base_url}/arxiv/api/query"),
            openalex_url: format!("{base_url}/openalex/works"),
            crossref_url: format!("{base_url}/crossref/works"),
            semantic_scholar_url: format!("{base_url}/s2/graph/v1/paper/search"),
            semantic_scholar_api_key: None,
            mailto: "test@example.org".to_string(),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            arxiv_interval: Duration::from_millis(0), // No delays in tests
            openalex_interval: Duration::from_millis(0),
            crossref_interval: Duration::from_millis(0),
            semantic_scholar_interval: Duration::from_millis(0),
            provider_timeout: Duration::from_secs(5),
            cache_ttl: Duration::from_secs(0), // No caching in tests
            cache_max_size: 0,
            top_n: corpus::DEFAULT_TOP_N,
            min_corpus_size: corpus::MIN_CORPUS_SIZE,
        }
    }

    /// Check if a Semantic Scholar API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.semantic_scholar_api_key.is_some()
    }
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self::new(None, "corpus@example.org")
    }
}
