//! Provider adapters: one per bibliographic source.
//!
//! Adapters share one HTTP service object (connection pool, retry
//! middleware, response cache) but each owns its own rate gate. The
//! [`ProviderAdapter::search`] boundary is infallible: network and parse
//! errors are logged and recovered as empty results, because the aggregator
//! treats partial coverage as normal.

mod arxiv;
mod crossref;
mod openalex;
mod semantic_scholar;

use std::time::Duration;

use moka::future::Cache;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use tokio::sync::Mutex;
use tokio::time::Instant;

pub use arxiv::ArxivAdapter;
pub use crossref::{CrossrefAdapter, strip_jats};
pub use openalex::{OpenAlexAdapter, OpenAlexWork, reconstruct_abstract};
pub use semantic_scholar::SemanticScholarAdapter;

use crate::config::{CorpusConfig, api};
use crate::error::{ProviderError, ProviderResult};
use crate::models::{Record, SourceId};

/// A searchable bibliographic source.
#[async_trait::async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Which provider this adapter talks to.
    fn source(&self) -> SourceId;

    /// Search the provider, returning already-validated records.
    ///
    /// Never fails: any transport or parse error yields an empty result.
    async fn search(&self, query: &str, max_results: usize) -> Vec<Record>;
}

/// Minimum-interval gate between requests to one provider.
///
/// Scoped per adapter; waiting here never delays other adapters' tasks.
#[derive(Debug)]
pub struct RateGate {
    interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RateGate {
    /// Create a gate enforcing `interval` between requests.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self { interval, last_request: Mutex::new(None) }
    }

    /// Sleep until the provider's minimum interval has elapsed, then record
    /// the current instant as the last request time.
    pub async fn wait(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.interval {
                tokio::time::sleep(self.interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}

/// HTTP service object shared by all adapters.
///
/// Process-scoped and explicitly passed: holds the connection pool, the
/// retry middleware, and a TTL response cache keyed by a digest of the
/// request. Constructed once by the pipeline, never ambient.
#[derive(Clone)]
pub struct HttpClient {
    client: ClientWithMiddleware,
    cache: Cache<String, String>,
}

impl HttpClient {
    /// Build the shared client from corpus configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &CorpusConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(format!("evidence-corpus/0.1 (mailto:{})", config.mailto))
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(api::MAX_KEEPALIVE)
            .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(Duration::from_secs(1), Duration::from_secs(30))
            .build_with_max_retries(3);

        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        let cache =
            Cache::builder().max_capacity(config.cache_max_size).time_to_live(config.cache_ttl).build();

        Ok(Self { client, cache })
    }

    /// Make a GET request and return the response body.
    ///
    /// Responses are cached by a digest of the URL and parameters, so a
    /// repeated query within the TTL costs no network round trip.
    pub async fn get(
        &self,
        url: &str,
        params: &[(String, String)],
        headers: &[(&str, &str)],
    ) -> ProviderResult<String> {
        let cache_key = Self::cache_key(url, params);
        if let Some(cached) = self.cache.get(&cache_key).await {
            return Ok(cached);
        }

        let mut request = self.client.get(url).query(params);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await?;
        let response = Self::handle_response(response).await?;
        let body = response.text().await?;

        self.cache.insert(cache_key, body.clone()).await;
        Ok(body)
    }

    /// Map non-success statuses to provider errors.
    async fn handle_response(response: reqwest::Response) -> ProviderResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        match status.as_u16() {
            429 => {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60);

                Err(ProviderError::rate_limited(retry_after))
            }
            500..=599 => {
                let text = response.text().await.unwrap_or_default();
                Err(ProviderError::server(status.as_u16(), text))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(ProviderError::unexpected(status.as_u16(), text))
            }
        }
    }

    /// Cache key: digest of url|params.
    fn cache_key(url: &str, params: &[(String, String)]) -> String {
        use md5::{Digest, Md5};

        let mut hasher = Md5::new();
        hasher.update(url.as_bytes());
        hasher.update(b"|");

        for (k, v) in params {
            hasher.update(k.as_bytes());
            hasher.update(b"=");
            hasher.update(v.as_bytes());
            hasher.update(b"&");
        }

        format!("{:x}", hasher.finalize())
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient").field("cached_responses", &self.cache.entry_count()).finish()
    }
}

/// Drop records an adapter must not emit: empty title, no authors, or an
/// abstract shorter than the parse-time floor.
fn keep_valid(records: Vec<Record>) -> Vec<Record> {
    records
        .into_iter()
        .filter(|r| {
            !r.title.is_empty()
                && !r.authors.is_empty()
                && crate::text::char_len(&r.abstract_text) >= crate::config::corpus::MIN_ABSTRACT_CHARS
        })
        .collect()
}

/// Truncate an author list to the adapter cap, dropping blank names.
fn cap_authors(authors: impl IntoIterator<Item = String>) -> Vec<String> {
    authors
        .into_iter()
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .take(crate::config::corpus::MAX_AUTHORS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_gate_interval_zero_is_noop() {
        let gate = RateGate::new(Duration::from_millis(0));
        tokio_test::block_on(async {
            gate.wait().await;
            let start = Instant::now();
            gate.wait().await;
            assert!(start.elapsed() < Duration::from_millis(50));
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_gate_enforces_interval() {
        let gate = RateGate::new(Duration::from_secs(3));
        gate.wait().await;
        let start = Instant::now();
        gate.wait().await;
        assert!(start.elapsed() >= Duration::from_secs(3));
    }

    #[test]
    fn test_cache_key_distinguishes_params() {
        let a = HttpClient::cache_key("http://x", &[("q".to_string(), "one".to_string())]);
        let b = HttpClient::cache_key("http://x", &[("q".to_string(), "two".to_string())]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_cap_authors_drops_blanks() {
        let authors = cap_authors(vec![
            " A ".to_string(),
            String::new(),
            "B".to_string(),
            "C".to_string(),
            "D".to_string(),
            "E".to_string(),
            "F".to_string(),
        ]);
        assert_eq!(authors, vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn test_keep_valid_filters_short_abstracts() {
        let good = Record {
            title: "t".to_string(),
            authors: vec!["A".to_string()],
            abstract_text: "x".repeat(120),
            ..Record::default()
        };
        let short = Record { abstract_text: "tiny".to_string(), ..good.clone() };
        let kept = keep_valid(vec![good, short]);
        assert_eq!(kept.len(), 1);
    }
}
