//! Retrieval aggregator: concurrent fan-out across all provider adapters.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};

use crate::models::Record;
use crate::providers::ProviderAdapter;

/// Issues one query to every adapter concurrently and joins the results.
///
/// Each adapter call runs under its own hard timeout, so worst-case
/// retrieval latency is one timeout period rather than the sum of provider
/// latencies. A timed-out or failed adapter contributes nothing; there is
/// no retry at this layer.
pub struct Aggregator {
    adapters: Vec<Arc<dyn ProviderAdapter>>,
    provider_timeout: Duration,
}

impl Aggregator {
    /// Create an aggregator over the given adapters.
    #[must_use]
    pub fn new(adapters: Vec<Arc<dyn ProviderAdapter>>, provider_timeout: Duration) -> Self {
        Self { adapters, provider_timeout }
    }

    /// Number of configured adapters.
    #[must_use]
    pub fn adapter_count(&self) -> usize {
        self.adapters.len()
    }

    /// Retrieve up to `max_per_provider` records from every adapter.
    ///
    /// Results are flattened in completion order, which is not stable;
    /// downstream ordering comes from ranking, never from this sequence.
    /// An empty union is returned as an empty vec, not an error.
    pub async fn retrieve(&self, query: &str, max_per_provider: usize) -> Vec<Record> {
        let mut futures = FuturesUnordered::new();

        for adapter in &self.adapters {
            let adapter = Arc::clone(adapter);
            let query = query.to_string();
            let timeout = self.provider_timeout;

            futures.push(async move {
                let source = adapter.source();
                match tokio::time::timeout(timeout, adapter.search(&query, max_per_provider)).await
                {
                    Ok(records) => (source, records),
                    Err(_) => {
                        tracing::warn!(provider = %source, ?timeout, "provider timed out");
                        (source, Vec::new())
                    }
                }
            });
        }

        let mut all_records = Vec::new();
        while let Some((source, records)) = futures.next().await {
            tracing::info!(provider = %source, count = records.len(), "provider finished");
            all_records.extend(records);
        }

        tracing::info!(total = all_records.len(), "retrieval complete");
        all_records
    }
}

impl std::fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aggregator")
            .field("adapters", &self.adapter_count())
            .field("provider_timeout", &self.provider_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SourceId;

    /// Adapter returning canned records after an optional delay.
    struct FakeAdapter {
        source: SourceId,
        delay: Duration,
        count: usize,
    }

    #[async_trait::async_trait]
    impl ProviderAdapter for FakeAdapter {
        fn source(&self) -> SourceId {
            self.source
        }

        async fn search(&self, _query: &str, _max_results: usize) -> Vec<Record> {
            tokio::time::sleep(self.delay).await;
            (0..self.count)
                .map(|i| Record {
                    source: self.source,
                    title: format!("{} paper {i}", self.source),
                    authors: vec!["A".to_string()],
                    abstract_text: "x".repeat(120),
                    ..Record::default()
                })
                .collect()
        }
    }

    #[tokio::test]
    async fn test_retrieve_flattens_all_adapters() {
        let aggregator = Aggregator::new(
            vec![
                Arc::new(FakeAdapter { source: SourceId::Arxiv, delay: Duration::ZERO, count: 3 }),
                Arc::new(FakeAdapter { source: SourceId::OpenAlex, delay: Duration::ZERO, count: 2 }),
            ],
            Duration::from_secs(1),
        );
        let records = aggregator.retrieve("q", 10).await;
        assert_eq!(records.len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_adapter_contributes_nothing() {
        let aggregator = Aggregator::new(
            vec![
                Arc::new(FakeAdapter { source: SourceId::Arxiv, delay: Duration::ZERO, count: 2 }),
                Arc::new(FakeAdapter {
                    source: SourceId::Crossref,
                    delay: Duration::from_secs(120),
                    count: 9,
                }),
            ],
            Duration::from_secs(5),
        );
        let records = aggregator.retrieve("q", 10).await;
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.source == SourceId::Arxiv));
    }

    #[tokio::test]
    async fn test_no_adapters_yields_empty() {
        let aggregator = Aggregator::new(Vec::new(), Duration::from_secs(1));
        assert!(aggregator.retrieve("q", 10).await.is_empty());
    }
}
