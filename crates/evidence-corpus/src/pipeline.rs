//! End-to-end corpus assembly: retrieve, filter, dedup, rank, extract.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::citations::CitationManager;
use crate::config::{CorpusConfig, corpus};
use crate::corpus::{self as ranking, LexicalScorer, RankedCorpus, RelevanceScorer, ScoredRecord};
use crate::error::{CorpusError, CorpusResult};
use crate::facts::FactExtractor;
use crate::models::FactSet;
use crate::providers::{
    ArxivAdapter, CrossrefAdapter, HttpClient, OpenAlexAdapter, ProviderAdapter,
    SemanticScholarAdapter,
};
use crate::retrieval::Aggregator;

/// Default capacity for the fact-extraction cache.
const FACT_CACHE_CAPACITY: u64 = 1_000;

/// An assembled corpus ready for generation.
///
/// Records and facts are index-aligned; the citation manager starts empty
/// and fills as the caller emits sentences.
#[derive(Debug, Serialize, Deserialize)]
pub struct EvidenceCorpus {
    /// Identifier for this assembly session.
    pub session_id: Uuid,

    /// The query the corpus was assembled for.
    pub query: String,

    /// Deduplicated records in descending relevance order.
    pub records: Vec<ScoredRecord>,

    /// Extracted facts, one set per record, same order as `records`.
    pub facts: Vec<FactSet>,

    /// Session-scoped citation registry, initially empty.
    pub citations: CitationManager,
}

impl EvidenceCorpus {
    /// Number of records in the corpus.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the corpus holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The assembly pipeline: adapters, aggregator, scorer, and extractor
/// wired together from one configuration.
pub struct CorpusPipeline {
    config: CorpusConfig,
    aggregator: Aggregator,
    scorer: Box<dyn RelevanceScorer>,
    extractor: FactExtractor,
}

impl CorpusPipeline {
    /// Build a pipeline with the default lexical scorer.
    ///
    /// # Errors
    ///
    /// Returns an error if the shared HTTP client cannot be built.
    pub fn new(config: CorpusConfig) -> anyhow::Result<Self> {
        Self::with_scorer(config, Box::new(LexicalScorer::new()))
    }

    /// Build a pipeline with an explicit relevance scorer.
    ///
    /// # Errors
    ///
    /// Returns an error if the shared HTTP client cannot be built.
    pub fn with_scorer(
        config: CorpusConfig,
        scorer: Box<dyn RelevanceScorer>,
    ) -> anyhow::Result<Self> {
        let http = HttpClient::new(&config)?;

        let adapters: Vec<Arc<dyn ProviderAdapter>> = vec![
            Arc::new(ArxivAdapter::new(http.clone(), &config)),
            Arc::new(OpenAlexAdapter::new(http.clone(), &config)),
            Arc::new(CrossrefAdapter::new(http.clone(), &config)),
            Arc::new(SemanticScholarAdapter::new(http, &config)),
        ];
        let aggregator = Aggregator::new(adapters, config.provider_timeout);

        Ok(Self { config, aggregator, scorer, extractor: FactExtractor::new(FACT_CACHE_CAPACITY) })
    }

    /// Assemble a corpus for `query`, requesting up to `max_per_provider`
    /// records from each provider.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusError::InsufficientCorpus`] when fewer viable
    /// records survive dedup and ranking than the configured floor.
    #[tracing::instrument(skip(self), fields(query = %query))]
    pub async fn assemble(
        &self,
        query: &str,
        max_per_provider: usize,
    ) -> CorpusResult<EvidenceCorpus> {
        let session_id = Uuid::new_v4();
        tracing::info!(%session_id, "assembling corpus");

        let retrieved = self.aggregator.retrieve(query, max_per_provider).await;

        let viable: Vec<_> = retrieved.into_iter().filter(crate::models::Record::is_viable).collect();
        tracing::debug!(viable = viable.len(), "viability filter applied");

        let unique = ranking::dedup(viable);
        tracing::debug!(unique = unique.len(), "deduplication complete");

        let ranked: RankedCorpus =
            ranking::rank(unique, query, self.scorer.as_ref(), self.config.top_n);

        if ranked.len() < self.config.min_corpus_size {
            return Err(CorpusError::InsufficientCorpus {
                found: ranked.len(),
                required: self.config.min_corpus_size,
            });
        }

        let facts: Vec<FactSet> = ranked.iter().map(|r| self.extractor.extract(r)).collect();

        tracing::info!(records = ranked.len(), "corpus assembled");
        Ok(EvidenceCorpus {
            session_id,
            query: query.to_string(),
            records: ranked.into_records(),
            facts,
            citations: CitationManager::new(),
        })
    }

    /// Assemble with the default per-provider request size.
    ///
    /// # Errors
    ///
    /// Same as [`CorpusPipeline::assemble`].
    pub async fn assemble_default(&self, query: &str) -> CorpusResult<EvidenceCorpus> {
        self.assemble(query, corpus::DEFAULT_PER_PROVIDER).await
    }
}

impl std::fmt::Debug for CorpusPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CorpusPipeline")
            .field("adapters", &self.aggregator.adapter_count())
            .field("top_n", &self.config.top_n)
            .field("min_corpus_size", &self.config.min_corpus_size)
            .finish()
    }
}
