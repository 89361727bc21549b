//! Evidence Corpus
//!
//! Assembles a citation-safe evidence corpus from open bibliographic
//! providers (arXiv, OpenAlex, Crossref, Semantic Scholar) and turns it
//! into reporting sentences whose every citation number traces back to a
//! real retrieved record.
//!
//! # Features
//!
//! - **Concurrent retrieval**: per-provider rate gates, shared retrying
//!   HTTP client, hard per-provider timeouts
//! - **Dedup and ranking**: DOI-first identity, lexical or embedding
//!   relevance scoring, top-N truncation
//! - **Fact extraction**: deterministic, sentinel-backed rhetorical facts
//!   per record
//! - **Citation integrity**: first-seen numbering, idempotent per source,
//!   verifiable markers
//! - **Paraphrase variation**: reporting-verb and citation-style rotation
//!   with bounded repetition
//!
//! # Example
//!
//! ```no_run
//! use evidence_corpus::{CorpusConfig, CorpusPipeline, FactCategory, ParaphraseEngine};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = CorpusConfig::new(None, "you@example.org");
//!     let pipeline = CorpusPipeline::new(config)?;
//!     let mut corpus = pipeline.assemble_default("deepfake detection").await?;
//!
//!     let record = corpus.records[0].record.clone();
//!     let facts = corpus.facts[0].clone();
//!
//!     let mut engine = ParaphraseEngine::new(&mut corpus.citations);
//!     let sentence = engine.sentence(&record, &facts, FactCategory::Finding);
//!     println!("{sentence}");
//!
//!     for entry in corpus.citations.bibliography() {
//!         println!("{entry}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod citations;
pub mod config;
pub mod corpus;
pub mod error;
pub mod facts;
pub mod models;
pub mod pipeline;
pub mod providers;
pub mod retrieval;
pub mod variation;

mod text;

pub use citations::{CitationEntry, CitationManager};
pub use config::CorpusConfig;
pub use corpus::{
    Embedder, EmbeddingScorer, LexicalScorer, RankedCorpus, RelevanceScorer, ScoredRecord, dedup,
    rank,
};
pub use error::{CorpusError, CorpusResult, ProviderError, ProviderResult};
pub use facts::FactExtractor;
pub use models::{FactCategory, FactSet, Record, SourceId};
pub use pipeline::{CorpusPipeline, EvidenceCorpus};
pub use retrieval::Aggregator;
pub use variation::{
    CitationStyle, ParaphraseEngine, SeededPolicy, Strength, ThreadRngPolicy, VariationPolicy,
};
