//! Deduplication and ranking of the retrieved record union.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::Record;

/// A record with its relevance score attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    /// The surviving record.
    pub record: Record,

    /// Weighted relevance/impact/recency score.
    pub relevance_score: f64,
}

/// The deduplicated, ranked corpus every downstream stage operates on.
///
/// A strict subset and reordering of the adapter union, truncated to the
/// configured top-N.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankedCorpus {
    records: Vec<ScoredRecord>,
}

impl RankedCorpus {
    /// Records in descending score order.
    #[must_use]
    pub fn records(&self) -> &[ScoredRecord] {
        &self.records
    }

    /// Number of records in the corpus.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the corpus is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over the underlying records.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter().map(|s| &s.record)
    }

    /// Consume the corpus, yielding its scored records.
    #[must_use]
    pub fn into_records(self) -> Vec<ScoredRecord> {
        self.records
    }
}

/// Drop duplicate records, first occurrence winning.
///
/// A record is a duplicate when its DOI matches an already-seen DOI, or,
/// when it has no DOI, when its normalized title matches a seen title.
/// Surviving records register both identifiers. Near-duplicate titles
/// beyond lowercase/trim normalization are deliberately not caught; the
/// bounded false-negative rate buys bounded latency.
#[must_use]
pub fn dedup(records: Vec<Record>) -> Vec<Record> {
    let mut seen_dois: HashSet<String> = HashSet::new();
    let mut seen_titles: HashSet<String> = HashSet::new();
    let mut unique = Vec::new();

    for record in records {
        let is_duplicate = match record.trimmed_doi() {
            Some(doi) => seen_dois.contains(doi),
            None => seen_titles.contains(&record.normalized_title()),
        };

        if is_duplicate {
            continue;
        }

        if let Some(doi) = record.trimmed_doi() {
            seen_dois.insert(doi.to_string());
        }
        seen_titles.insert(record.normalized_title());
        unique.push(record);
    }

    unique
}

/// A pluggable relevance signal.
///
/// The lexical scorer is the default; the embedding scorer is an
/// alternative signal behind the same interface, so swapping one for the
/// other never touches dedup.
pub trait RelevanceScorer: Send + Sync {
    /// Score one record against the query. Higher is more relevant.
    fn score(&self, query: &str, record: &Record) -> f64;
}

/// Term-overlap scorer with impact and recency bonuses.
///
/// Title hits weigh 10, abstract hits 2, citation impact is capped at 10
/// points so outliers cannot dominate, and recency adds 5/3/1 points within
/// 3/5/10 years.
#[derive(Debug, Clone)]
pub struct LexicalScorer {
    current_year: i32,
}

impl LexicalScorer {
    const TITLE_WEIGHT: f64 = 10.0;
    const ABSTRACT_WEIGHT: f64 = 2.0;
    const CITATION_CAP: f64 = 10.0;

    /// Scorer anchored to the current wall-clock year.
    #[must_use]
    pub fn new() -> Self {
        use chrono::Datelike;
        Self { current_year: chrono::Utc::now().year() }
    }

    /// Scorer anchored to a fixed year, for reproducible tests.
    #[must_use]
    pub const fn with_year(current_year: i32) -> Self {
        Self { current_year }
    }

    fn recency_bonus(&self, record: &Record) -> f64 {
        let Some(year) = record.year_value() else {
            return 0.0;
        };

        if year >= self.current_year - 3 {
            5.0
        } else if year >= self.current_year - 5 {
            3.0
        } else if year >= self.current_year - 10 {
            1.0
        } else {
            0.0
        }
    }
}

impl Default for LexicalScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl RelevanceScorer for LexicalScorer {
    fn score(&self, query: &str, record: &Record) -> f64 {
        let query_terms: HashSet<String> =
            query.to_lowercase().split_whitespace().map(str::to_string).collect();
        let title_terms: HashSet<String> =
            record.title.to_lowercase().split_whitespace().map(str::to_string).collect();
        let abstract_terms: HashSet<String> =
            record.abstract_text.to_lowercase().split_whitespace().map(str::to_string).collect();

        let title_overlap = query_terms.intersection(&title_terms).count() as f64;
        let abstract_overlap = query_terms.intersection(&abstract_terms).count() as f64;

        let mut score = title_overlap * Self::TITLE_WEIGHT + abstract_overlap * Self::ABSTRACT_WEIGHT;

        if let Some(cited_by) = record.cited_by {
            score += (f64::from(cited_by) / 100.0).min(Self::CITATION_CAP);
        }

        score + self.recency_bonus(record)
    }
}

/// Produces dense vectors for text.
///
/// The embedding model itself is an external collaborator; this crate only
/// defines the seam.
pub trait Embedder: Send + Sync {
    /// Embed one text into a fixed-dimension vector.
    fn embed(&self, text: &str) -> Vec<f32>;
}

/// Cosine-similarity scorer over a caller-supplied embedder.
///
/// Scores each record's `title + truncated abstract` against the query
/// vector. Abstracts are clipped to 700 characters before embedding.
pub struct EmbeddingScorer {
    embedder: Box<dyn Embedder>,
}

impl EmbeddingScorer {
    const ABSTRACT_CLIP: usize = 700;

    /// Wrap an embedder as a relevance scorer.
    #[must_use]
    pub fn new(embedder: Box<dyn Embedder>) -> Self {
        Self { embedder }
    }

    fn document_text(record: &Record) -> String {
        let clipped = crate::text::truncate_chars(&record.abstract_text, Self::ABSTRACT_CLIP);
        if clipped.len() < record.abstract_text.len() {
            format!("{} {clipped}...", record.title)
        } else {
            format!("{} {clipped}", record.title)
        }
    }

    fn cosine(a: &[f32], b: &[f32]) -> f64 {
        let dot: f64 = a.iter().zip(b).map(|(x, y)| f64::from(*x) * f64::from(*y)).sum();
        let norm_a: f64 = a.iter().map(|x| f64::from(*x).powi(2)).sum::<f64>().sqrt();
        let norm_b: f64 = b.iter().map(|x| f64::from(*x).powi(2)).sum::<f64>().sqrt();

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }
        dot / (norm_a * norm_b)
    }
}

impl RelevanceScorer for EmbeddingScorer {
    fn score(&self, query: &str, record: &Record) -> f64 {
        let query_vec = self.embedder.embed(query);
        let doc_vec = self.embedder.embed(&Self::document_text(record));
        Self::cosine(&query_vec, &doc_vec)
    }
}

impl std::fmt::Debug for EmbeddingScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingScorer").finish()
    }
}

/// Score, stably sort descending, and truncate to `top_n`.
///
/// Ties keep their pre-rank relative order.
#[must_use]
pub fn rank(
    records: Vec<Record>,
    query: &str,
    scorer: &dyn RelevanceScorer,
    top_n: usize,
) -> RankedCorpus {
    let mut scored: Vec<ScoredRecord> = records
        .into_iter()
        .map(|record| {
            let relevance_score = scorer.score(query, &record);
            ScoredRecord { record, relevance_score }
        })
        .collect();

    // sort_by is stable, so equal scores preserve original order.
    scored.sort_by(|a, b| {
        b.relevance_score.partial_cmp(&a.relevance_score).unwrap_or(std::cmp::Ordering::Equal)
    });
    scored.truncate(top_n);

    RankedCorpus { records: scored }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, doi: Option<&str>) -> Record {
        Record {
            title: title.to_string(),
            authors: vec!["A".to_string()],
            abstract_text: "x".repeat(120),
            doi: doi.map(String::from),
            ..Record::default()
        }
    }

    #[test]
    fn test_dedup_by_doi_keeps_first() {
        let records = vec![
            record("Formatted One Way", Some("10.1/x")),
            record("Formatted Another Way", Some("10.1/x")),
        ];
        let unique = dedup(records);
        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].title, "Formatted One Way");
    }

    #[test]
    fn test_dedup_by_title_when_no_doi() {
        let records = vec![record("Same Title", None), record("  same title ", None)];
        assert_eq!(dedup(records).len(), 1);
    }

    #[test]
    fn test_distinct_dois_with_same_title_both_kept() {
        // Identifier match governs when an identifier exists.
        let records = vec![record("Shared Title", Some("10.1/a")), record("Shared Title", Some("10.1/b"))];
        assert_eq!(dedup(records).len(), 2);
    }

    #[test]
    fn test_lexical_scorer_weights() {
        let scorer = LexicalScorer::with_year(2025);
        let mut r = record("deepfake detection survey", None);
        r.abstract_text = "a survey of deepfake detection methods covering transformer models"
            .repeat(3);
        r.year = "2024".to_string();
        r.cited_by = Some(250);

        // title: deepfake + detection = 2 terms * 10; abstract: same 2 * 2;
        // citations min(2.5, 10); recency 5.
        let score = scorer.score("deepfake detection", &r);
        assert!((score - (20.0 + 4.0 + 2.5 + 5.0)).abs() < 1e-9);
    }

    #[test]
    fn test_citation_cap() {
        let scorer = LexicalScorer::with_year(2025);
        let mut r = record("unrelated", None);
        r.cited_by = Some(1_000_000);
        r.year = "1990".to_string();
        assert!((scorer.score("query terms", &r) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_rank_is_stable_on_ties() {
        let scorer = LexicalScorer::with_year(2025);
        let records = vec![record("first tie", None), record("second tie", None), record("third tie", None)];
        let corpus = rank(records, "nomatch", &scorer, 10);

        let titles: Vec<&str> = corpus.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["first tie", "second tie", "third tie"]);
    }

    #[test]
    fn test_rank_truncates() {
        let scorer = LexicalScorer::with_year(2025);
        let records = (0..20).map(|i| record(&format!("paper {i}"), None)).collect();
        assert_eq!(rank(records, "q", &scorer, 5).len(), 5);
    }

    #[test]
    fn test_cosine_identity_and_zero() {
        assert!((EmbeddingScorer::cosine(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-9);
        assert!((EmbeddingScorer::cosine(&[1.0, 0.0], &[0.0, 1.0])).abs() < 1e-9);
        assert!((EmbeddingScorer::cosine(&[0.0, 0.0], &[1.0, 1.0])).abs() < 1e-9);
    }
}
