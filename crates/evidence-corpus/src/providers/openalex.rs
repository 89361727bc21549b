//! OpenAlex adapter: JSON works API with inverted-index abstracts.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::{HttpClient, ProviderAdapter, RateGate, cap_authors, keep_valid};
use crate::config::CorpusConfig;
use crate::error::ProviderResult;
use crate::models::{NO_DATE, Record, SourceId};

/// Adapter for the OpenAlex works API.
#[derive(Debug)]
pub struct OpenAlexAdapter {
    http: HttpClient,
    gate: RateGate,
    url: String,
    mailto: String,
}

/// One work as OpenAlex returns it.
#[derive(Debug, Deserialize)]
pub struct OpenAlexWork {
    #[serde(default)]
    title: Option<String>,

    /// OpenAlex does not ship plain abstracts; they must be reconstructed
    /// from this word -> positions map.
    #[serde(default)]
    abstract_inverted_index: Option<BTreeMap<String, Vec<u32>>>,

    #[serde(default)]
    authorships: Vec<Authorship>,

    #[serde(default)]
    publication_year: Option<i32>,

    /// Full `https://doi.org/...` URL.
    #[serde(default)]
    doi: Option<String>,

    #[serde(default)]
    primary_location: Option<PrimaryLocation>,

    #[serde(default)]
    cited_by_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct Authorship {
    #[serde(default)]
    author: Option<AuthorRef>,
}

#[derive(Debug, Deserialize)]
struct AuthorRef {
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PrimaryLocation {
    #[serde(default)]
    source: Option<LocationSource>,
}

#[derive(Debug, Deserialize)]
struct LocationSource {
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WorksResponse {
    #[serde(default)]
    results: Vec<OpenAlexWork>,
}

impl OpenAlexAdapter {
    /// Create an adapter using the shared HTTP service.
    #[must_use]
    pub fn new(http: HttpClient, config: &CorpusConfig) -> Self {
        Self {
            http,
            gate: RateGate::new(config.openalex_interval),
            url: config.openalex_url.clone(),
            mailto: config.mailto.clone(),
        }
    }

    async fn fetch(&self, query: &str, max_results: usize) -> ProviderResult<Vec<Record>> {
        let params = vec![
            ("search".to_string(), query.to_string()),
            ("filter".to_string(), "is_oa:true".to_string()),
            ("per-page".to_string(), max_results.to_string()),
            ("mailto".to_string(), self.mailto.clone()),
        ];

        let body = self.http.get(&self.url, &params, &[]).await?;
        let response: WorksResponse = serde_json::from_str(&body)?;

        Ok(keep_valid(response.results.into_iter().filter_map(work_to_record).collect()))
    }
}

/// Rebuild abstract text by sorting tokens on their positions.
#[must_use]
pub fn reconstruct_abstract(inverted_index: &BTreeMap<String, Vec<u32>>) -> String {
    let mut positioned: Vec<(u32, &str)> = inverted_index
        .iter()
        .flat_map(|(word, positions)| positions.iter().map(move |&pos| (pos, word.as_str())))
        .collect();
    positioned.sort_unstable();

    let words: Vec<&str> = positioned.into_iter().map(|(_, word)| word).collect();
    words.join(" ")
}

/// Convert one work, dropping it when title or abstract is missing.
fn work_to_record(work: OpenAlexWork) -> Option<Record> {
    let title = work.title.filter(|t| !t.trim().is_empty())?;
    let abstract_text = work.abstract_inverted_index.as_ref().map(reconstruct_abstract)?;

    let doi_url = work.doi.unwrap_or_default();
    let doi = doi_url.strip_prefix("https://doi.org/").map(str::to_string).or_else(|| {
        if doi_url.is_empty() { None } else { Some(doi_url.clone()) }
    });

    let authors = cap_authors(
        work.authorships.into_iter().filter_map(|a| a.author.and_then(|a| a.display_name)),
    );

    Some(Record {
        source: SourceId::OpenAlex,
        title,
        authors,
        year: work.publication_year.map_or_else(|| NO_DATE.to_string(), |y| y.to_string()),
        abstract_text,
        url: doi_url,
        doi,
        venue: work
            .primary_location
            .and_then(|l| l.source)
            .and_then(|s| s.display_name)
            .filter(|v| !v.is_empty()),
        cited_by: work.cited_by_count,
    })
}

#[async_trait::async_trait]
impl ProviderAdapter for OpenAlexAdapter {
    fn source(&self) -> SourceId {
        SourceId::OpenAlex
    }

    async fn search(&self, query: &str, max_results: usize) -> Vec<Record> {
        self.gate.wait().await;

        match self.fetch(query, max_results).await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(provider = %self.source(), error = %e, "search failed");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconstruct_abstract_orders_by_position() {
        let mut index = BTreeMap::new();
        index.insert("detection".to_string(), vec![1]);
        index.insert("deepfake".to_string(), vec![0]);
        index.insert("is".to_string(), vec![2]);
        index.insert("hard".to_string(), vec![3]);
        assert_eq!(reconstruct_abstract(&index), "deepfake detection is hard");
    }

    #[test]
    fn test_reconstruct_abstract_repeated_word() {
        let mut index = BTreeMap::new();
        index.insert("the".to_string(), vec![0, 2]);
        index.insert("more".to_string(), vec![1]);
        index.insert("merrier".to_string(), vec![3]);
        assert_eq!(reconstruct_abstract(&index), "the more the merrier");
    }

    #[test]
    fn test_work_to_record_strips_doi_prefix() {
        let json = serde_json::json!({
            "title": "A Work",
            "abstract_inverted_index": {"short": [0], "abstract": [1]},
            "authorships": [{"author": {"display_name": "Ada Lovelace"}}],
            "publication_year": 2024,
            "doi": "https://doi.org/10.1234/abc",
            "cited_by_count": 12
        });
        let work: OpenAlexWork = serde_json::from_value(json).unwrap();
        let record = work_to_record(work).unwrap();

        assert_eq!(record.doi.as_deref(), Some("10.1234/abc"));
        assert_eq!(record.url, "https://doi.org/10.1234/abc");
        assert_eq!(record.year, "2024");
        assert_eq!(record.cited_by, Some(12));
    }

    #[test]
    fn test_work_without_abstract_is_dropped() {
        let json = serde_json::json!({"title": "No Abstract Here"});
        let work: OpenAlexWork = serde_json::from_value(json).unwrap();
        assert!(work_to_record(work).is_none());
    }
}
