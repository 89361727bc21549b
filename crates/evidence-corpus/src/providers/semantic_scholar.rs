//! Semantic Scholar adapter: Graph API paper search subset.

use serde::Deserialize;

use super::{HttpClient, ProviderAdapter, RateGate, cap_authors, keep_valid};
use crate::config::CorpusConfig;
use crate::error::ProviderResult;
use crate::models::{NO_DATE, Record, SourceId};

const FIELDS: &str = "title,authors,year,abstract,citationCount,url,externalIds,venue";

/// Adapter for the Semantic Scholar Graph API.
///
/// Unkeyed access is limited to roughly one request per second; an API key
/// shortens the gate interval (see [`CorpusConfig::new`]).
#[derive(Debug)]
pub struct SemanticScholarAdapter {
    http: HttpClient,
    gate: RateGate,
    url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<S2Paper>,
}

#[derive(Debug, Deserialize)]
struct S2Paper {
    #[serde(default)]
    title: Option<String>,

    #[serde(default)]
    authors: Vec<S2Author>,

    #[serde(default)]
    year: Option<i32>,

    #[serde(rename = "abstract", default)]
    abstract_text: Option<String>,

    #[serde(rename = "citationCount", default)]
    citation_count: Option<u32>,

    #[serde(default)]
    url: Option<String>,

    #[serde(rename = "externalIds", default)]
    external_ids: Option<ExternalIds>,

    #[serde(default)]
    venue: Option<String>,
}

#[derive(Debug, Deserialize)]
struct S2Author {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExternalIds {
    #[serde(rename = "DOI", default)]
    doi: Option<String>,
}

impl SemanticScholarAdapter {
    /// Create an adapter using the shared HTTP service.
    #[must_use]
    pub fn new(http: HttpClient, config: &CorpusConfig) -> Self {
        Self {
            http,
            gate: RateGate::new(config.semantic_scholar_interval),
            url: config.semantic_scholar_url.clone(),
            api_key: config.semantic_scholar_api_key.clone(),
        }
    }

    async fn fetch(&self, query: &str, max_results: usize) -> ProviderResult<Vec<Record>> {
        let params = vec![
            ("query".to_string(), query.to_string()),
            ("limit".to_string(), max_results.to_string()),
            ("fields".to_string(), FIELDS.to_string()),
        ];

        let mut headers: Vec<(&str, &str)> = Vec::new();
        if let Some(key) = self.api_key.as_deref() {
            headers.push(("x-api-key", key));
        }

        let body = self.http.get(&self.url, &params, &headers).await?;
        let response: SearchResponse = serde_json::from_str(&body)?;

        Ok(keep_valid(response.data.into_iter().filter_map(paper_to_record).collect()))
    }
}

fn paper_to_record(paper: S2Paper) -> Option<Record> {
    let title = paper.title.filter(|t| !t.trim().is_empty())?;
    let abstract_text = paper.abstract_text.filter(|a| !a.trim().is_empty())?;

    Some(Record {
        source: SourceId::SemanticScholar,
        title,
        authors: cap_authors(paper.authors.into_iter().filter_map(|a| a.name)),
        year: paper.year.map_or_else(|| NO_DATE.to_string(), |y| y.to_string()),
        abstract_text,
        url: paper.url.unwrap_or_default(),
        doi: paper.external_ids.and_then(|ids| ids.doi).filter(|d| !d.is_empty()),
        venue: paper.venue.filter(|v| !v.is_empty()),
        cited_by: paper.citation_count,
    })
}

#[async_trait::async_trait]
impl ProviderAdapter for SemanticScholarAdapter {
    fn source(&self) -> SourceId {
        SourceId::SemanticScholar
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
