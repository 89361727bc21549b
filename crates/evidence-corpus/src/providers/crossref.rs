//! Crossref adapter: JSON works API with JATS-tagged abstracts.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use super::{HttpClient, ProviderAdapter, RateGate, cap_authors, keep_valid};
use crate::config::CorpusConfig;
use crate::error::ProviderResult;
use crate::models::{NO_DATE, Record, SourceId};
use crate::text;

/// Crossref abstracts arrive wrapped in JATS markup (`<jats:p>` and
/// friends); strip every tag.
static JATS_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

/// Adapter for the Crossref works API, restricted to journal articles.
#[derive(Debug)]
pub struct CrossrefAdapter {
    http: HttpClient,
    gate: RateGate,
    url: String,
    mailto: String,
}

#[derive(Debug, Deserialize)]
struct CrossrefResponse {
    message: CrossrefMessage,
}

#[derive(Debug, Deserialize)]
struct CrossrefMessage {
    #[serde(default)]
    items: Vec<CrossrefItem>,
}

#[derive(Debug, Deserialize)]
struct CrossrefItem {
    #[serde(rename = "DOI", default)]
    doi: Option<String>,

    /// Crossref titles are arrays; the first entry is the real one.
    #[serde(default)]
    title: Vec<String>,

    #[serde(default)]
    author: Vec<CrossrefAuthor>,

    #[serde(rename = "abstract", default)]
    abstract_text: Option<String>,

    #[serde(default)]
    published: Option<DateParts>,

    #[serde(rename = "container-title", default)]
    container_title: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CrossrefAuthor {
    #[serde(default)]
    given: Option<String>,
    #[serde(default)]
    family: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DateParts {
    #[serde(rename = "date-parts", default)]
    date_parts: Vec<Vec<i32>>,
}

impl CrossrefAdapter {
    /// Create an adapter using the shared HTTP service.
    #[must_use]
    pub fn new(http: HttpClient, config: &CorpusConfig) -> Self {
        Self {
            http,
            gate: RateGate::new(config.crossref_interval),
            url: config.crossref_url.clone(),
            mailto: config.mailto.clone(),
        }
    }

    async fn fetch(&self, query: &str, max_results: usize) -> ProviderResult<Vec<Record>> {
        let params = vec![
            ("query".to_string(), query.to_string()),
            ("rows".to_string(), max_results.to_string()),
            ("filter".to_string(), "type:journal-article".to_string()),
            (
                "select".to_string(),
                "DOI,title,author,abstract,published,container-title".to_string(),
            ),
            ("mailto".to_string(), self.mailto.clone()),
        ];

        let body = self.http.get(&self.url, &params, &[]).await?;
        let response: CrossrefResponse = serde_json::from_str(&body)?;

        Ok(keep_valid(response.message.items.into_iter().filter_map(item_to_record).collect()))
    }
}

/// Remove JATS/XML tags and collapse the remaining whitespace.
#[must_use]
pub fn strip_jats(abstract_text: &str) -> String {
    text::collapse_whitespace(&JATS_TAG.replace_all(abstract_text, " "))
}

fn item_to_record(item: CrossrefItem) -> Option<Record> {
    let title = item.title.into_iter().next().filter(|t| !t.trim().is_empty())?;
    let abstract_text = strip_jats(&item.abstract_text?);

    let authors = cap_authors(item.author.into_iter().map(|a| {
        format!("{} {}", a.given.unwrap_or_default(), a.family.unwrap_or_default())
            .trim()
            .to_string()
    }));

    let year = item
        .published
        .and_then(|p| p.date_parts.into_iter().next())
        .and_then(|parts| parts.into_iter().next())
        .map_or_else(|| NO_DATE.to_string(), |y| y.to_string());

    let doi = item.doi.filter(|d| !d.is_empty());
    let url = doi.as_deref().map(|d| format!("https://doi.org/{d}")).unwrap_or_default();

    Some(Record {
        source: SourceId::Crossref,
        title,
        authors,
        year,
        abstract_text,
        url,
        doi,
        venue: item.container_title.into_iter().next().filter(|v| !v.is_empty()),
        cited_by: None,
    })
}

#[async_trait::async_trait]
impl ProviderAdapter for CrossrefAdapter {
    fn source(&self) -> SourceId {
        SourceId::Crossref
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
