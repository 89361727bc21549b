//! arXiv adapter: Atom feed over the export API.

use quick_xml::Reader;
use quick_xml::events::Event;

use super::{HttpClient, ProviderAdapter, RateGate, cap_authors, keep_valid};
use crate::config::CorpusConfig;
use crate::error::ProviderResult;
use crate::models::{NO_DATE, Record, SourceId};
use crate::text;

/// Adapter for the arXiv Atom query API.
///
/// arXiv asks clients for a 3 second gap between requests; the gate
/// enforces it per adapter instance.
#[derive(Debug)]
pub struct ArxivAdapter {
    http: HttpClient,
    gate: RateGate,
    url: String,
}

impl ArxivAdapter {
    /// Create an adapter using the shared HTTP service.
    #[must_use]
    pub fn new(http: HttpClient, config: &CorpusConfig) -> Self {
        Self { http, gate: RateGate::new(config.arxiv_interval), url: config.arxiv_url.clone() }
    }

    async fn fetch(&self, query: &str, max_results: usize) -> ProviderResult<Vec<Record>> {
        let params = vec![
            ("search_query".to_string(), format!("all:{query}")),
            ("start".to_string(), "0".to_string()),
            ("max_results".to_string(), max_results.to_string()),
            ("sortBy".to_string(), "relevance".to_string()),
            ("sortOrder".to_string(), "descending".to_string()),
        ];

        let body = self.http.get(&self.url, &params, &[]).await?;
        Ok(keep_valid(Self::parse_feed(&body)?))
    }

    /// Parse an Atom feed into records.
    ///
    /// Entries missing a title, summary, or author list are dropped
    /// individually; a malformed document fails as a whole.
    pub fn parse_feed(xml: &str) -> ProviderResult<Vec<Record>> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut records = Vec::new();
        let mut entry: Option<EntryFields> = None;
        let mut element: Vec<u8> = Vec::new();

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    element = e.local_name().as_ref().to_vec();
                    if element == b"entry" {
                        entry = Some(EntryFields::default());
                    }
                }
                Event::Text(e) => {
                    if let Some(fields) = entry.as_mut() {
                        let value = e.unescape()?;
                        fields.push(&element, &value);
                    }
                }
                Event::End(e) => {
                    if e.local_name().as_ref() == b"entry" {
                        if let Some(record) = entry.take().and_then(EntryFields::into_record) {
                            records.push(record);
                        }
                    }
                    element.clear();
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(records)
    }
}

/// Accumulated text of one `<entry>` element.
#[derive(Debug, Default)]
struct EntryFields {
    title: String,
    summary: String,
    published: String,
    id: String,
    authors: Vec<String>,
}

impl EntryFields {
    fn push(&mut self, element: &[u8], value: &str) {
        match element {
            b"title" => self.title.push_str(value),
            b"summary" => self.summary.push_str(value),
            b"published" => self.published.push_str(value),
            b"id" => self.id.push_str(value),
            b"name" => self.authors.push(value.to_string()),
            _ => {}
        }
    }

    fn into_record(self) -> Option<Record> {
        let title = text::collapse_whitespace(&self.title);
        let abstract_text = text::collapse_whitespace(&self.summary);
        if title.is_empty() || abstract_text.is_empty() {
            return None;
        }

        // A well-formed date starts with four ASCII digits; anything else
        // (short, or a char straddling the boundary) is treated as undated.
        let year = match self.published.get(..4) {
            Some(prefix) => prefix.to_string(),
            None => NO_DATE.to_string(),
        };

        // "http://arxiv.org/abs/2301.01234v1" -> "2301.01234v1"
        let arxiv_id = self.id.rsplit("/abs/").next().unwrap_or_default().to_string();
        let doi = if arxiv_id.is_empty() { None } else { Some(format!("arXiv:{arxiv_id}")) };

        Some(Record {
            source: SourceId::Arxiv,
            title,
            authors: cap_authors(self.authors),
            year,
            abstract_text,
            url: self.id,
            doi,
            venue: Some("arXiv preprint".to_string()),
            cited_by: None,
        })
    }
}

#[async_trait::async_trait]
impl ProviderAdapter for ArxivAdapter {
    fn source(&self) -> SourceId {
        SourceId::Arxiv
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
