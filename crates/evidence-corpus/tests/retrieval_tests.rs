//! Aggregator fan-out tests against mocked providers.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use evidence_corpus::providers::{
    ArxivAdapter, CrossrefAdapter, HttpClient, OpenAlexAdapter, ProviderAdapter,
    SemanticScholarAdapter,
};
use evidence_corpus::{Aggregator, CorpusConfig, SourceId};

fn long_abstract(topic: &str) -> String {
    format!(
        "A comprehensive study of {topic} spanning data collection, model \
         design, training methodology, and evaluation across several public \
         benchmark datasets with extensive comparisons."
    )
}

fn atom_feed(title: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <entry>
    <id>http://arxiv.org/abs/2302.00001v1</id>
    <title>{title}</title>
    <summary>{}</summary>
    <published>2023-02-01T00:00:00Z</published>
    <author><name>First Author</name></author>
  </entry>
</feed>"#,
        long_abstract("the topic")
    )
}

fn s2_body(title: &str) -> serde_json::Value {
    json!({"data": [{
        "title": title,
        "abstract": long_abstract("semantic search"),
        "year": 2023,
        "authors": [{"name": "S2 Author"}]
    }]})
}

fn openalex_body(title: &str) -> serde_json::Value {
    let mut index = serde_json::Map::new();
    for (pos, word) in long_abstract("open access").split_whitespace().enumerate() {
        index
            .entry(word.to_string())
            .or_insert_with(|| json!([]))
            .as_array_mut()
            .unwrap()
            .push(json!(pos));
    }
    json!({"results": [{
        "title": title,
        "abstract_inverted_index": index,
        "authorships": [{"author": {"display_name": "OA Author"}}],
        "publication_year": 2023
    }]})
}

fn crossref_body(title: &str) -> serde_json::Value {
    json!({"message": {"items": [{
        "DOI": "10.1/cr",
        "title": [title],
        "author": [{"given": "C", "family": "Author"}],
        "abstract": long_abstract("journal work"),
        "published": {"date-parts": [[2023]]}
    }]}})
}

fn all_adapters(config: &CorpusConfig) -> Vec<Arc<dyn ProviderAdapter>> {
    let http = HttpClient::new(config).unwrap();
    vec![
        Arc::new(ArxivAdapter::new(http.clone(), config)),
        Arc::new(OpenAlexAdapter::new(http.clone(), config)),
        Arc::new(CrossrefAdapter::new(http.clone(), config)),
        Arc::new(SemanticScholarAdapter::new(http, config)),
    ]
}

#[tokio::test]
async fn test_fan_out_collects_from_all_providers() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/arxiv/api/query"))
        .respond_with(ResponseTemplate::new(200).set_body_string(atom_feed("Arxiv Paper")))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/openalex/works"))
        .respond_with(ResponseTemplate::new(200).set_body_json(openalex_body("OpenAlex Paper")))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/crossref/works"))
        .respond_with(ResponseTemplate::new(200).set_body_json(crossref_body("Crossref Paper")))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/s2/graph/v1/paper/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(s2_body("S2 Paper")))
        .mount(&mock_server)
        .await;

    let config = CorpusConfig::for_testing(&mock_server.uri());
    let aggregator = Aggregator::new(all_adapters(&config), config.provider_timeout);

    let records = aggregator.retrieve("anything", 10).await;
    assert_eq!(records.len(), 4);

    let sources: std::collections::HashSet<SourceId> = records.iter().map(|r| r.source).collect();
    assert_eq!(sources.len(), 4);
}

#[tokio::test]
async fn test_one_provider_down_does_not_block_the_rest() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/arxiv/api/query"))
        .respond_with(ResponseTemplate::new(200).set_body_string(atom_feed("Arxiv Paper")))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/openalex/works"))
        .respond_with(ResponseTemplate::new(200).set_body_json(openalex_body("OpenAlex Paper")))
        .mount(&mock_server)
        .await;
    // Crossref answers with a client error that the retry policy won't retry.
    Mock::given(method("GET"))
        .and(path("/crossref/works"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/s2/graph/v1/paper/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(s2_body("S2 Paper")))
        .mount(&mock_server)
        .await;

    let config = CorpusConfig::for_testing(&mock_server.uri());
    let aggregator = Aggregator::new(all_adapters(&config), config.provider_timeout);

    let records = aggregator.retrieve("anything", 10).await;
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.source != SourceId::Crossref));
}

#[tokio::test]
async fn test_all_providers_down_yields_empty_union() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let config = CorpusConfig::for_testing(&mock_server.uri());
    let aggregator = Aggregator::new(all_adapters(&config), config.provider_timeout);

    assert!(aggregator.retrieve("anything", 10).await.is_empty());
}

#[tokio::test]
async fn test_slow_provider_is_cut_off_by_the_timeout() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/arxiv/api/query"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(atom_feed("Slow Paper"))
                .set_delay(Duration::from_secs(30)),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/s2/graph/v1/paper/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(s2_body("Fast Paper")))
        .mount(&mock_server)
        .await;

    let config = CorpusConfig::for_testing(&mock_server.uri());
    let http = HttpClient::new(&config).unwrap();
    let adapters: Vec<Arc<dyn ProviderAdapter>> = vec![
        Arc::new(ArxivAdapter::new(http.clone(), &config)),
        Arc::new(SemanticScholarAdapter::new(http, &config)),
    ];
    let aggregator = Aggregator::new(adapters, Duration::from_millis(500));

    let records = aggregator.retrieve("anything", 10).await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].source, SourceId::SemanticScholar);
}
