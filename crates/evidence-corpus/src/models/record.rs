//! Bibliographic record shared by all provider adapters.

use serde::{Deserialize, Serialize};

use crate::text;

/// Year sentinel for records with no usable publication date.
pub const NO_DATE: &str = "n.d.";

/// Identity of the upstream service a record came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceId {
    /// arXiv Atom API.
    #[default]
    #[serde(rename = "arxiv")]
    Arxiv,

    /// OpenAlex works API.
    #[serde(rename = "openalex")]
    OpenAlex,

    /// Crossref works API.
    #[serde(rename = "crossref")]
    Crossref,

    /// Semantic Scholar graph API.
    #[serde(rename = "semantic_scholar")]
    SemanticScholar,
}

impl SourceId {
    /// Human-readable provider name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Arxiv => "arXiv",
            Self::OpenAlex => "OpenAlex",
            Self::Crossref => "Crossref",
            Self::SemanticScholar => "Semantic Scholar",
        }
    }
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One retrieved source, already normalized from its provider's native shape.
///
/// Adapters guarantee a non-empty title, at least one author, and an abstract
/// of at least [`crate::config::corpus::MIN_ABSTRACT_CHARS`] characters.
/// Records are immutable once produced; downstream stages only read them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Which provider produced this record.
    pub source: SourceId,

    /// Title as reported by the provider, whitespace-collapsed.
    pub title: String,

    /// Author display names in provider order, truncated to
    /// [`crate::config::corpus::MAX_AUTHORS`].
    pub authors: Vec<String>,

    /// Publication year as a string, or [`NO_DATE`] when unknown.
    pub year: String,

    /// Abstract text.
    #[serde(rename = "abstract")]
    pub abstract_text: String,

    /// Landing page or DOI URL; may be empty when the provider gave none.
    pub url: String,

    /// DOI, or the `arXiv:<id>` identifier for arXiv records.
    #[serde(default)]
    pub doi: Option<String>,

    /// Journal or venue name when the provider reports one.
    #[serde(default)]
    pub venue: Option<String>,

    /// Citation count when the provider reports one.
    #[serde(default)]
    pub cited_by: Option<u32>,
}

impl Record {
    /// Title lowercased and trimmed, the form used for duplicate detection.
    #[must_use]
    pub fn normalized_title(&self) -> String {
        self.title.trim().to_lowercase()
    }

    /// Identity used for dedup and citation assignment: the DOI when present,
    /// otherwise the normalized title.
    #[must_use]
    pub fn lookup_key(&self) -> String {
        match self.trimmed_doi() {
            Some(doi) => doi.to_string(),
            None => self.normalized_title(),
        }
    }

    /// DOI with surrounding whitespace removed, `None` when absent or blank.
    #[must_use]
    pub fn trimmed_doi(&self) -> Option<&str> {
        self.doi.as_deref().map(str::trim).filter(|d| !d.is_empty())
    }

    /// Publication year as an integer, `None` for [`NO_DATE`] or garbage.
    #[must_use]
    pub fn year_value(&self) -> Option<i32> {
        self.year.trim().parse().ok()
    }

    /// Whether this record may enter the ranked corpus: title and authors
    /// present, abstract within the configured length window.
    #[must_use]
    pub fn is_viable(&self) -> bool {
        let abstract_len = text::char_len(&self.abstract_text);
        !self.title.is_empty()
            && !self.authors.is_empty()
            && abstract_len >= crate::config::corpus::MIN_ABSTRACT_CHARS
            && abstract_len < crate::config::corpus::MAX_ABSTRACT_CHARS
    }
}

impl Default for Record {
    fn default() -> Self {
        Self {
            source: SourceId::default(),
            title: String::new(),
            authors: Vec::new(),
            year: NO_DATE.to_string(),
            abstract_text: String::new(),
            url: String::new(),
            doi: None,
            venue: None,
            cited_by: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, doi: Option<&str>) -> Record {
        Record {
            title: title.to_string(),
            doi: doi.map(String::from),
            ..Record::default()
        }
    }

    #[test]
    fn test_normalized_title() {
        let r = record("  Deepfake Detection WITH Transformers ", None);
        assert_eq!(r.normalized_title(), "deepfake detection with transformers");
    }

    #[test]
    fn test_lookup_key_prefers_doi() {
        let r = record("Some Title", Some("10.1234/xyz"));
        assert_eq!(r.lookup_key(), "10.1234/xyz");

        let r = record("Some Title", None);
        assert_eq!(r.lookup_key(), "some title");

        // A blank DOI counts as absent.
        let r = record("Some Title", Some("   "));
        assert_eq!(r.lookup_key(), "some title");
    }

    #[test]
    fn test_year_value() {
        let mut r = record("t", None);
        assert_eq!(r.year_value(), None); // defaults to "n.d."

        r.year = "2023".to_string();
        assert_eq!(r.year_value(), Some(2023));

        r.year = "unknown".to_string();
        assert_eq!(r.year_value(), None);
    }

    #[test]
    fn test_is_viable_bounds() {
        let mut r = Record {
            title: "t".to_string(),
            authors: vec!["A. Author".to_string()],
            abstract_text: "x".repeat(150),
            ..Record::default()
        };
        assert!(r.is_viable());

        r.abstract_text = "x".repeat(99);
        assert!(!r.is_viable());

        r.abstract_text = "x".repeat(2000);
        assert!(!r.is_viable());

        r.abstract_text = "x".repeat(150);
        r.authors.clear();
        assert!(!r.is_viable());
    }

    #[test]
    fn test_serde_renames_abstract() {
        let r = Record {
            title: "t".to_string(),
            abstract_text: "body".to_string(),
            ..Record::default()
        };
        let json = serde_json::to_value(&r).expect("serialize");
        assert_eq!(json["abstract"], "body");
        assert_eq!(json["source"], "arxiv");
    }
}
