//! Citation numbering and bibliography rendering.
//!
//! The manager is the single source of truth for which sources a
//! generation session actually cited. Numbers are assigned in first-seen
//! order, are never reused or renumbered, and each session owns its own
//! manager instance.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{CorpusError, CorpusResult};
use crate::models::Record;
use crate::text;

/// Maximum rendered title length in a bibliography entry.
const TITLE_CLIP: usize = 80;

/// One cited source with its stable number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitationEntry {
    /// 1-based citation number, unique within the session.
    pub number: usize,

    /// The cited record.
    pub record: Record,
}

/// Session-scoped citation registry.
///
/// Requires `&mut` for every mutation, so the type system rules out
/// sharing one session's numbering across concurrent generators.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CitationManager {
    entries: Vec<CitationEntry>,
    numbers_by_key: HashMap<String, usize>,
}

impl CitationManager {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a citation and return its number.
    ///
    /// Idempotent per lookup key (DOI when present, else normalized
    /// title): the first call assigns the next number, every later call
    /// with the same key returns that same number.
    pub fn add_citation(&mut self, record: &Record) -> usize {
        let key = record.lookup_key();
        if let Some(&number) = self.numbers_by_key.get(&key) {
            return number;
        }

        let number = self.entries.len() + 1;
        self.entries.push(CitationEntry { number, record: record.clone() });
        self.numbers_by_key.insert(key, number);
        number
    }

    /// Render an in-text marker such as `[1, 4, 7]`.
    #[must_use]
    pub fn citation_marker(numbers: &[usize]) -> String {
        let joined: Vec<String> = numbers.iter().map(ToString::to_string).collect();
        format!("[{}]", joined.join(", "))
    }

    /// Whether a number has been issued by this registry.
    #[must_use]
    pub fn is_issued(&self, number: usize) -> bool {
        number >= 1 && number <= self.entries.len()
    }

    /// Check a marker number against the issued range.
    ///
    /// A failure here means a downstream consumer fabricated a citation
    /// number; it is a programming-contract violation, not a data problem.
    pub fn verify_marker(&self, number: usize) -> CorpusResult<()> {
        if self.is_issued(number) {
            Ok(())
        } else {
            Err(CorpusError::CitationIntegrity { number, issued: self.entries.len() })
        }
    }

    /// Formatted reference list in ascending number order, one string per
    /// distinct citation.
    #[must_use]
    pub fn bibliography(&self) -> Vec<String> {
        self.entries.iter().map(format_entry).collect()
    }

    /// All issued citations in number order.
    #[must_use]
    pub fn entries(&self) -> &[CitationEntry] {
        &self.entries
    }

    /// Number of distinct citations issued.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no citation has been issued yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collapse an author list per standard truncation rules:
/// one verbatim, two joined with `&`, up to seven as a comma list with
/// `, & last`, beyond that the first six then `, ... last`.
fn collapse_authors(authors: &[String]) -> String {
    match authors {
        [] => "Unknown Author".to_string(),
        [only] => only.clone(),
        [first, second] => format!("{first} & {second}"),
        _ if authors.len() <= 7 => {
            let (last, rest) = authors.split_last().expect("non-empty list");
            format!("{}, & {last}", rest.join(", "))
        }
        _ => {
            let last = authors.last().expect("non-empty list");
            format!("{}, ... {last}", authors[..6].join(", "))
        }
    }
}

fn format_entry(entry: &CitationEntry) -> String {
    let record = &entry.record;

    let title = if text::char_len(&record.title) > TITLE_CLIP {
        format!("{}...", text::truncate_chars(&record.title, TITLE_CLIP))
    } else {
        record.title.clone()
    };

    let venue = record.venue.as_deref().filter(|v| !v.is_empty()).unwrap_or("arXiv");

    let mut citation = format!(
        "[{}] {} ({}). {title}. {venue}.",
        entry.number,
        collapse_authors(&record.authors),
        record.year,
    );

    if let Some(doi) = record.trimmed_doi() {
        citation.push_str(&format!(" DOI:{doi}"));
    } else if record.url.to_lowercase().contains("arxiv") {
        citation.push_str(&format!(" {}", record.url));
    }

    citation
}
