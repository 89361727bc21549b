//! Paraphrase engine: one fluent, citation-bound sentence per claim.
//!
//! Determinism is intentionally relaxed (template and verb choice are
//! randomized through a [`VariationPolicy`]); the hard invariants are that
//! every citation number in a sentence came from the session's
//! [`CitationManager`] and that verb/style repetition stays bounded.

mod policy;
mod vocabulary;

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

pub use policy::{SeededPolicy, ThreadRngPolicy, VariationPolicy};
pub use vocabulary::{CitationStyle, Strength};

use crate::citations::CitationManager;
use crate::models::{FactCategory, FactSet, Record, sentinel};
use crate::text;

/// Verb-history eviction: past this many remembered verbs per category,
/// the oldest three are forgotten.
const VERB_HISTORY_CAP: usize = 10;

/// Style-history length; the previous two styles are avoided.
const STYLE_HISTORY_CAP: usize = 5;

/// At most this many citations per synthesis marker.
const SYNTHESIS_CAP: usize = 5;

static HEDGE_TARGET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(demonstrates?|shows?|indicates?)\b").expect("valid regex"));

static INTENSIFIER_TARGETS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r"\bimprove[sd]?\b", r"\boutperform[s]?\b", r"\benhance[sd]?\b", r"\bsuperior\b"]
        .iter()
        .map(|p| Regex::new(p).expect("valid regex"))
        .collect()
});

static SPACE_BEFORE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([.,;:])").expect("valid regex"));

static HAS_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.?\d*%?").expect("valid regex"));

static STRONG_RESULT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"9\d%").expect("valid regex"));

/// Turns (record, facts) pairs into reporting sentences bound to citation
/// numbers.
///
/// Borrows the session's citation manager mutably, so one engine belongs
/// to exactly one generation session.
pub struct ParaphraseEngine<'a> {
    citations: &'a mut CitationManager,
    policy: Box<dyn VariationPolicy>,
    used_verbs: HashMap<FactCategory, Vec<&'static str>>,
    recent_styles: Vec<CitationStyle>,
    sentence_count: usize,
}

impl<'a> ParaphraseEngine<'a> {
    /// Engine with the default thread-RNG policy.
    #[must_use]
    pub fn new(citations: &'a mut CitationManager) -> Self {
        Self::with_policy(citations, Box::new(ThreadRngPolicy))
    }

    /// Engine with an explicit variation policy (seeded in tests).
    #[must_use]
    pub fn with_policy(citations: &'a mut CitationManager, policy: Box<dyn VariationPolicy>) -> Self {
        Self {
            citations,
            policy,
            used_verbs: HashMap::new(),
            recent_styles: Vec::new(),
            sentence_count: 0,
        }
    }

    /// Sentences produced so far.
    #[must_use]
    pub fn sentence_count(&self) -> usize {
        self.sentence_count
    }

    /// Shared citation registry.
    #[must_use]
    pub fn citations(&self) -> &CitationManager {
        self.citations
    }

    /// One sentence for the requested rhetorical category.
    pub fn sentence(&mut self, record: &Record, facts: &FactSet, category: FactCategory) -> String {
        match category {
            FactCategory::Finding => self.paraphrase_finding(record, facts),
            FactCategory::Method => self.paraphrase_method(record, facts),
            FactCategory::Result => self.paraphrase_result(record, facts),
            FactCategory::Challenge => self.paraphrase_challenge(record, facts),
        }
    }

    /// Report the record's headline finding.
    pub fn paraphrase_finding(&mut self, record: &Record, facts: &FactSet) -> String {
        let strength = assess_claim_strength(&facts.finding);
        let verb = self.varied_verb(FactCategory::Finding, strength);

        let style = self.select_style();
        let (author_text, marker) = self.cite(record, style);

        let finding = &facts.finding;
        let structures: Vec<String> = match style {
            CitationStyle::Integral => vec![
                format!("{author_text} {verb} that {finding} {marker}"),
                format!("The work of {author_text} {verb} {finding} {marker}"),
                format!("{author_text} {verb} evidence of {finding} {marker}"),
            ],
            CitationStyle::Narrative => vec![
                format!("In {author_text} analysis, {finding} {marker}"),
                format!("{author_text} research {verb} {finding} {marker}"),
                format!("Through {author_text} investigation, {finding} was documented {marker}"),
            ],
            CitationStyle::NonIntegral => vec![
                format!("{} {marker}", capitalize(finding)),
                format!("Evidence {verb} {finding} {marker}"),
                format!("{} represents a key advance {marker}", capitalize(finding)),
            ],
            CitationStyle::Parenthetical => vec![
                format!("Recent work {author_text} {verb} {finding} {marker}"),
                format!("Investigations {author_text} revealed {finding} {marker}"),
            ],
        };

        let mut sentence = self.pick(&structures);
        sentence = self.add_hedging(sentence, strength);
        sentence = self.add_intensifier(sentence, strength);

        self.sentence_count += 1;
        clean_sentence(&sentence)
    }

    /// Report the record's method in its application context.
    pub fn paraphrase_method(&mut self, record: &Record, facts: &FactSet) -> String {
        let verb = self.varied_verb(FactCategory::Method, Strength::Strong);

        let style = self.select_style();
        let (author_text, marker) = self.cite(record, style);

        let method = &facts.method;
        let application = &facts.application;
        let structures = vec![
            format!("{author_text} {verb} {method} to address {application} {marker}"),
            format!("The application of {method} to {application} was developed by {author_text} {marker}"),
            format!("By leveraging {method}, {author_text} tackled {application} challenges {marker}"),
            format!("{}-based methodologies for {application} were introduced {marker}", capitalize(method)),
            format!("In addressing {application}, {author_text} {verb} {method} {marker}"),
            format!("{author_text} advanced {application} through {method} {marker}"),
        ];

        let sentence = self.pick(&structures);
        self.sentence_count += 1;
        clean_sentence(&sentence)
    }

    /// Report a quantitative or qualitative result.
    pub fn paraphrase_result(&mut self, record: &Record, facts: &FactSet) -> String {
        let strength = assess_result_strength(&facts.result);
        let verb = self.varied_verb(FactCategory::Result, strength);

        let style = self.select_style();
        let (author_text, marker) = self.cite(record, style);

        let result = &facts.result;
        let has_numbers = HAS_NUMBER.is_match(result);

        let structures: Vec<String> = if has_numbers && style == CitationStyle::NonIntegral {
            let intensifier = vocabulary::INTENSIFIERS[self.policy.choose(vocabulary::INTENSIFIERS.len())];
            vec![
                format!("{}, representing {intensifier} improved performance {marker}", capitalize(result)),
                format!("Performance metrics of {result} were documented {marker}"),
                format!("{} across evaluation scenarios {marker}", capitalize(result)),
            ]
        } else {
            vec![
                format!("{author_text} {verb} {result} {marker}"),
                format!("Experimental evaluation by {author_text} yielded {result} {marker}"),
                format!("The system developed by {author_text} attained {result} {marker}"),
                format!("{} emerged from {author_text}'s analysis {marker}", capitalize(result)),
            ]
        };

        let mut sentence = self.pick(&structures);
        sentence = self.add_intensifier(sentence, strength);

        self.sentence_count += 1;
        clean_sentence(&sentence)
    }

    /// Report a limitation with a contrast opener.
    pub fn paraphrase_challenge(&mut self, record: &Record, facts: &FactSet) -> String {
        let verb = self.varied_verb(FactCategory::Challenge, Strength::Moderate);

        let style = self.select_style();
        let (author_text, marker) = self.cite(record, style);

        let marker_word =
            vocabulary::CONTRAST_MARKERS[self.policy.choose(vocabulary::CONTRAST_MARKERS.len())];
        let challenge = &facts.challenge;

        let structures = vec![
            format!("{marker_word}, {author_text} {verb} {challenge} as a persistent concern {marker}"),
            format!("{marker_word}, {challenge} remain problematic {marker}"),
            format!("{marker_word}, the analysis by {author_text} {verb} critical limitations in {challenge} {marker}"),
            format!("{marker_word}, {challenge} continue to pose challenges {marker}"),
            format!("{marker_word}, {author_text} acknowledged that {challenge} require further investigation {marker}"),
        ];

        let sentence = self.pick(&structures);
        self.sentence_count += 1;
        clean_sentence(&sentence)
    }

    /// Describe the model architecture from extracted detail segments.
    pub fn paraphrase_architecture(&mut self, record: &Record, facts: &FactSet) -> String {
        let authors = format_authors(&record.authors);
        let year = &record.year;
        let number = self.citations.add_citation(record);

        let arch = &facts.architecture_details;
        if arch == sentinel::ARCHITECTURE {
            self.sentence_count += 1;
            return clean_sentence(&format!(
                "{authors} ({year}) developed a neural network-based detection system [{number}]"
            ));
        }

        let mut components = Vec::new();
        if let Some(part) = segment(arch, "architecture:") {
            components.push(format!("utilizing {part}"));
        }
        if let Some(part) = segment(arch, "components:") {
            components.push(format!("incorporating {part}"));
        }
        if let Some(part) = segment(arch, "loss:") {
            components.push(format!("optimized with {part}"));
        }
        if let Some(part) = segment(arch, "optimizer:") {
            components.push(format!("using {part} optimizer"));
        }

        self.sentence_count += 1;
        if components.is_empty() {
            let head = arch.split(':').next().unwrap_or(arch);
            return clean_sentence(&format!(
                "{authors} ({year}) proposed an approach based on {head} [{number}]"
            ));
        }

        components.truncate(3);
        clean_sentence(&format!(
            "{authors} ({year}) developed a detection architecture {} [{number}]",
            components.join(", ")
        ))
    }

    /// Describe training setup and data.
    pub fn paraphrase_training(&mut self, record: &Record, facts: &FactSet) -> String {
        let authors = format_authors(&record.authors);
        let year = &record.year;
        let number = self.citations.add_citation(record);

        let training = &facts.training_details;
        let dataset = &facts.dataset_info;
        self.sentence_count += 1;

        if training == sentinel::TRAINING {
            if dataset != sentinel::DATASET {
                return clean_sentence(&format!("The model was trained on {dataset} [{number}]"));
            }
            return clean_sentence(&format!(
                "{authors} ({year}) employed standard training protocols [{number}]"
            ));
        }

        let mut parts = Vec::new();
        if dataset != sentinel::DATASET {
            parts.push(format!("trained on {dataset}"));
        }
        parts.push(format!("with {}", training.replace(';', ",")));

        clean_sentence(&format!("{authors} ({year}) {} [{number}]", parts.join(", ")))
    }

    /// Report the extracted metric values, with baselines when named.
    pub fn paraphrase_quantitative(&mut self, record: &Record, facts: &FactSet) -> String {
        let authors = format_authors(&record.authors);
        let year = &record.year;
        let number = self.citations.add_citation(record);
        self.sentence_count += 1;

        let metrics = &facts.metrics_detailed;
        if metrics.is_empty() {
            return clean_sentence(&format!(
                "{authors} ({year}) reported {} [{number}]",
                facts.result
            ));
        }

        let mut metric_parts = Vec::new();
        if let Some(v) = metrics.get("accuracy") {
            metric_parts.push(format!("{v} accuracy"));
        }
        if let Some(v) = metrics.get("auc") {
            metric_parts.push(format!("AUC of {v}"));
        }
        if let Some(v) = metrics.get("f1_score") {
            metric_parts.push(format!("F1-score of {v}"));
        }
        if let Some(v) = metrics.get("precision") {
            metric_parts.push(format!("{v} precision"));
        }
        if let Some(v) = metrics.get("recall") {
            metric_parts.push(format!("{v} recall"));
        }
        metric_parts.truncate(3);

        let mut sentence = format!("The approach achieved {}", metric_parts.join(", "));
        if facts.baseline_comparison != sentinel::BASELINE {
            sentence.push_str(&format!(", outperforming {}", facts.baseline_comparison));
        }

        clean_sentence(&format!("{sentence} [{number}]"))
    }

    /// Describe the evaluation datasets.
    pub fn paraphrase_dataset_evaluation(&mut self, record: &Record, facts: &FactSet) -> String {
        let authors = format_authors(&record.authors);
        let year = &record.year;
        let number = self.citations.add_citation(record);
        self.sentence_count += 1;

        let dataset = &facts.dataset_info;
        if dataset == sentinel::DATASET {
            return clean_sentence(&format!(
                "{authors} ({year}) evaluated their approach on standard benchmark datasets [{number}]"
            ));
        }

        let structures = vec![
            format!("{authors} ({year}) conducted comprehensive evaluation on {dataset} [{number}]"),
            format!("Experimental validation on {dataset} was performed by {authors} ({year}) [{number}]"),
            format!("{authors} ({year}) assessed performance using {dataset} [{number}]"),
        ];
        let sentence = self.pick(&structures);
        clean_sentence(&sentence)
    }

    /// Report the comparison against named baselines.
    pub fn paraphrase_comparative(&mut self, record: &Record, facts: &FactSet) -> String {
        let authors = format_authors(&record.authors);
        let year = &record.year;
        let number = self.citations.add_citation(record);
        self.sentence_count += 1;

        let baselines = &facts.baseline_comparison;
        if baselines == sentinel::BASELINE {
            return clean_sentence(&format!(
                "{authors} ({year}) compared their method against existing state-of-the-art approaches [{number}]"
            ));
        }

        if let Some(accuracy) = facts.metrics_detailed.get("accuracy") {
            return clean_sentence(&format!(
                "Comparative analysis by {authors} ({year}) demonstrated superiority over {baselines}, achieving {accuracy} accuracy [{number}]"
            ));
        }

        let structures = vec![
            format!("{authors} ({year}) benchmarked against {baselines}, demonstrating competitive performance [{number}]"),
            format!("In comparison with {baselines}, {authors} ({year}) showed improved detection capabilities [{number}]"),
            format!("{authors} ({year}) outperformed {baselines} across multiple evaluation metrics [{number}]"),
        ];
        let sentence = self.pick(&structures);
        clean_sentence(&sentence)
    }

    /// Report the paper's stated contribution.
    pub fn paraphrase_contribution(&mut self, record: &Record, facts: &FactSet) -> String {
        let authors = format_authors(&record.authors);
        let year = &record.year;
        let number = self.citations.add_citation(record);
        self.sentence_count += 1;

        let contribution = &facts.specific_contributions;
        if contribution == sentinel::SPECIFIC_CONTRIBUTIONS {
            let arch = &facts.architecture_details;
            if arch != sentinel::ARCHITECTURE {
                let head = arch.split(':').next().unwrap_or(arch);
                return clean_sentence(&format!(
                    "The key contribution of {authors} ({year}) lies in their novel architectural design incorporating {head} [{number}]"
                ));
            }
            return clean_sentence(&format!(
                "{authors} ({year}) contributed methodological innovations to the field [{number}]"
            ));
        }

        let contribution = clip_with_ellipsis(contribution, 100);
        let structures = vec![
            format!("{authors} ({year}) introduced {contribution} [{number}]"),
            format!("The primary contribution of {authors} ({year}) encompasses {contribution} [{number}]"),
            format!("{authors} ({year}) advanced the field through {contribution} [{number}]"),
        ];
        let sentence = self.pick(&structures);
        clean_sentence(&sentence)
    }

    /// Report the paper's admitted limitation.
    pub fn paraphrase_limitation(&mut self, record: &Record, facts: &FactSet) -> String {
        let authors = format_authors(&record.authors);
        let year = &record.year;
        let number = self.citations.add_citation(record);
        self.sentence_count += 1;

        let challenge = &facts.challenge;
        if challenge == sentinel::CHALLENGE {
            return clean_sentence(&format!(
                "However, {authors} ({year}) acknowledged limitations in generalization and robustness [{number}]"
            ));
        }

        let challenge = decapitalize(&clip_with_ellipsis(challenge, 120));
        let structures = vec![
            format!("However, {authors} ({year}) identified that {challenge} [{number}]"),
            format!("Nevertheless, {authors} ({year}) noted {challenge} [{number}]"),
            format!("Despite these advances, {authors} ({year}) recognized that {challenge} [{number}]"),
        ];
        let sentence = self.pick(&structures);
        clean_sentence(&sentence)
    }

    /// One sentence synthesizing up to five records on a shared aspect.
    pub fn synthesize_multiple(&mut self, records: &[Record], topic: &str, aspect: &str) -> String {
        if records.is_empty() {
            return String::new();
        }

        let numbers: Vec<usize> =
            records.iter().take(SYNTHESIS_CAP).map(|r| self.citations.add_citation(r)).collect();
        let marker = CitationManager::citation_marker(&numbers);

        // Three synthesis patterns: convergent, progressive, thematic.
        let structures: Vec<String> = match self.policy.choose(3) {
            0 => vec![
                format!("Converging evidence across multiple investigations {marker} demonstrates advances in {aspect} for {topic}"),
                format!("A consistent pattern emerges from recent studies {marker}, indicating progress in {aspect} within {topic}"),
                format!("Multiple lines of inquiry {marker} collectively point toward the importance of {aspect} in {topic}"),
                format!("Substantial consensus exists in the literature {marker} regarding the role of {aspect} in {topic}"),
            ],
            1 => vec![
                format!("Progressive refinement across studies {marker} has enhanced understanding of {aspect} in {topic}"),
                format!("Building on foundational work, subsequent investigations {marker} have extended research on {aspect} for {topic}"),
                format!("The evolution of research {marker} demonstrates advancing sophistication in {aspect} within {topic} domains"),
            ],
            _ => vec![
                format!("Thematic analysis of recent literature {marker} reveals {aspect} as central to {topic}"),
                format!("Research consistently emphasizes {aspect} in {topic} applications {marker}"),
                format!("Multiple investigations {marker} have explored {aspect} within {topic} contexts"),
            ],
        };

        let sentence = self.pick(&structures);
        self.sentence_count += 1;
        clean_sentence(&sentence)
    }

    fn pick(&mut self, options: &[String]) -> String {
        options[self.policy.choose(options.len())].clone()
    }

    /// A verb from the tier, avoiding this category's recent history.
    fn varied_verb(&mut self, category: FactCategory, strength: Strength) -> &'static str {
        let tier = vocabulary::reporting_verbs(category, strength);
        let used = self.used_verbs.get(&category).cloned().unwrap_or_default();

        let available: Vec<&'static str> =
            tier.iter().copied().filter(|v| !used.contains(v)).collect();
        let exhausted = available.is_empty();
        let pool = if exhausted { tier.to_vec() } else { available };

        let verb = pool[self.policy.choose(pool.len())];

        let history = self.used_verbs.entry(category).or_default();
        if exhausted {
            history.clear();
        }
        history.push(verb);
        if history.len() > VERB_HISTORY_CAP {
            history.drain(..3);
        }

        verb
    }

    /// A placement style, avoiding the previous two.
    fn select_style(&mut self) -> CitationStyle {
        let recent: &[CitationStyle] =
            &self.recent_styles[self.recent_styles.len().saturating_sub(2)..];
        let available: Vec<CitationStyle> =
            CitationStyle::ALL.iter().copied().filter(|s| !recent.contains(s)).collect();
        let pool = if available.is_empty() { CitationStyle::ALL.to_vec() } else { available };

        let style = pool[self.policy.choose(pool.len())];
        self.recent_styles.push(style);
        if self.recent_styles.len() > STYLE_HISTORY_CAP {
            self.recent_styles.remove(0);
        }
        style
    }

    /// Author text for the style plus the `[n]` marker.
    fn cite(&mut self, record: &Record, style: CitationStyle) -> (String, String) {
        let number = self.citations.add_citation(record);
        let authors = format_authors(&record.authors);
        let year = &record.year;

        let author_text = match style {
            CitationStyle::Integral => format!("{authors} ({year})"),
            CitationStyle::Narrative => {
                if authors.ends_with("al.") {
                    format!("{authors}'")
                } else {
                    format!("{authors}'s")
                }
            }
            CitationStyle::Parenthetical => format!("({authors}, {year})"),
            CitationStyle::NonIntegral => String::new(),
        };

        (author_text, format!("[{number}]"))
    }

    fn add_hedging(&mut self, sentence: String, strength: Strength) -> String {
        if strength != Strength::Tentative || !self.policy.coin(0.5) {
            return sentence;
        }
        let hedge = vocabulary::HEDGES[self.policy.choose(vocabulary::HEDGES.len())];
        HEDGE_TARGET.replace(&sentence, format!("{hedge} $1").as_str()).into_owned()
    }

    fn add_intensifier(&mut self, sentence: String, strength: Strength) -> String {
        if strength != Strength::Strong || !self.policy.coin(0.4) {
            return sentence;
        }
        let intensifier = vocabulary::INTENSIFIERS[self.policy.choose(vocabulary::INTENSIFIERS.len())];
        for pattern in INTENSIFIER_TARGETS.iter() {
            if pattern.is_match(&sentence) {
                return pattern.replace(&sentence, format!("{intensifier} $0").as_str()).into_owned();
            }
        }
        sentence
    }
}

impl std::fmt::Debug for ParaphraseEngine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParaphraseEngine")
            .field("sentence_count", &self.sentence_count)
            .field("citations", &self.citations.len())
            .finish()
    }
}

/// Surname-based author mention: one surname, "X and Y", or "X et al.".
fn format_authors(authors: &[String]) -> String {
    if authors.is_empty() {
        return "Researchers".to_string();
    }

    let surname = |full: &String| -> String {
        full.split_whitespace().next_back().unwrap_or(full).to_string()
    };

    match authors.len() {
        1 => surname(&authors[0]),
        2 => format!("{} and {}", surname(&authors[0]), surname(&authors[1])),
        _ => format!("{} et al.", surname(&authors[0])),
    }
}

fn assess_claim_strength(finding: &str) -> Strength {
    let lower = finding.to_lowercase();

    const STRONG: &[&str] = &["demonstrate", "prove", "confirm", "establish", "validate", "significant"];
    const TENTATIVE: &[&str] = &["suggest", "indicate", "imply", "may", "might", "could", "possible"];

    if STRONG.iter().any(|ind| lower.contains(ind)) {
        Strength::Strong
    } else if TENTATIVE.iter().any(|ind| lower.contains(ind)) {
        Strength::Tentative
    } else {
        Strength::Moderate
    }
}

fn assess_result_strength(result: &str) -> Strength {
    let lower = result.to_lowercase();
    if lower.contains("significant") || STRONG_RESULT.is_match(result) {
        Strength::Strong
    } else if lower.contains("modest") || lower.contains("limited") {
        Strength::Tentative
    } else {
        Strength::Moderate
    }
}

/// Collapse whitespace, fix space-before-punctuation, guarantee a period.
fn clean_sentence(sentence: &str) -> String {
    let collapsed = text::collapse_whitespace(sentence);
    let mut cleaned = SPACE_BEFORE_PUNCT.replace_all(&collapsed, "$1").trim().to_string();
    if !cleaned.ends_with('.') {
        cleaned.push('.');
    }
    cleaned
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| first.to_uppercase().collect::<String>() + chars.as_str())
}

fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| first.to_lowercase().collect::<String>() + chars.as_str())
}

fn clip_with_ellipsis(s: &str, max: usize) -> String {
    if text::char_len(s) > max {
        format!("{}...", text::truncate_chars(s, max.saturating_sub(3)))
    } else {
        s.to_string()
    }
}

/// The value after `label` in a `; `-joined detail string.
fn segment<'s>(details: &'s str, label: &str) -> Option<&'s str> {
    details.split_once(label).map(|(_, rest)| rest.split(';').next().unwrap_or(rest).trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Record {
        Record {
            title: "Transformer Forensics".to_string(),
            authors: vec!["Jane Doe".to_string(), "Wei Zhang".to_string(), "Ana Gomez".to_string()],
            year: "2023".to_string(),
            abstract_text: "x".repeat(120),
            doi: Some("10.1/tf".to_string()),
            ..Record::default()
        }
    }

    #[test]
    fn test_format_authors_variants() {
        assert_eq!(format_authors(&[]), "Researchers");
        assert_eq!(format_authors(&["Jane Doe".to_string()]), "Doe");
        assert_eq!(
            format_authors(&["Jane Doe".to_string(), "Wei Zhang".to_string()]),
            "Doe and Zhang"
        );
        assert_eq!(format_authors(&record().authors), "Doe et al.");
    }

    #[test]
    fn test_clean_sentence() {
        assert_eq!(clean_sentence("a  b , c"), "a b, c.");
        assert_eq!(clean_sentence("done."), "done.");
    }

    #[test]
    fn test_strength_assessment() {
        assert_eq!(assess_claim_strength("demonstrates clear gains"), Strength::Strong);
        assert_eq!(assess_claim_strength("may suggest an effect"), Strength::Tentative);
        assert_eq!(assess_claim_strength("reports numbers"), Strength::Moderate);

        assert_eq!(assess_result_strength("accuracy of 97%"), Strength::Strong);
        assert_eq!(assess_result_strength("modest gains"), Strength::Tentative);
    }

    #[test]
    fn test_segment_extraction() {
        let details = "architecture: ResNet50, ViT; loss: focal loss; optimizer: ADAM";
        assert_eq!(segment(details, "architecture:"), Some("ResNet50, ViT"));
        assert_eq!(segment(details, "loss:"), Some("focal loss"));
        assert_eq!(segment(details, "components:"), None);
    }

    #[test]
    fn test_sentence_ends_with_marker_and_period() {
        let mut citations = CitationManager::new();
        let mut engine = ParaphraseEngine::with_policy(&mut citations, Box::new(SeededPolicy::new(3)));

        let sentence = engine.paraphrase_finding(&record(), &FactSet::default());
        assert!(sentence.ends_with("[1]."), "got: {sentence}");
        assert_eq!(engine.sentence_count(), 1);
    }
}
