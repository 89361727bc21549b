//! Reporting-verb tiers, hedges, intensifiers, and citation styles.

use crate::models::FactCategory;

/// How assertively a claim is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strength {
    /// Definitive claims: "demonstrates", "achieves".
    Strong,
    /// Neutral reporting: "shows", "notes".
    Moderate,
    /// Hedged claims: "suggests", "explores".
    Tentative,
}

/// Where the citation sits relative to the sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CitationStyle {
    /// Author-led: "Smith et al. (2023) showed ...".
    Integral,
    /// No author mention, marker only.
    NonIntegral,
    /// Possessive: "Smith et al.'s analysis ...".
    Narrative,
    /// Parenthesized author-year: "(Smith et al., 2023)".
    Parenthetical,
}

impl CitationStyle {
    /// All placement styles, in rotation order.
    pub const ALL: [Self; 4] = [Self::Integral, Self::NonIntegral, Self::Narrative, Self::Parenthetical];
}

/// The verb tier for a rhetorical category at a given strength.
#[must_use]
pub const fn reporting_verbs(category: FactCategory, strength: Strength) -> &'static [&'static str] {
    match (category, strength) {
        (FactCategory::Finding, Strength::Strong) => {
            &["demonstrates", "establishes", "reveals", "confirms", "validates", "documents"]
        }
        (FactCategory::Finding, Strength::Moderate) => {
            &["suggests", "indicates", "shows", "implies", "reports", "observes"]
        }
        (FactCategory::Finding, Strength::Tentative) => {
            &["proposes", "hypothesizes", "posits", "explores", "examines"]
        }
        (FactCategory::Method, Strength::Strong) => {
            &["employs", "implements", "utilizes", "leverages", "integrates", "deploys"]
        }
        (FactCategory::Method, Strength::Moderate) => {
            &["applies", "adopts", "incorporates", "uses", "introduces"]
        }
        (FactCategory::Method, Strength::Tentative) => {
            &["explores", "investigates", "examines", "tests", "evaluates"]
        }
        (FactCategory::Result, Strength::Strong) => {
            &["achieves", "attains", "demonstrates", "yields", "produces", "obtains"]
        }
        (FactCategory::Result, Strength::Moderate) => {
            &["reports", "observes", "documents", "records", "notes", "finds"]
        }
        (FactCategory::Result, Strength::Tentative) => {
            &["suggests", "indicates", "implies", "hints at", "points toward"]
        }
        (FactCategory::Challenge, Strength::Strong) => {
            &["highlights", "identifies", "exposes", "reveals", "uncovers"]
        }
        (FactCategory::Challenge, Strength::Moderate) => {
            &["notes", "observes", "recognizes", "acknowledges", "addresses"]
        }
        (FactCategory::Challenge, Strength::Tentative) => {
            &["suggests", "hints at", "implies", "raises questions about"]
        }
    }
}

/// Hedge phrases inserted before a verb in tentative claims.
pub const HEDGES: &[&str] = &["appears to", "seems to", "tends to", "may", "might", "could"];

/// Intensifiers inserted before an improvement verb in strong claims.
pub const INTENSIFIERS: &[&str] =
    &["substantially", "significantly", "considerably", "markedly", "notably", "particularly"];

/// Sentence openers for limitation/challenge sentences.
pub const CONTRAST_MARKERS: &[&str] =
    &["However", "Nevertheless", "Despite these advances", "Yet", "Nonetheless", "Conversely"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tier_is_non_empty() {
        for category in FactCategory::ALL {
            for strength in [Strength::Strong, Strength::Moderate, Strength::Tentative] {
                assert!(!reporting_verbs(category, strength).is_empty());
            }
        }
    }
}
