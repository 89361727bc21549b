//! Structured claims extracted from a record's title and abstract.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Sentinel strings returned when a category matcher finds nothing.
///
/// Extraction never yields an empty string or a missing field; downstream
/// formatting branches on these exact values.
pub mod sentinel {
    /// No recognizable method keyword.
    pub const METHOD: &str = "computational methodology";
    /// No finding pattern matched.
    pub const FINDING: &str = "promising results on benchmark datasets";
    /// No quantitative result found.
    pub const RESULT: &str = "competitive performance on evaluation metrics";
    /// No challenge trigger found.
    pub const CHALLENGE: &str = "challenges in generalization and robustness across diverse conditions";
    /// No application keyword found.
    pub const APPLICATION: &str = "various application domains";
    /// No contribution pattern matched.
    pub const CONTRIBUTION: &str = "novel contributions advancing the state-of-the-art";
    /// No architecture detail found.
    pub const ARCHITECTURE: &str = "deep neural network architecture";
    /// No named dataset found.
    pub const DATASET: &str = "benchmark datasets";
    /// The word "dataset" appears but no known name does.
    pub const DATASET_CUSTOM: &str = "custom dataset";
    /// No training detail found.
    pub const TRAINING: &str = "standard training procedure";
    /// No named baseline found.
    pub const BASELINE: &str = "state-of-the-art approaches";
    /// Comparison language appears but no named baseline does.
    pub const BASELINE_UNNAMED: &str = "baseline methods";
    /// No specific contribution pattern matched.
    pub const SPECIFIC_CONTRIBUTIONS: &str = "methodological advances in the domain";
}

/// Rhetorical category a paraphrased sentence reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactCategory {
    /// What the paper found.
    Finding,
    /// How the paper did it.
    Method,
    /// What the numbers were.
    Result,
    /// What remains hard.
    Challenge,
}

impl FactCategory {
    /// All rhetorical categories.
    pub const ALL: [Self; 4] = [Self::Finding, Self::Method, Self::Result, Self::Challenge];
}

/// Claims mechanically extracted from one record.
///
/// Every text field is non-empty: a matcher that finds nothing returns its
/// [`sentinel`] instead. Only `metrics_detailed` may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactSet {
    /// Named methods or model families, most specific first.
    pub method: String,

    /// The paper's headline claim.
    pub finding: String,

    /// A quantitative outcome in "metric of value" form.
    pub result: String,

    /// The limitation or difficulty the abstract admits to.
    pub challenge: String,

    /// Application domains mentioned.
    pub application: String,

    /// The stated contribution, loosely captured.
    pub contribution: String,

    /// `architecture:`/`components:`/`loss:`/`optimizer:` segments joined
    /// with `; `.
    pub architecture_details: String,

    /// Named datasets, optionally with a parenthesized size.
    pub dataset_info: String,

    /// Epochs, batch size, learning rate, and similar, joined with `; `.
    pub training_details: String,

    /// Named baselines the paper compares against.
    pub baseline_comparison: String,

    /// Explicit "we propose ..." style contributions.
    pub specific_contributions: String,

    /// Metric name to formatted value (`accuracy`, `auc`, `f1_score`,
    /// `precision`, `recall`). Values for accuracy are percentages.
    pub metrics_detailed: BTreeMap<String, String>,
}

impl FactSet {
    /// The fact text backing a rhetorical category.
    #[must_use]
    pub fn rhetorical(&self, category: FactCategory) -> &str {
        match category {
            FactCategory::Finding => &self.finding,
            FactCategory::Method => &self.method,
            FactCategory::Result => &self.result,
            FactCategory::Challenge => &self.challenge,
        }
    }

    /// Whether a category holds anything beyond its sentinel.
    #[must_use]
    pub fn has_match(&self, category: FactCategory) -> bool {
        match category {
            FactCategory::Finding => self.finding != sentinel::FINDING,
            FactCategory::Method => self.method != sentinel::METHOD,
            FactCategory::Result => self.result != sentinel::RESULT,
            FactCategory::Challenge => self.challenge != sentinel::CHALLENGE,
        }
    }
}

impl Default for FactSet {
    fn default() -> Self {
        Self {
            method: sentinel::METHOD.to_string(),
            finding: sentinel::FINDING.to_string(),
            result: sentinel::RESULT.to_string(),
            challenge: sentinel::CHALLENGE.to_string(),
            application: sentinel::APPLICATION.to_string(),
            contribution: sentinel::CONTRIBUTION.to_string(),
            architecture_details: sentinel::ARCHITECTURE.to_string(),
            dataset_info: sentinel::DATASET.to_string(),
            training_details: sentinel::TRAINING.to_string(),
            baseline_comparison: sentinel::BASELINE.to_string(),
            specific_contributions: sentinel::SPECIFIC_CONTRIBUTIONS.to_string(),
            metrics_detailed: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_all_sentinels() {
        let facts = FactSet::default();
        assert_eq!(facts.method, sentinel::METHOD);
        assert_eq!(facts.challenge, sentinel::CHALLENGE);
        assert!(facts.metrics_detailed.is_empty());
        for category in FactCategory::ALL {
            assert!(!facts.has_match(category));
            assert!(!facts.rhetorical(category).is_empty());
        }
    }

    #[test]
    fn test_rhetorical_lookup() {
        let facts = FactSet { finding: "accuracy gains of 4%".to_string(), ..FactSet::default() };
        assert_eq!(facts.rhetorical(FactCategory::Finding), "accuracy gains of 4%");
        assert!(facts.has_match(FactCategory::Finding));
    }
}
