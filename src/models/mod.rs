/// Domain types for the prediction-reconciliation engine
///
/// A single inference request flows through these types: the classifier's
/// raw output becomes a [`ClassDistribution`], the distribution plus the
/// decoded label becomes a [`ResolvedPrediction`], and each reconciler
/// turns a resolved prediction into an [`OverrideDecision`].
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-class probability-like distribution for one inference call.
///
/// Keys are exactly the label set of the source classifier's encoder;
/// values sum to 1.0 within floating tolerance. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDistribution(HashMap<String, f64>);

impl ClassDistribution {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, f64)>) -> Self {
        Self(pairs.into_iter().collect())
    }

    /// Score for a label, 0.0 when the label is not present
    pub fn score(&self, label: &str) -> f64 {
        self.0.get(label).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.contains_key(label)
    }

    /// Highest-scoring entry, if any
    pub fn max_entry(&self) -> Option<(&str, f64)> {
        self.0
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(label, score)| (label.as_str(), *score))
    }

    pub fn sum(&self) -> f64 {
        self.0.values().sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(label, score)| (label.as_str(), *score))
    }
}

/// A classifier's resolved output for one task: the decoded label, a scalar
/// confidence, and the full per-class distribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedPrediction {
    /// Decoded label
    pub label: String,

    /// Confidence score (0.0 - 1.0); equals `distribution[label]` unless
    /// replaced by calibration
    pub confidence: f64,

    /// All class scores
    pub distribution: ClassDistribution,
}

impl ResolvedPrediction {
    pub fn new(label: String, confidence: f64, distribution: ClassDistribution) -> Self {
        Self {
            label,
            confidence,
            distribution,
        }
    }

    /// Replace the display confidence, keeping label and distribution intact
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }
}

/// Why a final label differs from (or agrees with) the raw model label.
///
/// Ordered by precedence: a keyword rule beats the borderline nudge, which
/// beats the raw model prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    /// The raw model label stood
    ModelPrediction,

    /// A keyword rule replaced the label
    KeywordEscalation,

    /// Near-tied Low/Medium scores nudged the label up
    BorderlineAdjustment,
}

impl ReasonCode {
    /// Short human-readable sentence for API responses
    pub fn as_sentence(&self) -> &'static str {
        match self {
            ReasonCode::ModelPrediction => "Model prediction",
            ReasonCode::KeywordEscalation => "Rule-based escalation from issue keywords",
            ReasonCode::BorderlineAdjustment => "Model borderline adjusted to reduce false-low",
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_sentence())
    }
}

/// Outcome of reconciling one task's resolved prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverrideDecision {
    /// Final label after reconciliation
    pub final_label: String,

    /// True when the final label differs from the input label
    pub was_overridden: bool,

    /// Which path produced the final label
    pub reason: ReasonCode,
}

impl OverrideDecision {
    /// Decision that keeps the model's label untouched
    pub fn model(label: impl Into<String>) -> Self {
        Self {
            final_label: label.into(),
            was_overridden: false,
            reason: ReasonCode::ModelPrediction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribution_score_and_max() {
        let dist = ClassDistribution::from_pairs([
            ("Low".to_string(), 0.2),
            ("Medium".to_string(), 0.3),
            ("High".to_string(), 0.5),
        ]);

        assert_eq!(dist.score("High"), 0.5);
        assert_eq!(dist.score("Unknown"), 0.0);
        assert_eq!(dist.max_entry(), Some(("High", 0.5)));
        assert!((dist.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_resolved_prediction_with_confidence() {
        let dist = ClassDistribution::from_pairs([("billing".to_string(), 1.0)]);
        let resolved = ResolvedPrediction::new("billing".to_string(), 1.0, dist);

        let calibrated = resolved.with_confidence(0.87);
        assert_eq!(calibrated.label, "billing");
        assert_eq!(calibrated.confidence, 0.87);
    }

    #[test]
    fn test_reason_code_sentences() {
        assert_eq!(
            ReasonCode::KeywordEscalation.to_string(),
            "Rule-based escalation from issue keywords"
        );
        assert_eq!(
            ReasonCode::BorderlineAdjustment.to_string(),
            "Model borderline adjusted to reduce false-low"
        );
        assert_eq!(ReasonCode::ModelPrediction.to_string(), "Model prediction");
    }

    #[test]
    fn test_override_decision_model() {
        let decision = OverrideDecision::model("Low");
        assert_eq!(decision.final_label, "Low");
        assert!(!decision.was_overridden);
        assert_eq!(decision.reason, ReasonCode::ModelPrediction);
    }
}
