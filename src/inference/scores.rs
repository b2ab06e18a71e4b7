use crate::error::{AppError, Result};
use crate::inference::encoder::LabelEncoder;
use crate::models::ClassDistribution;
use serde::{Deserialize, Serialize};

/// Raw per-input output of a classifier, before normalization.
///
/// Probabilistic models emit one probability per class; margin-based linear
/// models emit unnormalized decision-function scores (a single scalar in
/// the binary case).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawScores {
    /// Probability vector already summing to 1, one entry per class
    Probabilities(Vec<f64>),

    /// Decision-function scores: one per class, or a single binary scalar
    Margins(Vec<f64>),
}

impl RawScores {
    pub fn len(&self) -> usize {
        match self {
            RawScores::Probabilities(v) | RawScores::Margins(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Normalize raw classifier output into a per-class distribution keyed by
/// the encoder's labels.
///
/// Margin vectors of length >= 2 go through a numerically-stable softmax; a
/// single binary margin goes through the logistic transform. A score-vector
/// shape that disagrees with the encoder's class count means the model and
/// encoder do not belong together and is a configuration fault.
pub fn extract_distribution(
    scores: &RawScores,
    encoder: &LabelEncoder,
) -> Result<ClassDistribution> {
    match scores {
        RawScores::Probabilities(probs) => {
            check_arity(probs.len(), encoder)?;
            Ok(pair_with_labels(probs, encoder))
        }
        RawScores::Margins(margins) if margins.len() == 1 => {
            if encoder.len() != 2 {
                return Err(AppError::Configuration(format!(
                    "Single margin score with {} classes; a multi-class model must emit one score per class",
                    encoder.len()
                )));
            }
            let p = sigmoid(margins[0]);
            Ok(ClassDistribution::from_pairs([
                (encoder.classes()[0].clone(), 1.0 - p),
                (encoder.classes()[1].clone(), p),
            ]))
        }
        RawScores::Margins(margins) => {
            check_arity(margins.len(), encoder)?;
            Ok(pair_with_labels(&softmax(margins), encoder))
        }
    }
}

fn check_arity(n_scores: usize, encoder: &LabelEncoder) -> Result<()> {
    if n_scores != encoder.len() {
        return Err(AppError::Configuration(format!(
            "Score vector has {} entries but encoder has {} classes",
            n_scores,
            encoder.len()
        )));
    }
    Ok(())
}

fn pair_with_labels(values: &[f64], encoder: &LabelEncoder) -> ClassDistribution {
    ClassDistribution::from_pairs(
        encoder
            .classes()
            .iter()
            .cloned()
            .zip(values.iter().copied()),
    )
}

pub(crate) fn sigmoid(s: f64) -> f64 {
    1.0 / (1.0 + (-s).exp())
}

/// Softmax with the max subtracted before exponentiating
pub(crate) fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|&l| (l - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
