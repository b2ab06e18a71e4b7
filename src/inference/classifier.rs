use crate::error::{AppError, Result};
use crate::inference::scores::{sigmoid, softmax, RawScores};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// How a classifier's raw scores are to be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreKind {
    /// Model emits calibrated probabilities (e.g. logistic regression)
    Probability,

    /// Model emits unnormalized decision-function margins (e.g. linear SVM)
    Margin,
}

/// A trained linear classifier applied at inference time.
///
/// `weights` has one row per class for multi-class models, or a single row
/// for binary models (the sklearn decision-function convention: a positive
/// score selects the second class).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearClassifier {
    weights: Array2<f64>,
    intercepts: Array1<f64>,
    kind: ScoreKind,
}

impl LinearClassifier {
    pub fn new(weights: Array2<f64>, intercepts: Array1<f64>, kind: ScoreKind) -> Result<Self> {
        if weights.nrows() != intercepts.len() {
            return Err(AppError::Configuration(format!(
                "Classifier has {} weight rows but {} intercepts",
                weights.nrows(),
                intercepts.len()
            )));
        }
        if weights.nrows() == 0 {
            return Err(AppError::Configuration(
                "Classifier has no weight rows".to_string(),
            ));
        }
        Ok(Self {
            weights,
            intercepts,
            kind,
        })
    }

    pub fn kind(&self) -> ScoreKind {
        self.kind
    }

    pub fn n_features(&self) -> usize {
        self.weights.ncols()
    }

    /// Number of raw scores this model emits per input (1 for binary)
    pub fn n_outputs(&self) -> usize {
        self.weights.nrows()
    }

    fn decision_values(&self, features: &Array1<f64>) -> Result<Array1<f64>> {
        if features.len() != self.weights.ncols() {
            return Err(AppError::Inference(format!(
                "Feature vector has {} entries but model expects {}",
                features.len(),
                self.weights.ncols()
            )));
        }
        Ok(self.weights.dot(features) + &self.intercepts)
    }

    /// Predicted class index: argmax over class scores, or the sign rule
    /// for a single binary score
    pub fn predict(&self, features: &Array1<f64>) -> Result<usize> {
        let values = self.decision_values(features)?;

        if values.len() == 1 {
            let decided = match self.kind {
                ScoreKind::Margin => values[0] > 0.0,
                ScoreKind::Probability => sigmoid(values[0]) > 0.5,
            };
            return Ok(usize::from(decided));
        }

        let (index, _) = values
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .ok_or_else(|| AppError::Inference("Empty decision values".to_string()))?;
        Ok(index)
    }

    /// Raw per-class scores for one input, tagged by score kind.
    ///
    /// Probabilistic models normalize internally (logistic for the binary
    /// row, softmax otherwise) and always emit one probability per class;
    /// margin models emit their decision values untouched.
    pub fn raw_scores(&self, features: &Array1<f64>) -> Result<RawScores> {
        let values = self.decision_values(features)?;

        match self.kind {
            ScoreKind::Margin => Ok(RawScores::Margins(values.to_vec())),
            ScoreKind::Probability => {
                if values.len() == 1 {
                    let p = sigmoid(values[0]);
                    Ok(RawScores::Probabilities(vec![1.0 - p, p]))
                } else {
                    Ok(RawScores::Probabilities(softmax(values.as_slice().ok_or(
                        AppError::Internal("Non-contiguous decision values".to_string()),
                    )?)))
                }
            }
        }
    }
}
