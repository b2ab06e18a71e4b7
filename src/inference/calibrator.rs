use crate::error::{AppError, Result};
use crate::inference::classifier::{LinearClassifier, ScoreKind};
use crate::inference::encoder::LabelEncoder;
use crate::inference::scores::extract_distribution;
use ndarray::Array1;

/// Secondary probability-calibrated model supplying a display confidence
/// for an already-resolved category label.
///
/// Margin-based primary classifiers produce poorly-calibrated softmax
/// confidences; a separately trained sigmoid calibrator gives trustworthy
/// probabilities without touching the decision boundary. The calibrator
/// never changes the label: it only offers a better confidence, or nothing
/// when its label set does not cover the resolved label.
#[derive(Debug, Clone)]
pub struct ConfidenceCalibrator {
    model: LinearClassifier,
    encoder: LabelEncoder,
}

impl ConfidenceCalibrator {
    pub fn new(model: LinearClassifier, encoder: LabelEncoder) -> Result<Self> {
        if model.kind() != ScoreKind::Probability {
            return Err(AppError::Configuration(
                "Confidence calibrator must be a probability model".to_string(),
            ));
        }
        Ok(Self { model, encoder })
    }

    /// Calibrated probability for `label`, or `None` when the calibrator
    /// was trained on a label set that does not include it
    pub fn calibrated_confidence(
        &self,
        features: &Array1<f64>,
        label: &str,
    ) -> Result<Option<f64>> {
        let scores = self.model.raw_scores(features)?;
        let distribution = extract_distribution(&scores, &self.encoder)?;

        if distribution.contains(label) {
            Ok(Some(distribution.score(label)))
        } else {
            Ok(None)
        }
    }
}
