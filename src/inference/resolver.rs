use crate::error::Result;
use crate::inference::encoder::LabelEncoder;
use crate::inference::scores::{extract_distribution, RawScores};
use crate::models::ResolvedPrediction;

/// Combine a classifier's predicted index with its label encoder and raw
/// scores into a [`ResolvedPrediction`].
///
/// The encoder order must match the order of the raw score vector; the
/// confidence is the distribution's score for the resolved label.
pub fn resolve_prediction(
    predicted_index: usize,
    encoder: &LabelEncoder,
    scores: &RawScores,
) -> Result<ResolvedPrediction> {
    let distribution = extract_distribution(scores, encoder)?;
    let label = encoder.decode(predicted_index)?.to_string();
    let confidence = distribution.score(&label);

    Ok(ResolvedPrediction::new(label, confidence, distribution))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder(labels: &[&str]) -> LabelEncoder {
        LabelEncoder::new(labels.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_resolve_probability_vector() {
        let enc = encoder(&["Low", "Medium", "High"]);
        let scores = RawScores::Probabilities(vec![0.1, 0.2, 0.7]);

        let resolved = resolve_prediction(2, &enc, &scores).unwrap();

        assert_eq!(resolved.label, "High");
        assert_eq!(resolved.confidence, 0.7);
        assert_eq!(resolved.distribution.len(), 3);
    }

    #[test]
    fn test_confidence_tracks_resolved_label() {
        // Even when the index is not the argmax, confidence is the
        // distribution's score for the resolved label
        let enc = encoder(&["Low", "Medium", "High"]);
        let scores = RawScores::Probabilities(vec![0.1, 0.2, 0.7]);

        let resolved = resolve_prediction(1, &enc, &scores).unwrap();

        assert_eq!(resolved.label, "Medium");
        assert_eq!(resolved.confidence, 0.2);
    }

    #[test]
    fn test_index_out_of_range_fails() {
        let enc = encoder(&["Low", "High"]);
        let scores = RawScores::Probabilities(vec![0.4, 0.6]);

        let err = resolve_prediction(5, &enc, &scores).unwrap_err();
        assert_eq!(err.error_code(), "INFERENCE_ERROR");
    }

    #[test]
    fn test_arity_mismatch_fails() {
        let enc = encoder(&["Low", "Medium", "High"]);
        let scores = RawScores::Probabilities(vec![0.4, 0.6]);

        let err = resolve_prediction(0, &enc, &scores).unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }

    #[test]
    fn test_resolve_binary_margin() {
        let enc = encoder(&["routine", "urgent"]);
        let scores = RawScores::Margins(vec![2.0]);

        let resolved = resolve_prediction(1, &enc, &scores).unwrap();

        assert_eq!(resolved.label, "urgent");
        assert!(resolved.confidence > 0.5);
    }
}
