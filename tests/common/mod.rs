//! Common test fixtures
//!
//! Builds a small in-memory model registry with hand-picked weights so
//! integration tests can drive the full pipeline without artifact files.
//! Each vocabulary term triggers exactly one feature, which makes the raw
//! model output predictable per test text.

#![allow(dead_code)]

use ndarray::{arr1, arr2, Array1, Array2};
use std::collections::HashMap;
use ticket_triage::{
    config::EngineConfig,
    inference::{
        ArtifactMetadata, ClassifierBundle, ConfidenceCalibrator, LabelEncoder, LinearClassifier,
        ModelRegistry, ScoreKind, TfidfVectorizer,
    },
    reconcile::ReconciliationPipeline,
};

pub fn metadata(name: &str) -> ArtifactMetadata {
    ArtifactMetadata {
        name: name.to_string(),
        version: "1.0".to_string(),
        trained_at: chrono::Utc::now(),
    }
}

/// Five-term vocabulary; unigrams only, no sublinear scaling
pub fn test_vectorizer() -> TfidfVectorizer {
    let vocabulary: HashMap<String, usize> = [
        ("server".to_string(), 0),
        ("spelling".to_string(), 1),
        ("manual".to_string(), 2),
        ("refund".to_string(), 3),
        ("laptop".to_string(), 4),
    ]
    .into_iter()
    .collect();

    TfidfVectorizer::new(vocabulary, vec![1.0; 5], false, (1, 1)).unwrap()
}

pub fn bundle(
    name: &str,
    classes: &[&str],
    weights: Array2<f64>,
    intercepts: Array1<f64>,
) -> ClassifierBundle {
    ClassifierBundle {
        classifier: LinearClassifier::new(weights, intercepts, ScoreKind::Probability).unwrap(),
        encoder: LabelEncoder::new(classes.iter().map(|s| s.to_string()).collect()).unwrap(),
        metadata: metadata(name),
    }
}

/// Category model: server/refund/laptop score as "problem", spelling/manual
/// as "question". "refund" is deliberately misrouted so the keyword
/// override has something to correct.
pub fn category_bundle() -> ClassifierBundle {
    bundle(
        "category-model",
        &["billing", "problem", "question"],
        arr2(&[
            [0.0, 0.0, 0.0, 0.0, 0.0],
            [2.0, 0.0, 0.0, 2.0, 2.0],
            [0.0, 2.0, 2.0, 0.0, 0.0],
        ]),
        arr1(&[0.0, 0.0, 0.0]),
    )
}

/// Priority model: every term scores as Low. "spelling" sits just above
/// Medium so the borderline adjustment fires; "manual" is a clear Low.
pub fn priority_bundle() -> ClassifierBundle {
    bundle(
        "priority-model",
        &["High", "Low", "Medium"],
        arr2(&[
            [-1.0, -4.0, -3.0, -1.0, -1.0],
            [2.0, 0.10, 3.0, 2.0, 2.0],
            [0.0, 0.05, 0.0, 0.0, 0.0],
        ]),
        arr1(&[0.0, 0.0, 0.0]),
    )
}

/// Calibrator that ignores features and always reports the category
/// distribution {billing: 0.2, problem: 0.6, question: 0.2}
pub fn test_calibrator() -> ConfidenceCalibrator {
    let classifier = LinearClassifier::new(
        Array2::zeros((3, 5)),
        arr1(&[0.0, 3.0_f64.ln(), 0.0]),
        ScoreKind::Probability,
    )
    .unwrap();
    let encoder = LabelEncoder::new(vec![
        "billing".to_string(),
        "problem".to_string(),
        "question".to_string(),
    ])
    .unwrap();

    ConfidenceCalibrator::new(classifier, encoder).unwrap()
}

pub fn test_registry(calibrator: Option<ConfidenceCalibrator>) -> ModelRegistry {
    ModelRegistry::from_parts(
        test_vectorizer(),
        category_bundle(),
        calibrator,
        priority_bundle(),
    )
    .unwrap()
}

pub fn build_pipeline(calibrator: Option<ConfidenceCalibrator>) -> ReconciliationPipeline {
    ReconciliationPipeline::new(test_registry(calibrator), &EngineConfig::default())
}
