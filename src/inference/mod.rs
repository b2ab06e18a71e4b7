/// Inference layer: trained collaborators and score normalization
///
/// Everything here is loaded once at startup and read-only afterwards:
/// - TF-IDF vectorization of ticket text
/// - linear classifiers (probabilistic or margin-based) with label encoders
/// - normalization of raw classifier scores into per-class distributions
/// - optional confidence calibration for the category task

pub mod artifact;
pub mod calibrator;
pub mod classifier;
pub mod encoder;
pub mod resolver;
pub mod scores;
pub mod vectorizer;

pub use artifact::{ArtifactMetadata, ClassifierArtifact, ClassifierBundle, ModelRegistry, VectorizerArtifact};
pub use calibrator::ConfidenceCalibrator;
pub use classifier::{LinearClassifier, ScoreKind};
pub use encoder::LabelEncoder;
pub use resolver::resolve_prediction;
pub use scores::{extract_distribution, RawScores};
pub use vectorizer::TfidfVectorizer;
