use crate::config::ModelsConfig;
use crate::error::{AppError, Result};
use crate::inference::calibrator::ConfidenceCalibrator;
use crate::inference::classifier::{LinearClassifier, ScoreKind};
use crate::inference::encoder::LabelEncoder;
use crate::inference::vectorizer::TfidfVectorizer;
use ndarray::{Array1, Array2};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// Provenance carried alongside every exported model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub name: String,
    pub version: String,
    pub trained_at: chrono::DateTime<chrono::Utc>,
}

/// Serialized classifier: weights, intercepts, score kind, and the label
/// encoder's ordered class list, exported by the training pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierArtifact {
    pub metadata: ArtifactMetadata,
    pub classes: Vec<String>,
    pub weights: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
    pub score_kind: ScoreKind,
}

impl ClassifierArtifact {
    /// Validate shapes and build the runtime classifier + encoder pair
    pub fn into_bundle(self) -> Result<ClassifierBundle> {
        let n_rows = self.weights.len();
        let n_cols = self.weights.first().map(Vec::len).unwrap_or(0);

        if n_rows == 0 || n_cols == 0 {
            return Err(AppError::Configuration(format!(
                "Model '{}' has an empty weight matrix",
                self.metadata.name
            )));
        }
        if self.weights.iter().any(|row| row.len() != n_cols) {
            return Err(AppError::Configuration(format!(
                "Model '{}' has ragged weight rows",
                self.metadata.name
            )));
        }

        // One weight row per class, or a single row for a binary model
        let binary = n_rows == 1 && self.classes.len() == 2;
        if !binary && n_rows != self.classes.len() {
            return Err(AppError::Configuration(format!(
                "Model '{}' has {} weight rows but {} classes",
                self.metadata.name,
                n_rows,
                self.classes.len()
            )));
        }

        let flat: Vec<f64> = self.weights.into_iter().flatten().collect();
        let weights = Array2::from_shape_vec((n_rows, n_cols), flat)
            .map_err(|e| AppError::Configuration(format!("Bad weight matrix shape: {}", e)))?;
        let intercepts = Array1::from_vec(self.intercepts);

        let classifier = LinearClassifier::new(weights, intercepts, self.score_kind)?;
        let encoder = LabelEncoder::new(self.classes)?;

        Ok(ClassifierBundle {
            classifier,
            encoder,
            metadata: self.metadata,
        })
    }
}

/// A classifier paired with the encoder that decodes its predictions
#[derive(Debug, Clone)]
pub struct ClassifierBundle {
    pub classifier: LinearClassifier,
    pub encoder: LabelEncoder,
    pub metadata: ArtifactMetadata,
}

/// Serialized fitted vectorizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerArtifact {
    pub metadata: ArtifactMetadata,
    pub vocabulary: HashMap<String, usize>,
    pub idf: Vec<f64>,
    #[serde(default = "default_sublinear")]
    pub sublinear_tf: bool,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
}

fn default_sublinear() -> bool {
    true
}

fn default_ngram_range() -> (usize, usize) {
    (1, 2)
}

impl VectorizerArtifact {
    pub fn into_vectorizer(self) -> Result<TfidfVectorizer> {
        TfidfVectorizer::new(
            self.vocabulary,
            self.idf,
            self.sublinear_tf,
            self.ngram_range,
        )
    }
}

/// All models, encoders and the optional calibrator, loaded exactly once at
/// process startup and read-only thereafter.
///
/// Any load failure is fatal: there is no partial-availability mode. The
/// one exception is the calibrator artifact being absent on disk, which
/// means calibration is intentionally disabled.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    pub vectorizer: TfidfVectorizer,
    pub category: ClassifierBundle,
    pub calibrator: Option<ConfidenceCalibrator>,
    pub priority: ClassifierBundle,
}

impl ModelRegistry {
    /// Load all artifacts from the configured models directory
    pub fn load(config: &ModelsConfig) -> Result<Self> {
        let vectorizer: VectorizerArtifact =
            read_json(&config.dir.join(&config.vectorizer_file))?;
        let vectorizer = vectorizer.into_vectorizer()?;

        let category: ClassifierArtifact = read_json(&config.dir.join(&config.category_file))?;
        let category = category.into_bundle()?;

        let priority: ClassifierArtifact = read_json(&config.dir.join(&config.priority_file))?;
        let priority = priority.into_bundle()?;

        let calibrator_path = config.dir.join(&config.category_calibrator_file);
        let calibrator = if calibrator_path.exists() {
            let artifact: ClassifierArtifact = read_json(&calibrator_path)?;
            let bundle = artifact.into_bundle()?;
            Some(ConfidenceCalibrator::new(bundle.classifier, bundle.encoder)?)
        } else {
            info!(
                path = %calibrator_path.display(),
                "Calibrator artifact not found, category confidence calibration disabled"
            );
            None
        };

        let registry = Self {
            vectorizer,
            category,
            calibrator,
            priority,
        };
        registry.check_feature_dimensions()?;

        info!(
            category_model = %registry.category.metadata.name,
            category_classes = registry.category.encoder.len(),
            priority_model = %registry.priority.metadata.name,
            priority_classes = registry.priority.encoder.len(),
            n_features = registry.vectorizer.n_features(),
            calibrated = registry.calibrator.is_some(),
            "Model registry loaded"
        );

        Ok(registry)
    }

    /// Build a registry from in-memory components (tests, embedding)
    pub fn from_parts(
        vectorizer: TfidfVectorizer,
        category: ClassifierBundle,
        calibrator: Option<ConfidenceCalibrator>,
        priority: ClassifierBundle,
    ) -> Result<Self> {
        let registry = Self {
            vectorizer,
            category,
            calibrator,
            priority,
        };
        registry.check_feature_dimensions()?;
        Ok(registry)
    }

    fn check_feature_dimensions(&self) -> Result<()> {
        let n = self.vectorizer.n_features();
        for (task, bundle) in [("category", &self.category), ("priority", &self.priority)] {
            if bundle.classifier.n_features() != n {
                return Err(AppError::Configuration(format!(
                    "{} model expects {} features but vectorizer produces {}",
                    task,
                    bundle.classifier.n_features(),
                    n
                )));
            }
        }
        Ok(())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|e| {
        AppError::Configuration(format!("Cannot open artifact {}: {}", path.display(), e))
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        AppError::Configuration(format!("Cannot parse artifact {}: {}", path.display(), e))
    })
}
