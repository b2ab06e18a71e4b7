use crate::error::{AppError, Result};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fitted TF-IDF vectorizer, applied at inference time only.
///
/// Vocabulary and IDF table come from the training pipeline (out of scope
/// here); `transform` is deterministic and holds no per-call state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// Term -> feature index
    vocabulary: HashMap<String, usize>,

    /// Inverse document frequency, indexed by feature index
    idf: Vec<f64>,

    /// Apply 1 + ln(tf) instead of raw term counts
    #[serde(default = "default_sublinear")]
    sublinear_tf: bool,

    /// Word n-gram range (min, max)
    #[serde(default = "default_ngram_range")]
    ngram_range: (usize, usize),
}

fn default_sublinear() -> bool {
    true
}

fn default_ngram_range() -> (usize, usize) {
    (1, 2)
}

impl TfidfVectorizer {
    pub fn new(
        vocabulary: HashMap<String, usize>,
        idf: Vec<f64>,
        sublinear_tf: bool,
        ngram_range: (usize, usize),
    ) -> Result<Self> {
        if vocabulary.is_empty() {
            return Err(AppError::Configuration(
                "Vectorizer vocabulary is empty".to_string(),
            ));
        }
        if let Some(&max_idx) = vocabulary.values().max() {
            if max_idx >= idf.len() {
                return Err(AppError::Configuration(format!(
                    "Vocabulary index {} outside IDF table of length {}",
                    max_idx,
                    idf.len()
                )));
            }
        }
        if ngram_range.0 == 0 || ngram_range.0 > ngram_range.1 {
            return Err(AppError::Configuration(format!(
                "Invalid n-gram range ({}, {})",
                ngram_range.0, ngram_range.1
            )));
        }
        Ok(Self {
            vocabulary,
            idf,
            sublinear_tf,
            ngram_range,
        })
    }

    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    /// Transform text into an L2-normalized TF-IDF feature vector
    pub fn transform(&self, text: &str) -> Result<Array1<f64>> {
        let mut features = Array1::zeros(self.n_features());

        for (term, count) in self.count_terms(text) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                let tf = if self.sublinear_tf {
                    1.0 + (count as f64).ln()
                } else {
                    count as f64
                };
                features[idx] = tf * self.idf[idx];
            }
        }

        // L2 normalization; an all-zero vector (no known terms) stays zero
        let norm = features.dot(&features).sqrt();
        if norm > 0.0 {
            features /= norm;
        }

        Ok(features)
    }

    fn count_terms(&self, text: &str) -> HashMap<String, usize> {
        let text = text.to_lowercase();

        let words: Vec<&str> = text
            .split(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
            .filter(|w| !w.is_empty())
            .collect();

        let mut counts = HashMap::new();
        for n in self.ngram_range.0..=self.ngram_range.1 {
            for window in words.windows(n) {
                *counts.entry(window.join(" ")).or_insert(0) += 1;
            }
        }
        counts
    }
}
