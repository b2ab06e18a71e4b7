use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};

/// Bidirectional mapping between a classifier's integer class indices and
/// label strings. The order of `classes` must match the order of the raw
/// score vector the classifier emits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Result<Self> {
        if classes.is_empty() {
            return Err(AppError::Configuration(
                "Label encoder requires at least one class".to_string(),
            ));
        }
        Ok(Self { classes })
    }

    /// Ordered label list
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Resolve a predicted class index to its label
    pub fn decode(&self, index: usize) -> Result<&str> {
        self.classes.get(index).map(String::as_str).ok_or_else(|| {
            AppError::Inference(format!(
                "Predicted index {} outside encoder range ({} classes)",
                index,
                self.classes.len()
            ))
        })
    }
}
