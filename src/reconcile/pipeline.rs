use crate::config::EngineConfig;
use crate::error::{AppError, Result};
use crate::inference::{resolve_prediction, ClassifierBundle, ModelRegistry};
use crate::models::ResolvedPrediction;
use crate::reconcile::category::CategoryReconciler;
use crate::reconcile::priority::PriorityReconciler;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Final, explainable decision for one ticket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketPrediction {
    pub category: String,
    pub category_confidence: String,
    pub priority: String,
    pub priority_confidence: String,
    pub category_overridden: bool,
    pub priority_overridden: bool,
    pub priority_reason: String,
}

/// Orchestrates one request -> response transformation.
///
/// Holds only read-only state (models, encoders, rule tables); a request
/// never suspends on or observes another request. Pure function of the
/// input text and loaded model state.
#[derive(Debug, Clone)]
pub struct ReconciliationPipeline {
    registry: ModelRegistry,
    category_reconciler: CategoryReconciler,
    priority_reconciler: PriorityReconciler,
    calibration_enabled: bool,
}

impl ReconciliationPipeline {
    pub fn new(registry: ModelRegistry, engine: &EngineConfig) -> Self {
        Self {
            registry,
            category_reconciler: CategoryReconciler::new(),
            priority_reconciler: PriorityReconciler::new(engine.borderline_margin),
            calibration_enabled: engine.calibration_enabled,
        }
    }

    /// Classify one ticket description and reconcile the result
    pub fn predict(&self, description: &str) -> Result<TicketPrediction> {
        let description = description.trim();
        if description.is_empty() {
            return Err(AppError::Validation(
                "Description cannot be empty".to_string(),
            ));
        }

        let features = self.registry.vectorizer.transform(description)?;

        // Category and priority tasks are independent
        let category = self.resolve_task(&self.registry.category, &features)?;
        let category = self.calibrate_category(category, &features)?;
        let category_decision = self
            .category_reconciler
            .reconcile(&category.label, description);

        let priority = self.resolve_task(&self.registry.priority, &features)?;
        let priority_decision =
            self.priority_reconciler
                .reconcile(&priority.label, &priority.distribution, description);

        debug!(
            category = %category_decision.final_label,
            category_overridden = category_decision.was_overridden,
            priority = %priority_decision.final_label,
            priority_reason = %priority_decision.reason,
            "Ticket reconciled"
        );

        Ok(TicketPrediction {
            category: category_decision.final_label,
            category_confidence: format_percent(category.confidence),
            priority: priority_decision.final_label,
            priority_confidence: format_percent(priority.confidence),
            category_overridden: category_decision.was_overridden,
            priority_overridden: priority_decision.was_overridden,
            priority_reason: priority_decision.reason.to_string(),
        })
    }

    fn resolve_task(
        &self,
        bundle: &ClassifierBundle,
        features: &Array1<f64>,
    ) -> Result<ResolvedPrediction> {
        let index = bundle.classifier.predict(features)?;
        let scores = bundle.classifier.raw_scores(features)?;
        resolve_prediction(index, &bundle.encoder, &scores)
    }

    /// Swap in the calibrator's probability for display purposes when one
    /// is configured and it knows the resolved label
    fn calibrate_category(
        &self,
        resolved: ResolvedPrediction,
        features: &Array1<f64>,
    ) -> Result<ResolvedPrediction> {
        if !self.calibration_enabled {
            return Ok(resolved);
        }
        let Some(calibrator) = &self.registry.calibrator else {
            return Ok(resolved);
        };

        match calibrator.calibrated_confidence(features, &resolved.label)? {
            Some(confidence) => Ok(resolved.with_confidence(confidence)),
            None => Ok(resolved),
        }
    }
}

fn format_percent(confidence: f64) -> String {
    format!("{:.2}%", confidence * 100.0)
}
