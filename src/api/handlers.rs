use crate::api::{AppJson, AppState};
use crate::error::Result;
use crate::reconcile::TicketPrediction;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Service banner
pub async fn home() -> &'static str {
    "Ticket Triage ML Service Running Successfully"
}

/// Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Classify a ticket description
pub async fn predict(
    State(state): State<AppState>,
    AppJson(request): AppJson<PredictRequest>,
) -> Result<Json<TicketPrediction>> {
    request.validate()?;

    let prediction = state.pipeline.predict(&request.description)?;

    Ok(Json(prediction))
}

#[derive(Debug, Deserialize, Validate)]
pub struct PredictRequest {
    /// Free-text ticket description
    #[validate(length(min = 1, message = "Description field is required"))]
    pub description: String,
}
