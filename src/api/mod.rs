pub mod handlers;
pub mod routes;

pub use routes::*;

use crate::error::AppError;
use crate::reconcile::ReconciliationPipeline;
use axum::extract::FromRequest;
use std::sync::Arc;

/// JSON request-body extractor whose rejection is converted into an
/// [`AppError::Validation`], keeping the `{"error": ...}` response contract
/// for missing fields and malformed bodies
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ReconciliationPipeline>,
}

impl AppState {
    pub fn new(pipeline: Arc<ReconciliationPipeline>) -> Self {
        Self { pipeline }
    }
}
