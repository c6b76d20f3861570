//! Thermal image analysis endpoint

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use tracing::{error, warn};

use crate::inference::RiskAssessment;
use crate::server::error::ApiError;
use crate::server::state::SharedState;

/// Request to analyze an image
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Base64 encoded image or data URL
    pub image_base64: String,
}

/// POST /analyze_image - Classify a thermal image
pub async fn analyze_image(
    State(state): State<SharedState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<RiskAssessment>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected analysis request: {}", rejection.body_text());
        ApiError::from(rejection)
    })?;

    let worker_state = Arc::clone(&state);
    let result = tokio::task::spawn_blocking(move || {
        worker_state.classifier.analyze(&request.image_base64)
    })
    .await
    .map_err(|e| {
        error!("Analysis task failed: {}", e);
        ApiError::internal(e)
    })?;

    match result {
        Ok(assessment) => Ok(Json(assessment)),
        Err(err) => {
            if err.is_client_error() {
                warn!("Could not decode image: {}", err);
            } else {
                error!("Image analysis failed: {}", err);
            }
            Err(err.into())
        }
    }
}
