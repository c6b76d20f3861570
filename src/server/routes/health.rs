//! Service info and health check endpoints

use axum::{extract::State, Json};
use serde::Serialize;

use crate::server::state::SharedState;

/// Name reported by the info endpoint
pub const SERVICE_NAME: &str = "Thermal Guard API";

#[derive(Serialize)]
pub struct ServiceInfo {
    pub service: &'static str,
    pub status: &'static str,
    pub model_loaded: bool,
    pub model_type: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model_status: &'static str,
    pub model_type: &'static str,
}

/// GET / - Service info
pub async fn service_info(State(state): State<SharedState>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: SERVICE_NAME,
        status: "running",
        model_loaded: state.classifier.is_loaded(),
        model_type: state.classifier.model_type(),
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.uptime_seconds(),
    })
}

/// GET /health - Health check endpoint
pub async fn health_check(State(state): State<SharedState>) -> Json<HealthResponse> {
    let model_status = if state.classifier.is_loaded() {
        "loaded"
    } else {
        "not_loaded"
    };

    Json(HealthResponse {
        status: "healthy",
        model_status,
        model_type: state.classifier.model_type(),
    })
}
