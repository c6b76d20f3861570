//! HTTP API
//!
//! Routes:
//! - `GET /` service info
//! - `GET /health` health check
//! - `POST /analyze_image` thermal risk classification

pub mod error;
pub mod routes;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::MAX_REQUEST_BYTES;
use crate::inference::Classifier;

pub use error::ApiError;
pub use state::{AppState, SharedState};

/// Build the router with all endpoints and middleware
pub fn router(state: SharedState) -> Router {
    router_with_body_limit(state, MAX_REQUEST_BYTES)
}

/// Same as [`router`], with request bodies capped at `max_bytes`
pub fn router_with_body_limit(state: SharedState, max_bytes: usize) -> Router {
    Router::new()
        .route("/", get(routes::health::service_info))
        .route("/health", get(routes::health::health_check))
        .route("/analyze_image", post(routes::analyze::analyze_image))
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

/// Try to load the model before serving.
///
/// A missing or broken artifact is not fatal: the server still starts and
/// `/analyze_image` retries the load on every request until it succeeds.
pub fn warm_up(classifier: &Classifier) -> bool {
    match classifier.load() {
        Ok(_) => true,
        Err(err) => {
            warn!("{}", err);
            warn!(
                "The API will start but /analyze_image will fail until a model is available at {}",
                classifier.model_location()
            );
            false
        }
    }
}

