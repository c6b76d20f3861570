//! Application state for the HTTP server

use std::sync::Arc;
use std::time::Instant;

use crate::inference::Classifier;

/// Shared application state
pub struct AppState {
    /// The one classifier shared by every request
    pub classifier: Classifier,
    /// Server start time
    pub started_at: Instant,
}

impl AppState {
    pub fn new(classifier: Classifier) -> Self {
        Self {
            classifier,
            started_at: Instant::now(),
        }
    }

    /// Get uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

pub type SharedState = Arc<AppState>;
