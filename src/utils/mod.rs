//! Utilities module for logging and error handling

pub mod error;
pub mod logging;

// Re-export main types for convenience
pub use error::{Result, ThermalGuardError};
pub use logging::{init_logging, LogConfig, LogLevel};

/// Format an elapsed duration as milliseconds with two decimals
pub fn format_millis(duration: std::time::Duration) -> String {
    format!("{:.2} ms", duration.as_secs_f64() * 1000.0)
}
