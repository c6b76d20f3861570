//! Server configuration

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::utils::error::{Result, ThermalGuardError};

/// Default listening port when `PORT` is not set
pub const DEFAULT_PORT: u16 = 8000;

/// Default bind address
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Model record location, relative to the working directory
pub const DEFAULT_MODEL_PATH: &str = "models/thermal_classifier.mpk";

/// Largest accepted request body.
///
/// Base64 inflates an image by a third, so this admits encoded images of
/// roughly 48 MB. Larger bodies are answered with 413.
pub const MAX_REQUEST_BYTES: usize = 64 * 1024 * 1024;

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Path to the model record
    pub model_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
        }
    }
}

impl ServerConfig {
    /// Address to bind the listener to
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| {
                ThermalGuardError::Config(format!(
                    "invalid listen address {}:{}: {}",
                    self.host, self.port, e
                ))
            })
    }
}
