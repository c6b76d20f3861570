//! Error Handling Module
//!
//! Defines the error type shared by the decoding, preprocessing and
//! classification stages. Uses thiserror for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for Thermal Guard operations
#[derive(Error, Debug)]
pub enum ThermalGuardError {
    /// Input was not valid base64
    #[error("Invalid base64 payload: {0}")]
    Base64Decode(#[from] base64::DecodeError),

    /// Decoded bytes are not a readable image
    #[error("Failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// Model artifact is missing from disk
    #[error("Model file not found at '{0}'")]
    ModelNotFound(PathBuf),

    /// Model artifact exists but could not be loaded
    #[error("Failed to load model: {0}")]
    ModelLoad(String),

    /// Forward pass failed or produced an unusable output
    #[error("Inference error: {0}")]
    Inference(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ThermalGuardError {
    /// Whether the failure was caused by the caller's input rather than the service
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ThermalGuardError::Base64Decode(_) | ThermalGuardError::ImageDecode(_)
        )
    }

    /// Whether the failure means the model is not available yet
    pub fn is_model_unavailable(&self) -> bool {
        matches!(
            self,
            ThermalGuardError::ModelNotFound(_) | ThermalGuardError::ModelLoad(_)
        )
    }
}

/// Convenience Result type for Thermal Guard operations
pub type Result<T> = std::result::Result<T, ThermalGuardError>;
