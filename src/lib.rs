//! # Thermal Guard
//!
//! Fire risk detection from thermal images. A base64 image (or data URL) is
//! decoded, resized to 224×224, scaled into [0, 1] and classified by a small
//! Burn CNN into one of three risk levels with matching guidance text.
//!
//! ## Modules
//!
//! - `imaging`: base64 decoding and preprocessing
//! - `model`: the ThermalNet architecture and record loading
//! - `inference`: model abstraction, classifier handle, risk assessment
//! - `server`: axum HTTP API
//! - `config`: server configuration
//! - `utils`: logging and error types
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use thermal_guard::inference::{BurnModelSource, Classifier};
//!
//! let classifier = Classifier::new(BurnModelSource::new("models/thermal_classifier.mpk"));
//! let assessment = classifier.analyze(&image_base64)?;
//! println!("{} ({:.1}%)", assessment.risk, assessment.confidence);
//! ```

pub mod backend;
pub mod config;
pub mod imaging;
pub mod inference;
pub mod model;
pub mod server;
pub mod utils;

// Re-export commonly used items for convenience
pub use config::ServerConfig;
pub use imaging::{decode_base64_image, preprocess_image, ImageBatch};
pub use inference::{BurnModelSource, Classifier, RiskAssessment, RiskLevel};
pub use utils::error::{Result, ThermalGuardError};

/// Risk classes (LOW, MEDIUM, HIGH)
pub const NUM_CLASSES: usize = 3;

/// Side length of the square model input
pub const IMAGE_SIZE: u32 = 224;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
