//! Inference module for thermal risk prediction
//!
//! This module provides:
//! - `model`: the `RiskModel`/`ModelSource` abstraction and its Burn implementation
//! - `classifier`: the process-wide model handle and the end-to-end pipeline
//! - `risk`: risk levels, guidance text and assessment construction

pub mod classifier;
pub mod model;
pub mod risk;

// Re-export main types for convenience
pub use classifier::Classifier;
pub use model::{BurnModelSource, BurnRiskModel, ModelSource, RiskModel};
pub use risk::{guidance_for_label, Guidance, RiskAssessment, RiskLevel, RiskProbabilities};
