//! Backend selection
//!
//! Inference runs on the NdArray (CPU) backend so the service has no GPU
//! requirement.

use burn::tensor::backend::Backend;

/// Backend used for serving predictions
pub type InferenceBackend = burn_ndarray::NdArray<f32>;

/// Get the default device
pub fn default_device() -> <InferenceBackend as Backend>::Device {
    <InferenceBackend as Backend>::Device::default()
}

/// Get a human-readable name for the current backend
pub fn backend_name() -> &'static str {
    "Burn NdArray (CPU)"
}
