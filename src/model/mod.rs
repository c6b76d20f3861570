//! Model module for the thermal risk CNN, built with the Burn framework
//!
//! - `config`: architecture hyperparameters
//! - `mobilenet`: the depthwise separable network itself
//! - `record`: loading and saving weights with `CompactRecorder`

pub mod config;
pub mod mobilenet;
pub mod record;

// Re-export main types for convenience
pub use config::ThermalNetConfig;
pub use mobilenet::ThermalNet;
pub use record::{init_record, load_record, record_path, save_record};
