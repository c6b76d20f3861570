//! Model Configuration Module
//!
//! Hyperparameters of the thermal risk CNN. These must match the values the
//! stored record was trained with, otherwise loading fails on shape mismatch.

use burn::config::Config;

use crate::NUM_CLASSES;

/// Configuration for the ThermalNet model
#[derive(Config, Debug)]
pub struct ThermalNetConfig {
    /// Number of output classes (LOW, MEDIUM, HIGH)
    #[config(default = "3")]
    pub num_classes: usize,

    /// Number of input channels (3 for RGB)
    #[config(default = "3")]
    pub in_channels: usize,

    /// Filters produced by the stem convolution; later stages double it
    #[config(default = "16")]
    pub base_filters: usize,

    /// Dropout rate before the classifier head
    #[config(default = "0.2")]
    pub dropout_rate: f64,
}

impl ThermalNetConfig {
    /// Check the configuration for values the architecture cannot handle
    pub fn validate(&self) -> Result<(), String> {
        if self.num_classes != NUM_CLASSES {
            return Err(format!(
                "num_classes must be {} (LOW, MEDIUM, HIGH), got {}",
                NUM_CLASSES, self.num_classes
            ));
        }

        if self.in_channels == 0 || self.base_filters == 0 {
            return Err("in_channels and base_filters must be greater than 0".to_string());
        }

        if !(0.0..1.0).contains(&self.dropout_rate) {
            return Err("dropout_rate must be in range [0.0, 1.0)".to_string());
        }

        Ok(())
    }

    /// Channel widths after the stem and after every separable block
    pub fn stage_widths(&self) -> [usize; 5] {
        let base = self.base_filters;
        [base, base * 2, base * 4, base * 8, base * 8]
    }
}
