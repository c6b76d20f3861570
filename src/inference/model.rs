//! Inference backend abstraction
//!
//! `ModelSource` knows where a model lives and how to load it; `RiskModel`
//! runs a forward pass. The production pair wraps a Burn `ThermalNet`
//! record, tests can plug in anything else.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use burn::tensor::{backend::Backend, Tensor, TensorData};
use parking_lot::Mutex;

use crate::backend::{backend_name, default_device, InferenceBackend};
use crate::imaging::ImageBatch;
use crate::model::{load_record, record_path, ThermalNet, ThermalNetConfig};
use crate::utils::error::{Result, ThermalGuardError};
use crate::NUM_CLASSES;

/// A loaded model that maps a preprocessed batch to class probabilities
pub trait RiskModel: Send + Sync {
    /// Run a forward pass, returning LOW/MEDIUM/HIGH probabilities
    fn predict(&self, batch: &ImageBatch) -> Result<[f32; NUM_CLASSES]>;
}

/// Where a model comes from and how to load it
pub trait ModelSource: Send + Sync {
    /// Load the model, failing with `ModelNotFound` if the artifact is absent
    fn load(&self) -> Result<Arc<dyn RiskModel>>;

    /// Short name of the inference runtime, reported by the info endpoints
    fn model_type(&self) -> &'static str;

    /// Human-readable location of the artifact, for logs
    fn location(&self) -> String;
}

/// A `ThermalNet` held for the process lifetime.
///
/// Forward passes are serialized by the mutex; the weights never change after load.
pub struct BurnRiskModel<B: Backend> {
    inner: Mutex<(ThermalNet<B>, B::Device)>,
}

impl<B: Backend> BurnRiskModel<B> {
    pub fn new(model: ThermalNet<B>, device: B::Device) -> Self {
        Self {
            inner: Mutex::new((model, device)),
        }
    }
}

impl<B: Backend> RiskModel for BurnRiskModel<B> {
    fn predict(&self, batch: &ImageBatch) -> Result<[f32; NUM_CLASSES]> {
        let guard = self.inner.lock();
        let (model, device) = &*guard;

        let input = Tensor::<B, 4>::from_floats(
            TensorData::new(batch.as_slice().to_vec(), batch.shape()),
            device,
        );
        let probs = model.forward_softmax(input);

        let values: Vec<f32> = probs
            .into_data()
            .to_vec()
            .map_err(|e| ThermalGuardError::Inference(format!("{:?}", e)))?;

        values.try_into().map_err(|values: Vec<f32>| {
            ThermalGuardError::Inference(format!(
                "expected {} class probabilities, model produced {}",
                NUM_CLASSES,
                values.len()
            ))
        })
    }
}

/// Loads a `ThermalNet` record from a fixed path on the NdArray backend
#[derive(Debug)]
pub struct BurnModelSource {
    path: PathBuf,
    config: ThermalNetConfig,
}

impl BurnModelSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: ThermalNetConfig::new(),
        }
    }

    /// Use a non-default architecture configuration
    pub fn with_config(mut self, config: ThermalNetConfig) -> Self {
        self.config = config;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ModelSource for BurnModelSource {
    fn load(&self) -> Result<Arc<dyn RiskModel>> {
        let device = default_device();
        let model = load_record::<InferenceBackend>(&self.path, &self.config, &device)?;
        Ok(Arc::new(BurnRiskModel::new(model, device)))
    }

    fn model_type(&self) -> &'static str {
        backend_name()
    }

    fn location(&self) -> String {
        record_path(&self.path).display().to_string()
    }
}
