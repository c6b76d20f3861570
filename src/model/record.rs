//! Loading and saving ThermalNet weights
//!
//! Records are written with Burn's `CompactRecorder` (half precision
//! MessagePack). The recorder forces the `.mpk` extension, so paths with or
//! without it refer to the same file.

use std::path::{Path, PathBuf};

use burn::{module::Module, record::CompactRecorder, tensor::backend::Backend};
use tracing::debug;

use super::config::ThermalNetConfig;
use super::mobilenet::ThermalNet;
use crate::utils::error::{Result, ThermalGuardError};

/// File extension used by `CompactRecorder`
pub const RECORD_EXTENSION: &str = "mpk";

/// The path the recorder actually reads from or writes to
pub fn record_path(path: &Path) -> PathBuf {
    path.with_extension(RECORD_EXTENSION)
}

/// Load model weights from `path` into a model built from `config`
pub fn load_record<B: Backend>(
    path: &Path,
    config: &ThermalNetConfig,
    device: &B::Device,
) -> Result<ThermalNet<B>> {
    config.validate().map_err(ThermalGuardError::Config)?;

    let file = record_path(path);
    if !file.is_file() {
        return Err(ThermalGuardError::ModelNotFound(file));
    }

    debug!("Loading ThermalNet record from {:?}", file);
    config
        .init::<B>(device)
        .load_file(file, &CompactRecorder::new(), device)
        .map_err(|e| ThermalGuardError::ModelLoad(format!("{:?}", e)))
}

/// Save model weights to `path`, creating parent directories as needed
pub fn save_record<B: Backend>(model: ThermalNet<B>, path: &Path) -> Result<PathBuf> {
    let file = record_path(path);
    if let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    model
        .save_file(file.clone(), &CompactRecorder::new())
        .map_err(|e| ThermalGuardError::ModelLoad(format!("failed to save record: {:?}", e)))?;

    Ok(file)
}

/// Write a freshly initialized (untrained) model built from `config`
pub fn init_record<B: Backend>(
    path: &Path,
    config: &ThermalNetConfig,
    device: &B::Device,
) -> Result<PathBuf> {
    config.validate().map_err(ThermalGuardError::Config)?;
    save_record(config.init::<B>(device), path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::tensor::Tensor;
    use burn_ndarray::NdArray;

    type TestBackend = NdArray;

    #[test]
    fn test_record_path_extension() {
        assert_eq!(
            record_path(Path::new("models/thermal_classifier")),
            PathBuf::from("models/thermal_classifier.mpk")
        );
        assert_eq!(
            record_path(Path::new("models/thermal_classifier.mpk")),
            PathBuf::from("models/thermal_classifier.mpk")
        );
    }

    #[test]
    fn test_missing_record() {
        let dir = tempfile::tempdir().unwrap();
        let device = Default::default();
        let result = load_record::<TestBackend>(
            &dir.path().join("absent"),
            &ThermalNetConfig::new(),
            &device,
        );

        assert!(matches!(result, Err(ThermalGuardError::ModelNotFound(_))));
    }

    #[test]
    fn test_corrupt_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.mpk");
        std::fs::write(&path, b"not a record").unwrap();

        let device = Default::default();
        let result = load_record::<TestBackend>(&path, &ThermalNetConfig::new(), &device);

        assert!(matches!(result, Err(ThermalGuardError::ModelLoad(_))));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let device = Default::default();
        let config = ThermalNetConfig::new().with_base_filters(4);

        let written = save_record(config.init::<TestBackend>(&device), &dir.path().join("nested/net"))
            .unwrap();
        assert!(written.ends_with("nested/net.mpk"));
        assert!(written.is_file());

        let model = load_record::<TestBackend>(&written, &config, &device).unwrap();
        let output = model.forward(Tensor::zeros([1, 16, 16, 3], &device));
        assert_eq!(output.dims(), [1, 3]);
    }
}
