//! Thermal risk classifier
//!
//! Owns the model handle for the process. The model starts UNLOADED and
//! moves to LOADED on the first successful load; it is never unloaded or
//! swapped afterwards. A failed load leaves the classifier UNLOADED so the
//! next call tries again.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;
use tracing::{debug, info};

use super::model::{ModelSource, RiskModel};
use super::risk::RiskAssessment;
use crate::imaging::{decode_base64_image, decode_image_bytes, preprocess_image, ImageBatch};
use crate::utils::error::Result;
use crate::utils::format_millis;
use crate::IMAGE_SIZE;

/// Shared classifier, safe to use from many requests at once
pub struct Classifier {
    source: Box<dyn ModelSource>,
    model: RwLock<Option<Arc<dyn RiskModel>>>,
    /// Set once `model` is filled; readable while a load holds the write lock
    loaded: AtomicBool,
}

impl Classifier {
    /// Create an unloaded classifier backed by `source`
    pub fn new(source: impl ModelSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            model: RwLock::new(None),
            loaded: AtomicBool::new(false),
        }
    }

    /// Load the model if needed and return it.
    ///
    /// Once loaded, later calls return the cached instance without touching
    /// the source again.
    pub fn load(&self) -> Result<Arc<dyn RiskModel>> {
        if let Some(model) = self.model.read().clone() {
            return Ok(model);
        }

        let mut slot = self.model.write();
        if let Some(model) = slot.as_ref() {
            return Ok(Arc::clone(model));
        }

        let model = self.source.load()?;
        info!("Model loaded from {}", self.source.location());
        *slot = Some(Arc::clone(&model));
        self.loaded.store(true, Ordering::Release);
        Ok(model)
    }

    /// Whether the model has been loaded. Never waits on a load in progress.
    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    /// Inference runtime name, reported even before the model is loaded
    pub fn model_type(&self) -> &'static str {
        self.source.model_type()
    }

    /// Where the model artifact is expected
    pub fn model_location(&self) -> String {
        self.source.location()
    }

    /// Classify a preprocessed batch
    pub fn classify(&self, batch: &ImageBatch) -> Result<RiskAssessment> {
        let model = self.load()?;

        let start = Instant::now();
        let probabilities = model.predict(batch)?;
        let assessment = RiskAssessment::from_probabilities(probabilities);

        debug!(
            "Classified as {} ({:.1}% confidence) in {}",
            assessment.risk,
            assessment.confidence,
            format_millis(start.elapsed())
        );

        Ok(assessment)
    }

    /// Run the whole pipeline on a base64 image or data URL:
    /// decode, resize to `IMAGE_SIZE`, normalize, classify
    pub fn analyze(&self, image_base64: &str) -> Result<RiskAssessment> {
        let image = decode_base64_image(image_base64)?;
        let batch = preprocess_image(&image, IMAGE_SIZE);
        self.classify(&batch)
    }

    /// Run the pipeline on an encoded image file
    pub fn analyze_file(&self, path: &Path) -> Result<RiskAssessment> {
        let bytes = std::fs::read(path)?;
        let image = decode_image_bytes(&bytes)?;
        let batch = preprocess_image(&image, IMAGE_SIZE);
        self.classify(&batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Barrier;

    use crate::inference::risk::RiskLevel;
    use crate::utils::error::ThermalGuardError;
    use crate::NUM_CLASSES;

    struct FixedModel([f32; NUM_CLASSES]);

    impl RiskModel for FixedModel {
        fn predict(&self, _batch: &ImageBatch) -> Result<[f32; NUM_CLASSES]> {
            Ok(self.0)
        }
    }

    /// Fails until `available` is set, counting every load attempt
    struct ToggleSource {
        available: Arc<AtomicBool>,
        loads: Arc<AtomicUsize>,
    }

    impl ModelSource for ToggleSource {
        fn load(&self) -> Result<Arc<dyn RiskModel>> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            if self.available.load(Ordering::SeqCst) {
                Ok(Arc::new(FixedModel([0.2, 0.7, 0.1])))
            } else {
                Err(ThermalGuardError::ModelNotFound("models/missing.mpk".into()))
            }
        }

        fn model_type(&self) -> &'static str {
            "fixed"
        }

        fn location(&self) -> String {
            "models/missing.mpk".to_string()
        }
    }

    fn toggle_classifier(available: bool) -> (Classifier, Arc<AtomicBool>, Arc<AtomicUsize>) {
        let flag = Arc::new(AtomicBool::new(available));
        let loads = Arc::new(AtomicUsize::new(0));
        let classifier = Classifier::new(ToggleSource {
            available: Arc::clone(&flag),
            loads: Arc::clone(&loads),
        });
        (classifier, flag, loads)
    }

    fn sample_batch() -> ImageBatch {
        ImageBatch::new(vec![0.0; 2 * 2 * 3], [1, 2, 2, 3]).unwrap()
    }

    #[test]
    fn test_load_is_idempotent() {
        let (classifier, _, loads) = toggle_classifier(true);
        assert!(!classifier.is_loaded());

        let first = classifier.load().unwrap();
        let second = classifier.load().unwrap();

        assert!(classifier.is_loaded());
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_missing_model_then_recovery() {
        let (classifier, available, _) = toggle_classifier(false);

        let err = classifier.classify(&sample_batch()).unwrap_err();
        assert!(matches!(err, ThermalGuardError::ModelNotFound(_)));
        assert!(!classifier.is_loaded());

        available.store(true, Ordering::SeqCst);
        let assessment = classifier.classify(&sample_batch()).unwrap();

        assert_eq!(assessment.risk, RiskLevel::Medium);
        assert!(classifier.is_loaded());
    }

    #[test]
    fn test_decode_failure_leaves_state_untouched() {
        let (classifier, _, loads) = toggle_classifier(true);

        let err = classifier.analyze("%%% not base64 %%%").unwrap_err();
        assert!(err.is_client_error());
        assert!(!classifier.is_loaded());
        assert_eq!(loads.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_concurrent_first_load_happens_once() {
        let (classifier, _, loads) = toggle_classifier(true);
        let classifier = Arc::new(classifier);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let classifier = Arc::clone(&classifier);
                std::thread::spawn(move || classifier.classify(&sample_batch()).unwrap())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap().risk, RiskLevel::Medium);
        }
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    /// Blocks inside `load` until the test releases it
    struct GatedSource {
        entered: Arc<Barrier>,
        release: Arc<Barrier>,
    }

    impl ModelSource for GatedSource {
        fn load(&self) -> Result<Arc<dyn RiskModel>> {
            self.entered.wait();
            self.release.wait();
            Ok(Arc::new(FixedModel([0.6, 0.3, 0.1])))
        }

        fn model_type(&self) -> &'static str {
            "gated"
        }

        fn location(&self) -> String {
            "models/gated.mpk".to_string()
        }
    }

    #[test]
    fn test_is_loaded_does_not_wait_for_load() {
        let entered = Arc::new(Barrier::new(2));
        let release = Arc::new(Barrier::new(2));
        let classifier = Arc::new(Classifier::new(GatedSource {
            entered: Arc::clone(&entered),
            release: Arc::clone(&release),
        }));

        let loader = {
            let classifier = Arc::clone(&classifier);
            std::thread::spawn(move || classifier.load().map(|_| ()))
        };

        // The loader now holds the write lock
        entered.wait();
        assert!(!classifier.is_loaded());
        assert_eq!(classifier.model_type(), "gated");

        release.wait();
        loader.join().unwrap().unwrap();
        assert!(classifier.is_loaded());
    }

    #[test]
    fn test_analyze_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        image::RgbImage::from_pixel(30, 20, image::Rgb([250, 10, 10]))
            .save(&path)
            .unwrap();

        let (classifier, _, _) = toggle_classifier(true);
        let assessment = classifier.analyze_file(&path).unwrap();
        assert_eq!(assessment.risk, RiskLevel::Medium);

        let err = classifier.analyze_file(&dir.path().join("absent.png")).unwrap_err();
        assert!(matches!(err, ThermalGuardError::Io(_)));
    }

    #[test]
    fn test_confidence_matches_winner() {
        let classifier = Classifier::new(ToggleSource {
            available: Arc::new(AtomicBool::new(true)),
            loads: Arc::new(AtomicUsize::new(0)),
        });
        let assessment = classifier.classify(&sample_batch()).unwrap();

        let winner = assessment.probabilities.get(assessment.risk);
        assert!((assessment.confidence - winner * 100.0).abs() < 1e-4);
        assert!((assessment.probabilities.total() - 1.0).abs() < 1e-5);
    }
}
