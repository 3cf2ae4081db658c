//! Lazily loaded, process-lifetime model registry.
//!
//! The three classifier handles are built together on first use. Any load
//! failure marks the whole set unavailable and is never retried; restarting
//! the process is the recovery path.

use crate::error::{Error, Result};
use crate::imaging::ImageTensor;
use crate::inference::classifier::{Classifier, ModelLoader, top1};
use crate::inference::{ModelKind, Prediction};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::{error, info};

/// A loaded classifier together with its label vocabulary.
pub struct ClassifierHandle {
    kind: ModelKind,
    model: Box<dyn Classifier>,
    labels: Vec<String>,
    output_len: usize,
}

impl ClassifierHandle {
    /// Which cascade slot this handle fills.
    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    /// Ordered label vocabulary.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Length of the model's output vector.
    pub fn output_len(&self) -> usize {
        self.output_len
    }

    /// Run the model and return its top-1 prediction.
    pub fn predict(&self, tensor: &ImageTensor) -> Result<Prediction> {
        let scores = self.model.run(tensor)?;
        top1(&scores, &self.labels)
    }
}

impl std::fmt::Debug for ClassifierHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassifierHandle")
            .field("kind", &self.kind)
            .field("labels", &self.labels.len())
            .field("output_len", &self.output_len)
            .finish_non_exhaustive()
    }
}

/// The complete cascade: all three handles, never a subset.
#[derive(Debug)]
pub struct ModelSet {
    corn: ClassifierHandle,
    apple: ClassifierHandle,
    general: ClassifierHandle,
}

impl ModelSet {
    /// Handle for a cascade slot.
    pub fn get(&self, kind: ModelKind) -> &ClassifierHandle {
        match kind {
            ModelKind::Corn => &self.corn,
            ModelKind::Apple => &self.apple,
            ModelKind::General => &self.general,
        }
    }
}

/// Registry owning the one-time model load.
pub struct ModelRegistry {
    loader: Box<dyn ModelLoader>,
    state: OnceLock<std::result::Result<ModelSet, String>>,
}

impl ModelRegistry {
    /// Create a registry. Nothing is loaded until [`ModelRegistry::models`] is called.
    pub fn new(loader: impl ModelLoader + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            state: OnceLock::new(),
        }
    }

    /// Get the loaded model set, loading it on first call.
    ///
    /// Concurrent first callers block until the single load finishes and all
    /// see its outcome. On failure the error message is returned on every
    /// call without another load attempt.
    pub fn models(&self) -> std::result::Result<&ModelSet, &str> {
        self.state
            .get_or_init(|| self.load().map_err(|e| e.to_string()))
            .as_ref()
            .map_err(String::as_str)
    }

    /// Whether the load has run (successfully or not).
    pub fn is_initialized(&self) -> bool {
        self.state.get().is_some()
    }

    fn load(&self) -> Result<ModelSet> {
        let start = Instant::now();
        info!("Loading classifier cascade...");

        let result = self.load_all();
        match &result {
            Ok(_) => info!(
                "Classifier cascade ready in {:.2}s",
                start.elapsed().as_secs_f64()
            ),
            Err(e) => error!("Classifier cascade unavailable: {e}"),
        }
        result
    }

    fn load_all(&self) -> Result<ModelSet> {
        let corn = self.loader.load_model(ModelKind::Corn)?;
        let apple = self.loader.load_model(ModelKind::Apple)?;
        let general = self.loader.load_model(ModelKind::General)?;

        let corn_labels = self.loader.load_labels(ModelKind::Corn)?;
        let apple_labels = self.loader.load_labels(ModelKind::Apple)?;
        let general_labels = self.loader.load_labels(ModelKind::General)?;

        Ok(ModelSet {
            corn: build_handle(ModelKind::Corn, corn, corn_labels)?,
            apple: build_handle(ModelKind::Apple, apple, apple_labels)?,
            general: build_handle(ModelKind::General, general, general_labels)?,
        })
    }
}

impl std::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("state", &self.state.get().map(|s| s.as_ref().map(|_| "loaded")))
            .finish_non_exhaustive()
    }
}

/// Probe the model once to learn its output length and check it against the labels.
fn build_handle(
    kind: ModelKind,
    model: Box<dyn Classifier>,
    labels: Vec<String>,
) -> Result<ClassifierHandle> {
    let output_len = model.run(&ImageTensor::zeros())?.len();

    if output_len != labels.len() {
        return Err(Error::LabelCountMismatch {
            model: kind.name(),
            outputs: output_len,
            labels: labels.len(),
        });
    }

    info!("{} model ready with {} labels", kind, labels.len());

    Ok(ClassifierHandle {
        kind,
        model,
        labels,
        output_len,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct FixedModel(Vec<f32>);

    impl Classifier for FixedModel {
        fn run(&self, _tensor: &ImageTensor) -> Result<Vec<f32>> {
            Ok(self.0.clone())
        }
    }

    #[derive(Clone, Default)]
    struct CountingLoader {
        loads: Arc<AtomicUsize>,
        fail_on: Option<ModelKind>,
        extra_label: bool,
    }

    impl ModelLoader for CountingLoader {
        fn load_model(&self, kind: ModelKind) -> Result<Box<dyn Classifier>> {
            if kind == ModelKind::Corn {
                self.loads.fetch_add(1, Ordering::SeqCst);
                // Widen the race window for the concurrency test.
                std::thread::sleep(Duration::from_millis(20));
            }
            if self.fail_on == Some(kind) {
                return Err(Error::ModelFileNotFound {
                    path: format!("{kind}.onnx").into(),
                });
            }
            Ok(Box::new(FixedModel(vec![0.2, 0.8])))
        }

        fn load_labels(&self, kind: ModelKind) -> Result<Vec<String>> {
            let mut labels = vec![format!("{kind}_healthy"), format!("{kind}_blight")];
            if self.extra_label && kind == ModelKind::General {
                labels.push("extra".to_string());
            }
            Ok(labels)
        }
    }

    #[test]
    fn test_lazy_load_on_first_use() {
        let loader = CountingLoader::default();
        let loads = Arc::clone(&loader.loads);
        let registry = ModelRegistry::new(loader);

        assert!(!registry.is_initialized());
        assert_eq!(loads.load(Ordering::SeqCst), 0);

        let models = registry.models().unwrap();
        assert_eq!(models.get(ModelKind::Apple).labels().len(), 2);
        assert_eq!(models.get(ModelKind::General).output_len(), 2);
        assert!(registry.is_initialized());

        registry.models().unwrap();
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_handle_predicts_top1() {
        let registry = ModelRegistry::new(CountingLoader::default());
        let handle = registry.models().unwrap().get(ModelKind::Corn);
        let prediction = handle.predict(&ImageTensor::zeros()).unwrap();
        assert_eq!(handle.kind(), ModelKind::Corn);
        assert_eq!(prediction.label, "corn_blight");
        assert!((prediction.confidence - 80.0).abs() < 1e-4);
    }

    #[test]
    fn test_partial_failure_marks_all_unavailable() {
        let loader = CountingLoader {
            fail_on: Some(ModelKind::General),
            ..CountingLoader::default()
        };
        let registry = ModelRegistry::new(loader);

        let err = registry.models().unwrap_err();
        assert!(err.contains("general.onnx"));
    }

    #[test]
    fn test_failure_is_sticky() {
        let loader = CountingLoader {
            fail_on: Some(ModelKind::Apple),
            ..CountingLoader::default()
        };
        let loads = Arc::clone(&loader.loads);
        let registry = ModelRegistry::new(loader);

        let first = registry.models().unwrap_err().to_string();
        let second = registry.models().unwrap_err().to_string();
        assert_eq!(first, second);
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_label_count_mismatch_fails_load() {
        let loader = CountingLoader {
            extra_label: true,
            ..CountingLoader::default()
        };
        let registry = ModelRegistry::new(loader);

        let err = registry.models().unwrap_err();
        assert!(err.contains("general model produces 2 scores"));
    }

    #[test]
    fn test_concurrent_first_use_loads_once() {
        let loader = CountingLoader::default();
        let loads = Arc::clone(&loader.loads);
        let registry = ModelRegistry::new(loader);

        let outcomes: Vec<bool> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..16)
                .map(|_| s.spawn(|| registry.models().is_ok()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(outcomes.len(), 16);
        assert!(outcomes.iter().all(|ok| *ok));
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_concurrent_first_use_shares_failure() {
        let loader = CountingLoader {
            fail_on: Some(ModelKind::Corn),
            ..CountingLoader::default()
        };
        let loads = Arc::clone(&loader.loads);
        let registry = ModelRegistry::new(loader);

        let messages: Vec<String> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| registry.models().unwrap_err().to_string()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(messages.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }
}
