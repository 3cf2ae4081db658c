//! Classifier abstraction and the ONNX Runtime implementation.

use crate::config::{InferenceConfig, ModelConfig, ModelsConfig};
use crate::error::{Error, Result};
use crate::imaging::ImageTensor;
use crate::inference::labels::read_labels;
use crate::inference::{ModelKind, Prediction};
use ort::session::Session;
use ort::value::Tensor;
use std::sync::Mutex;
use tracing::{debug, info};

/// A loaded image classifier producing one score per label.
pub trait Classifier: Send + Sync {
    /// Run the model on a single input and return its output vector.
    fn run(&self, tensor: &ImageTensor) -> Result<Vec<f32>>;
}

/// Loads models and label vocabularies for the registry.
pub trait ModelLoader: Send + Sync {
    /// Load the model for a cascade slot.
    fn load_model(&self, kind: ModelKind) -> Result<Box<dyn Classifier>>;

    /// Load the label vocabulary for a cascade slot.
    fn load_labels(&self, kind: ModelKind) -> Result<Vec<String>>;
}

/// Pick the highest score and its label.
///
/// Ties resolve to the lowest index; NaN scores never win.
pub fn top1(scores: &[f32], labels: &[String]) -> Result<Prediction> {
    let (index, score) = scores
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, v)| !v.is_nan())
        .fold(None, |best: Option<(usize, f32)>, (i, v)| match best {
            Some((_, b)) if v <= b => best,
            _ => Some((i, v)),
        })
        .ok_or_else(|| Error::Inference {
            reason: "model produced no usable scores".to_string(),
        })?;

    let label = labels.get(index).ok_or_else(|| Error::Inference {
        reason: format!(
            "argmax index {index} is outside the {} entry label list",
            labels.len()
        ),
    })?;

    Ok(Prediction {
        label: label.clone(),
        confidence: score * 100.0,
        index,
    })
}

/// ONNX Runtime backed classifier.
///
/// `Session::run` needs exclusive access, so concurrent callers take turns on
/// the session while each owns its own input and output buffers.
pub struct OnnxClassifier {
    session: Mutex<Session>,
}

impl OnnxClassifier {
    /// Build a session for the given model file.
    pub fn from_file(kind: ModelKind, path: &std::path::Path, inference: &InferenceConfig) -> Result<Self> {
        let load_error = |reason: String| Error::ModelLoad {
            model: kind.name(),
            path: path.to_path_buf(),
            reason,
        };

        if !path.exists() {
            return Err(Error::ModelFileNotFound {
                path: path.to_path_buf(),
            });
        }

        let mut builder = Session::builder().map_err(|e| load_error(e.to_string()))?;
        if let Some(threads) = inference.intra_threads {
            builder = builder
                .with_intra_threads(threads)
                .map_err(|e| load_error(e.to_string()))?;
        }

        let session = builder
            .commit_from_file(path)
            .map_err(|e| load_error(e.to_string()))?;

        debug!("Built {} session from {}", kind, path.display());

        Ok(Self {
            session: Mutex::new(session),
        })
    }
}

impl Classifier for OnnxClassifier {
    fn run(&self, tensor: &ImageTensor) -> Result<Vec<f32>> {
        let input = Tensor::from_array((ImageTensor::shape(), tensor.as_slice().to_vec()))
            .map_err(|e| Error::Inference {
                reason: e.to_string(),
            })?;

        let mut session = self.session.lock().map_err(|_| Error::Internal {
            message: "inference session lock poisoned".to_string(),
        })?;

        let outputs = session
            .run(ort::inputs![input])
            .map_err(|e| Error::Inference {
                reason: e.to_string(),
            })?;

        let (_, scores) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| Error::Inference {
                reason: e.to_string(),
            })?;

        Ok(scores.to_vec())
    }
}

/// Builds ONNX sessions from the configured model and label paths.
#[derive(Debug, Clone)]
pub struct OnnxModelLoader {
    models: ModelsConfig,
    inference: InferenceConfig,
}

impl OnnxModelLoader {
    /// Create a loader from the configured model paths.
    pub fn new(models: &ModelsConfig, inference: InferenceConfig) -> Self {
        Self {
            models: models.clone(),
            inference,
        }
    }

    fn model_config(&self, kind: ModelKind) -> Result<&ModelConfig> {
        self.models
            .get(kind)
            .ok_or(Error::ModelNotConfigured { model: kind.name() })
    }
}

impl ModelLoader for OnnxModelLoader {
    fn load_model(&self, kind: ModelKind) -> Result<Box<dyn Classifier>> {
        let config = self.model_config(kind)?;
        info!("Loading {} model: {}", kind, config.path.display());
        let classifier = OnnxClassifier::from_file(kind, &config.path, &self.inference)?;
        Ok(Box::new(classifier))
    }

    fn load_labels(&self, kind: ModelKind) -> Result<Vec<String>> {
        let config = self.model_config(kind)?;
        read_labels(&config.labels)
    }
}
