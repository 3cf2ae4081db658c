//! Inference module for plant disease classification.

mod cascade;
mod classifier;
pub mod labels;
mod registry;
mod types;

pub use cascade::CascadeClassifier;
pub use classifier::{Classifier, ModelLoader, OnnxClassifier, OnnxModelLoader, top1};
pub use registry::{ClassifierHandle, ModelRegistry, ModelSet};
pub use types::{ClassificationResult, ModelKind, Prediction, Status};
