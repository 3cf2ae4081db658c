//! Ordered classifier cascade with per-model acceptance thresholds.

use crate::config::ThresholdsConfig;
use crate::constants::labels::{MODEL_LOAD_ERROR, NOT_A_PLANT};
use crate::error::Result;
use crate::imaging::{PlantFilter, preprocess};
use crate::inference::registry::ModelRegistry;
use crate::inference::{ClassificationResult, ModelKind, Prediction, Status};
use image::RgbImage;
use std::sync::Arc;
use tracing::debug;

/// Runs the plant filter, then the corn, apple and general models in that order.
#[derive(Debug, Clone)]
pub struct CascadeClassifier {
    registry: Arc<ModelRegistry>,
    filter: PlantFilter,
    thresholds: ThresholdsConfig,
}

impl CascadeClassifier {
    /// Create a cascade over a shared registry.
    pub fn new(registry: Arc<ModelRegistry>, filter: PlantFilter, thresholds: ThresholdsConfig) -> Self {
        Self {
            registry,
            filter,
            thresholds,
        }
    }

    /// The registry backing this cascade.
    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Classify one image.
    ///
    /// Rejected and model-unavailable outcomes are regular results. An error
    /// is returned only when a loaded model fails at run time.
    pub fn classify(&self, image: &RgbImage) -> Result<ClassificationResult> {
        let check = self.filter.check(image);
        if !check.is_plant {
            debug!("Plant filter rejected image (green ratio {:.4})", check.green_ratio);
            return Ok(ClassificationResult {
                status: Status::PlantRejected,
                label: NOT_A_PLANT.to_string(),
                confidence: round2(check.green_ratio * 100.0),
                message: None,
            });
        }

        let models = match self.registry.models() {
            Ok(models) => models,
            Err(message) => {
                return Ok(ClassificationResult {
                    status: Status::ModelUnavailable,
                    label: MODEL_LOAD_ERROR.to_string(),
                    confidence: 0.0,
                    message: Some(message.to_string()),
                });
            }
        };

        let tensor = preprocess(image);

        for kind in ModelKind::SPECIALISTS {
            let prediction = models.get(kind).predict(&tensor)?;
            debug!(
                "{} model top-1: #{} {} ({:.2}%)",
                kind, prediction.index, prediction.label, prediction.confidence
            );

            if self.accepts(kind, &prediction) {
                return Ok(ClassificationResult::accepted(kind, prediction));
            }
        }

        let prediction = models.get(ModelKind::General).predict(&tensor)?;
        debug!(
            "general model top-1: #{} {} ({:.2}%)",
            prediction.index, prediction.label, prediction.confidence
        );

        Ok(ClassificationResult::accepted(ModelKind::General, prediction))
    }

    fn accepts(&self, kind: ModelKind, prediction: &Prediction) -> bool {
        let min_confidence = match kind {
            ModelKind::Corn => self.thresholds.corn_min_confidence,
            ModelKind::Apple => self.thresholds.apple_min_confidence,
            ModelKind::General => return true,
        };

        prediction.confidence >= min_confidence
            && kind
                .keyword()
                .is_some_and(|k| prediction.label.to_lowercase().contains(k))
    }
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}
