//! Diagnosis: classification plus remediation lookup.

use crate::config::Config;
use crate::error::Result;
use crate::imaging::PlantFilter;
use crate::inference::{CascadeClassifier, ClassificationResult, ModelRegistry, OnnxModelLoader};
use crate::remediation::{Remedy, RemediationTable};
use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

/// Complete answer for one input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    /// File path or URL of the input.
    pub source: String,

    /// Cascade outcome.
    #[serde(flatten)]
    pub result: ClassificationResult,

    /// Treatment, present only when a classifier produced the label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remedy: Option<Remedy>,
}

/// Combines the cascade with the remediation table.
#[derive(Debug, Clone)]
pub struct Detector {
    cascade: CascadeClassifier,
    remedies: Arc<RemediationTable>,
}

impl Detector {
    /// Assemble a detector from its parts.
    pub fn new(cascade: CascadeClassifier, remedies: RemediationTable) -> Self {
        Self {
            cascade,
            remedies: Arc::new(remedies),
        }
    }

    /// Build the ONNX-backed detector described by the configuration.
    ///
    /// Models are not loaded here; the first image that passes the plant
    /// filter triggers loading. The remediation table is read eagerly.
    pub fn from_config(config: &Config) -> Result<Self> {
        let loader = OnnxModelLoader::new(&config.models, config.inference);
        let registry = Arc::new(ModelRegistry::new(loader));
        let cascade = CascadeClassifier::new(
            registry,
            PlantFilter::from_config(&config.plant_filter),
            config.thresholds,
        );

        let remedies = match &config.remediation.path {
            Some(path) => RemediationTable::load(path)?,
            None => {
                warn!("No remediation table configured; remedies will be unavailable");
                RemediationTable::empty()
            }
        };

        Ok(Self::new(cascade, remedies))
    }

    /// The underlying cascade.
    pub fn cascade(&self) -> &CascadeClassifier {
        &self.cascade
    }

    /// Classify an image and attach the remedy for accepted labels.
    pub fn diagnose(&self, image: &RgbImage, source: &str) -> Result<Diagnosis> {
        let result = self.cascade.classify(image)?;
        let remedy = result
            .status
            .is_accepted()
            .then(|| self.remedies.resolve(&result.label));

        Ok(Diagnosis {
            source: source.to_string(),
            result,
            remedy,
        })
    }
}
