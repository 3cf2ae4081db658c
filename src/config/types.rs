//! Configuration type definitions.

use crate::constants::{fetch, plant_filter, thresholds};
use crate::inference::ModelKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The three cascade models.
    pub models: ModelsConfig,

    /// Cascade acceptance thresholds.
    pub thresholds: ThresholdsConfig,

    /// Green-pixel plant filter settings.
    pub plant_filter: PlantFilterConfig,

    /// Remediation table settings.
    pub remediation: RemediationConfig,

    /// Remote image fetch settings.
    pub fetch: FetchConfig,

    /// Inference runtime settings.
    pub inference: InferenceConfig,
}

/// Model file locations for each cascade slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    /// Corn-specific classifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corn: Option<ModelConfig>,

    /// Apple-specific classifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apple: Option<ModelConfig>,

    /// General plant-disease classifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub general: Option<ModelConfig>,
}

impl ModelsConfig {
    /// Whether no model slot is configured.
    pub fn is_empty(&self) -> bool {
        self.corn.is_none() && self.apple.is_none() && self.general.is_none()
    }

    /// Model configured for a cascade slot.
    pub fn get(&self, kind: ModelKind) -> Option<&ModelConfig> {
        match kind {
            ModelKind::Corn => self.corn.as_ref(),
            ModelKind::Apple => self.apple.as_ref(),
            ModelKind::General => self.general.as_ref(),
        }
    }
}

/// Configuration for a single model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Path to the ONNX model file.
    pub path: PathBuf,

    /// Path to the labels file.
    pub labels: PathBuf,
}

/// Per-model acceptance thresholds, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdsConfig {
    /// Minimum corn model confidence.
    pub corn_min_confidence: f32,

    /// Minimum apple model confidence.
    pub apple_min_confidence: f32,
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            corn_min_confidence: thresholds::CORN_MIN_CONFIDENCE,
            apple_min_confidence: thresholds::APPLE_MIN_CONFIDENCE,
        }
    }
}

/// Plant-presence filter settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlantFilterConfig {
    /// Minimum green-dominant pixel fraction (0.0 - 1.0).
    pub min_green_ratio: f32,

    /// Required lead of green over red and blue.
    pub channel_margin: u8,

    /// Green channel must exceed this value.
    pub green_floor: u8,
}

impl Default for PlantFilterConfig {
    fn default() -> Self {
        Self {
            min_green_ratio: plant_filter::MIN_GREEN_RATIO,
            channel_margin: plant_filter::CHANNEL_MARGIN,
            green_floor: plant_filter::GREEN_FLOOR,
        }
    }
}

/// Remediation table settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RemediationConfig {
    /// Path to the remediation CSV file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Remote image fetch settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Overall request timeout in seconds.
    pub timeout_secs: u64,

    /// Maximum accepted response body size in bytes.
    pub max_bytes: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: fetch::DEFAULT_TIMEOUT_SECS,
            max_bytes: fetch::DEFAULT_MAX_BYTES,
        }
    }
}

/// Inference settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Threads used within a single model run (runtime default if unset).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intra_threads: Option<usize>,
}

/// Supported report formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// One JSON document per input.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}
