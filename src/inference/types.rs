//! Inference value types.

use serde::{Deserialize, Serialize};

/// One slot of the classifier cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    /// Corn-specific classifier.
    Corn,
    /// Apple-specific classifier.
    Apple,
    /// General plant-disease classifier.
    General,
}

impl ModelKind {
    /// Cascade order. Thresholds are calibrated per model, so this is fixed.
    pub const CASCADE_ORDER: [Self; 3] = [Self::Corn, Self::Apple, Self::General];

    /// Crop-specific models, gated by threshold and keyword.
    pub const SPECIALISTS: [Self; 2] = [Self::Corn, Self::Apple];

    /// Lowercase slot name used in config and messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Corn => "corn",
            Self::Apple => "apple",
            Self::General => "general",
        }
    }

    /// Substring a specialist label must contain to be accepted.
    ///
    /// The general model has no keyword and is never gated.
    pub const fn keyword(self) -> Option<&'static str> {
        match self {
            Self::Corn => Some("corn"),
            Self::Apple => Some("apple"),
            Self::General => None,
        }
    }

    /// Status reported when this model's prediction is accepted.
    pub const fn status(self) -> Status {
        match self {
            Self::Corn => Status::Corn,
            Self::Apple => Status::Apple,
            Self::General => Status::General,
        }
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Terminal state of one classification call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    /// Rejected by the plant filter before any model ran.
    PlantRejected,
    /// Accepted by the corn model.
    Corn,
    /// Accepted by the apple model.
    Apple,
    /// Answered by the general fallback model.
    General,
    /// Models failed to load.
    ModelUnavailable,
}

impl Status {
    /// Whether a classifier produced the label (and remediation applies).
    pub const fn is_accepted(self) -> bool {
        matches!(self, Self::Corn | Self::Apple | Self::General)
    }

    /// Kebab-case name as used in reports.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PlantRejected => "plant-rejected",
            Self::Corn => "corn",
            Self::Apple => "apple",
            Self::General => "general",
            Self::ModelUnavailable => "model-unavailable",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-1 output of a single classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Label at the argmax index.
    pub label: String,
    /// Output value at the argmax index, times 100.
    pub confidence: f32,
    /// Argmax index.
    pub index: usize,
}

/// Final answer of the cascade for one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Terminal state.
    pub status: Status,
    /// Predicted label, or a fixed description for non-classifier states.
    pub label: String,
    /// Confidence in percent (0 - 100).
    pub confidence: f32,
    /// Load error description, set only for `model-unavailable`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ClassificationResult {
    /// Result accepted from a classifier.
    pub fn accepted(kind: ModelKind, prediction: Prediction) -> Self {
        Self {
            status: kind.status(),
            label: prediction.label,
            confidence: prediction.confidence,
            message: None,
        }
    }
}
