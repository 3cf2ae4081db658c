//! Error types for cropscan.

/// Result type alias for cropscan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for cropscan.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// A model slot has no model file configured.
    #[error("no {model} model configured (set [models.{model}] in config or pass --{model}-model)")]
    ModelNotConfigured {
        /// Name of the model slot.
        model: &'static str,
    },

    /// Model file does not exist.
    #[error("model file does not exist: {path}")]
    ModelFileNotFound {
        /// Path to the missing model file.
        path: std::path::PathBuf,
    },

    /// Failed to load a model into the inference runtime.
    #[error("failed to load {model} model '{path}': {reason}")]
    ModelLoad {
        /// Name of the model slot.
        model: &'static str,
        /// Path to the model file.
        path: std::path::PathBuf,
        /// Description of the load failure.
        reason: String,
    },

    /// Failed to read a labels file.
    #[error("failed to read labels file '{path}'")]
    LabelsRead {
        /// Path to the labels file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Labels file contained no labels.
    #[error("labels file is empty: {path}")]
    LabelsEmpty {
        /// Path to the labels file.
        path: std::path::PathBuf,
    },

    /// Model output length does not match its label vocabulary.
    #[error("{model} model produces {outputs} scores but its labels file has {labels} entries")]
    LabelCountMismatch {
        /// Name of the model slot.
        model: &'static str,
        /// Length of the model output vector.
        outputs: usize,
        /// Number of labels.
        labels: usize,
    },

    /// The model set could not be loaded.
    #[error("models unavailable: {message}")]
    ModelsUnavailable {
        /// Recorded load failure.
        message: String,
    },

    /// Inference failed.
    #[error("inference failed: {reason}")]
    Inference {
        /// Description of the inference failure.
        reason: String,
    },

    /// No valid image inputs were found.
    #[error("no valid image files or URLs found in the provided inputs")]
    NoValidInputs,

    /// Failed to read an image file.
    #[error("failed to read image file '{path}'")]
    ImageRead {
        /// Path to the image file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Input bytes are not a decodable raster image.
    #[error("failed to decode image from {source_name}")]
    ImageDecode {
        /// File path or URL the bytes came from.
        source_name: String,
        /// Underlying decode error.
        #[source]
        source: image::ImageError,
    },

    /// Fetching an image by URL failed.
    #[error("failed to fetch image from '{url}'")]
    FetchFailed {
        /// URL that failed.
        url: String,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Remote image exceeded the configured size limit.
    #[error("image at '{url}' exceeds the {limit} byte limit")]
    FetchTooLarge {
        /// URL that was fetched.
        url: String,
        /// Configured maximum body size in bytes.
        limit: u64,
    },

    /// Failed to read the remediation table.
    #[error("failed to read remediation table '{path}'")]
    RemediationRead {
        /// Path to the CSV file.
        path: std::path::PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// Failed to append to the detection history file.
    #[error("failed to write detection history '{path}'")]
    HistoryWrite {
        /// Path to the history file.
        path: std::path::PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// Failed to serialize a JSON report.
    #[error("failed to serialize JSON report")]
    JsonSerialize {
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// Internal error (for unexpected failures).
    #[error("internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}
