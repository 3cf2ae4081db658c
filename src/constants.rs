//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "cropscan";

/// Side length in pixels of the square classifier input.
pub const INPUT_SIZE: u32 = 224;

/// Number of color channels in the classifier input.
pub const INPUT_CHANNELS: usize = 3;

/// Tensor shape fed to every classifier (NHWC, batch of one).
pub const INPUT_SHAPE: [usize; 4] = [1, INPUT_SIZE as usize, INPUT_SIZE as usize, INPUT_CHANNELS];

/// Cascade acceptance thresholds, in percent.
pub mod thresholds {
    /// Minimum top-1 confidence for the corn model to be accepted.
    pub const CORN_MIN_CONFIDENCE: f32 = 90.0;

    /// Minimum top-1 confidence for the apple model to be accepted.
    pub const APPLE_MIN_CONFIDENCE: f32 = 95.0;

    /// Lower bound of a confidence value.
    pub const MIN: f32 = 0.0;

    /// Upper bound of a confidence value.
    pub const MAX: f32 = 100.0;
}

/// Green-pixel plant filter defaults.
pub mod plant_filter {
    /// Side length of the image the filter analyses.
    pub const ANALYSIS_SIZE: u32 = 224;

    /// Minimum fraction of green-dominant pixels for an image to count as a plant.
    pub const MIN_GREEN_RATIO: f32 = 0.18;

    /// Amount the green channel must exceed red and blue by.
    pub const CHANNEL_MARGIN: u8 = 15;

    /// Green channel must be strictly above this value.
    pub const GREEN_FLOOR: u8 = 60;
}

/// Labels reported for the non-classifier terminal states.
pub mod labels {
    /// Label of an image rejected by the plant filter.
    pub const NOT_A_PLANT: &str = "Not a Plant (Low Green Pixels)";

    /// Label reported when the models could not be loaded.
    pub const MODEL_LOAD_ERROR: &str = "Model Load Error";
}

/// Remediation table constants.
pub mod remediation {
    /// Temporary-solution text returned when a label has no table entry.
    pub const NO_SOLUTION: &str = "No solution found.";

    /// Permanent-solution text returned when a label has no table entry.
    pub const UPDATE_TABLE: &str = "Please update CSV.";
}

/// Remote image fetch constants.
pub mod fetch {
    /// Default overall request timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

    /// Connect timeout in seconds.
    pub const CONNECT_TIMEOUT_SECS: u64 = 5;

    /// Default maximum response body size (20 MiB).
    pub const DEFAULT_MAX_BYTES: u64 = 20 * 1024 * 1024;
}

/// Image file extensions collected from input directories.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif", "webp", "tif", "tiff"];
