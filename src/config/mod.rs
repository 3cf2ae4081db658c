//! Configuration loading and management.

mod file;
mod overrides;
mod types;
mod validate;

pub use file::{
    config_file_path, load_config_file, load_default_config, save_config, save_default_config,
};
pub use overrides::apply_cli_overrides;
pub use types::{
    Config, FetchConfig, InferenceConfig, ModelConfig, ModelsConfig, OutputFormat,
    PlantFilterConfig, RemediationConfig, ThresholdsConfig,
};
pub use validate::{validate_config, validate_model_config};
