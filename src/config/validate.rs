//! Configuration validation.

use crate::config::{Config, ModelConfig};
use crate::constants::thresholds;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_thresholds(config)?;
    validate_plant_filter(config)?;
    validate_fetch(config)?;

    if config.inference.intra_threads == Some(0) {
        return Err(Error::ConfigValidation {
            message: "intra_threads must be at least 1".to_string(),
        });
    }

    Ok(())
}

fn validate_thresholds(config: &Config) -> Result<()> {
    let checks = [
        ("corn_min_confidence", config.thresholds.corn_min_confidence),
        ("apple_min_confidence", config.thresholds.apple_min_confidence),
    ];

    for (name, value) in checks {
        if !(thresholds::MIN..=thresholds::MAX).contains(&value) {
            return Err(Error::ConfigValidation {
                message: format!(
                    "{name} must be between {} and {}, got {value}",
                    thresholds::MIN,
                    thresholds::MAX,
                ),
            });
        }
    }

    Ok(())
}

fn validate_plant_filter(config: &Config) -> Result<()> {
    let ratio = config.plant_filter.min_green_ratio;
    if !(0.0..=1.0).contains(&ratio) {
        return Err(Error::ConfigValidation {
            message: format!("min_green_ratio must be between 0.0 and 1.0, got {ratio}"),
        });
    }

    Ok(())
}

fn validate_fetch(config: &Config) -> Result<()> {
    if config.fetch.timeout_secs == 0 {
        return Err(Error::ConfigValidation {
            message: "fetch timeout_secs must be at least 1".to_string(),
        });
    }

    if config.fetch.max_bytes == 0 {
        return Err(Error::ConfigValidation {
            message: "fetch max_bytes must be at least 1".to_string(),
        });
    }

    Ok(())
}

/// Check that a model's files exist on disk.
pub fn validate_model_config(model: &ModelConfig) -> Result<()> {
    if !model.path.exists() {
        return Err(Error::ModelFileNotFound {
            path: model.path.clone(),
        });
    }

    if !model.labels.exists() {
        return Err(Error::LabelsRead {
            path: model.labels.clone(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "labels file does not exist"),
        });
    }

    Ok(())
}
