//! Command-line overrides on top of the config file.

use crate::cli::AnalyzeArgs;
use crate::config::types::{Config, ModelConfig};
use crate::error::{Error, Result};
use std::path::PathBuf;

/// Build the effective configuration for a diagnosis run.
///
/// CLI values win over file values. A model path override needs a labels
/// path, either from the CLI or from the same slot in the config file.
pub fn apply_cli_overrides(config: &Config, args: &AnalyzeArgs) -> Result<Config> {
    let mut effective = config.clone();

    override_model(
        &mut effective.models.corn,
        "corn",
        args.corn_model.as_ref(),
        args.corn_labels.as_ref(),
    )?;
    override_model(
        &mut effective.models.apple,
        "apple",
        args.apple_model.as_ref(),
        args.apple_labels.as_ref(),
    )?;
    override_model(
        &mut effective.models.general,
        "general",
        args.general_model.as_ref(),
        args.general_labels.as_ref(),
    )?;

    if let Some(threshold) = args.corn_threshold {
        effective.thresholds.corn_min_confidence = threshold;
    }
    if let Some(threshold) = args.apple_threshold {
        effective.thresholds.apple_min_confidence = threshold;
    }
    if let Some(timeout) = args.fetch_timeout {
        effective.fetch.timeout_secs = timeout;
    }
    if let Some(path) = &args.remedies {
        effective.remediation.path = Some(path.clone());
    }

    Ok(effective)
}

fn override_model(
    slot: &mut Option<ModelConfig>,
    name: &str,
    path: Option<&PathBuf>,
    labels: Option<&PathBuf>,
) -> Result<()> {
    if let Some(existing) = slot.as_mut() {
        if let Some(path) = path {
            existing.path.clone_from(path);
        }
        if let Some(labels) = labels {
            existing.labels.clone_from(labels);
        }
        return Ok(());
    }

    match (path, labels) {
        (None, None) => {}
        (Some(path), Some(labels)) => {
            *slot = Some(ModelConfig {
                path: path.clone(),
                labels: labels.clone(),
            });
        }
        (Some(_), None) => {
            return Err(Error::ConfigValidation {
                message: format!("--{name}-model requires --{name}-labels"),
            });
        }
        (None, Some(_)) => {
            return Err(Error::ConfigValidation {
                message: format!("--{name}-labels requires --{name}-model"),
            });
        }
    }

    Ok(())
}
