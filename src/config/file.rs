//! Configuration file location and TOML persistence.

use crate::config::Config;
use crate::constants::APP_NAME;
use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.toml";

/// Path of the config file in the platform config directory.
///
/// `~/.config/cropscan/config.toml` on Linux,
/// `~/Library/Application Support/cropscan/config.toml` on macOS and
/// `%APPDATA%\cropscan\config.toml` on Windows.
pub fn config_file_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", APP_NAME).ok_or(Error::ConfigDirNotFound)?;
    Ok(dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Read a config file. A missing file yields the defaults.
pub fn load_config_file(path: &Path) -> Result<Config> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Config::default()),
        Err(e) => {
            return Err(Error::ConfigRead {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    toml::from_str(&contents).map_err(|e| Error::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read the config from the platform path.
///
/// Platforms without a config directory fall back to the defaults.
pub fn load_default_config() -> Result<Config> {
    match config_file_path() {
        Ok(path) => load_config_file(&path),
        Err(_) => Ok(Config::default()),
    }
}

/// Write a config file, creating parent directories as needed.
pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    let write_error = |source| Error::ConfigWrite {
        path: path.to_path_buf(),
        source,
    };

    let rendered =
        toml::to_string_pretty(config).map_err(|e| Error::ConfigSerialize { source: e })?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }
    std::fs::write(path, rendered).map_err(write_error)
}

/// Write the config to the platform path and return that path.
pub fn save_default_config(config: &Config) -> Result<PathBuf> {
    let path = config_file_path()?;
    save_config(config, &path)?;
    Ok(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_file_path_is_app_scoped() {
        // Some CI sandboxes have no home directory.
        if let Ok(path) = config_file_path() {
            assert!(path.ends_with(Path::new(APP_NAME).join(CONFIG_FILE_NAME)));
        }
    }

    #[test]
    fn test_load_nonexistent_file_returns_default() {
        let path = Path::new("/nonexistent/path/config.toml");
        let config = load_config_file(path).unwrap();
        assert!(config.models.corn.is_none());
        assert!(config.remediation.path.is_none());
    }

    #[test]
    fn test_load_valid_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[models.corn]
path = "/models/corn.onnx"
labels = "/models/corn_labels.txt"

[thresholds]
apple_min_confidence = 97.5

[plant_filter]
min_green_ratio = 0.25
"#
        )
        .unwrap();

        let config = load_config_file(file.path()).unwrap();
        let corn = config.models.corn.unwrap();
        assert_eq!(corn.path, PathBuf::from("/models/corn.onnx"));
        assert!(config.models.apple.is_none());
        assert_eq!(config.thresholds.apple_min_confidence, 97.5);
        assert_eq!(config.thresholds.corn_min_confidence, 90.0);
        assert_eq!(config.plant_filter.min_green_ratio, 0.25);
        assert_eq!(config.plant_filter.channel_margin, 15);
    }

    #[test]
    fn test_load_invalid_toml_returns_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "this is not valid toml {{{{").unwrap();

        let result = load_config_file(file.path());
        assert!(matches!(result, Err(Error::ConfigParse { .. })));
    }

    #[test]
    fn test_save_then_load_preserves_models() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.models.general = Some(crate::config::ModelConfig {
            path: PathBuf::from("plant.onnx"),
            labels: PathBuf::from("plant_labels.txt"),
        });
        config.inference.intra_threads = Some(2);
        save_config(&config, &path).unwrap();

        let loaded = load_config_file(&path).unwrap();
        assert_eq!(loaded.models.general, config.models.general);
        assert_eq!(loaded.inference.intra_threads, Some(2));
    }
}
