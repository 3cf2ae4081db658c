//! CLI argument definitions.

use crate::cli::validators::{parse_percent, parse_timeout_secs};
use crate::config::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Plant disease diagnosis from leaf photos.
#[derive(Debug, Parser)]
#[command(name = "cropscan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Image files, directories, or http(s) URLs to diagnose.
    pub inputs: Vec<String>,

    /// Common options for diagnosis.
    #[command(flatten)]
    pub analyze: AnalyzeArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Manage models.
    Models {
        /// Models action to perform.
        #[command(subcommand)]
        action: ModelsAction,
    },
    /// Print the treatment for a disease label.
    Remedy {
        /// Disease label, matched case-insensitively.
        label: String,

        /// Path to the remediation CSV (overrides config).
        #[arg(long, env = "CROPSCAN_REMEDIES")]
        remedies: Option<PathBuf>,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Models subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ModelsAction {
    /// Load all three models and report their label counts.
    Check,
}

/// Arguments for diagnosis runs.
#[derive(Debug, Default, Args)]
pub struct AnalyzeArgs {
    /// Report format.
    #[arg(short, long, env = "CROPSCAN_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Append one CSV record per diagnosis to this file.
    #[arg(long, env = "CROPSCAN_HISTORY")]
    pub history: Option<PathBuf>,

    /// URL fetch timeout in seconds.
    #[arg(long, value_parser = parse_timeout_secs, env = "CROPSCAN_FETCH_TIMEOUT")]
    pub fetch_timeout: Option<u64>,

    /// Path to the corn ONNX model (overrides config).
    #[arg(long, env = "CROPSCAN_CORN_MODEL")]
    pub corn_model: Option<PathBuf>,

    /// Path to the corn labels file (overrides config).
    #[arg(long, env = "CROPSCAN_CORN_LABELS")]
    pub corn_labels: Option<PathBuf>,

    /// Path to the apple ONNX model (overrides config).
    #[arg(long, env = "CROPSCAN_APPLE_MODEL")]
    pub apple_model: Option<PathBuf>,

    /// Path to the apple labels file (overrides config).
    #[arg(long, env = "CROPSCAN_APPLE_LABELS")]
    pub apple_labels: Option<PathBuf>,

    /// Path to the general ONNX model (overrides config).
    #[arg(long, env = "CROPSCAN_GENERAL_MODEL")]
    pub general_model: Option<PathBuf>,

    /// Path to the general labels file (overrides config).
    #[arg(long, env = "CROPSCAN_GENERAL_LABELS")]
    pub general_labels: Option<PathBuf>,

    /// Minimum corn model confidence in percent (0-100).
    #[arg(long, value_parser = parse_percent, env = "CROPSCAN_CORN_THRESHOLD")]
    pub corn_threshold: Option<f32>,

    /// Minimum apple model confidence in percent (0-100).
    #[arg(long, value_parser = parse_percent, env = "CROPSCAN_APPLE_THRESHOLD")]
    pub apple_threshold: Option<f32>,

    /// Path to the remediation CSV (overrides config).
    #[arg(long, env = "CROPSCAN_REMEDIES")]
    pub remedies: Option<PathBuf>,

    /// Stop on first failed input.
    #[arg(long)]
    pub fail_fast: bool,

    /// Suppress progress output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace+ORT info, -vvv: full trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable the progress bar.
    #[arg(long)]
    pub no_progress: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_simple() {
        let cli = Cli::try_parse_from(["cropscan", "leaf.jpg"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.inputs, vec!["leaf.jpg".to_string()]);
        assert_eq!(cli.analyze.format, None);
    }

    #[test]
    fn test_cli_parse_with_options() {
        let cli = Cli::try_parse_from([
            "cropscan",
            "leaves/",
            "https://example.com/leaf.png",
            "-f",
            "json",
            "--history",
            "history.csv",
            "--corn-threshold",
            "85",
            "--fetch-timeout",
            "3",
            "-q",
            "--fail-fast",
        ])
        .unwrap();

        assert_eq!(cli.inputs.len(), 2);
        assert_eq!(cli.analyze.format, Some(OutputFormat::Json));
        assert_eq!(cli.analyze.history, Some(PathBuf::from("history.csv")));
        assert_eq!(cli.analyze.corn_threshold, Some(85.0));
        assert_eq!(cli.analyze.fetch_timeout, Some(3));
        assert!(cli.analyze.quiet);
        assert!(cli.analyze.fail_fast);
    }

    #[test]
    fn test_cli_parse_model_overrides() {
        let cli = Cli::try_parse_from([
            "cropscan",
            "leaf.jpg",
            "--corn-model",
            "corn.onnx",
            "--corn-labels",
            "corn.txt",
            "--general-model",
            "plant.onnx",
        ])
        .unwrap();

        assert_eq!(cli.analyze.corn_model, Some(PathBuf::from("corn.onnx")));
        assert_eq!(cli.analyze.corn_labels, Some(PathBuf::from("corn.txt")));
        assert_eq!(cli.analyze.general_model, Some(PathBuf::from("plant.onnx")));
        assert!(cli.analyze.apple_model.is_none());
    }

    #[test]
    fn test_cli_rejects_bad_values() {
        assert!(Cli::try_parse_from(["cropscan", "a.jpg", "--apple-threshold", "101"]).is_err());
        assert!(Cli::try_parse_from(["cropscan", "a.jpg", "--fetch-timeout", "0"]).is_err());
        assert!(Cli::try_parse_from(["cropscan", "a.jpg", "-f", "xml"]).is_err());
    }

    #[test]
    fn test_cli_parse_verbosity() {
        let cli = Cli::try_parse_from(["cropscan", "a.jpg", "-vv"]).unwrap();
        assert_eq!(cli.analyze.verbose, 2);
    }

    #[test]
    fn test_cli_parse_subcommands() {
        let cli = Cli::try_parse_from(["cropscan", "config", "show"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Config {
                action: ConfigAction::Show
            })
        ));

        let cli = Cli::try_parse_from(["cropscan", "models", "check"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Models {
                action: ModelsAction::Check
            })
        ));

        let cli = Cli::try_parse_from(["cropscan", "remedy", "Corn_Blight"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Remedy { ref label, .. }) if label == "Corn_Blight"));
    }
}
