//! Cropscan - plant disease diagnosis CLI tool.
//!
//! This crate screens leaf photos with a green-pixel plant filter, classifies
//! them through a corn, apple and general model cascade, and looks up
//! treatment advice for the predicted disease.

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod imaging;
pub mod inference;
pub mod output;
pub mod pipeline;
pub mod remediation;

use clap::Parser;
use cli::{AnalyzeArgs, Cli, Command};
use config::{
    Config, apply_cli_overrides, config_file_path, load_default_config, save_default_config,
    validate_config, validate_model_config,
};
use inference::{ModelKind, ModelRegistry, OnnxModelLoader, Status};
use output::{HistoryWriter, create_reporter, progress};
use pipeline::{Detector, Diagnosis, ImageLoader, ImageSource, collect_inputs};
use remediation::RemediationTable;
use std::path::PathBuf;
use tracing::{error, info, warn};

pub use error::{Error, Result};

/// Main entry point for cropscan CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.analyze.verbose, cli.analyze.quiet);

    let config = load_default_config()?;

    if let Some(command) = cli.command {
        return handle_command(command, &cli.analyze, &config);
    }

    if cli.inputs.is_empty() {
        cli::help::print_smart_help(&config);
        return Ok(());
    }

    analyze_inputs(&cli.inputs, &cli.analyze, &config)
}

/// Per-run outcome counters.
#[derive(Debug, Default)]
struct RunSummary {
    diagnosed: usize,
    rejected: usize,
    unavailable: usize,
    errors: usize,
}

impl RunSummary {
    fn record(&mut self, status: Status) {
        match status {
            Status::PlantRejected => self.rejected += 1,
            Status::ModelUnavailable => self.unavailable += 1,
            Status::Corn | Status::Apple | Status::General => self.diagnosed += 1,
        }
    }
}

/// Diagnose the given inputs with the given options.
fn analyze_inputs(inputs: &[String], args: &AnalyzeArgs, config: &Config) -> Result<()> {
    use std::time::Instant;

    let total_start = Instant::now();

    let sources = collect_inputs(inputs)?;
    if sources.is_empty() {
        return Err(Error::NoValidInputs);
    }

    info!("Found {} image(s) to diagnose", sources.len());

    let config = apply_cli_overrides(config, args)?;
    validate_config(&config)?;

    let detector = Detector::from_config(&config)?;
    let loader = ImageLoader::new(&config.fetch)?;

    let format = args.format.unwrap_or_default();
    let mut reporter = create_reporter(format, Box::new(std::io::stdout()));
    let mut history = args
        .history
        .as_deref()
        .map(HistoryWriter::open)
        .transpose()?;

    let progress_enabled = !args.quiet && !args.no_progress;
    let input_progress = progress::create_input_progress(sources.len(), progress_enabled);

    let mut summary = RunSummary::default();

    for source in &sources {
        match diagnose_source(&loader, &detector, source) {
            Ok(diagnosis) => {
                info!(
                    "{}: {} ({:.2}%)",
                    diagnosis.source, diagnosis.result.label, diagnosis.result.confidence
                );
                summary.record(diagnosis.result.status);

                match &input_progress {
                    Some(pb) => pb.suspend(|| reporter.write_diagnosis(&diagnosis))?,
                    None => reporter.write_diagnosis(&diagnosis)?,
                }
                if let Some(history) = history.as_mut() {
                    history.append(&diagnosis)?;
                }
            }
            Err(e) => {
                error!("Failed to diagnose {}: {}", source, e);
                summary.errors += 1;
                if args.fail_fast {
                    progress::finish_progress(input_progress, "Failed");
                    reporter.finalize()?;
                    return Err(e);
                }
            }
        }
        progress::inc_progress(input_progress.as_ref());
    }

    progress::finish_progress(input_progress, "Complete");
    reporter.finalize()?;

    let total_duration = total_start.elapsed().as_secs_f64();
    info!(
        "Complete: {} diagnosed, {} not plants, {} without models, {} errors in {:.2}s",
        summary.diagnosed, summary.rejected, summary.unavailable, summary.errors, total_duration
    );

    if summary.errors > 0 {
        warn!("{} input(s) had errors", summary.errors);
    }

    Ok(())
}

fn diagnose_source(
    loader: &ImageLoader,
    detector: &Detector,
    source: &ImageSource,
) -> Result<Diagnosis> {
    let image = loader.load(source)?;
    detector.diagnose(&image, &source.to_string())
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    // ORT logging is suppressed by default; it is noisy about provider fallback.
    // Use -v to see ORT warnings, -vv for info, -vvv for full trace.
    let filter_str = if quiet {
        "warn,ort=off".to_string()
    } else {
        match verbose {
            0 => "info,ort=off".to_string(),
            1 => "debug,ort=warn".to_string(),
            2 => "trace,ort=info".to_string(),
            _ => "trace".to_string(),
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    // Reports go to stdout, so logs stay on stderr.
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_command(command: Command, args: &AnalyzeArgs, config: &Config) -> Result<()> {
    match command {
        Command::Config { action } => handle_config_command(action),
        Command::Models { action } => {
            // Model path flags given before the subcommand apply to the check.
            let config = apply_cli_overrides(config, args)?;
            handle_models_command(action, &config)
        }
        Command::Remedy { label, remedies } => handle_remedy_command(&label, remedies, config),
    }
}

#[allow(clippy::print_stdout)]
fn handle_config_command(action: cli::ConfigAction) -> Result<()> {
    use cli::ConfigAction;

    match action {
        ConfigAction::Init => {
            let path = config_file_path()?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let saved_path = save_default_config(&Config::default())?;
                println!("Created configuration file: {}", saved_path.display());
                println!("\nNext steps:");
                println!("  Add [models.corn], [models.apple] and [models.general] entries");
                println!("  cropscan models check");
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_default_config()?;
            let rendered = toml::to_string_pretty(&config)
                .map_err(|e| Error::ConfigSerialize { source: e })?;
            println!("{rendered}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = config_file_path()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

#[allow(clippy::print_stdout)]
fn handle_models_command(action: cli::ModelsAction, config: &Config) -> Result<()> {
    use cli::ModelsAction;

    match action {
        ModelsAction::Check => {
            let loader = OnnxModelLoader::new(&config.models, config.inference);

            for kind in ModelKind::CASCADE_ORDER {
                let Some(model) = config.models.get(kind) else {
                    return Err(Error::ModelNotConfigured { model: kind.name() });
                };
                validate_model_config(model)?;
            }

            let registry = ModelRegistry::new(loader);
            let models = registry
                .models()
                .map_err(|message| Error::ModelsUnavailable {
                    message: message.to_string(),
                })?;

            for kind in ModelKind::CASCADE_ORDER {
                let handle = models.get(kind);
                println!("  {kind}: OK ({} labels)", handle.labels().len());
            }
            Ok(())
        }
    }
}

#[allow(clippy::print_stdout)]
fn handle_remedy_command(label: &str, remedies: Option<PathBuf>, config: &Config) -> Result<()> {
    let path = remedies
        .or_else(|| config.remediation.path.clone())
        .ok_or_else(|| Error::ConfigValidation {
            message: "no remediation table configured (set [remediation] path or pass --remedies)"
                .to_string(),
        })?;

    let table = RemediationTable::load(&path)?;
    let remedy = table.resolve(label);

    println!("Temporary: {}", remedy.temporary);
    println!("Permanent: {}", remedy.permanent);
    Ok(())
}
