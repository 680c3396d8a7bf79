// SPDX-License-Identifier: MIT OR Apache-2.0
//! microlens-validate CLI
//!
//! Validates microlensing solution submissions: parameter completeness,
//! physical consistency, uncertainties, tiers, and relative probabilities.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use microlens_common::{ValidationConfig, load_validation_config};
use microlens_schema::{Registry, TierConfig, load_tier_config};
use microlens_validation::SubmissionValidator;
use tracing::{debug, error};

mod commands;
mod exit;
mod output;

use commands::{TiersCommand, ValidateCommand};
use exit::EXIT_USAGE;
use output::{OutputConfig, OutputFormat};

/// Microlensing submission validator
#[derive(Parser)]
#[command(name = "microlens-validate")]
#[command(about = "Validate microlensing solution submissions")]
#[command(long_about = r#"
Checks every solution in a submission for parameter completeness, physical
self-consistency and well-formed uncertainties, verifies event identifiers
against the submission tier, and derives relative probabilities for each
event's active solutions.

Examples:
  # Validate a submission
  microlens-validate validate submission.json

  # Machine-readable output with custom thresholds
  microlens-validate --format json --config validation.yaml validate submission.json

  # Persist computed probabilities
  microlens-validate validate submission.json --fill-probabilities filled.json

  # List the available tiers
  microlens-validate tiers
"#)]
#[command(version)]
struct Cli {
    /// Validation thresholds file (YAML)
    #[arg(short, long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Tier definitions file (YAML); replaces the built-in tiers
    #[arg(long, value_name = "PATH", global = true)]
    tiers: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, value_name = "FORMAT", global = true, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, value_name = "LEVEL", global = true, default_value = "warn")]
    log_level: String,

    /// Log format (compact, pretty, json)
    #[arg(long, value_name = "FORMAT", global = true, default_value = "compact")]
    log_format: String,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a submission file
    #[command(alias = "check")]
    Validate(ValidateCommand),

    /// List configured tiers
    Tiers(TiersCommand),
}

fn main() {
    let cli = Cli::parse();
    setup_logging(&cli.log_level, &cli.log_format);

    let code = match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            error!("Command failed: {}", e);
            for cause in e.chain().skip(1) {
                error!("  Caused by: {}", cause);
            }
            eprintln!("error: {e:#}");
            EXIT_USAGE
        }
    };
    std::process::exit(code);
}

fn run(cli: &Cli) -> Result<i32> {
    let output = OutputConfig::new(cli.format, !cli.no_color);
    let tiers = load_tiers(cli)?;
    match &cli.command {
        Commands::Validate(cmd) => {
            let config = load_config(cli)?;
            let validator = SubmissionValidator::new(Registry::builtin().clone(), tiers, config);
            cmd.execute(&validator, &output)
        }
        Commands::Tiers(cmd) => cmd.execute(&tiers, &output),
    }
}

fn load_config(cli: &Cli) -> Result<ValidationConfig> {
    match &cli.config {
        Some(path) => {
            let config = load_validation_config(path).context("Failed to load validation config")?;
            debug!(path = %path.display(), ?config, "loaded validation config");
            Ok(config)
        }
        None => Ok(ValidationConfig::default()),
    }
}

fn load_tiers(cli: &Cli) -> Result<TierConfig> {
    match &cli.tiers {
        Some(path) => {
            let tiers = load_tier_config(path).context("Failed to load tier definitions")?;
            debug!(path = %path.display(), count = tiers.tiers.len(), "loaded tier definitions");
            Ok(tiers)
        }
        None => Ok(TierConfig::builtin().clone()),
    }
}

/// Install the tracing subscriber. Logs go to stderr so JSON output on
/// stdout stays parseable.
fn setup_logging(level: &str, format: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    match format {
        "json" => subscriber.json().init(),
        "pretty" => subscriber.pretty().init(),
        _ => subscriber.compact().init(),
    }
}
