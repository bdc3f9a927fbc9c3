//! Race reward CLI
//!
//! Scores one telemetry snapshot the way the training harness would, for
//! checking reward tweaks offline:
//! - `score` reads a JSON snapshot from a file or stdin and prints the reward
//! - `terms` lists the registered scoring terms of a variant

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use race_reward_core::{RewardComposer, RewardConfig, RewardFunction, Telemetry, Variant};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "race-reward", about = "Score race-car telemetry snapshots")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the reward for one telemetry snapshot
    Score {
        /// Telemetry JSON file (reads stdin when omitted)
        telemetry: Option<PathBuf>,

        /// Term set to use (centerline or track-keeping)
        #[arg(long, default_value_t = Variant::Centerline)]
        variant: Variant,

        /// Reward configuration JSON, overrides --variant
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print each term's contribution as JSON
        #[arg(long)]
        detailed: bool,
    },

    /// List the scoring terms of a term set
    Terms {
        /// Term set to list (centerline or track-keeping)
        #[arg(long, default_value_t = Variant::Centerline)]
        variant: Variant,

        /// Reward configuration JSON, overrides --variant
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn load_config(variant: Variant, path: Option<&Path>) -> Result<RewardConfig> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            let config = RewardConfig::from_json(&json)
                .with_context(|| format!("Invalid config {}", path.display()))?;
            info!("Loaded {} config from {}", config.variant, path.display());
            Ok(config)
        }
        None => Ok(RewardConfig::for_variant(variant)),
    }
}

fn load_telemetry(path: Option<&Path>) -> Result<Telemetry> {
    let json = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read telemetry {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read telemetry from stdin")?;
            buf
        }
    };
    debug!("Read {} bytes of telemetry", json.len());
    Telemetry::from_json(&json).context("Invalid telemetry snapshot")
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Score {
            telemetry,
            variant,
            config,
            detailed,
        } => {
            let config = load_config(variant, config.as_deref())?;
            let composer = RewardComposer::from_config(&config)?;
            let telemetry = load_telemetry(telemetry.as_deref())?;

            if detailed {
                let reward = composer.compute(&telemetry)?;
                println!("{}", serde_json::to_string_pretty(&reward)?);
            } else {
                println!("{}", composer.compose(&telemetry)?);
            }
        }
        Commands::Terms { variant, config } => {
            let config = load_config(variant, config.as_deref())?;
            let composer = RewardComposer::from_config(&config)?;
            println!(
                "{} (baseline {})",
                config.variant,
                composer.terms().baseline()
            );
            for def in composer.components() {
                let range = match def.range {
                    Some([low, high]) => format!("[{low}, {high}]"),
                    None => "unbounded".to_string(),
                };
                println!(
                    "  {:<28} x{:<4} {:<10} {}",
                    def.name,
                    def.default_weight,
                    range,
                    def.description.unwrap_or_default()
                );
            }
        }
    }

    Ok(())
}
