//! Headless spaceship shooter match runner.
//!
//! Runs one match without a terminal front end and prints the final state
//! as JSON on stdout. Logs go to stderr.
//!
//! # Usage
//!
//! ```bash
//! # Built-in arena for ten seconds, bots only
//! cargo run -p shooter_headless
//!
//! # Custom match with a scripted player on actor 1
//! cargo run -p shooter_headless -- --config match.ron --autopilot 1 --seed 7
//!
//! # Tune log output
//! RUST_LOG=shooter_core=debug cargo run -p shooter_headless
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use shooter_core::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use shooter_headless::{run_match, RunConfig, RunError, DEFAULT_MATCH};

#[derive(Parser)]
#[command(name = "shooter_headless")]
#[command(about = "Headless spaceship shooter match runner")]
#[command(version)]
struct Cli {
    /// Match configuration file (RON); the built-in arena if omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Time limit for the match, in seconds
    #[arg(short, long, default_value = "10")]
    duration_secs: u64,

    /// Seed for bot and autopilot randomness
    #[arg(long)]
    seed: Option<u64>,

    /// Let a scripted player control this actor ID
    #[arg(long)]
    autopilot: Option<EntityId>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,

    /// Enable verbose logging to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // stdout carries the report, so logs go to stderr.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Headless run failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> std::result::Result<(), RunError> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading match configuration");
            EngineConfig::load(path)?
        }
        None => EngineConfig::from_ron_str(DEFAULT_MATCH)?,
    };
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    let run = RunConfig {
        duration: Duration::from_secs(cli.duration_secs),
        autopilot: cli.autopilot,
        seed: cli.seed,
        ..RunConfig::default()
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let report = runtime.block_on(run_match(config, &run))?;

    let json = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");

    // Bot and projectile tasks never finish on their own.
    runtime.shutdown_background();
    Ok(())
}
