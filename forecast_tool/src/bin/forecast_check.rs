//! Dry-run a forecasting request: validate and normalize it without calling a model.
//!
//! Reads the request JSON from a file, or from stdin when no file is given,
//! and prints the prepared forecasting input or the error response.

use clap::Parser;
use forecast_tool::{EngineConfig, Failure, ForecastInput, ForecastOrchestrator};
use serde_json::{json, Value};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tensor_shape::CanonicalTensor;

#[derive(Parser, Debug)]
#[command(name = "forecast_check", about = "Validate and normalize a forecasting request")]
struct Args {
    /// Request JSON file (stdin if omitted)
    input: Option<PathBuf>,

    /// Engine configuration JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the maximum horizon
    #[arg(long)]
    max_horizon: Option<usize>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::from(2)
        }
    }
}

fn run(args: &Args) -> forecast_tool::error::Result<bool> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };
    if let Some(max_horizon) = args.max_horizon {
        config = config.with_max_horizon(max_horizon)?;
    }
    tracing::info!("Max horizon: {}", config.max_horizon);

    let contents = match &args.input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    let raw: Value = serde_json::from_str(&contents)?;

    // Dry run: the backend is never reached through `prepare`
    let backend = |_: &ForecastInput| -> Result<CanonicalTensor, Failure> {
        Err(Failure::from("no forecasting backend in dry-run mode"))
    };
    let orchestrator = ForecastOrchestrator::new(&backend, config);

    let (ok, output) = match orchestrator.prepare(&raw) {
        Ok(prepared) => (true, json!({ "status": "ready", "prepared": prepared })),
        Err(error) => (false, json!({ "status": "error", "error": error })),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(ok)
}
