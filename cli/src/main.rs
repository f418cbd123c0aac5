//! Command-line entry point
//!
//! Reads a case file, simulates every case to completion, and prints the
//! report (text by default, JSON with `--json`).

use anyhow::{Context, Result};
use clap::Parser;
use diffusion_simulator_core::{format_report, parse_cases, CaseResult, SimulationDriver};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "diffusion-sim", version, about = "Currency diffusion grid simulator")]
struct Cli {
    /// Path to the input file holding the test cases
    input: PathBuf,

    /// Emit per-case results as JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let started = Instant::now();
    let text = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("reading input file {}", cli.input.display()))?;
    let cases = parse_cases(&text).context("parsing test cases")?;
    tracing::info!(cases = cases.len(), "input parsed");

    let mut results: Vec<CaseResult> = Vec::with_capacity(cases.len());
    for (index, case) in cases.iter().enumerate() {
        let grid = case
            .build_grid()
            .with_context(|| format!("building grid for case {}", index + 1))?;
        results.push(SimulationDriver::new(grid).into_results());
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print!("{}", format_report(&results));
    }

    tracing::info!(
        cases = results.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "simulation finished"
    );
    Ok(())
}
