//! Nearest large airport for every US postal code
//!
//! Usage:
//!   cargo run --release --bin nearest_airport -- [OPTIONS]
//!
//! Options:
//!   --airports <PATH>      World airports table (default: Input/world-airports.csv)
//!   --postal-codes <PATH>  US postal codes table (default: Input/us_postal_codes.csv)
//!   --output-dir <PATH>    Output directory (default: Output)
//!   --state <CODE>         Only process this state (repeatable)

use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use us_nearest_airport::config::{
    DEFAULT_AIRPORTS_PATH, DEFAULT_OUTPUT_DIR, DEFAULT_POSTAL_CODES_PATH, TIMESTAMP_FORMAT,
};
use us_nearest_airport::{run, RunConfig, RunSummary};

/// Nearest large airport per US postal code
#[derive(Parser, Debug)]
#[command(name = "nearest_airport")]
#[command(about = "Find the nearest large airport for every US postal code")]
struct Args {
    /// World airports CSV
    #[arg(long, default_value = DEFAULT_AIRPORTS_PATH)]
    airports: PathBuf,

    /// US postal codes CSV
    #[arg(long, default_value = DEFAULT_POSTAL_CODES_PATH)]
    postal_codes: PathBuf,

    /// Directory for per-postal-code, per-state and combined tables
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Only process these state codes
    #[arg(long = "state")]
    states: Vec<String>,
}

fn minutes(duration: std::time::Duration) -> f64 {
    (duration.as_secs_f64() / 60.0 * 1000.0).round() / 1000.0
}

fn print_summary(summary: &RunSummary) {
    println!("\n✅ Run complete!");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Duration:          {:>8} minutes", minutes(summary.elapsed));
    println!("States:            {:>8}", summary.outcomes.len());
    println!("Zipcodes:          {:>8}", summary.total_processed());
    println!("Skipped airports:  {:>8}", summary.skipped_airports);
    println!("Skipped zipcodes:  {:>8}", summary.skipped_postal_codes);
    println!("Combined rows:     {:>8}", summary.combined.rows);
    println!("Combined file:     {}", summary.combined.path.display());

    println!("\n⏱  Per-state duration:");
    for outcome in &summary.outcomes {
        let status = if outcome.is_success() { "ok" } else { "FAILED" };
        println!(
            "   {:<4} {:>8.3} min  {:>6} zipcodes  {}",
            outcome.state,
            minutes(outcome.elapsed),
            outcome.processed,
            status
        );
    }

    if summary.has_failures() {
        println!("\n❌ Failed states (not in combined output):");
        for (state, error) in summary.failed_states() {
            println!("   {}: {}", state, error);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let args = Args::parse();

    let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
    let config = RunConfig {
        airports_path: args.airports,
        postal_codes_path: args.postal_codes,
        output_dir: args.output_dir,
        timestamp,
        states: (!args.states.is_empty()).then_some(args.states),
    };
    info!("Reading airports from {:?}", config.airports_path);
    info!("Reading postal codes from {:?}", config.postal_codes_path);

    let summary = run(&config).await?;
    print_summary(&summary);

    if summary.has_failures() {
        let failed: Vec<&str> = summary.failed_states().map(|(state, _)| state).collect();
        bail!("{} state(s) failed: {}", failed.len(), failed.join(", "));
    }

    Ok(())
}
