//! Per-state candidate set sizes, without computing any distances
//!
//! Usage:
//!   cargo run --bin state_info -- [--airports <PATH>] [--postal-codes <PATH>] [--state <CODE>]...

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use us_nearest_airport::config::{DEFAULT_AIRPORTS_PATH, DEFAULT_POSTAL_CODES_PATH};
use us_nearest_airport::filter::filter_airports;
use us_nearest_airport::loader::{load_airports, load_postal_codes};
use us_nearest_airport::partition::StatePartition;

#[derive(Parser, Debug)]
#[command(name = "state_info")]
#[command(about = "Show how many airports and postal codes each state has")]
struct Args {
    #[arg(long, default_value = DEFAULT_AIRPORTS_PATH)]
    airports: PathBuf,

    #[arg(long, default_value = DEFAULT_POSTAL_CODES_PATH)]
    postal_codes: PathBuf,

    /// Only show these state codes
    #[arg(long = "state")]
    states: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let args = Args::parse();

    let airports = load_airports(&args.airports)?;
    let postal_codes = load_postal_codes(&args.postal_codes)?;
    info!(
        "Skipped {} airport rows and {} postal code rows",
        airports.skipped, postal_codes.skipped
    );

    let partition = StatePartition::new(filter_airports(airports.rows)?, postal_codes.rows);
    let states = if args.states.is_empty() {
        partition.states_in_scope()
    } else {
        args.states
    };

    println!("{:<6} {:>9} {:>9}", "State", "Airports", "Zipcodes");
    for state in &states {
        let airports = partition.airports_for(state).len();
        let zipcodes = partition.postal_codes_for(state).len();
        let marker = if airports == 0 { "  (no candidates)" } else { "" };
        println!("{:<6} {:>9} {:>9}{}", state, airports, zipcodes, marker);
    }

    Ok(())
}
