//! End-to-end run: load, filter, partition, match per state, combine.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::config::{DEFAULT_AIRPORTS_PATH, DEFAULT_OUTPUT_DIR, DEFAULT_POSTAL_CODES_PATH};
use crate::error::MatchError;
use crate::filter::filter_airports;
use crate::loader::{load_airports, load_postal_codes};
use crate::partition::{select_states, StatePartition};
use crate::runner::{run_states, StateOutcome};
use crate::writer::{CombinedOutput, CsvResultWriter, ResultWriter};

/// Inputs and output location of one run
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub airports_path: PathBuf,
    pub postal_codes_path: PathBuf,
    pub output_dir: PathBuf,
    /// Prefix of per-state file names
    pub timestamp: String,
    /// Restrict the run to these states instead of every state found in the
    /// tables. Repeated and excluded codes are ignored.
    pub states: Option<Vec<String>>,
}

impl RunConfig {
    pub fn new(timestamp: impl Into<String>) -> Self {
        Self {
            airports_path: PathBuf::from(DEFAULT_AIRPORTS_PATH),
            postal_codes_path: PathBuf::from(DEFAULT_POSTAL_CODES_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            timestamp: timestamp.into(),
            states: None,
        }
    }
}

/// What a run produced, state by state
#[derive(Debug)]
pub struct RunSummary {
    /// One entry per state, in processing order, failed states included
    pub outcomes: Vec<StateOutcome>,
    pub combined: CombinedOutput,
    pub elapsed: Duration,
    /// Airport rows dropped at load because they did not parse
    pub skipped_airports: usize,
    /// Postal code rows dropped at load because they did not parse
    pub skipped_postal_codes: usize,
}

impl RunSummary {
    pub fn total_processed(&self) -> usize {
        self.outcomes.iter().map(|o| o.processed).sum()
    }

    pub fn failed_states(&self) -> impl Iterator<Item = (&str, &MatchError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.output.as_ref().err().map(|e| (o.state.as_str(), e)))
    }

    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(|o| !o.is_success())
    }
}

/// Run the whole computation.
///
/// Errors loading the tables abort the run. A failing state does not: it is
/// reported in the summary and left out of the combined table, which is built
/// only from the per-state tables written by this run.
pub async fn run(config: &RunConfig) -> Result<RunSummary, MatchError> {
    let started = Instant::now();

    let airports = load_airports(&config.airports_path)?;
    let postal_codes = load_postal_codes(&config.postal_codes_path)?;
    let (skipped_airports, skipped_postal_codes) = (airports.skipped, postal_codes.skipped);
    let partition = Arc::new(StatePartition::new(
        filter_airports(airports.rows)?,
        postal_codes.rows,
    ));
    info!(
        "Loaded {} in-scope airports and {} postal codes",
        partition.airport_count(),
        partition.postal_code_count()
    );

    let states = match &config.states {
        Some(requested) => select_states(requested),
        None => {
            // States without airports still run so they surface as NoCandidate failures
            let mut states = partition.states_in_scope();
            let uncovered = partition.states_without_airports();
            if !uncovered.is_empty() {
                warn!("No in-scope airports for postal code states: {}", uncovered.join(", "));
            }
            states.extend(uncovered);
            states
        }
    };
    info!("Calculating for the following states: {}", states.join(", "));

    let writer = Arc::new(CsvResultWriter::new(&config.output_dir, &config.timestamp));
    let outcomes = run_states(partition, states, Arc::clone(&writer)).await?;

    let manifest: Vec<PathBuf> = outcomes
        .iter()
        .filter_map(|o| o.output.as_ref().ok().cloned())
        .collect();
    let combined = writer.write_combined(&manifest)?;
    info!(
        "Wrote {} rows from {} states to {}",
        combined.rows,
        manifest.len(),
        combined.path.display()
    );

    Ok(RunSummary {
        outcomes,
        combined,
        elapsed: started.elapsed(),
        skipped_airports,
        skipped_postal_codes,
    })
}
