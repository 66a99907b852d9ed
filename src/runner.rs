//! Drives the resolver over whole states.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::error::MatchError;
use crate::models::{Airport, NearestResult, PostalCode};
use crate::partition::StatePartition;
use crate::resolver::resolve;
use crate::writer::ResultWriter;

/// Bookkeeping for one processed state, recorded whether or not it succeeded
#[derive(Debug)]
pub struct StateOutcome {
    pub state: String,
    /// Postal codes that received a nearest airport before the state finished or failed
    pub processed: usize,
    pub elapsed: Duration,
    /// Per-state table on success
    pub output: Result<PathBuf, MatchError>,
}

impl StateOutcome {
    pub fn is_success(&self) -> bool {
        self.output.is_ok()
    }
}

/// Resolve every postal code of `state` against the state's airports.
///
/// The full candidate list of each postal code is written before its winner is
/// recorded. The per-state table is only written when every postal code resolved.
pub fn run_state<W>(
    state: &str,
    postal_codes: &[PostalCode],
    airports: &[Airport],
    writer: &W,
) -> StateOutcome
where
    W: ResultWriter + ?Sized,
{
    let started = Instant::now();
    info!(
        "Calculating for {} with {} zipcodes and {} airports...",
        state,
        postal_codes.len(),
        airports.len()
    );

    let mut nearest = Vec::with_capacity(postal_codes.len());
    let output = collect_nearest(state, postal_codes, airports, writer, &mut nearest)
        .and_then(|()| writer.write_state(state, &nearest));

    let outcome = StateOutcome {
        state: state.to_string(),
        processed: nearest.len(),
        elapsed: started.elapsed(),
        output,
    };

    match &outcome.output {
        Ok(_) => info!("Done calculating for {} zipcodes of {}", outcome.processed, state),
        Err(e) => warn!(
            "State {} failed after {} zipcodes: {}",
            state, outcome.processed, e
        ),
    }
    outcome
}

fn collect_nearest<W>(
    state: &str,
    postal_codes: &[PostalCode],
    airports: &[Airport],
    writer: &W,
    nearest: &mut Vec<NearestResult>,
) -> Result<(), MatchError>
where
    W: ResultWriter + ?Sized,
{
    if airports.is_empty() {
        return Err(MatchError::NoCandidate {
            state: state.to_string(),
        });
    }

    for postal_code in postal_codes {
        let resolution = resolve(postal_code, airports)?;
        writer.write_candidates(state, &postal_code.code, &resolution.matches)?;
        nearest.push(resolution.nearest);
    }
    Ok(())
}

/// Run every listed state on its own blocking worker and wait for all of them.
///
/// States share no mutable data; outcomes come back in the order of `states`
/// regardless of which worker finished first.
pub async fn run_states<W>(
    partition: Arc<StatePartition>,
    states: Vec<String>,
    writer: Arc<W>,
) -> Result<Vec<StateOutcome>, MatchError>
where
    W: ResultWriter + 'static,
{
    let mut workers = JoinSet::new();

    for (index, state) in states.into_iter().enumerate() {
        let partition = Arc::clone(&partition);
        let writer = Arc::clone(&writer);
        workers.spawn_blocking(move || {
            let airports = partition.airports_for(&state);
            let postal_codes = partition.postal_codes_for(&state);
            (index, run_state(&state, &postal_codes, &airports, &*writer))
        });
    }

    let mut outcomes = Vec::with_capacity(workers.len());
    while let Some(joined) = workers.join_next().await {
        match joined {
            Ok(entry) => outcomes.push(entry),
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => return Err(MatchError::Worker(e.to_string())),
        }
    }

    outcomes.sort_by_key(|(index, _)| *index);
    Ok(outcomes.into_iter().map(|(_, outcome)| outcome).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AirportClass, CandidateMatch};
    use crate::writer::CombinedOutput;
    use std::sync::Mutex;

    /// Records writes in memory, optionally failing on one postal code
    #[derive(Default)]
    struct RecordingWriter {
        candidates: Mutex<Vec<(String, String, usize)>>,
        states: Mutex<Vec<(String, Vec<NearestResult>)>>,
        fail_on: Option<String>,
    }

    impl ResultWriter for RecordingWriter {
        fn write_candidates(
            &self,
            state: &str,
            postal_code: &str,
            matches: &[CandidateMatch],
        ) -> Result<PathBuf, MatchError> {
            if self.fail_on.as_deref() == Some(postal_code) {
                return Err(MatchError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "disk full",
                )));
            }
            self.candidates.lock().unwrap().push((
                state.to_string(),
                postal_code.to_string(),
                matches.len(),
            ));
            Ok(PathBuf::from(format!("{}/{}", state, postal_code)))
        }

        fn write_state(
            &self,
            state: &str,
            nearest: &[NearestResult],
        ) -> Result<PathBuf, MatchError> {
            self.states
                .lock()
                .unwrap()
                .push((state.to_string(), nearest.to_vec()));
            Ok(PathBuf::from(state))
        }

        fn write_combined(&self, manifest: &[PathBuf]) -> Result<CombinedOutput, MatchError> {
            Ok(CombinedOutput {
                path: PathBuf::from("combined"),
                rows: manifest.len(),
            })
        }
    }

    fn airport(ident: &str, state: &str, latitude: f64, longitude: f64) -> Airport {
        Airport {
            ident: ident.to_string(),
            country: "US".to_string(),
            region: format!("US-{}", state),
            class: AirportClass::Large,
            state: state.to_string(),
            latitude,
            longitude,
        }
    }

    fn postal_code(code: &str, state: &str, latitude: f64, longitude: f64) -> PostalCode {
        PostalCode {
            code: code.to_string(),
            country: "US".to_string(),
            state_abbreviation: state.to_string(),
            state_name: String::new(),
            county: String::new(),
            latitude,
            longitude,
        }
    }

    #[test]
    fn test_run_state_writes_candidates_then_state() {
        let writer = RecordingWriter::default();
        let airports = vec![airport("A", "CA", 34.0, -118.2), airport("B", "CA", 37.6, -122.3)];
        let postal_codes = vec![
            postal_code("90001", "CA", 34.1, -118.3),
            postal_code("94101", "CA", 37.7, -122.4),
        ];

        let outcome = run_state("CA", &postal_codes, &airports, &writer);

        assert!(outcome.is_success());
        assert_eq!(outcome.processed, 2);

        let candidates = writer.candidates.lock().unwrap();
        assert_eq!(candidates.len(), 2);
        assert!(candidates.iter().all(|(state, _, count)| state == "CA" && *count == 2));

        let states = writer.states.lock().unwrap();
        assert_eq!(states.len(), 1);
        let nearest: Vec<&str> = states[0].1.iter().map(|n| n.airport.as_str()).collect();
        assert_eq!(nearest, vec!["A", "B"]);
    }

    #[test]
    fn test_run_state_without_airports_writes_nothing() {
        let writer = RecordingWriter::default();
        let postal_codes = vec![postal_code("96799", "AS", -14.3, -170.7)];

        let outcome = run_state("AS", &postal_codes, &[], &writer);

        assert!(matches!(
            outcome.output,
            Err(MatchError::NoCandidate { ref state }) if state == "AS"
        ));
        assert_eq!(outcome.processed, 0);
        assert!(writer.candidates.lock().unwrap().is_empty());
        assert!(writer.states.lock().unwrap().is_empty());
    }

    #[test]
    fn test_partial_failure_counts_resolved_postal_codes() {
        let writer = RecordingWriter {
            fail_on: Some("10003".to_string()),
            ..Default::default()
        };
        let airports = vec![airport("KJFK", "NY", 40.64, -73.78)];
        let postal_codes = vec![
            postal_code("10001", "NY", 40.75, -73.99),
            postal_code("10002", "NY", 40.71, -73.98),
            postal_code("10003", "NY", 40.73, -73.98),
            postal_code("10004", "NY", 40.70, -74.01),
        ];

        let outcome = run_state("NY", &postal_codes, &airports, &writer);

        assert!(!outcome.is_success());
        assert_eq!(outcome.processed, 2);
        assert!(writer.states.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_run_states_keeps_requested_order() {
        let partition = Arc::new(StatePartition::new(
            vec![
                airport("KLAX", "CA", 33.94, -118.41),
                airport("KLAS", "NV", 36.08, -115.15),
                airport("KSEA", "WA", 47.45, -122.31),
            ],
            vec![
                postal_code("90001", "CA", 33.97, -118.25),
                postal_code("89101", "NV", 36.17, -115.14),
                postal_code("98101", "WA", 47.61, -122.33),
                postal_code("98102", "WA", 47.63, -122.32),
                postal_code("96799", "AS", -14.3, -170.7),
            ],
        ));
        let writer = Arc::new(RecordingWriter::default());
        let states = vec!["WA".to_string(), "AS".to_string(), "CA".to_string(), "NV".to_string()];

        let outcomes = run_states(partition, states, Arc::clone(&writer)).await.unwrap();

        let order: Vec<&str> = outcomes.iter().map(|o| o.state.as_str()).collect();
        assert_eq!(order, vec!["WA", "AS", "CA", "NV"]);
        let processed: Vec<usize> = outcomes.iter().map(|o| o.processed).collect();
        assert_eq!(processed, vec![2, 0, 1, 1]);
        assert!(!outcomes[1].is_success());
        assert_eq!(writer.states.lock().unwrap().len(), 3);
    }
}
