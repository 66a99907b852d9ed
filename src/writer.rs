//! Persistence of match results as CSV tables.

use std::fs;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;
use tracing::debug;

use crate::config::COMBINED_FILE_NAME;
use crate::error::MatchError;
use crate::models::{CandidateMatch, NearestResult};

/// Location and size of the combined cross-state table
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedOutput {
    pub path: PathBuf,
    pub rows: usize,
}

/// Sink for the three kinds of output a run produces.
///
/// Implementations are shared by the per-state workers, so each state must
/// only ever touch paths of its own.
pub trait ResultWriter: Send + Sync {
    /// Persist every candidate of one postal code, ordered by distance
    fn write_candidates(
        &self,
        state: &str,
        postal_code: &str,
        matches: &[CandidateMatch],
    ) -> Result<PathBuf, MatchError>;

    /// Persist the nearest airport of every postal code of one state
    fn write_state(&self, state: &str, nearest: &[NearestResult]) -> Result<PathBuf, MatchError>;

    /// Concatenate the listed per-state tables into the combined table,
    /// replacing any previous one
    fn write_combined(&self, manifest: &[PathBuf]) -> Result<CombinedOutput, MatchError>;
}

/// Writes results below an output directory:
///
/// - `{dir}/{state}/{postal_code}_all airports.csv`
/// - `{dir}/{timestamp}{state}_nearest_airport.csv`
/// - `{dir}/us_nearest_airports.csv`
#[derive(Debug, Clone)]
pub struct CsvResultWriter {
    output_dir: PathBuf,
    timestamp: String,
}

impl CsvResultWriter {
    pub fn new(output_dir: impl Into<PathBuf>, timestamp: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            timestamp: timestamp.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn candidates_path(&self, state: &str, postal_code: &str) -> PathBuf {
        self.output_dir
            .join(state)
            .join(format!("{}_all airports.csv", postal_code))
    }

    pub fn state_path(&self, state: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}{}_nearest_airport.csv", self.timestamp, state))
    }

    pub fn combined_path(&self) -> PathBuf {
        self.output_dir.join(COMBINED_FILE_NAME)
    }
}

impl ResultWriter for CsvResultWriter {
    fn write_candidates(
        &self,
        state: &str,
        postal_code: &str,
        matches: &[CandidateMatch],
    ) -> Result<PathBuf, MatchError> {
        let path = self.candidates_path(state, postal_code);
        write_rows(&path, matches)?;
        Ok(path)
    }

    fn write_state(&self, state: &str, nearest: &[NearestResult]) -> Result<PathBuf, MatchError> {
        let path = self.state_path(state);
        write_rows(&path, nearest)?;
        debug!("Wrote {} nearest airports to {}", nearest.len(), path.display());
        Ok(path)
    }

    fn write_combined(&self, manifest: &[PathBuf]) -> Result<CombinedOutput, MatchError> {
        let path = self.combined_path();
        fs::create_dir_all(&self.output_dir)?;
        let mut writer = WriterBuilder::new().has_headers(false).from_path(&path)?;

        let mut header_written = false;
        let mut rows = 0;
        for source in manifest {
            let mut reader = ReaderBuilder::new().has_headers(true).from_path(source)?;
            let headers = reader.byte_headers()?.clone();
            if headers.is_empty() {
                continue;
            }
            if !header_written {
                writer.write_byte_record(&headers)?;
                header_written = true;
            }
            for record in reader.byte_records() {
                writer.write_byte_record(&record?)?;
                rows += 1;
            }
        }
        writer.flush()?;

        Ok(CombinedOutput { path, rows })
    }
}

fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), MatchError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut writer = WriterBuilder::new().has_headers(true).from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
