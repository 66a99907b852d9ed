use std::path::PathBuf;

/// Errors raised while loading tables, matching postal codes or writing results.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("Malformed data: {0}")]
    Data(String),
    #[error("Missing required column '{column}' in {table}")]
    MissingColumn { table: String, column: String },
    #[error("No in-scope airports for state {state}")]
    NoCandidate { state: String },
    #[error("Haversine term {term} outside [0, 1] for ({lat1}, {lon1}) -> ({lat2}, {lon2})")]
    NumericDomain {
        term: f64,
        lat1: f64,
        lon1: f64,
        lat2: f64,
        lon2: f64,
    },
    #[error("Input table not found at: {0}")]
    NotFound(PathBuf),
    #[error("State worker did not complete: {0}")]
    Worker(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
