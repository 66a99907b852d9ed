//! Scope policy and default locations for a run.

use crate::models::AirportClass;

/// Country whose airports and postal codes are matched
pub const TARGET_COUNTRY: &str = "US";

/// Airport classes kept by the filter. Medium and small airports are left out
/// so that only major hubs are candidates.
pub const ENABLED_AIRPORT_CLASSES: &[AirportClass] = &[AirportClass::Large];

/// State codes derived from region codes that are never processed as a state.
/// "U" is what undetermined territory regions ("US-U-A") resolve to.
pub const EXCLUDED_STATE_CODES: &[&str] = &["U"];

/// Separator between the country and state parts of a region code ("US-CA")
pub const REGION_SEPARATOR: char = '-';

pub const DEFAULT_AIRPORTS_PATH: &str = "Input/world-airports.csv";
pub const DEFAULT_POSTAL_CODES_PATH: &str = "Input/us_postal_codes.csv";
pub const DEFAULT_OUTPUT_DIR: &str = "Output";

/// File name of the cross-state table, overwritten on every run
pub const COMBINED_FILE_NAME: &str = "us_nearest_airports.csv";

/// Run timestamp prefix used for per-state file names (e.g. "2024-0315-")
pub const TIMESTAMP_FORMAT: &str = "%Y-%m%d-";
