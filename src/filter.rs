//! Reduces the raw airport table to in-scope airports.

use tracing::debug;

use crate::config::{ENABLED_AIRPORT_CLASSES, REGION_SEPARATOR, TARGET_COUNTRY};
use crate::error::MatchError;
use crate::models::{Airport, AirportRecord};

/// Keep airports of the target country and an enabled class, deriving each
/// one's state code from its region code.
///
/// A kept airport whose region code has no state component fails the whole
/// filter rather than being skipped.
pub fn filter_airports(records: Vec<AirportRecord>) -> Result<Vec<Airport>, MatchError> {
    let total = records.len();
    let mut airports = Vec::new();

    for record in records {
        if record.iso_country != TARGET_COUNTRY
            || !ENABLED_AIRPORT_CLASSES.contains(&record.class())
        {
            continue;
        }

        let state = state_code(&record.iso_region).ok_or_else(|| {
            MatchError::Data(format!(
                "airport {} has region code '{}' without a state component",
                record.ident, record.iso_region
            ))
        })?;

        airports.push(Airport {
            state: state.to_string(),
            class: record.class(),
            ident: record.ident,
            country: record.iso_country,
            region: record.iso_region,
            latitude: record.latitude_deg,
            longitude: record.longitude_deg,
        });
    }

    debug!("Kept {} of {} airports", airports.len(), total);
    Ok(airports)
}

/// Second component of a region code: "US-CA" -> "CA", "US-U-A" -> "U"
pub fn state_code(region: &str) -> Option<&str> {
    region
        .split(REGION_SEPARATOR)
        .nth(1)
        .filter(|state| !state.is_empty())
}
