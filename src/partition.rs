//! Splits the loaded tables into per-state candidate sets.

use std::collections::HashSet;

use tracing::warn;

use crate::config::EXCLUDED_STATE_CODES;
use crate::models::{Airport, PostalCode};

/// Distinct state codes in first-seen order, without empty codes and the
/// excluded sentinel codes.
fn distinct_states<'a>(states: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    states
        .filter(|state| !state.is_empty() && !EXCLUDED_STATE_CODES.contains(state))
        .filter(|state| seen.insert(*state))
        .map(str::to_string)
        .collect()
}

/// Distinct state codes of the in-scope airports, in first-seen order,
/// without the excluded sentinel codes.
pub fn states_in_scope(airports: &[Airport]) -> Vec<String> {
    distinct_states(airports.iter().map(|a| a.state.as_str()))
}

/// Normalize a user-supplied state list: repeated codes are kept once, in
/// first-seen order, and excluded sentinel codes are dropped with a warning.
pub fn select_states(requested: &[String]) -> Vec<String> {
    for state in requested {
        if EXCLUDED_STATE_CODES.contains(&state.as_str()) {
            warn!("Ignoring excluded state code {}", state);
        }
    }
    distinct_states(requested.iter().map(String::as_str))
}

/// Immutable airport and postal code tables for one run
#[derive(Debug, Default)]
pub struct StatePartition {
    airports: Vec<Airport>,
    postal_codes: Vec<PostalCode>,
}

impl StatePartition {
    pub fn new(airports: Vec<Airport>, postal_codes: Vec<PostalCode>) -> Self {
        Self {
            airports,
            postal_codes,
        }
    }

    pub fn states_in_scope(&self) -> Vec<String> {
        states_in_scope(&self.airports)
    }

    /// Airports whose derived state code equals `state` exactly
    pub fn airports_for(&self, state: &str) -> Vec<Airport> {
        self.airports
            .iter()
            .filter(|a| a.state == state)
            .cloned()
            .collect()
    }

    /// Postal codes whose state abbreviation equals `state` exactly
    pub fn postal_codes_for(&self, state: &str) -> Vec<PostalCode> {
        self.postal_codes
            .iter()
            .filter(|p| p.state_abbreviation == state)
            .cloned()
            .collect()
    }

    /// States present in the postal code table that have no in-scope airport,
    /// in first-seen order, excluded sentinel codes left out
    pub fn states_without_airports(&self) -> Vec<String> {
        let covered = self.states_in_scope();
        distinct_states(self.postal_codes.iter().map(|p| p.state_abbreviation.as_str()))
            .into_iter()
            .filter(|state| !covered.contains(state))
            .collect()
    }

    pub fn airport_count(&self) -> usize {
        self.airports.len()
    }

    pub fn postal_code_count(&self) -> usize {
        self.postal_codes.len()
    }
}
