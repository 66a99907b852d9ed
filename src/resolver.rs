//! Nearest-airport matching for a single postal code.

use crate::distance::distance;
use crate::error::MatchError;
use crate::models::{Airport, CandidateMatch, NearestResult, PostalCode};

/// Every candidate ordered by distance, plus the winner
#[derive(Debug, Clone)]
pub struct Resolution {
    pub matches: Vec<CandidateMatch>,
    pub nearest: NearestResult,
}

/// Match one postal code against its state's candidate airports.
///
/// Matches are sorted ascending by distance with a stable sort, so among equal
/// distances the airport listed first in `candidates` wins.
pub fn resolve(postal_code: &PostalCode, candidates: &[Airport]) -> Result<Resolution, MatchError> {
    if candidates.is_empty() {
        return Err(MatchError::NoCandidate {
            state: postal_code.state_abbreviation.clone(),
        });
    }

    let mut matches = candidates
        .iter()
        .map(|airport| {
            let km = distance(
                postal_code.latitude,
                postal_code.longitude,
                airport.latitude,
                airport.longitude,
            )?;
            Ok(CandidateMatch::new(postal_code, airport, km))
        })
        .collect::<Result<Vec<_>, MatchError>>()?;

    matches.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    let nearest = matches[0].clone();

    Ok(Resolution { matches, nearest })
}
