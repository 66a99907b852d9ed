//! Great-circle distance on a spherical Earth.

use crate::error::MatchError;

/// Mean Earth radius used by the haversine formula
pub const EARTH_RADIUS_KM: f64 = 6371.0;

const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Haversine term `a` for two points given in degrees.
///
/// For valid coordinates this lies in [0, 1]; rounding can push it just past 1
/// for nearly antipodal points.
pub fn haversine_term(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    0.5 - ((lat2 - lat1) * DEG_TO_RAD).cos() / 2.0
        + (lat1 * DEG_TO_RAD).cos()
            * (lat2 * DEG_TO_RAD).cos()
            * (1.0 - ((lon2 - lon1) * DEG_TO_RAD).cos())
            / 2.0
}

/// Distance in kilometers between two (latitude, longitude) points.
///
/// The haversine term is not clamped: a term outside [0, 1] (or NaN from
/// non-finite input) is reported as [`MatchError::NumericDomain`].
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Result<f64, MatchError> {
    let term = haversine_term(lat1, lon1, lat2, lon2);
    if !(0.0..=1.0).contains(&term) {
        return Err(MatchError::NumericDomain {
            term,
            lat1,
            lon1,
            lat2,
            lon2,
        });
    }

    Ok(2.0 * EARTH_RADIUS_KM * term.sqrt().asin())
}
