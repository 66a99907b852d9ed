use serde::{Deserialize, Serialize};

/// Raw record from the world airports table
#[derive(Debug, Clone, Deserialize)]
pub struct AirportRecord {
    pub ident: String,
    #[serde(rename = "type")]
    pub airport_type: String,
    pub iso_country: String,
    pub iso_region: String,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

impl AirportRecord {
    pub const REQUIRED_COLUMNS: &'static [&'static str] = &[
        "ident",
        "type",
        "iso_country",
        "iso_region",
        "latitude_deg",
        "longitude_deg",
    ];

    pub fn class(&self) -> AirportClass {
        AirportClass::from(self.airport_type.as_str())
    }
}

/// Airport class as published in the `type` column
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AirportClass {
    Large,
    Medium,
    Small,
    Other,
}

impl From<&str> for AirportClass {
    fn from(s: &str) -> Self {
        match s {
            "large_airport" => AirportClass::Large,
            "medium_airport" => AirportClass::Medium,
            "small_airport" => AirportClass::Small,
            _ => AirportClass::Other,
        }
    }
}

/// In-scope airport with its derived state code
#[derive(Debug, Clone, PartialEq)]
pub struct Airport {
    pub ident: String,
    pub country: String,
    pub region: String,
    pub class: AirportClass,
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Postal code row. The code stays text so leading zeros survive.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PostalCode {
    #[serde(rename = "Zip Code")]
    pub code: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "State Abbreviation")]
    pub state_abbreviation: String,
    #[serde(rename = "State")]
    pub state_name: String,
    #[serde(rename = "County")]
    pub county: String,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
}

impl PostalCode {
    pub const REQUIRED_COLUMNS: &'static [&'static str] = &[
        "Zip Code",
        "Country",
        "State Abbreviation",
        "State",
        "County",
        "Latitude",
        "Longitude",
    ];
}

/// Distance from one postal code to one candidate airport.
///
/// Written as one row of the per-postal-code and per-state output tables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidateMatch {
    pub zipcode: String,
    pub country: String,
    pub state: String,
    pub state_full: String,
    pub county: String,
    #[serde(rename = "latitude-zip")]
    pub latitude_zip: f64,
    #[serde(rename = "longitude-zip")]
    pub longitude_zip: f64,
    #[serde(rename = "nearest-airport")]
    pub airport: String,
    #[serde(rename = "latitude-air")]
    pub latitude_air: f64,
    #[serde(rename = "longitude-air")]
    pub longitude_air: f64,
    pub distance: f64,
}

/// The minimum-distance candidate for a postal code
pub type NearestResult = CandidateMatch;

impl CandidateMatch {
    pub fn new(postal_code: &PostalCode, airport: &Airport, distance_km: f64) -> Self {
        Self {
            zipcode: postal_code.code.clone(),
            country: postal_code.country.clone(),
            state: postal_code.state_abbreviation.clone(),
            state_full: postal_code.state_name.clone(),
            county: postal_code.county.clone(),
            latitude_zip: postal_code.latitude,
            longitude_zip: postal_code.longitude,
            airport: airport.ident.clone(),
            latitude_air: airport.latitude,
            longitude_air: airport.longitude,
            distance: distance_km,
        }
    }
}
