//! Loading of the airport and postal code reference tables.
//!
//! Both tables are published in ISO-8859-1; fields that are not valid UTF-8
//! are decoded as Latin-1.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder, StringRecord, Trim};
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::error::MatchError;
use crate::models::{AirportRecord, PostalCode};

/// Rows that failed to parse are logged up to this many times
const MAX_LOGGED_ROW_ERRORS: usize = 5;

/// Rows of one table plus the number of rows that were skipped
#[derive(Debug)]
pub struct Table<T> {
    pub rows: Vec<T>,
    pub skipped: usize,
}

pub fn load_airports(path: &Path) -> Result<Table<AirportRecord>, MatchError> {
    read_table(open(path)?, "airports", AirportRecord::REQUIRED_COLUMNS)
}

pub fn load_postal_codes(path: &Path) -> Result<Table<PostalCode>, MatchError> {
    read_table(open(path)?, "postal codes", PostalCode::REQUIRED_COLUMNS)
}

fn open(path: &Path) -> Result<File, MatchError> {
    if !path.exists() {
        return Err(MatchError::NotFound(path.to_path_buf()));
    }
    Ok(File::open(path)?)
}

/// Parse a headed CSV table.
///
/// A missing required column fails the whole table. Rows that do not
/// deserialize (empty coordinates, bad numbers) are skipped and counted.
pub fn read_table<T, R>(reader: R, table: &str, required: &[&str]) -> Result<Table<T>, MatchError>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = decode_record(reader.byte_headers()?);
    for column in required {
        if !headers.iter().any(|h| h == *column) {
            return Err(MatchError::MissingColumn {
                table: table.to_string(),
                column: column.to_string(),
            });
        }
    }

    let mut rows = Vec::new();
    let mut skipped = 0;
    for (i, result) in reader.byte_records().enumerate() {
        let record = decode_record(&result?);
        match record.deserialize::<T>(Some(&headers)) {
            Ok(row) => rows.push(row),
            Err(e) => {
                if skipped < MAX_LOGGED_ROW_ERRORS {
                    warn!("Skipping {} row {}: {}", table, i + 1, e);
                }
                skipped += 1;
            }
        }
    }

    info!("Parsed {} {} rows ({} skipped)", rows.len(), table, skipped);
    Ok(Table { rows, skipped })
}

fn decode_record(record: &ByteRecord) -> StringRecord {
    record.iter().map(decode_field).collect()
}

fn decode_field(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POSTAL_HEADER: &str = "Zip Code,Country,State Abbreviation,State,County,Latitude,Longitude\n";

    #[test]
    fn test_postal_codes_keep_leading_zeros() {
        let data = format!("{}00501,US,NY,New York,Suffolk,40.8154,-73.0451\n", POSTAL_HEADER);
        let table: Table<PostalCode> =
            read_table(data.as_bytes(), "postal codes", PostalCode::REQUIRED_COLUMNS).unwrap();

        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].code, "00501");
        assert_eq!(table.rows[0].state_abbreviation, "NY");
        assert_eq!(table.rows[0].latitude, 40.8154);
    }

    #[test]
    fn test_latin1_fields_are_decoded() {
        let mut data = POSTAL_HEADER.as_bytes().to_vec();
        data.extend_from_slice(b"00601,US,PR,Puerto Rico,Adjuntas Municipio,18.18,-66.75\n");
        data.extend_from_slice(b"00602,US,PR,Puerto Rico,A\xf1asco Municipio,18.29,-67.13\n");

        let table: Table<PostalCode> =
            read_table(data.as_slice(), "postal codes", PostalCode::REQUIRED_COLUMNS).unwrap();

        assert_eq!(table.rows[1].county, "Añasco Municipio");
    }

    #[test]
    fn test_rows_without_coordinates_are_skipped() {
        let data = format!(
            "{}99501,US,AK,Alaska,Anchorage,61.22,-149.86\n99502,US,AK,Alaska,Anchorage,,\n",
            POSTAL_HEADER
        );
        let table: Table<PostalCode> =
            read_table(data.as_bytes(), "postal codes", PostalCode::REQUIRED_COLUMNS).unwrap();

        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.skipped, 1);
    }

    #[test]
    fn test_missing_column_is_error() {
        let data = "ident,type,iso_country,latitude_deg,longitude_deg\n\
                    KLAX,large_airport,US,33.9,-118.4\n";
        let err = read_table::<AirportRecord, _>(
            data.as_bytes(),
            "airports",
            AirportRecord::REQUIRED_COLUMNS,
        )
        .unwrap_err();

        assert!(matches!(err, MatchError::MissingColumn { column, .. } if column == "iso_region"));
    }

    #[test]
    fn test_airports_ignore_extra_columns() {
        let data = "id,ident,type,name,latitude_deg,longitude_deg,elevation_ft,iso_country,iso_region\n\
                    3632,KLAX,large_airport,Los Angeles International Airport,33.942501,-118.407997,125,US,US-CA\n";
        let table: Table<AirportRecord> =
            read_table(data.as_bytes(), "airports", AirportRecord::REQUIRED_COLUMNS).unwrap();

        assert_eq!(table.rows[0].ident, "KLAX");
        assert_eq!(table.rows[0].iso_region, "US-CA");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = load_airports(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(matches!(err, MatchError::NotFound(_)));
    }
}
