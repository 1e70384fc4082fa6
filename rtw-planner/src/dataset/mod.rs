//! Flight dataset loading.
//!
//! The dataset is a semicolon-separated file with a header row and one
//! flight per line:
//!
//! ```text
//! source;destination;departure;arrival
//! PRG;LHR;2017-02-01 06:00:00;2017-02-01 07:45:00
//! ```
//!
//! Timestamps are wall-clock times at the airport they refer to and are
//! converted to UTC through the country's time zone. Rows are skipped when an
//! airport has no known country, when a time cannot be placed in its zone
//! (unknown zone, or a daylight-saving gap or overlap), when the flight lands
//! before it leaves, and when the leg is domestic, since domestic legs can
//! never be part of a round-the-world itinerary.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use crate::airports::AirportCountries;
use crate::domain::{AirportCode, Endpoint, Flight, InvalidAirportCode, local_to_utc};

/// Timestamp format used by the dataset.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Errors from reading the flight dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The file could not be opened
    #[error("failed to open {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// The CSV could not be read
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A row has too few columns
    #[error("line {line}: missing {field} column")]
    MissingField { line: u64, field: &'static str },

    /// A row names an invalid airport code
    #[error("line {line}: {source}")]
    Airport {
        line: u64,
        source: InvalidAirportCode,
    },

    /// A row has an unparseable timestamp
    #[error("line {line}: invalid timestamp {value:?}: {source}")]
    Timestamp {
        line: u64,
        value: String,
        source: chrono::ParseError,
    },
}

/// Distinct airports named in the dataset at `path`, in first-seen order.
pub fn read_airports(path: &Path) -> Result<Vec<AirportCode>, DatasetError> {
    parse_airports(open(path)?)
}

/// Flights in the dataset at `path`, sorted by departure.
pub fn read_flights(path: &Path, countries: &AirportCountries) -> Result<Vec<Flight>, DatasetError> {
    parse_flights(open(path)?, countries)
}

/// Distinct airports named in a dataset, in first-seen order.
pub fn parse_airports<R: Read>(input: R) -> Result<Vec<AirportCode>, DatasetError> {
    let mut seen = HashSet::new();
    let mut airports = Vec::new();

    for record in reader(input).records() {
        let record = record?;
        let line = line_of(&record);

        for (idx, field) in [(0, "source"), (1, "destination")] {
            let airport = airport_at(&record, idx, field, line)?;
            if seen.insert(airport) {
                airports.push(airport);
            }
        }
    }

    Ok(airports)
}

/// International flights in a dataset whose airports have known countries
/// and zones, in UTC and sorted by departure (stable).
pub fn parse_flights<R: Read>(
    input: R,
    countries: &AirportCountries,
) -> Result<Vec<Flight>, DatasetError> {
    let mut flights = Vec::new();
    let mut rows = 0usize;
    let mut unknown = 0usize;
    let mut unzoned = 0usize;
    let mut impossible = 0usize;
    let mut domestic = 0usize;

    for record in reader(input).records() {
        let record = record?;
        let line = line_of(&record);
        rows += 1;

        let origin = airport_at(&record, 0, "source", line)?;
        let destination = airport_at(&record, 1, "destination", line)?;
        let depart = timestamp_at(&record, 2, "departure", line)?;
        let arrive = timestamp_at(&record, 3, "arrival", line)?;

        let (Some(origin_country), Some(dest_country)) =
            (countries.get(&origin), countries.get(&destination))
        else {
            debug!(line, origin = %origin, destination = %destination, "unknown airport country, skipping");
            unknown += 1;
            continue;
        };

        let (Some(depart), Some(arrive)) = (
            local_to_utc(depart, origin_country),
            local_to_utc(arrive, dest_country),
        ) else {
            debug!(line, origin = %origin, destination = %destination, "local time not in a known zone, skipping");
            unzoned += 1;
            continue;
        };

        let flight = match Flight::new(
            Endpoint::new(origin, origin_country),
            depart,
            Endpoint::new(destination, dest_country),
            arrive,
        ) {
            Ok(flight) => flight,
            Err(e) => {
                warn!(line, error = %e, "impossible flight, skipping");
                impossible += 1;
                continue;
            }
        };

        if flight.is_domestic() {
            domestic += 1;
            continue;
        }

        flights.push(flight);
    }

    flights.sort_by_key(Flight::depart_time);

    info!(
        rows,
        flights = flights.len(),
        unknown_airports = unknown,
        unknown_zones = unzoned,
        impossible,
        domestic,
        "loaded flight dataset"
    );

    Ok(flights)
}

fn open(path: &Path) -> Result<File, DatasetError> {
    File::open(path).map_err(|source| DatasetError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input)
}

fn line_of(record: &csv::StringRecord) -> u64 {
    record.position().map_or(0, csv::Position::line)
}

fn field_at<'r>(
    record: &'r csv::StringRecord,
    idx: usize,
    field: &'static str,
    line: u64,
) -> Result<&'r str, DatasetError> {
    record
        .get(idx)
        .filter(|s| !s.is_empty())
        .ok_or(DatasetError::MissingField { line, field })
}

fn airport_at(
    record: &csv::StringRecord,
    idx: usize,
    field: &'static str,
    line: u64,
) -> Result<AirportCode, DatasetError> {
    AirportCode::parse(field_at(record, idx, field, line)?)
        .map_err(|source| DatasetError::Airport { line, source })
}

fn timestamp_at(
    record: &csv::StringRecord,
    idx: usize,
    field: &'static str,
    line: u64,
) -> Result<NaiveDateTime, DatasetError> {
    let value = field_at(record, idx, field, line)?;
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|source| {
        DatasetError::Timestamp {
            line,
            value: value.to_string(),
            source,
        }
    })
}
