//! Ranking and output of found itineraries.

use std::fmt::Write as _;
use std::path::Path;

use crate::domain::{Flight, Itinerary, utc_to_local};

/// Timestamp format used in the report.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Error writing the report.
#[derive(Debug, thiserror::Error)]
#[error("failed to write {path}: {source}")]
pub struct ReportError {
    path: String,
    source: std::io::Error,
}

/// Flatten per-seed results and rank them shortest-first.
///
/// Itineraries are ordered by total elapsed time from first departure to
/// last arrival. Ties keep seed order.
pub fn rank_itineraries(per_seed: Vec<Vec<Itinerary>>) -> Vec<Itinerary> {
    let mut itineraries: Vec<Itinerary> = per_seed.into_iter().flatten().collect();
    itineraries.sort_by_key(Itinerary::total_duration);
    itineraries
}

/// Render itineraries one leg per line.
///
/// Each line reads `n;country;from;to;departure;arrival`, where `n` is the
/// 1-based itinerary number. Departures are shown in the origin country's
/// local time and arrivals in the destination country's.
pub fn format_itineraries(itineraries: &[Itinerary]) -> String {
    let mut out = String::new();
    for (index, itinerary) in itineraries.iter().enumerate() {
        for leg in itinerary.legs() {
            // Writing to a String cannot fail
            let _ = writeln!(out, "{};{}", index + 1, format_leg(leg));
        }
    }
    out
}

fn format_leg(leg: &Flight) -> String {
    format!(
        "{};{};{};{};{}",
        leg.origin_country(),
        leg.origin_airport(),
        leg.dest_airport(),
        utc_to_local(leg.depart_time(), leg.origin_country()).format(TIMESTAMP_FORMAT),
        utc_to_local(leg.arrive_time(), leg.dest_country()).format(TIMESTAMP_FORMAT),
    )
}

/// Write the formatted itineraries to `path`.
///
/// Creates parent directories if they don't exist.
pub fn write_itineraries(path: &Path, itineraries: &[Itinerary]) -> Result<(), ReportError> {
    let wrap = |source| ReportError {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(wrap)?;
    }

    std::fs::write(path, format_itineraries(itineraries)).map_err(wrap)
}
