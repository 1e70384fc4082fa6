//! Round-the-world itinerary planner.
//!
//! Searches a dataset of international flights for closed itineraries that
//! leave from a country, visit a fixed number of other countries once each,
//! and return home within a year.

pub mod airports;
pub mod dataset;
pub mod domain;
pub mod logging;
pub mod planner;
pub mod report;
