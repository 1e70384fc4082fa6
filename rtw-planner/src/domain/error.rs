//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from IO, HTTP and search errors.

use chrono::{DateTime, Utc};

use super::AirportCode;

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A flight must arrive strictly after it departs
    #[error("flight {origin}->{destination} arrives at {arrive} but departs at {depart}")]
    NonPositiveDuration {
        origin: AirportCode,
        destination: AirportCode,
        depart: DateTime<Utc>,
        arrive: DateTime<Utc>,
    },

    /// Itinerary has no legs
    #[error("itinerary must have at least one leg")]
    EmptyItinerary,
}
