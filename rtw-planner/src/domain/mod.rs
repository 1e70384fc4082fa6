//! Domain types for the round-the-world planner.
//!
//! This module contains the core domain model types that represent
//! validated flight data. All types enforce their invariants at construction
//! time, so code that receives these types can trust their validity.

mod airport;
mod country;
mod error;
mod flight;
mod itinerary;
mod zone;

pub use airport::{AirportCode, InvalidAirportCode};
pub use country::{CountryCode, InvalidCountryCode};
pub use error::DomainError;
pub use flight::{Endpoint, Flight};
pub use itinerary::Itinerary;
pub use zone::{country_zone, local_to_utc, utc_to_local};
