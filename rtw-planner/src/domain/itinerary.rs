//! Itinerary types.
//!
//! An `Itinerary` is an ordered chain of flights forming one candidate
//! round-the-world journey. Search branches grow itineraries by
//! append-only extension: `extended` returns a new itinerary and leaves the
//! receiver untouched, so sibling branches never observe each other's legs.

use chrono::{DateTime, Duration, Utc};

use super::{CountryCode, DomainError, Flight};

/// An ordered, non-empty sequence of flights.
///
/// # Invariants
///
/// - At least one leg
///
/// The routing invariants (temporal order, country continuity, no revisits,
/// journey window) are maintained by the planner's candidate filters, not
/// re-checked here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Itinerary {
    legs: Vec<Flight>,
}

impl Itinerary {
    /// Constructs an itinerary from its legs.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `legs` is empty.
    pub fn new(legs: Vec<Flight>) -> Result<Self, DomainError> {
        if legs.is_empty() {
            return Err(DomainError::EmptyItinerary);
        }
        Ok(Itinerary { legs })
    }

    /// Constructs a one-leg itinerary starting with `seed`.
    pub fn from_seed(seed: Flight) -> Self {
        Itinerary { legs: vec![seed] }
    }

    /// Returns a new itinerary with `leg` appended.
    pub fn extended(&self, leg: Flight) -> Self {
        let mut legs = Vec::with_capacity(self.legs.len() + 1);
        legs.extend_from_slice(&self.legs);
        legs.push(leg);
        Itinerary { legs }
    }

    /// Returns all legs in order.
    pub fn legs(&self) -> &[Flight] {
        &self.legs
    }

    /// Returns the number of legs.
    pub fn len(&self) -> usize {
        self.legs.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    /// Returns the first leg.
    pub fn first(&self) -> &Flight {
        // Safe: non-empty by construction
        &self.legs[0]
    }

    /// Returns the last leg.
    pub fn last(&self) -> &Flight {
        &self.legs[self.legs.len() - 1]
    }

    /// Returns the country the journey starts from.
    pub fn origin_country(&self) -> CountryCode {
        self.first().origin_country()
    }

    /// Returns the country the journey currently ends in.
    pub fn destination_country(&self) -> CountryCode {
        self.last().dest_country()
    }

    /// Returns the departure instant of the first leg.
    pub fn departure_time(&self) -> DateTime<Utc> {
        self.first().depart_time()
    }

    /// Returns the arrival instant of the last leg.
    pub fn arrival_time(&self) -> DateTime<Utc> {
        self.last().arrive_time()
    }

    /// Returns the elapsed time from first departure to last arrival.
    pub fn total_duration(&self) -> Duration {
        self.arrival_time() - self.departure_time()
    }

    /// Returns the origin country of every leg, in order.
    pub fn origin_countries(&self) -> impl Iterator<Item = CountryCode> + '_ {
        self.legs.iter().map(Flight::origin_country)
    }

    /// Returns true if some leg departs from `country`.
    pub fn has_departed_from(&self, country: CountryCode) -> bool {
        self.origin_countries().any(|c| c == country)
    }

    /// Returns true if the journey ends in the country it started from.
    pub fn is_closed(&self) -> bool {
        self.destination_country() == self.origin_country()
    }

    /// Returns true if the itinerary is closed and has exactly `target_length` legs.
    pub fn is_complete(&self, target_length: usize) -> bool {
        self.len() == target_length && self.is_closed()
    }
}
