//! The flight catalog searched by the planner.

use std::sync::Arc;

use crate::domain::Flight;

/// Error from building a [`Catalog`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// No flights to search
    #[error("flight catalog is empty")]
    Empty,

    /// Flights must be sorted by departure time
    #[error("flight at index {index} departs before its predecessor")]
    NotSorted { index: usize },

    /// Domestic legs must be filtered out before the search
    #[error("flight at index {index} starts and ends in the same country")]
    DomesticLeg { index: usize },
}

/// An immutable, chronologically sorted collection of international flights.
///
/// Cloning is cheap: all clones share one `Arc<[Flight]>`, so every search
/// worker reads the same memory without locking.
///
/// # Invariants
///
/// - At least one flight
/// - Sorted by `depart_time` ascending
/// - No flight starts and ends in the same country
#[derive(Debug, Clone)]
pub struct Catalog {
    flights: Arc<[Flight]>,
}

impl Catalog {
    /// Build a catalog, validating the invariants above.
    pub fn new(flights: Vec<Flight>) -> Result<Self, CatalogError> {
        if flights.is_empty() {
            return Err(CatalogError::Empty);
        }

        if let Some(index) = flights.iter().position(Flight::is_domestic) {
            return Err(CatalogError::DomesticLeg { index });
        }

        if let Some(index) = flights
            .windows(2)
            .position(|pair| pair[1].depart_time() < pair[0].depart_time())
        {
            return Err(CatalogError::NotSorted { index: index + 1 });
        }

        Ok(Self {
            flights: flights.into(),
        })
    }

    /// Returns all flights in departure order.
    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    /// Returns the number of flights.
    pub fn len(&self) -> usize {
        self.flights.len()
    }

    /// Always false; an empty catalog cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AirportCode, CountryCode, Endpoint};
    use chrono::{TimeZone, Utc};

    fn flight(from: &str, to: &str, depart_day: u32) -> Flight {
        let endpoint = |s: &str| {
            Endpoint::new(
                AirportCode::parse(&format!("{s}X")).unwrap(),
                CountryCode::parse(s).unwrap(),
            )
        };
        Flight::new(
            endpoint(from),
            Utc.with_ymd_and_hms(2017, 5, depart_day, 9, 0, 0).unwrap(),
            endpoint(to),
            Utc.with_ymd_and_hms(2017, 5, depart_day, 15, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn accepts_sorted_international_flights() {
        let catalog = Catalog::new(vec![
            flight("CZ", "GB", 1),
            flight("GB", "US", 1),
            flight("US", "CZ", 3),
        ])
        .unwrap();

        assert_eq!(catalog.len(), 3);
        assert!(!catalog.is_empty());
        assert_eq!(catalog.flights()[2].dest_country().as_str(), "CZ");
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(Catalog::new(vec![]).unwrap_err(), CatalogError::Empty);
    }

    #[test]
    fn rejects_unsorted() {
        let result = Catalog::new(vec![
            flight("CZ", "GB", 2),
            flight("GB", "US", 3),
            flight("US", "CZ", 1),
        ]);
        assert_eq!(result.unwrap_err(), CatalogError::NotSorted { index: 2 });
    }

    #[test]
    fn rejects_domestic() {
        let result = Catalog::new(vec![flight("CZ", "GB", 1), flight("US", "US", 2)]);
        assert_eq!(result.unwrap_err(), CatalogError::DomesticLeg { index: 1 });
    }

    #[test]
    fn clones_share_storage() {
        let catalog = Catalog::new(vec![flight("CZ", "GB", 1)]).unwrap();
        let clone = catalog.clone();
        assert!(std::ptr::eq(catalog.flights(), clone.flights()));
    }
}
