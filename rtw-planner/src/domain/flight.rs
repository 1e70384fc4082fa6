//! Flight leg type.
//!
//! A `Flight` is one directed, timestamped trip between two airports. It is
//! a small `Copy` value so itineraries can be extended by copying legs
//! rather than sharing them.

use chrono::{DateTime, Duration, Utc};

use super::{AirportCode, CountryCode, DomainError};

/// One end of a flight: an airport and the country it lies in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub airport: AirportCode,
    pub country: CountryCode,
}

impl Endpoint {
    /// Creates a new endpoint.
    pub fn new(airport: AirportCode, country: CountryCode) -> Self {
        Self { airport, country }
    }
}

/// A single flight leg.
///
/// # Invariants
///
/// - `arrive_time > depart_time`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Flight {
    origin: Endpoint,
    destination: Endpoint,
    depart_time: DateTime<Utc>,
    arrive_time: DateTime<Utc>,
}

impl Flight {
    /// Construct a flight, validating that it arrives after it departs.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `arrive_time <= depart_time`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rtw_planner::domain::{AirportCode, CountryCode, Endpoint, Flight};
    /// use chrono::{TimeZone, Utc};
    ///
    /// let prg = Endpoint::new(AirportCode::parse("PRG").unwrap(), CountryCode::parse("CZ").unwrap());
    /// let lhr = Endpoint::new(AirportCode::parse("LHR").unwrap(), CountryCode::parse("GB").unwrap());
    ///
    /// let depart = Utc.with_ymd_and_hms(2017, 2, 1, 10, 0, 0).unwrap();
    /// let arrive = Utc.with_ymd_and_hms(2017, 2, 1, 12, 0, 0).unwrap();
    ///
    /// let flight = Flight::new(prg, depart, lhr, arrive).unwrap();
    /// assert_eq!(flight.duration().num_hours(), 2);
    ///
    /// // Arriving before departing is rejected
    /// assert!(Flight::new(prg, arrive, lhr, depart).is_err());
    /// ```
    pub fn new(
        origin: Endpoint,
        depart_time: DateTime<Utc>,
        destination: Endpoint,
        arrive_time: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if arrive_time <= depart_time {
            return Err(DomainError::NonPositiveDuration {
                origin: origin.airport,
                destination: destination.airport,
                depart: depart_time,
                arrive: arrive_time,
            });
        }

        Ok(Flight {
            origin,
            destination,
            depart_time,
            arrive_time,
        })
    }

    /// Returns the departure airport.
    pub fn origin_airport(&self) -> AirportCode {
        self.origin.airport
    }

    /// Returns the country of the departure airport.
    pub fn origin_country(&self) -> CountryCode {
        self.origin.country
    }

    /// Returns the arrival airport.
    pub fn dest_airport(&self) -> AirportCode {
        self.destination.airport
    }

    /// Returns the country of the arrival airport.
    pub fn dest_country(&self) -> CountryCode {
        self.destination.country
    }

    /// Returns the departure instant.
    pub fn depart_time(&self) -> DateTime<Utc> {
        self.depart_time
    }

    /// Returns the arrival instant.
    pub fn arrive_time(&self) -> DateTime<Utc> {
        self.arrive_time
    }

    /// Returns the time spent in the air (always positive).
    pub fn duration(&self) -> Duration {
        self.arrive_time - self.depart_time
    }

    /// Returns true if the flight starts and ends in the same country.
    pub fn is_domestic(&self) -> bool {
        self.origin.country == self.destination.country
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn endpoint(airport: &str, country: &str) -> Endpoint {
        Endpoint::new(
            AirportCode::parse(airport).unwrap(),
            CountryCode::parse(country).unwrap(),
        )
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2017, 2, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn accessors() {
        let flight = Flight::new(endpoint("PRG", "CZ"), at(1, 10), endpoint("JFK", "US"), at(1, 19))
            .unwrap();

        assert_eq!(flight.origin_airport().as_str(), "PRG");
        assert_eq!(flight.origin_country().as_str(), "CZ");
        assert_eq!(flight.dest_airport().as_str(), "JFK");
        assert_eq!(flight.dest_country().as_str(), "US");
        assert_eq!(flight.depart_time(), at(1, 10));
        assert_eq!(flight.arrive_time(), at(1, 19));
        assert_eq!(flight.duration(), Duration::hours(9));
        assert!(!flight.is_domestic());
    }

    #[test]
    fn zero_duration_rejected() {
        let result = Flight::new(endpoint("PRG", "CZ"), at(1, 10), endpoint("JFK", "US"), at(1, 10));
        assert!(matches!(
            result,
            Err(DomainError::NonPositiveDuration { .. })
        ));
    }

    #[test]
    fn negative_duration_rejected() {
        let result = Flight::new(endpoint("PRG", "CZ"), at(2, 10), endpoint("JFK", "US"), at(1, 10));
        assert!(result.is_err());
    }

    #[test]
    fn domestic_detection() {
        let flight = Flight::new(endpoint("JFK", "US"), at(1, 10), endpoint("LAX", "US"), at(1, 16))
            .unwrap();
        assert!(flight.is_domestic());
    }
}
