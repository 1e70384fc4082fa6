//! Country code types.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned when parsing an invalid country code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid country code: {reason}")]
pub struct InvalidCountryCode {
    reason: &'static str,
}

/// A valid 2-letter ISO 3166-1 alpha-2 country code.
///
/// Every leg of an itinerary is routed by country, so comparisons on this
/// type sit on the hot path of the search. It is a plain `Copy` byte pair.
///
/// # Examples
///
/// ```
/// use rtw_planner::domain::CountryCode;
///
/// let cz = CountryCode::parse("CZ").unwrap();
/// assert_eq!(cz.as_str(), "CZ");
/// assert!(CountryCode::parse("cz").is_err());
/// assert!(CountryCode::parse("CZE").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CountryCode([u8; 2]);

impl CountryCode {
    /// Parse a country code from a string.
    ///
    /// The input must be exactly 2 uppercase ASCII letters (A-Z).
    pub fn parse(s: &str) -> Result<Self, InvalidCountryCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 2 {
            return Err(InvalidCountryCode {
                reason: "must be exactly 2 characters",
            });
        }

        if !bytes.iter().all(u8::is_ascii_uppercase) {
            return Err(InvalidCountryCode {
                reason: "must be uppercase ASCII letters A-Z",
            });
        }

        Ok(CountryCode([bytes[0], bytes[1]]))
    }

    /// Returns the country code as a string slice.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Debug for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CountryCode({})", self.as_str())
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CountryCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CountryCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        CountryCode::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_codes() {
        assert!(CountryCode::parse("CZ").is_ok());
        assert!(CountryCode::parse("US").is_ok());
        assert!(CountryCode::parse("GB").is_ok());
    }

    #[test]
    fn reject_invalid_codes() {
        assert!(CountryCode::parse("").is_err());
        assert!(CountryCode::parse("C").is_err());
        assert!(CountryCode::parse("CZE").is_err());
        assert!(CountryCode::parse("cz").is_err());
        assert!(CountryCode::parse("C1").is_err());
    }

    #[test]
    fn equality_and_hash() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(CountryCode::parse("DE").unwrap());
        assert!(set.contains(&CountryCode::parse("DE").unwrap()));
        assert!(!set.contains(&CountryCode::parse("FR").unwrap()));
    }

    #[test]
    fn display() {
        let code = CountryCode::parse("JP").unwrap();
        assert_eq!(code.to_string(), "JP");
        assert_eq!(format!("{:?}", code), "CountryCode(JP)");
    }
}
