//! Airport code types.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned when parsing an invalid airport code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid airport code: {reason}")]
pub struct InvalidAirportCode {
    reason: &'static str,
}

/// A valid 3-letter IATA airport code.
///
/// IATA codes are always 3 uppercase ASCII letters. This type guarantees
/// that any `AirportCode` value is valid by construction.
///
/// # Examples
///
/// ```
/// use rtw_planner::domain::AirportCode;
///
/// let prg = AirportCode::parse("PRG").unwrap();
/// assert_eq!(prg.as_str(), "PRG");
///
/// // Lowercase is rejected
/// assert!(AirportCode::parse("prg").is_err());
///
/// // Wrong length is rejected
/// assert!(AirportCode::parse("PR").is_err());
/// assert!(AirportCode::parse("PRGX").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AirportCode([u8; 3]);

impl AirportCode {
    /// Parse an airport code from a string.
    ///
    /// The input must be exactly 3 uppercase ASCII letters (A-Z).
    pub fn parse(s: &str) -> Result<Self, InvalidAirportCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 3 {
            return Err(InvalidAirportCode {
                reason: "must be exactly 3 characters",
            });
        }

        if !bytes.iter().all(u8::is_ascii_uppercase) {
            return Err(InvalidAirportCode {
                reason: "must be uppercase ASCII letters A-Z",
            });
        }

        Ok(AirportCode([bytes[0], bytes[1], bytes[2]]))
    }

    /// Returns the airport code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII uppercase letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Debug for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AirportCode({})", self.as_str())
    }
}

impl fmt::Display for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AirportCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AirportCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        AirportCode::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_codes() {
        assert!(AirportCode::parse("PRG").is_ok());
        assert!(AirportCode::parse("JFK").is_ok());
        assert!(AirportCode::parse("AAA").is_ok());
        assert!(AirportCode::parse("ZZZ").is_ok());
    }

    #[test]
    fn reject_lowercase() {
        assert!(AirportCode::parse("prg").is_err());
        assert!(AirportCode::parse("Prg").is_err());
        assert!(AirportCode::parse("PRg").is_err());
    }

    #[test]
    fn reject_wrong_length() {
        assert!(AirportCode::parse("").is_err());
        assert!(AirportCode::parse("P").is_err());
        assert!(AirportCode::parse("PRAGUE").is_err());
    }

    #[test]
    fn reject_non_letters() {
        assert!(AirportCode::parse("P1G").is_err());
        assert!(AirportCode::parse("P G").is_err());
        assert!(AirportCode::parse("PÖ").is_err());
    }

    #[test]
    fn display_and_debug() {
        let code = AirportCode::parse("LHR").unwrap();
        assert_eq!(format!("{}", code), "LHR");
        assert_eq!(format!("{:?}", code), "AirportCode(LHR)");
    }

    #[test]
    fn serde_uses_plain_string() {
        let code = AirportCode::parse("BCN").unwrap();
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"BCN\"");

        let back: AirportCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, code);

        assert!(serde_json::from_str::<AirportCode>("\"bcn\"").is_err());
    }
}
