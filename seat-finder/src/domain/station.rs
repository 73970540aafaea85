//! Station code and station record types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStationCode {
    reason: &'static str,
}

/// A public station code as shown to passengers and used in searches.
///
/// Intercity publishes these as `kodEVA`; they are numeric in practice but
/// arrive as either JSON numbers or strings, so the code is stored as text.
///
/// # Examples
///
/// ```
/// use seat_finder::domain::StationCode;
///
/// let code = StationCode::parse(" 5100069 ").unwrap();
/// assert_eq!(code.as_str(), "5100069");
/// assert_eq!(code.as_number(), Some(5100069));
///
/// assert!(StationCode::parse("").is_err());
/// assert!(StationCode::parse("51 00").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationCode(String);

impl StationCode {
    /// Parse a station code, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidStationCode {
                reason: "must not be empty",
            });
        }

        if trimmed.chars().any(char::is_whitespace) {
            return Err(InvalidStationCode {
                reason: "must not contain whitespace",
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the code as an integer, if it is purely numeric.
    pub fn as_number(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.0)
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A station in the directory.
///
/// `public_code` is the key used by searches and segments; `carrier_code`
/// is the operator's internal identifier required by the availability
/// endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub name: String,
    pub public_code: StationCode,
    pub carrier_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_whitespace() {
        let code = StationCode::parse("  100 ").unwrap();
        assert_eq!(code.as_str(), "100");
    }

    #[test]
    fn reject_empty_and_inner_whitespace() {
        assert!(StationCode::parse("").is_err());
        assert!(StationCode::parse("   ").is_err());
        assert!(StationCode::parse("1 0").is_err());
    }

    #[test]
    fn numeric_codes() {
        assert_eq!(StationCode::parse("200").unwrap().as_number(), Some(200));
        assert_eq!(StationCode::parse("KRK").unwrap().as_number(), None);
    }

    #[test]
    fn debug_and_display() {
        let code = StationCode::parse("5100069").unwrap();
        assert_eq!(format!("{}", code), "5100069");
        assert_eq!(format!("{:?}", code), "StationCode(5100069)");
    }

    #[test]
    fn serializes_as_plain_string() {
        let station = Station {
            name: "Kraków Główny".to_string(),
            public_code: StationCode::parse("5100028").unwrap(),
            carrier_code: "33605".to_string(),
        };

        let json = serde_json::to_string(&station).unwrap();
        assert!(json.contains("\"public_code\":\"5100028\""));

        let back: Station = serde_json::from_str(&json).unwrap();
        assert_eq!(back, station);
    }
}
