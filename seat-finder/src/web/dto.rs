//! Data transfer objects for web requests and responses.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{SearchResultItem, Station, format_carrier};

/// A station code as the frontend sends it: the station picker hands back
/// whatever `/api/stations` gave it, but hand-written clients send numbers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CodeInput {
    Number(u64),
    Text(String),
}

impl fmt::Display for CodeInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeInput::Number(n) => write!(f, "{n}"),
            CodeInput::Text(s) => f.write_str(s),
        }
    }
}

/// One end of a requested connection.
#[derive(Debug, Deserialize)]
pub struct Endpoint {
    /// Public station code. The origin is sent as `startStationCode` by
    /// older frontends.
    #[serde(rename = "stationCode", alias = "startStationCode")]
    pub station_code: CodeInput,
}

/// Request body for `POST /api/connections`.
#[derive(Debug, Deserialize)]
pub struct ConnectionSearchRequest {
    pub start: Endpoint,
    pub end: Endpoint,

    /// Travel date, `YYYY-MM-DD`
    pub date: String,
}

/// A connection with a free seat on every leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionResult {
    /// Departure, `YYYY-MM-DD HH:MM:SS`
    #[serde(rename = "wyjazd")]
    pub departure: String,

    /// Arrival, `YYYY-MM-DD HH:MM:SS`
    #[serde(rename = "przyjazd")]
    pub arrival: String,

    /// Travel time in minutes
    #[serde(rename = "czas")]
    pub duration_mins: i64,
}

impl From<&SearchResultItem> for ConnectionResult {
    fn from(item: &SearchResultItem) -> Self {
        Self {
            departure: format_carrier(item.departure),
            arrival: format_carrier(item.arrival),
            duration_mins: item.duration.num_minutes(),
        }
    }
}

/// Full directory entry for a single station lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationResult {
    pub name: String,
    #[serde(rename = "stationCode")]
    pub station_code: String,
    #[serde(rename = "carrierCode")]
    pub carrier_code: String,
}

impl From<&Station> for StationResult {
    fn from(station: &Station) -> Self {
        Self {
            name: station.name.clone(),
            station_code: station.public_code.to_string(),
            carrier_code: station.carrier_code.clone(),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    #[test]
    fn search_request_accepts_both_origin_spellings() {
        let old: ConnectionSearchRequest = serde_json::from_str(
            r#"{"start":{"startStationCode":"5100065"},"end":{"stationCode":5100028},"date":"2024-05-01"}"#,
        )
        .unwrap();
        assert_eq!(old.start.station_code, CodeInput::Text("5100065".to_string()));
        assert_eq!(old.end.station_code, CodeInput::Number(5100028));

        let new: ConnectionSearchRequest = serde_json::from_str(
            r#"{"start":{"stationCode":5100065},"end":{"stationCode":"5100028"},"date":"2024-05-01"}"#,
        )
        .unwrap();
        assert_eq!(new.start.station_code.to_string(), "5100065");
        assert_eq!(new.end.station_code.to_string(), "5100028");
    }

    #[test]
    fn connection_result_uses_frontend_field_names() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let item = SearchResultItem {
            departure: day.and_hms_opt(8, 0, 0).unwrap(),
            arrival: day.and_hms_opt(10, 15, 0).unwrap(),
            duration: Duration::minutes(135),
        };

        let json = serde_json::to_value(ConnectionResult::from(&item)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "wyjazd": "2024-05-01 08:00:00",
                "przyjazd": "2024-05-01 10:15:00",
                "czas": 135,
            })
        );
    }
}
