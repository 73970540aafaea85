//! Itinerary types: segments, connections and the projected search result.

use chrono::{Duration, NaiveDateTime};

use super::StationCode;

/// One train leg within a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Train category, e.g. "IC" or "TLK".
    pub category: String,
    /// Train number within the category.
    pub number: String,
    pub departure_station: StationCode,
    pub arrival_station: StationCode,
    pub departure: NaiveDateTime,
    pub arrival: NaiveDateTime,
}

impl Segment {
    /// Human-readable train identity, e.g. "IC 123".
    pub fn train(&self) -> String {
        format!("{} {}", self.category, self.number)
    }
}

/// A candidate itinerary returned by a connection search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    /// Legs in travel order.
    pub segments: Vec<Segment>,
    pub departure: NaiveDateTime,
    pub arrival: NaiveDateTime,
    pub duration: Duration,
}

impl Connection {
    /// Project to the shape surfaced to callers.
    pub fn to_result(&self) -> SearchResultItem {
        SearchResultItem {
            departure: self.departure,
            arrival: self.arrival,
            duration: self.duration,
        }
    }
}

/// A connection that passed seat validation, reduced to what the frontend
/// shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResultItem {
    pub departure: NaiveDateTime,
    pub arrival: NaiveDateTime,
    pub duration: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parse_carrier_timestamp;

    fn segment() -> Segment {
        Segment {
            category: "IC".to_string(),
            number: "123".to_string(),
            departure_station: StationCode::parse("100").unwrap(),
            arrival_station: StationCode::parse("200").unwrap(),
            departure: parse_carrier_timestamp("2024-05-01 08:00:00").unwrap(),
            arrival: parse_carrier_timestamp("2024-05-01 10:00:00").unwrap(),
        }
    }

    #[test]
    fn train_identity() {
        assert_eq!(segment().train(), "IC 123");
    }

    #[test]
    fn projection_keeps_times_and_duration() {
        let seg = segment();
        let connection = Connection {
            departure: seg.departure,
            arrival: seg.arrival,
            duration: Duration::minutes(120),
            segments: vec![seg],
        };

        let item = connection.to_result();
        assert_eq!(item.departure, connection.departure);
        assert_eq!(item.arrival, connection.arrival);
        assert_eq!(item.duration, Duration::minutes(120));
    }
}
