//! Conversion from Intercity DTOs to domain types.

use chrono::Duration;
use tracing::warn;

use crate::domain::{
    Connection, SeatInventory, SeatOffer, Segment, Station, StationCode, parse_carrier_timestamp,
    parse_hhmm_duration,
};

use super::types::{AvailabilityResponse, ConnectionDto, StationRecord, TrainDto, TravelTime};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConversionError {
    /// Failed to parse a station code
    #[error("invalid station code: {0:?}")]
    InvalidStationCode(String),

    /// Failed to parse a timestamp
    #[error(transparent)]
    InvalidTime(#[from] crate::domain::TimeError),

    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// Convert raw station records, skipping any that cannot be used for
/// lookups.
///
/// Order is preserved, so the first record for a given public code stays
/// first.
pub fn convert_stations(records: Vec<StationRecord>) -> Vec<Station> {
    records
        .into_iter()
        .filter_map(|record| match convert_station(&record) {
            Ok(station) => Some(station),
            Err(e) => {
                warn!(station = %record.name, error = %e, "skipping station record");
                None
            }
        })
        .collect()
}

fn convert_station(record: &StationRecord) -> Result<Station, ConversionError> {
    let public = record
        .public_code
        .as_deref()
        .ok_or(ConversionError::MissingField("kodEVA"))?;
    let public_code = StationCode::parse(public)
        .map_err(|_| ConversionError::InvalidStationCode(public.to_string()))?;

    let carrier_code = record
        .carrier_code
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or(ConversionError::MissingField("kodEPA"))?;

    Ok(Station {
        name: record.name.clone(),
        public_code,
        carrier_code: carrier_code.to_string(),
    })
}

/// Convert a candidate connection.
///
/// Travel time comes from `czasJazdy` when it is usable and otherwise from
/// the difference between arrival and departure.
pub fn convert_connection(dto: &ConnectionDto) -> Result<Connection, ConversionError> {
    let departure = parse_carrier_timestamp(&dto.departure)?;
    let arrival = parse_carrier_timestamp(&dto.arrival)?;

    let segments = dto
        .trains
        .iter()
        .map(convert_train)
        .collect::<Result<Vec<_>, _>>()?;

    let duration = dto
        .travel_time
        .as_ref()
        .and_then(travel_time_duration)
        .unwrap_or_else(|| arrival - departure);

    Ok(Connection {
        segments,
        departure,
        arrival,
        duration,
    })
}

fn travel_time_duration(travel_time: &TravelTime) -> Option<Duration> {
    match travel_time {
        TravelTime::Minutes(mins) if *mins >= 0 => Duration::try_minutes(*mins),
        TravelTime::Minutes(_) => None,
        TravelTime::Text(s) => match s.trim().parse::<i64>() {
            Ok(mins) if mins >= 0 => Duration::try_minutes(mins),
            Ok(_) => None,
            Err(_) => parse_hhmm_duration(s).ok(),
        },
    }
}

fn convert_train(dto: &TrainDto) -> Result<Segment, ConversionError> {
    let station = |code: &str| {
        StationCode::parse(code).map_err(|_| ConversionError::InvalidStationCode(code.to_string()))
    };

    Ok(Segment {
        category: dto.category.trim().to_string(),
        number: dto.number.trim().to_string(),
        departure_station: station(&dto.departure_station)?,
        arrival_station: station(&dto.arrival_station)?,
        departure: parse_carrier_timestamp(&dto.departure)?,
        arrival: parse_carrier_timestamp(&dto.arrival)?,
    })
}

/// Convert an availability response to the second-class inventory.
pub fn convert_inventory(response: AvailabilityResponse) -> SeatInventory {
    SeatInventory::new(
        response
            .class2
            .into_iter()
            .map(|entry| SeatOffer {
                service_type: entry.service_type,
                seat_type: entry.seat_type,
                available: entry.available_spots,
            })
            .collect(),
    )
}
