//! PKP Intercity public API client.
//!
//! Three endpoints are used:
//! - `Aktualizacja` with `pobierzStacje` for the station list
//! - `Pociagi` with `wyszukajPolaczenia` for connection search
//! - `availability/frequency/...` for per-train seat inventory
//!
//! All of them speak JSON with Polish field names; `types` maps those and
//! `convert` turns them into domain types.

mod client;
mod convert;
mod error;
mod types;

pub use client::{DEFAULT_DEVICE_ID, IntercityClient, IntercityConfig};
pub use convert::{ConversionError, convert_connection, convert_inventory, convert_stations};
pub use error::IntercityError;
pub use types::{
    AvailabilityQuery, AvailabilityResponse, CodeParam, ConnectionDto, ConnectionsResponse,
    SeatEntry, SearchConnectionsRequest, StationRecord, StationRecords, StationsRequest,
    StationsResponse, TrainDto, TravelTime,
};
