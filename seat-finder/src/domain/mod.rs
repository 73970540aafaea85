//! Domain types for the seat finder.
//!
//! These types represent validated carrier data. Raw upstream DTOs are
//! converted into them at the edge of the `intercity` module, so code that
//! receives them can trust the timestamps and codes they carry.

mod connection;
mod inventory;
mod station;
mod time;

pub use connection::{Connection, SearchResultItem, Segment};
pub use inventory::{SeatInventory, SeatOffer};
pub use station::{InvalidStationCode, Station, StationCode};
pub use time::{
    TimeError, format_carrier, format_iso, format_update_stamp, parse_carrier_timestamp,
    parse_hhmm_duration, parse_search_date,
};
