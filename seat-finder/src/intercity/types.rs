//! Intercity API request and response DTOs.
//!
//! These types map directly to the carrier's JSON, which uses Polish field
//! names. Station codes and train numbers arrive as either numbers or
//! strings depending on the endpoint, so they are normalised to strings on
//! the way in.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{StationCode, format_iso};

/// Body of the `pobierzStacje` request.
#[derive(Debug, Clone, Serialize)]
pub struct StationsRequest {
    #[serde(rename = "metoda")]
    pub method: &'static str,

    /// Local time of the request, `YYYY-MM-DD HH:MM:SS.mmm`.
    #[serde(rename = "ostatniaAktualizacjaData")]
    pub last_update: String,

    #[serde(rename = "urzadzenieNr")]
    pub device_id: u32,
}

/// Response to `pobierzStacje`.
#[derive(Debug, Deserialize)]
pub struct StationsResponse {
    #[serde(rename = "stacje")]
    pub stations: StationRecords,
}

/// Station records, which the API has shipped both as a list and as an
/// object keyed by an internal id.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum StationRecords {
    List(Vec<StationRecord>),
    Map(BTreeMap<String, StationRecord>),
}

impl StationRecords {
    pub fn into_vec(self) -> Vec<StationRecord> {
        match self {
            StationRecords::List(records) => records,
            StationRecords::Map(records) => records.into_values().collect(),
        }
    }
}

/// A raw station record. Only the fields we use are mapped.
#[derive(Debug, Clone, Deserialize)]
pub struct StationRecord {
    #[serde(rename = "nazwa")]
    pub name: String,

    #[serde(rename = "kodEVA", default, deserialize_with = "optional_code")]
    pub public_code: Option<String>,

    #[serde(rename = "kodEPA", default, deserialize_with = "optional_code")]
    pub carrier_code: Option<String>,
}

/// A station code or train number in a request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CodeParam {
    Number(u64),
    Text(String),
}

impl From<&StationCode> for CodeParam {
    fn from(code: &StationCode) -> Self {
        match code.as_number() {
            Some(n) => CodeParam::Number(n),
            None => CodeParam::Text(code.as_str().to_string()),
        }
    }
}

/// Body of the `wyszukajPolaczenia` request.
#[derive(Debug, Clone, Serialize)]
pub struct SearchConnectionsRequest {
    #[serde(rename = "urzadzenieNr")]
    pub device_id: u32,
    #[serde(rename = "metoda")]
    pub method: &'static str,
    #[serde(rename = "dataWyjazdu")]
    pub departure_from: String,
    #[serde(rename = "dataPrzyjazdu")]
    pub arrival_until: String,
    #[serde(rename = "stacjaWyjazdu")]
    pub origin: CodeParam,
    #[serde(rename = "stacjaPrzyjazdu")]
    pub destination: u64,
    #[serde(rename = "stacjePrzez")]
    pub via: Vec<CodeParam>,
    #[serde(rename = "polaczeniaNajszybsze")]
    pub fastest_only: u8,
    #[serde(rename = "liczbaPolaczen")]
    pub connection_count: u32,
    #[serde(rename = "czasNaPrzesiadkeMax")]
    pub max_transfer_mins: u32,
    #[serde(rename = "liczbaPrzesiadekMax")]
    pub max_transfers: u32,
    #[serde(rename = "polaczeniaBezposrednie")]
    pub direct_only: u8,
    #[serde(rename = "kategoriePociagow")]
    pub categories: Vec<String>,
    #[serde(rename = "kodyPrzewoznikow")]
    pub carriers: Vec<String>,
    #[serde(rename = "rodzajeMiejsc")]
    pub seat_kinds: Vec<String>,
    #[serde(rename = "typyMiejsc")]
    pub seat_types: Vec<String>,
    pub braille: u8,
    #[serde(rename = "czasNaPrzesiadkeMin")]
    pub min_transfer_mins: u32,
    #[serde(rename = "atrybutyHandlowe")]
    pub attributes: Vec<String>,
    #[serde(rename = "wersja")]
    pub version: String,
    /// Deep link to the same search on the booking site.
    pub url: String,
}

/// Response to `wyszukajPolaczenia`.
#[derive(Debug, Deserialize)]
pub struct ConnectionsResponse {
    #[serde(rename = "polaczenia", default)]
    pub connections: Vec<ConnectionDto>,
}

/// A candidate connection as returned by the search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionDto {
    #[serde(rename = "dataWyjazdu")]
    pub departure: String,

    #[serde(rename = "dataPrzyjazdu")]
    pub arrival: String,

    /// Travel time; minutes or "H:MM" depending on API version.
    #[serde(rename = "czasJazdy", default)]
    pub travel_time: Option<TravelTime>,

    #[serde(rename = "pociagi", default)]
    pub trains: Vec<TrainDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TravelTime {
    Minutes(i64),
    Text(String),
}

/// One train leg of a connection.
#[derive(Debug, Clone, Deserialize)]
pub struct TrainDto {
    #[serde(rename = "kategoriaPociagu")]
    pub category: String,

    #[serde(rename = "nrPociagu", deserialize_with = "code")]
    pub number: String,

    #[serde(rename = "stacjaWyjazdu", deserialize_with = "code")]
    pub departure_station: String,

    #[serde(rename = "stacjaPrzyjazdu", deserialize_with = "code")]
    pub arrival_station: String,

    #[serde(rename = "dataWyjazdu")]
    pub departure: String,

    #[serde(rename = "dataPrzyjazdu")]
    pub arrival: String,
}

/// Path parameters of an availability request.
///
/// Also serves as the cache key for availability answers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AvailabilityQuery {
    pub category: String,
    pub number: String,
    pub departure: NaiveDateTime,
    pub arrival: NaiveDateTime,
    pub from_carrier_code: String,
    pub to_carrier_code: String,
}

impl AvailabilityQuery {
    /// Path below the API base, with a trailing slash as the API expects.
    pub fn path(&self) -> String {
        format!(
            "/availability/frequency/{}/{}/{}/{}/{}/{}/",
            self.category,
            self.number,
            format_iso(self.departure),
            format_iso(self.arrival),
            self.from_carrier_code,
            self.to_carrier_code
        )
    }
}

/// Response of the availability endpoint. Only second class is used.
#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityResponse {
    #[serde(rename = "CLASS2", default)]
    pub class2: Vec<SeatEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeatEntry {
    #[serde(rename = "serviceType", default)]
    pub service_type: String,

    #[serde(rename = "type", default)]
    pub seat_type: String,

    #[serde(rename = "noOfAvailableSpots", default)]
    pub available_spots: i64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CodeRepr {
    Number(u64),
    Text(String),
}

impl From<CodeRepr> for String {
    fn from(repr: CodeRepr) -> Self {
        match repr {
            CodeRepr::Number(n) => n.to_string(),
            CodeRepr::Text(s) => s,
        }
    }
}

fn code<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    CodeRepr::deserialize(deserializer).map(String::from)
}

fn optional_code<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Option::<CodeRepr>::deserialize(deserializer).map(|repr| repr.map(String::from))
}
