//! Test doubles shared by the availability and search tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::Barrier;

use crate::domain::{
    SeatInventory, SeatOffer, Segment, Station, StationCode, parse_carrier_timestamp,
};
use crate::intercity::{AvailabilityQuery, IntercityError};
use crate::stations::{StationCache, StationCacheConfig, StationDirectory};

use super::SeatSource;

enum Answer {
    Seats(i64),
    Fail,
}

/// Seat source answering per train number.
///
/// Unknown train numbers fail like a transport error would.
pub struct MockSeats {
    answers: HashMap<String, Answer>,
    queries: Mutex<Vec<AvailabilityQuery>>,
    barrier: Option<Arc<Barrier>>,
}

impl MockSeats {
    pub fn new() -> Self {
        Self {
            answers: HashMap::new(),
            queries: Mutex::new(Vec::new()),
            barrier: None,
        }
    }

    /// Report `spots` free common seats on train `number`.
    pub fn with_seats(mut self, number: &str, spots: i64) -> Self {
        self.answers.insert(number.to_string(), Answer::Seats(spots));
        self
    }

    /// Fail every query for train `number`.
    pub fn failing(mut self, number: &str) -> Self {
        self.answers.insert(number.to_string(), Answer::Fail);
        self
    }

    /// Hold every query until `parties` queries are in flight at once.
    pub fn with_barrier(mut self, parties: usize) -> Self {
        self.barrier = Some(Arc::new(Barrier::new(parties)));
        self
    }

    pub fn queries(&self) -> Vec<AvailabilityQuery> {
        self.queries.lock().unwrap().clone()
    }
}

impl SeatSource for MockSeats {
    async fn seat_inventory(
        &self,
        query: &AvailabilityQuery,
    ) -> Result<SeatInventory, IntercityError> {
        self.queries.lock().unwrap().push(query.clone());

        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }

        match self.answers.get(&query.number) {
            Some(Answer::Seats(spots)) => Ok(SeatInventory::new(vec![SeatOffer {
                service_type: "SEAT".to_string(),
                seat_type: "COMMON".to_string(),
                available: *spots,
            }])),
            Some(Answer::Fail) | None => Err(IntercityError::ApiError {
                status: 0,
                message: "connection refused".to_string(),
            }),
        }
    }
}

pub fn station(name: &str, public: &str, carrier: &str) -> Station {
    Station {
        name: name.to_string(),
        public_code: StationCode::parse(public).unwrap(),
        carrier_code: carrier.to_string(),
    }
}

/// Directory with stations 100 → A1, 200 → B2 and 300 → C3.
///
/// Its cache path is never written because tests do not refresh it.
pub fn directory() -> StationDirectory {
    StationDirectory::from_stations(
        StationCache::new(StationCacheConfig::new("unused-test-stations.json")),
        vec![
            station("Alpha", "100", "A1"),
            station("Beta", "200", "B2"),
            station("Gamma", "300", "C3"),
        ],
    )
}

/// An IC segment on 2024-05-01 from 08:00 to 10:00.
pub fn segment(number: &str, from: &str, to: &str) -> Segment {
    Segment {
        category: "IC".to_string(),
        number: number.to_string(),
        departure_station: StationCode::parse(from).unwrap(),
        arrival_station: StationCode::parse(to).unwrap(),
        departure: parse_carrier_timestamp("2024-05-01 08:00:00").unwrap(),
        arrival: parse_carrier_timestamp("2024-05-01 10:00:00").unwrap(),
    }
}
