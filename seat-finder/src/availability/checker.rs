//! Per-segment seat availability.

use std::future::Future;

use crate::domain::{SeatInventory, Segment};
use crate::intercity::{AvailabilityQuery, IntercityError};
use crate::stations::{StationDirectory, StationError};

use super::policy::fail_closed;

/// Anything that can report seat inventory for one train segment.
///
/// This abstraction allows the checker to be tested with mock data.
pub trait SeatSource {
    fn seat_inventory(
        &self,
        query: &AvailabilityQuery,
    ) -> impl Future<Output = Result<SeatInventory, IntercityError>> + Send;
}

/// Why a single availability check could not produce an answer.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error(transparent)]
    Station(#[from] StationError),

    #[error(transparent)]
    Upstream(#[from] IntercityError),
}

/// Checks seat availability for segments and whole connections.
///
/// Station codes on segments are resolved to carrier codes through the
/// injected directory.
pub struct SeatChecker<'a, S> {
    source: &'a S,
    directory: &'a StationDirectory,
}

impl<'a, S: SeatSource> SeatChecker<'a, S> {
    pub fn new(source: &'a S, directory: &'a StationDirectory) -> Self {
        Self { source, directory }
    }

    /// Whether the segment has at least one free common seat.
    ///
    /// Never fails: a lookup, transport or parse error counts as
    /// unavailable.
    pub async fn check_segment(&self, segment: &Segment) -> bool {
        fail_closed(self.try_check_segment(segment), segment.train()).await
    }

    /// The fallible check underneath `check_segment`.
    pub async fn try_check_segment(&self, segment: &Segment) -> Result<bool, CheckError> {
        let from = self
            .directory
            .lookup_by_code(&segment.departure_station)
            .await?;
        let to = self.directory.lookup_by_code(&segment.arrival_station).await?;

        let query = AvailabilityQuery {
            category: segment.category.clone(),
            number: segment.number.clone(),
            departure: segment.departure,
            arrival: segment.arrival,
            from_carrier_code: from.carrier_code,
            to_carrier_code: to.carrier_code,
        };

        let inventory = self.source.seat_inventory(&query).await?;
        Ok(inventory.has_common_seat())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::testing::{MockSeats, directory, segment};
    use crate::domain::format_iso;

    #[tokio::test]
    async fn available_segment() {
        let seats = MockSeats::new().with_seats("123", 3);
        let directory = directory();
        let checker = SeatChecker::new(&seats, &directory);

        assert!(checker.check_segment(&segment("123", "100", "200")).await);
    }

    #[tokio::test]
    async fn query_uses_carrier_codes_and_iso_times() {
        let seats = MockSeats::new().with_seats("123", 3);
        let directory = directory();
        let checker = SeatChecker::new(&seats, &directory);
        let seg = segment("123", "100", "200");

        checker.check_segment(&seg).await;

        let queries = seats.queries();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].category, "IC");
        assert_eq!(queries[0].number, "123");
        assert_eq!(queries[0].from_carrier_code, "A1");
        assert_eq!(queries[0].to_carrier_code, "B2");
        assert_eq!(format_iso(queries[0].departure), "2024-05-01T08:00:00");
        assert_eq!(format_iso(queries[0].arrival), "2024-05-01T10:00:00");
    }

    #[tokio::test]
    async fn zero_spots_is_unavailable() {
        let seats = MockSeats::new().with_seats("123", 0);
        let directory = directory();
        let checker = SeatChecker::new(&seats, &directory);

        assert!(!checker.check_segment(&segment("123", "100", "200")).await);
    }

    #[tokio::test]
    async fn transport_failure_is_unavailable() {
        let seats = MockSeats::new().failing("123");
        let directory = directory();
        let checker = SeatChecker::new(&seats, &directory);
        let seg = segment("123", "100", "200");

        assert!(matches!(
            checker.try_check_segment(&seg).await,
            Err(CheckError::Upstream(_))
        ));
        assert!(!checker.check_segment(&seg).await);
    }

    #[tokio::test]
    async fn unknown_station_is_unavailable_without_upstream_call() {
        let seats = MockSeats::new().with_seats("123", 3);
        let directory = directory();
        let checker = SeatChecker::new(&seats, &directory);
        let seg = segment("123", "100", "999");

        assert!(matches!(
            checker.try_check_segment(&seg).await,
            Err(CheckError::Station(StationError::NotFound(_)))
        ));
        assert!(!checker.check_segment(&seg).await);
        assert!(seats.queries().is_empty());
    }
}
