//! Whole-itinerary validation.

use futures::future::join_all;

use crate::domain::Connection;

use super::checker::{SeatChecker, SeatSource};

impl<S: SeatSource> SeatChecker<'_, S> {
    /// Whether every segment of the connection has a free seat.
    ///
    /// All segment checks are started before any is awaited. There is no
    /// short-circuit: each check already yields a plain boolean, so waiting
    /// for the slowest one costs nothing in correctness. A connection with
    /// no segments is vacuously valid.
    pub async fn is_valid(&self, connection: &Connection) -> bool {
        let checks = connection
            .segments
            .iter()
            .map(|segment| self.check_segment(segment));

        join_all(checks).await.into_iter().all(|available| available)
    }
}
