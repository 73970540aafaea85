//! Seat inventory reported by the availability endpoint.

/// One row of second-class inventory for a train segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatOffer {
    /// e.g. "SEAT", "COUCHETTE", "BIKE"
    pub service_type: String,
    /// e.g. "COMMON", "COMPARTMENT", "QUIET"
    pub seat_type: String,
    pub available: i64,
}

/// Second-class inventory for one segment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeatInventory {
    pub offers: Vec<SeatOffer>,
}

impl SeatInventory {
    pub fn new(offers: Vec<SeatOffer>) -> Self {
        Self { offers }
    }

    /// True if at least one ordinary seat is still free.
    pub fn has_common_seat(&self) -> bool {
        self.offers
            .iter()
            .any(|o| o.service_type == "SEAT" && o.seat_type == "COMMON" && o.available > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(service_type: &str, seat_type: &str, available: i64) -> SeatOffer {
        SeatOffer {
            service_type: service_type.to_string(),
            seat_type: seat_type.to_string(),
            available,
        }
    }

    #[test]
    fn common_seat_with_spots() {
        let inv = SeatInventory::new(vec![offer("SEAT", "COMMON", 3)]);
        assert!(inv.has_common_seat());
    }

    #[test]
    fn zero_spots_is_not_available() {
        let inv = SeatInventory::new(vec![offer("SEAT", "COMMON", 0)]);
        assert!(!inv.has_common_seat());
    }

    #[test]
    fn other_seat_kinds_do_not_count() {
        let inv = SeatInventory::new(vec![
            offer("SEAT", "COMPARTMENT", 12),
            offer("BIKE", "COMMON", 4),
            offer("COUCHETTE", "COMMON", 2),
        ]);
        assert!(!inv.has_common_seat());
    }

    #[test]
    fn any_matching_row_is_enough() {
        let inv = SeatInventory::new(vec![
            offer("SEAT", "COMMON", 0),
            offer("SEAT", "QUIET", 5),
            offer("SEAT", "COMMON", 1),
        ]);
        assert!(inv.has_common_seat());
    }

    #[test]
    fn empty_inventory() {
        assert!(!SeatInventory::default().has_common_seat());
    }
}
