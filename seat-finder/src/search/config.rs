//! Search configuration for connection queries.

use crate::intercity::DEFAULT_DEVICE_ID;

/// Train categories searched by default: the long-distance Intercity
/// products plus replacement buses.
const DEFAULT_CATEGORIES: [&str; 5] = ["EIP", "EIC", "IC", "TLK", "ZKA"];

/// Fixed parameters sent with every connection search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum number of changes in a connection.
    pub max_transfers: u32,

    /// Minimum time allowed for a change (minutes).
    pub min_transfer_mins: u32,

    /// Maximum time allowed for a change (minutes).
    pub max_transfer_mins: u32,

    /// Train categories to include.
    pub categories: Vec<String>,

    /// Device number sent in the request body.
    pub device_id: u32,

    /// Client version string the gateway expects.
    pub protocol_version: String,

    /// Booking-site search page used for the deep link.
    pub booking_url: String,
}

impl SearchConfig {
    /// Set the transfer limits.
    pub fn with_transfers(mut self, max_transfers: u32, min_mins: u32, max_mins: u32) -> Self {
        self.max_transfers = max_transfers;
        self.min_transfer_mins = min_mins;
        self.max_transfer_mins = max_mins;
        self
    }

    /// Set the train categories to search.
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_transfers: 2,
            min_transfer_mins: 5,
            max_transfer_mins: 1440, // 24 hours
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            device_id: DEFAULT_DEVICE_ID,
            protocol_version: "1.2.2_desktop".to_string(),
            booking_url: "https://ebilet.intercity.pl/wyszukiwanie".to_string(),
        }
    }
}
