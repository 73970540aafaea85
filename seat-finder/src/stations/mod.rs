//! Station directory.
//!
//! Maps public station codes to the carrier codes the availability endpoint
//! needs. Refreshed from the Intercity API on demand, persisted to disk, and
//! warm-loaded from disk at startup.

mod cache;
mod directory;
mod error;

pub use cache::{StationCache, StationCacheConfig};
pub use directory::{StationDirectory, StationSource, StationSummary};
pub use error::StationError;
