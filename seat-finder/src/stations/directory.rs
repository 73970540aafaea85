//! In-memory station directory backed by the disk cache.

use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::domain::{Station, StationCode};
use crate::intercity::IntercityError;

use super::cache::StationCache;
use super::error::StationError;

/// Anything that can fetch the current station list.
///
/// This abstraction allows the directory to be tested with mock data.
pub trait StationSource {
    fn fetch_stations(&self) -> impl Future<Output = Result<Vec<Station>, IntercityError>> + Send;
}

/// Presentation view of a station, as the frontend's station picker wants it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationSummary {
    pub name: String,
    #[serde(rename = "stationCode")]
    pub station_code: StationCode,
}

impl From<&Station> for StationSummary {
    fn from(station: &Station) -> Self {
        Self {
            name: station.name.clone(),
            station_code: station.public_code.clone(),
        }
    }
}

/// Thread-safe station directory.
///
/// Holds the last refreshed station list in memory and mirrors it to disk.
/// Clones share the same underlying directory.
#[derive(Clone)]
pub struct StationDirectory {
    inner: Arc<RwLock<Vec<Station>>>,
    cache: StationCache,
    /// Serialises refreshes so two of them never race on the cache file.
    refresh_lock: Arc<Mutex<()>>,
}

impl StationDirectory {
    /// Create an empty directory that persists through `cache`.
    pub fn new(cache: StationCache) -> Self {
        Self::from_stations(cache, Vec::new())
    }

    /// Create a directory pre-populated with `stations`.
    ///
    /// Nothing is written to disk until the next refresh.
    pub fn from_stations(cache: StationCache, stations: Vec<Station>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(stations)),
            cache,
            refresh_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Load the last persisted directory into memory.
    ///
    /// Returns the number of stations loaded; zero if nothing was persisted.
    pub async fn load_persisted(&self) -> Result<usize, StationError> {
        let Some(stations) = self.cache.load()? else {
            debug!(path = %self.cache.path().display(), "no persisted station directory");
            return Ok(0);
        };

        let count = stations.len();
        *self.inner.write().await = stations;
        Ok(count)
    }

    /// Refresh the directory from upstream.
    ///
    /// On success the persisted file and the in-memory copy are both
    /// replaced. On failure neither is touched and the error is returned.
    pub async fn refresh<S: StationSource>(
        &self,
        source: &S,
    ) -> Result<Vec<StationSummary>, StationError> {
        let _guard = self.refresh_lock.lock().await;

        let stations = source.fetch_stations().await?;
        self.cache.save(&stations)?;

        let summaries = stations.iter().map(StationSummary::from).collect();
        let count = stations.len();

        *self.inner.write().await = stations;
        info!(count, "station directory refreshed");

        Ok(summaries)
    }

    /// Look up a station by its public code.
    ///
    /// If the directory holds several stations with the same code, the first
    /// one wins.
    pub async fn lookup_by_code(&self, code: &StationCode) -> Result<Station, StationError> {
        let guard = self.inner.read().await;
        guard
            .iter()
            .find(|s| &s.public_code == code)
            .cloned()
            .ok_or_else(|| StationError::NotFound(code.to_string()))
    }

    /// Get the number of stations in the directory.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Check if the directory is empty.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
