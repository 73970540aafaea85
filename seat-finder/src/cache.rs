//! Caching layer for availability answers.
//!
//! Candidates from one search often share legs (the same first train with
//! different onward changes), and users repeat searches. Successful seat
//! inventory answers are kept for a short TTL so those repeats do not hit
//! the gateway again. Failures are never cached: a failed check must be
//! retried on the next search rather than pinned as "unavailable".

use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::availability::SeatSource;
use crate::domain::{SeatInventory, Station};
use crate::intercity::{
    AvailabilityQuery, ConnectionDto, IntercityClient, IntercityError, SearchConnectionsRequest,
};
use crate::search::ConnectionProvider;
use crate::stations::StationSource;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl CacheConfig {
    /// Set a custom TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 10_000,
        }
    }
}

/// Cache for availability answers.
pub struct AvailabilityCache {
    entries: MokaCache<AvailabilityQuery, SeatInventory>,
}

impl AvailabilityCache {
    pub fn new(config: &CacheConfig) -> Self {
        let entries = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { entries }
    }

    pub async fn get(&self, key: &AvailabilityQuery) -> Option<SeatInventory> {
        self.entries.get(key).await
    }

    pub async fn insert(&self, key: AvailabilityQuery, inventory: SeatInventory) {
        self.entries.insert(key, inventory).await;
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.entries.invalidate_all();
    }
}

/// Wraps any seat source and caches its successful answers.
pub struct CachedSeats<S> {
    inner: S,
    cache: AvailabilityCache,
}

impl<S> CachedSeats<S> {
    pub fn new(inner: S, cache_config: &CacheConfig) -> Self {
        Self {
            inner,
            cache: AvailabilityCache::new(cache_config),
        }
    }

    /// Access the wrapped source for operations that bypass the cache.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }
}

impl<S: SeatSource + Sync> SeatSource for CachedSeats<S> {
    async fn seat_inventory(
        &self,
        query: &AvailabilityQuery,
    ) -> Result<SeatInventory, IntercityError> {
        if let Some(cached) = self.cache.get(query).await {
            trace!(train = %query.number, "availability cache hit");
            return Ok(cached);
        }

        let inventory = self.inner.seat_inventory(query).await?;
        self.cache.insert(query.clone(), inventory.clone()).await;

        Ok(inventory)
    }
}

/// The Intercity client with availability caching.
///
/// Station and connection requests pass straight through; only seat
/// inventory is cached.
pub type CachedIntercityClient = CachedSeats<IntercityClient>;

impl StationSource for CachedIntercityClient {
    async fn fetch_stations(&self) -> Result<Vec<Station>, IntercityError> {
        self.inner().fetch_stations().await
    }
}

impl ConnectionProvider for CachedIntercityClient {
    async fn search_connections(
        &self,
        request: &SearchConnectionsRequest,
    ) -> Result<Vec<ConnectionDto>, IntercityError> {
        self.inner().search_connections(request).await
    }
}
