//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedIntercityClient;
use crate::search::SearchConfig;
use crate::stations::StationDirectory;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Intercity client with cached availability lookups
    pub intercity: Arc<CachedIntercityClient>,

    /// Station directory; clones share the same data
    pub stations: StationDirectory,

    /// Fixed connection search parameters
    pub config: Arc<SearchConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        intercity: Arc<CachedIntercityClient>,
        stations: StationDirectory,
        config: SearchConfig,
    ) -> Self {
        Self {
            intercity,
            stations,
            config: Arc::new(config),
        }
    }
}
