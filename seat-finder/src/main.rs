use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use seat_finder::cache::{CacheConfig, CachedSeats};
use seat_finder::config::ServerConfig;
use seat_finder::intercity::IntercityClient;
use seat_finder::search::SearchConfig;
use seat_finder::stations::{StationCache, StationCacheConfig, StationDirectory};
use seat_finder::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env().expect("Invalid configuration");

    // Create cached Intercity client
    let client =
        IntercityClient::new(config.intercity.clone()).expect("Failed to create Intercity client");
    let cache_config = CacheConfig::default().with_ttl(config.availability_ttl);
    let intercity = Arc::new(CachedSeats::new(client, &cache_config));

    // Warm the station directory from disk, then from upstream if that was empty
    let stations = StationDirectory::new(StationCache::new(StationCacheConfig::new(
        config.station_cache.clone(),
    )));
    match stations.load_persisted().await {
        Ok(count) => info!(count, "loaded persisted stations"),
        Err(e) => warn!(error = %e, "could not load persisted stations"),
    }
    if stations.is_empty().await
        && let Err(e) = stations.refresh(intercity.as_ref()).await
    {
        warn!(error = %e, "initial station fetch failed; will retry on demand");
    }

    // Spawn background task to refresh the directory
    let refresh_stations = stations.clone();
    let refresh_client = Arc::clone(&intercity);
    let refresh_every = config.station_refresh;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(refresh_every);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            match refresh_stations.refresh(refresh_client.as_ref()).await {
                Ok(list) => info!(count = list.len(), "refreshed stations"),
                Err(e) => warn!(error = %e, "failed to refresh stations"),
            }
        }
    });

    let state = AppState::new(intercity, stations, SearchConfig::default());
    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .expect("Failed to bind listen address");
    info!(addr = %config.addr, upstream = %config.intercity.base_url, "seat finder listening");

    axum::serve(listener, app).await.expect("Server error");
}
