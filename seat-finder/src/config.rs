//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::intercity::IntercityConfig;

/// Error returned when an environment variable holds an unusable value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value for {key}: {value:?}")]
pub struct ConfigError {
    key: &'static str,
    value: String,
}

/// Everything `main` needs to start the server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (`SEAT_FINDER_ADDR`)
    pub addr: SocketAddr,
    /// Directory of frontend assets (`SEAT_FINDER_STATIC_DIR`)
    pub static_dir: String,
    /// Station directory cache file (`SEAT_FINDER_STATION_CACHE`)
    pub station_cache: PathBuf,
    /// Upstream client settings (`INTERCITY_*`)
    pub intercity: IntercityConfig,
    /// How long availability answers are reused (`AVAILABILITY_CACHE_TTL_SECS`)
    pub availability_ttl: Duration,
    /// Background station refresh interval (`STATION_REFRESH_HOURS`)
    pub station_refresh: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            static_dir: "public".to_string(),
            station_cache: PathBuf::from("stations_cache.json"),
            intercity: IntercityConfig::default(),
            availability_ttl: Duration::from_secs(60),
            station_refresh: Duration::from_secs(24 * 60 * 60),
        }
    }
}

impl ServerConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, falling back to defaults for
    /// unset keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(addr) = parsed(&lookup, "SEAT_FINDER_ADDR")? {
            config.addr = addr;
        }
        if let Some(dir) = lookup("SEAT_FINDER_STATIC_DIR") {
            config.static_dir = dir;
        }
        if let Some(path) = lookup("SEAT_FINDER_STATION_CACHE") {
            config.station_cache = PathBuf::from(path);
        }
        if let Some(url) = lookup("INTERCITY_BASE_URL") {
            config.intercity = config.intercity.with_base_url(url);
        }
        if let Some(secs) = parsed(&lookup, "INTERCITY_TIMEOUT_SECS")? {
            config.intercity = config.intercity.with_timeout(secs);
        }
        if let Some(n) = parsed::<usize>(&lookup, "INTERCITY_MAX_CONCURRENT")? {
            if n == 0 {
                return Err(ConfigError {
                    key: "INTERCITY_MAX_CONCURRENT",
                    value: n.to_string(),
                });
            }
            config.intercity = config.intercity.with_max_concurrent(n);
        }
        if let Some(secs) = parsed(&lookup, "AVAILABILITY_CACHE_TTL_SECS")? {
            config.availability_ttl = Duration::from_secs(secs);
        }
        if let Some(hours) = parsed::<u64>(&lookup, "STATION_REFRESH_HOURS")? {
            config.station_refresh = Duration::from_secs(hours.max(1) * 60 * 60);
        }

        Ok(config)
    }
}

fn parsed<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    lookup(key)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError { key, value })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.addr, SocketAddr::from(([127, 0, 0, 1], 3000)));
        assert_eq!(config.static_dir, "public");
        assert_eq!(config.station_cache, PathBuf::from("stations_cache.json"));
        assert_eq!(config.availability_ttl, Duration::from_secs(60));
        assert_eq!(config.station_refresh, Duration::from_secs(86_400));
        assert_eq!(config.intercity.timeout_secs, 30);
    }

    #[test]
    fn overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("SEAT_FINDER_ADDR", "0.0.0.0:8080"),
            ("SEAT_FINDER_STATIC_DIR", "/srv/www"),
            ("SEAT_FINDER_STATION_CACHE", "/var/lib/seat-finder/stations.json"),
            ("INTERCITY_BASE_URL", "http://localhost:9999/"),
            ("INTERCITY_TIMEOUT_SECS", "5"),
            ("INTERCITY_MAX_CONCURRENT", "2"),
            ("AVAILABILITY_CACHE_TTL_SECS", "0"),
            ("STATION_REFRESH_HOURS", "6"),
        ]))
        .unwrap();

        assert_eq!(config.addr, SocketAddr::from(([0, 0, 0, 0], 8080)));
        assert_eq!(config.static_dir, "/srv/www");
        assert_eq!(
            config.station_cache,
            PathBuf::from("/var/lib/seat-finder/stations.json")
        );
        assert_eq!(config.intercity.base_url, "http://localhost:9999");
        assert_eq!(config.intercity.timeout_secs, 5);
        assert_eq!(config.intercity.max_concurrent, 2);
        assert_eq!(config.availability_ttl, Duration::ZERO);
        assert_eq!(config.station_refresh, Duration::from_secs(6 * 3600));
    }

    #[test]
    fn invalid_values_are_reported() {
        let err = ServerConfig::from_lookup(lookup(&[("INTERCITY_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid value for INTERCITY_TIMEOUT_SECS: \"soon\"");

        assert!(ServerConfig::from_lookup(lookup(&[("INTERCITY_MAX_CONCURRENT", "0")])).is_err());
        assert!(ServerConfig::from_lookup(lookup(&[("SEAT_FINDER_ADDR", "localhost")])).is_err());
    }
}
