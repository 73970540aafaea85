//! Disk persistence for the station directory.
//!
//! The whole directory is one JSON file, replaced wholesale on every
//! refresh. Writes go to a sibling temporary file which is then renamed over
//! the target, so a reader never sees a half-written directory.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::domain::Station;

use super::error::StationError;

/// Persisted station data with metadata.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedStations {
    /// Unix timestamp of the refresh that produced this file.
    refreshed_at_secs: u64,
    stations: Vec<Station>,
}

/// Configuration for the station disk cache.
#[derive(Debug, Clone)]
pub struct StationCacheConfig {
    /// Path to the cache file.
    pub path: PathBuf,
}

impl StationCacheConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for StationCacheConfig {
    fn default() -> Self {
        // Default to a cache file in the current directory
        Self::new("stations_cache.json")
    }
}

/// Disk cache for the station directory.
#[derive(Debug, Clone)]
pub struct StationCache {
    config: StationCacheConfig,
}

impl StationCache {
    pub fn new(config: StationCacheConfig) -> Self {
        Self { config }
    }

    /// Load the last persisted directory.
    ///
    /// Returns `Ok(None)` if nothing has been persisted yet, and an error if
    /// the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Option<Vec<Station>>, StationError> {
        let contents = match std::fs::read_to_string(&self.config.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StationError::Cache {
                    message: format!("failed to read cache file: {}", e),
                });
            }
        };

        let persisted: PersistedStations =
            serde_json::from_str(&contents).map_err(|e| StationError::Cache {
                message: format!("failed to parse cache file: {}", e),
            })?;

        Ok(Some(persisted.stations))
    }

    /// Replace the persisted directory.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, stations: &[Station]) -> Result<(), StationError> {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map_err(|_| StationError::Cache {
                message: "system time before unix epoch".to_string(),
            })?
            .as_secs();

        let persisted = PersistedStations {
            refreshed_at_secs: now,
            stations: stations.to_vec(),
        };

        if let Some(parent) = self.config.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| StationError::Cache {
                message: format!("failed to create cache directory: {}", e),
            })?;
        }

        let json = serde_json::to_string_pretty(&persisted).map_err(|e| StationError::Cache {
            message: format!("failed to serialize cache: {}", e),
        })?;

        let tmp = self.temp_path();
        std::fs::write(&tmp, json).map_err(|e| StationError::Cache {
            message: format!("failed to write cache file: {}", e),
        })?;

        std::fs::rename(&tmp, &self.config.path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp);
            StationError::Cache {
                message: format!("failed to replace cache file: {}", e),
            }
        })?;

        Ok(())
    }

    /// Get the cache file path.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.config.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}
