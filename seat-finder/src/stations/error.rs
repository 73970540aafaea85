//! Station directory error types.

use crate::intercity::IntercityError;

/// Errors that can occur when refreshing or querying the station directory.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    /// Fetching the station list from upstream failed
    #[error("station list unavailable: {0}")]
    Upstream(#[from] IntercityError),

    /// No station with this public code is known
    #[error("station not found: {0}")]
    NotFound(String),

    /// Cache operation failed
    #[error("cache error: {message}")]
    Cache { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StationError::NotFound("UNKNOWN".into());
        assert_eq!(err.to_string(), "station not found: UNKNOWN");

        let err = StationError::Cache {
            message: "failed to write cache file: disk full".into(),
        };
        assert_eq!(
            err.to_string(),
            "cache error: failed to write cache file: disk full"
        );

        let err = StationError::from(IntercityError::RateLimited);
        assert_eq!(
            err.to_string(),
            "station list unavailable: rate limited by Intercity API"
        );
    }
}
