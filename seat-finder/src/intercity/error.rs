//! Intercity client error types.

use std::fmt;

/// Errors from the Intercity HTTP client.
#[derive(Debug)]
pub enum IntercityError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    ApiError { status: u16, message: String },

    /// Rate limited by the API
    RateLimited,

    /// Client is shutting down and no request slot could be acquired
    Closed,
}

impl fmt::Display for IntercityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntercityError::Http(e) => write!(f, "HTTP error: {e}"),
            IntercityError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            IntercityError::ApiError { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            IntercityError::RateLimited => write!(f, "rate limited by Intercity API"),
            IntercityError::Closed => write!(f, "client closed"),
        }
    }
}

impl std::error::Error for IntercityError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IntercityError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for IntercityError {
    fn from(err: reqwest::Error) -> Self {
        IntercityError::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = IntercityError::RateLimited;
        assert_eq!(err.to_string(), "rate limited by Intercity API");

        let err = IntercityError::ApiError {
            status: 502,
            message: "Bad Gateway".into(),
        };
        assert_eq!(err.to_string(), "API error 502: Bad Gateway");

        let err = IntercityError::Json {
            message: "missing field `stacje`".into(),
            body: Some("{}".into()),
        };
        assert!(err.to_string().contains("JSON parse error"));
        assert!(err.to_string().contains("(body: {})"));
    }
}
