//! Intercity HTTP client.
//!
//! One client serves all three upstream endpoints. Every request holds a
//! semaphore permit while in flight, which caps the burst a single search
//! can produce when it fans out availability checks.

use std::sync::Arc;

use chrono::Local;
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::availability::SeatSource;
use crate::domain::{SeatInventory, Station, format_update_stamp};
use crate::search::ConnectionProvider;
use crate::stations::StationSource;

use super::convert::{convert_inventory, convert_stations};
use super::error::IntercityError;
use super::types::{
    AvailabilityQuery, AvailabilityResponse, ConnectionDto, ConnectionsResponse,
    SearchConnectionsRequest, StationsRequest, StationsResponse,
};

/// Default base URL for the Intercity API gateway.
const DEFAULT_BASE_URL: &str = "https://api-gateway.intercity.pl";

/// The gateway rejects requests without a browser-like agent.
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:143.0) Gecko/20100101 Firefox/143.0";

/// Device number the public booking site identifies itself with.
pub const DEFAULT_DEVICE_ID: u32 = 956;

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 8;

const STATIONS_PATH: &str = "/server/public/endpoint/Aktualizacja";
const CONNECTIONS_PATH: &str = "/server/public/endpoint/Pociagi";

/// Configuration for the Intercity client.
#[derive(Debug, Clone)]
pub struct IntercityConfig {
    /// Base URL for the API (defaults to the production gateway)
    pub base_url: String,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Device number sent in request bodies
    pub device_id: u32,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl IntercityConfig {
    /// Create a config pointing at the production gateway.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            device_id: DEFAULT_DEVICE_ID,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for IntercityConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Intercity API client.
#[derive(Debug, Clone)]
pub struct IntercityClient {
    http: reqwest::Client,
    base_url: String,
    device_id: u32,
    semaphore: Arc<Semaphore>,
}

impl IntercityClient {
    /// Create a new client with the given configuration.
    pub fn new(config: IntercityConfig) -> Result<Self, IntercityError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            device_id: config.device_id,
            // A zero-permit semaphore would hang every request.
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Device number to put in request bodies.
    pub fn device_id(&self) -> u32 {
        self.device_id
    }

    /// Send a request and decode a JSON body, holding a permit throughout.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, IntercityError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| IntercityError::Closed)?;

        let response = request.send().await?;
        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "intercity response");

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(IntercityError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IntercityError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| IntercityError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

impl StationSource for IntercityClient {
    /// Fetch the full station list via `pobierzStacje`.
    async fn fetch_stations(&self) -> Result<Vec<Station>, IntercityError> {
        let body = StationsRequest {
            method: "pobierzStacje",
            last_update: format_update_stamp(Local::now().naive_local()),
            device_id: self.device_id,
        };

        let url = format!("{}{}", self.base_url, STATIONS_PATH);
        let response: StationsResponse = self.execute(self.http.post(&url).json(&body)).await?;

        Ok(convert_stations(response.stations.into_vec()))
    }
}

impl ConnectionProvider for IntercityClient {
    async fn search_connections(
        &self,
        request: &SearchConnectionsRequest,
    ) -> Result<Vec<ConnectionDto>, IntercityError> {
        let url = format!("{}{}", self.base_url, CONNECTIONS_PATH);
        let response: ConnectionsResponse =
            self.execute(self.http.post(&url).json(request)).await?;

        Ok(response.connections)
    }
}

impl SeatSource for IntercityClient {
    async fn seat_inventory(
        &self,
        query: &AvailabilityQuery,
    ) -> Result<SeatInventory, IntercityError> {
        let url = format!("{}{}", self.base_url, query.path());
        let response: AvailabilityResponse = self.execute(self.http.get(&url)).await?;

        Ok(convert_inventory(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = IntercityConfig::new()
            .with_base_url("http://localhost:8080/")
            .with_max_concurrent(10)
            .with_timeout(60);

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.max_concurrent, 10);
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_defaults() {
        let config = IntercityConfig::default();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.device_id, 956);
        assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);
        assert_eq!(config.timeout_secs, 30);
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn client_creation() {
        let client = IntercityClient::new(IntercityConfig::new().with_max_concurrent(0));
        assert!(client.is_ok());
        assert_eq!(client.unwrap().device_id(), 956);
    }

    // Wire-level behaviour is covered by tests/upstream.rs, which runs a
    // fake gateway on a local port.
}
