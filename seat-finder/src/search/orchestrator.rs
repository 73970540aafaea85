//! Connection search with seat filtering.
//!
//! Sends one search to the carrier, validates every candidate concurrently
//! and keeps only those where every leg has a free seat, in the order the
//! carrier returned them.

use std::future::Future;

use chrono::NaiveDate;
use futures::future::join_all;
use tracing::{info, warn};

use crate::availability::{SeatChecker, SeatSource};
use crate::domain::{SearchResultItem, StationCode};
use crate::intercity::{
    CodeParam, ConnectionDto, IntercityError, SearchConnectionsRequest, convert_connection,
};
use crate::stations::StationDirectory;

use super::config::SearchConfig;

/// Error from connection search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The search request itself failed
    #[error("connection search failed: {0}")]
    Upstream(#[from] IntercityError),

    /// Invalid search request
    #[error("invalid search request: {0}")]
    InvalidRequest(String),
}

/// What the user searched for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionQuery {
    pub origin: StationCode,
    pub destination: StationCode,
    pub date: NaiveDate,
}

impl ConnectionQuery {
    pub fn new(origin: StationCode, destination: StationCode, date: NaiveDate) -> Self {
        Self {
            origin,
            destination,
            date,
        }
    }
}

/// Anything that can run a connection search.
///
/// This abstraction allows the search to be tested with mock data.
pub trait ConnectionProvider {
    fn search_connections(
        &self,
        request: &SearchConnectionsRequest,
    ) -> impl Future<Output = Result<Vec<ConnectionDto>, IntercityError>> + Send;
}

/// Runs connection searches.
pub struct ConnectionSearch<'a, P> {
    provider: &'a P,
    directory: &'a StationDirectory,
    config: &'a SearchConfig,
}

impl<'a, P: ConnectionProvider + SeatSource> ConnectionSearch<'a, P> {
    pub fn new(provider: &'a P, directory: &'a StationDirectory, config: &'a SearchConfig) -> Self {
        Self {
            provider,
            directory,
            config,
        }
    }

    /// Search for connections on the given day where every leg has a seat.
    ///
    /// Fails only if the search request itself fails. Candidates that
    /// cannot be verified are dropped.
    pub async fn search(
        &self,
        query: &ConnectionQuery,
    ) -> Result<Vec<SearchResultItem>, SearchError> {
        let request = self.build_request(query)?;
        let candidates = self.provider.search_connections(&request).await?;

        let checker = SeatChecker::new(self.provider, self.directory);
        let validations = candidates
            .iter()
            .map(|candidate| validate_candidate(&checker, candidate));

        let results: Vec<SearchResultItem> =
            join_all(validations).await.into_iter().flatten().collect();

        info!(
            origin = %query.origin,
            destination = %query.destination,
            date = %query.date,
            candidates = candidates.len(),
            available = results.len(),
            "connection search complete"
        );

        Ok(results)
    }

    /// Build the upstream request for a query.
    pub fn build_request(
        &self,
        query: &ConnectionQuery,
    ) -> Result<SearchConnectionsRequest, SearchError> {
        let destination = query.destination.as_number().ok_or_else(|| {
            SearchError::InvalidRequest(format!(
                "destination station code must be numeric: {}",
                query.destination
            ))
        })?;

        let date = query.date.format("%Y-%m-%d").to_string();
        let url = format!(
            "{}?dwyj={}&swyj={}&sprzy={}&time=00:00",
            self.config.booking_url, date, query.origin, query.destination
        );

        Ok(SearchConnectionsRequest {
            device_id: self.config.device_id,
            method: "wyszukajPolaczenia",
            departure_from: format!("{date} 00:00:00"),
            arrival_until: format!("{date} 23:59:59"),
            origin: CodeParam::from(&query.origin),
            destination,
            via: Vec::new(),
            fastest_only: 0,
            connection_count: 0,
            max_transfer_mins: self.config.max_transfer_mins,
            max_transfers: self.config.max_transfers,
            direct_only: 0,
            categories: self.config.categories.clone(),
            carriers: Vec::new(),
            seat_kinds: Vec::new(),
            seat_types: Vec::new(),
            braille: 0,
            min_transfer_mins: self.config.min_transfer_mins,
            attributes: Vec::new(),
            version: self.config.protocol_version.clone(),
            url,
        })
    }
}

/// Validate one candidate, returning its projection if every leg has a seat.
async fn validate_candidate<S: SeatSource>(
    checker: &SeatChecker<'_, S>,
    candidate: &ConnectionDto,
) -> Option<SearchResultItem> {
    let connection = match convert_connection(candidate) {
        Ok(connection) => connection,
        Err(e) => {
            warn!(
                departure = %candidate.departure,
                error = %e,
                "dropping unreadable connection"
            );
            return None;
        }
    };

    checker
        .is_valid(&connection)
        .await
        .then(|| connection.to_result())
}
