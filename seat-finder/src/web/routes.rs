//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};

use crate::domain::{StationCode, parse_search_date};
use crate::search::{ConnectionQuery, ConnectionSearch, SearchError};
use crate::stations::{StationError, StationSummary};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
///
/// `static_dir` is the path to the frontend assets; anything that isn't an
/// API route is served from there.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stations", get(list_stations))
        .route("/api/stations/:code", get(station_by_code))
        .route("/api/connections", post(search_connections))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Refresh the station directory and return the picker view of it.
async fn list_stations(
    State(state): State<AppState>,
) -> Result<Json<Vec<StationSummary>>, AppError> {
    let stations = state.stations.refresh(state.intercity.as_ref()).await?;
    Ok(Json(stations))
}

/// Look up one station by its public code.
async fn station_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<StationResult>, AppError> {
    let code = StationCode::parse(&code).map_err(|_| AppError::BadRequest {
        message: format!("Invalid station code: {code:?}"),
    })?;

    let station = state.stations.lookup_by_code(&code).await?;
    Ok(Json(StationResult::from(&station)))
}

/// Search for connections with a free seat on every leg.
async fn search_connections(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Vec<ConnectionResult>>, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: ConnectionSearchRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "unparseable search request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let origin = parse_code("start", &req.start)?;
    let destination = parse_code("end", &req.end)?;
    let date = parse_search_date(&req.date).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    let query = ConnectionQuery::new(origin, destination, date);
    let results = ConnectionSearch::new(state.intercity.as_ref(), &state.stations, &state.config)
        .search(&query)
        .await?;
    debug!(
        cached_answers = state.intercity.cache_entry_count(),
        "availability cache size"
    );

    Ok(Json(results.iter().map(ConnectionResult::from).collect()))
}

fn parse_code(which: &str, endpoint: &Endpoint) -> Result<StationCode, AppError> {
    let raw = endpoint.station_code.to_string();
    StationCode::parse(&raw).map_err(|_| AppError::BadRequest {
        message: format!("Invalid {which} station code: {raw:?}"),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    /// The carrier failed; `detail` is logged but not shown to clients.
    Upstream { message: &'static str, detail: String },
    Internal { message: String },
}

impl From<StationError> for AppError {
    fn from(e: StationError) -> Self {
        match e {
            StationError::NotFound(_) => AppError::NotFound {
                message: e.to_string(),
            },
            StationError::Upstream(_) => AppError::Upstream {
                message: "Failed to fetch stations",
                detail: e.to_string(),
            },
            StationError::Cache { .. } => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::InvalidRequest(message) => AppError::BadRequest { message },
            SearchError::Upstream(_) => AppError::Upstream {
                message: "Failed to fetch connections",
                detail: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => {
                warn!(%message, "bad request");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Upstream { message, detail } => {
                error!(%detail, "{message}");
                (StatusCode::BAD_GATEWAY, message.to_string())
            }
            AppError::Internal { message } => {
                error!(%message, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
