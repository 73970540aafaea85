//! Web layer for the seat finder.
//!
//! Serves the station list, connection search and the static frontend.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
