//! Connection search.
//!
//! Answers "which connections between these stations on this day can I
//! still get a seat on?" by running the carrier's own search and filtering
//! the candidates through the availability checker.

mod config;
mod orchestrator;

pub use config::SearchConfig;
pub use orchestrator::{ConnectionProvider, ConnectionQuery, ConnectionSearch, SearchError};
