//! Seat finder server.
//!
//! A proxy in front of the PKP Intercity booking API that answers: "which
//! trains between these two stations on this day can I still get a seat
//! on?"

pub mod availability;
pub mod cache;
pub mod config;
pub mod domain;
pub mod intercity;
pub mod search;
pub mod stations;
pub mod web;
