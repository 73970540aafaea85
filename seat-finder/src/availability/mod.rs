//! Seat availability verification.
//!
//! A segment is available if the carrier reports at least one free common
//! second-class seat on it; a connection is valid if every one of its
//! segments is available. Checks for one connection run concurrently and
//! any failure counts as "no seats" (see [`fail_closed`]).

mod checker;
mod policy;
#[cfg(test)]
pub(crate) mod testing;
mod validator;

pub use checker::{CheckError, SeatChecker, SeatSource};
pub use policy::fail_closed;
