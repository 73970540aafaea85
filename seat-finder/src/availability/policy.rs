//! Fail-closed handling for availability checks.

use std::fmt;
use std::future::Future;

use tracing::warn;

/// Run a fallible availability check, treating any error as "no seats".
///
/// An unreachable or malformed check must never be read as "available",
/// and one flaky probe must not abort a whole search, so the error is
/// logged here and collapsed to `false`.
pub async fn fail_closed<F, E>(check: F, what: impl fmt::Display) -> bool
where
    F: Future<Output = Result<bool, E>>,
    E: fmt::Display,
{
    match check.await {
        Ok(available) => available,
        Err(e) => {
            warn!(check = %what, error = %e, "availability check failed, treating as unavailable");
            false
        }
    }
}
