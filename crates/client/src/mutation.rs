//! Optimistic mutation helper.
//!
//! The cart quantity flow applies a change locally before the server
//! confirms it, and restores server truth on failure. Rather than
//! hand-rolling that per screen, every optimistic flow goes through this
//! one implementation: apply the optimistic value, send the request, and
//! on a non-success response replace local state with a re-fetched
//! authoritative copy.

use crate::gateway::ApiResponse;

/// What happened to the optimistic value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The server accepted the mutation; the optimistic value stands.
    Committed,
    /// The server rejected it; local state was restored from a re-fetch.
    RolledBack,
    /// The server rejected it and the re-fetch also failed; the optimistic
    /// value is still in place and the caller should surface an error.
    RollbackFailed,
}

/// Run an optimistic mutation against `slot`.
///
/// `send` is the background request; `refetch` must return the authoritative
/// replacement state, or `None` if it could not be fetched.
pub async fn optimistic<T>(
    slot: &mut T,
    optimistic_value: T,
    send: impl Future<Output = ApiResponse>,
    refetch: impl AsyncFnOnce() -> Option<T>,
) -> (ApiResponse, MutationOutcome) {
    // Optimistically update before the request is even in flight
    *slot = optimistic_value;

    let response = send.await;
    if response.is_success() {
        return (response, MutationOutcome::Committed);
    }

    // Correctness over optimism: discard the local guess and restore truth
    match refetch().await {
        Some(truth) => {
            *slot = truth;
            (response, MutationOutcome::RolledBack)
        }
        None => (response, MutationOutcome::RollbackFailed),
    }
}
