//! Shared error types for the engine crate.

use thiserror::Error;

use crate::session::Phase;

/// Errors emitted when a session operation is called out of sequence.
///
/// These indicate a host sequencing bug, not a quiz outcome; the session
/// state is never mutated when one of these is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("{operation} is not valid in the {phase:?} phase")]
    InvalidPhase {
        operation: &'static str,
        phase: Phase,
    },

    #[error("a question fetch is already in flight")]
    Busy,
}

/// Errors surfaced by a question source.
///
/// Transport detail is kept as strings so the type stays `Clone + Eq`
/// and comparable in tests; every variant is recoverable by retrying the
/// session start.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FetchError {
    #[error("network failure: {0}")]
    NetworkFailure(String),

    #[error("response decode failure: {0}")]
    DecodeFailure(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Why a session load ended in the `Errored` phase.
///
/// A successful-but-empty fetch is deliberately kept apart from fetch
/// errors: "no results" steers the player toward different filters, a
/// fetch error toward retrying.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LoadFailure {
    #[error("no questions matched the requested filters")]
    NoResults,

    #[error(transparent)]
    Fetch(#[from] FetchError),
}
