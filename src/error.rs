//! Error taxonomy for the extraction/evaluation pipeline.
//!
//! `Backend` and `Parse` are recoverable: the orchestration layer answers
//! them with the deterministic analyzers and they never escape
//! `extract_metadata` / `evaluate_summary`. `Validation` and `SourceFetch`
//! surface to the caller.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Caller-supplied input fails a precondition. Not retried.
    #[error("{0}")]
    Validation(String),

    /// Every attempted completion backend failed (network, non-2xx,
    /// malformed body). Recovered locally via the fallback analyzers.
    #[error("completion backend failed: {0}")]
    Backend(String),

    /// Model output did not match the expected schema after cleanup.
    /// Recovered locally exactly like `Backend`.
    #[error("could not parse model response: {0}")]
    Parse(String),

    /// Remote abstract fetch failed; there is no local fallback for
    /// fetching arbitrary text, so this surfaces.
    #[error("{0}")]
    SourceFetch(String),
}

impl Error {
    /// True for error kinds the deterministic fallback absorbs.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Backend(_) | Error::Parse(_))
    }
}
