//! Error types

use thiserror::Error;

/// Crate-wide result type
pub type Result<T> = std::result::Result<T, HighlightError>;

/// Errors surfaced by highlight persistence operations
///
/// Expected conditions (empty selection, unknown highlight id, missing
/// element id) are silent no-ops, not errors. Only failures with user-visible
/// data-loss risk reach this type.
#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Storage-specific errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("quota exceeded: value is {attempted} bytes, limit is {limit}")]
    QuotaExceeded { attempted: usize, limit: usize },
}
