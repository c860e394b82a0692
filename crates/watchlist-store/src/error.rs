use thiserror::Error;

/// Error taxonomy for watchlist storage operations.
///
/// `Validation` and `Conflict` are raised before any write happens;
/// `Storage` wraps the underlying driver failure so callers can tell an
/// empty result from a failed one.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl StoreError {
    /// Stable machine-readable tag, used by API error envelopes and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::Validation(_) => "validation",
            StoreError::Conflict(_) => "conflict",
            StoreError::NotFound(_) => "not_found",
            StoreError::Storage(_) => "storage",
        }
    }
}
