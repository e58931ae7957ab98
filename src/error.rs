// Passbook — Top-level error types
//
// Aggregates errors from the session, store and enclave modules into a single
// error enum for the application boundary.

use thiserror::Error;

/// Top-level error type for all Passbook operations.
#[derive(Debug, Error)]
pub enum PassbookError {
    #[error(transparent)]
    Session(#[from] crate::session::SessionError),

    #[error("Store error: {0}")]
    Store(#[from] crate::store::StoreError),

    #[error("Enclave error: {0}")]
    Enclave(#[from] crate::enclave::EnclaveError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, PassbookError>;
