// Passbook — Store error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A write was refused by a uniqueness constraint. Carries the offending value.
    #[error("{0} already in Table!")]
    UniqueViolation(String),

    #[error("Invalid database key — password is wrong or the database is corrupted")]
    InvalidKey,
}
