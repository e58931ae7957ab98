// Passbook — Enclave error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnclaveError {
    #[error("Key derivation error: {0}")]
    Derivation(String),

    #[error("Password must not be empty")]
    EmptyPassword,
}
