// Passbook — Enclave Module
//
// Argon2id derivation of the SQLCipher key from the operator's password.

mod error;
mod provider;

pub use error::EnclaveError;
pub use provider::{key_to_hex, PasswordKeyProvider, StoreKeyProvider};
