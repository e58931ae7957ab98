// Passbook — Store Key Provider
//
// Turns the operator's password into the key that opens the SQLCipher
// database. A wrong password derives a different key, which the store
// rejects on open; that rejection is the session's credential gate.
//
// Flow:
//   1. The CLI sources the password (flag, env, or prompt) into a `Zeroizing<String>`
//   2. `derive_db_key()` runs Argon2id over it with a per-database salt
//   3. `key_to_hex()` renders the key for `PRAGMA key`; both buffers are zeroized on drop

use argon2::{Algorithm, Argon2, Params, Version};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::EnclaveError;

// ─── Constants ───────────────────────────────────────────────────────────────

/// Domain label mixed into every salt.
const SALT_DOMAIN: &str = "passbook-account-store";

/// Length of the derived database key in bytes (256-bit for AES-256).
const DERIVED_KEY_LEN: usize = 32;

// Argon2id parameters: m=65536 (64 MiB), t=3, p=4
const ARGON2_M_COST: u32 = 65536;
const ARGON2_T_COST: u32 = 3;
const ARGON2_P_COST: u32 = 4;

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over store-key derivation, so tests can swap in cheap parameters.
pub trait StoreKeyProvider {
    /// Derive the SQLCipher key from the operator's password.
    fn derive_db_key(&self, password: &[u8]) -> Result<Zeroizing<Vec<u8>>, EnclaveError>;
}

// ─── Argon2id Implementation ─────────────────────────────────────────────────

pub struct PasswordKeyProvider {
    store_label: String,
    m_cost: u32,
    t_cost: u32,
    p_cost: u32,
}

impl PasswordKeyProvider {
    /// A provider salted for the database identified by `store_label`
    /// (typically the database file name).
    pub fn new(store_label: &str) -> Self {
        Self {
            store_label: store_label.to_string(),
            m_cost: ARGON2_M_COST,
            t_cost: ARGON2_T_COST,
            p_cost: ARGON2_P_COST,
        }
    }

    /// Override the Argon2id cost parameters.
    pub fn with_cost(mut self, m_cost: u32, t_cost: u32, p_cost: u32) -> Self {
        self.m_cost = m_cost;
        self.t_cost = t_cost;
        self.p_cost = p_cost;
        self
    }

    /// Salt = SHA-256(SALT_DOMAIN || "::" || store_label)
    fn build_salt(&self) -> Vec<u8> {
        let mut hasher = Sha256::new();
        hasher.update(SALT_DOMAIN.as_bytes());
        hasher.update(b"::");
        hasher.update(self.store_label.as_bytes());
        hasher.finalize().to_vec()
    }
}

impl StoreKeyProvider for PasswordKeyProvider {
    fn derive_db_key(&self, password: &[u8]) -> Result<Zeroizing<Vec<u8>>, EnclaveError> {
        if password.is_empty() {
            return Err(EnclaveError::EmptyPassword);
        }

        let salt = self.build_salt();

        let params = Params::new(self.m_cost, self.t_cost, self.p_cost, Some(DERIVED_KEY_LEN))
            .map_err(|e| EnclaveError::Derivation(format!("invalid Argon2 params: {}", e)))?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        let mut derived_key = Zeroizing::new(vec![0u8; DERIVED_KEY_LEN]);
        argon2
            .hash_password_into(password, &salt, &mut derived_key)
            .map_err(|e| EnclaveError::Derivation(format!("Argon2id hash failed: {}", e)))?;

        tracing::debug!("Store key derived");
        Ok(derived_key)
    }
}

/// Convert key bytes to the hex string format SQLCipher expects.
pub fn key_to_hex(key: &[u8]) -> Zeroizing<String> {
    Zeroizing::new(key.iter().map(|b| format!("{:02x}", b)).collect())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
