// Passbook — SQLCipher Database Management
//
// Opens and initializes the keyed account database. The key is derived from
// the operator's password in the enclave module and is set via PRAGMA before
// any table is touched. Dropping a `Database` closes the connection.

use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;

use super::StoreError;

/// Wrapper around a SQLCipher-keyed SQLite connection.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) a keyed database at the given path.
    /// The `hex_key` must be the hex-encoded 32-byte key derived from Argon2id.
    pub fn open(path: &std::path::Path, hex_key: &str) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;

        conn.pragma_update(None, "key", format!("x'{}'", hex_key))?;

        // A wrong key only surfaces on first read: "file is not a database"
        conn.execute_batch("SELECT count(*) FROM sqlite_master;")
            .map_err(|_| StoreError::InvalidKey)?;

        let db = Self { conn };
        db.register_functions()?;
        db.run_migrations()?;

        tracing::debug!(path = %path.display(), "Account database opened");
        Ok(db)
    }

    /// Open an in-memory database (unkeyed, for testing only).
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.register_functions()?;
        db.run_migrations()?;
        Ok(db)
    }

    /// Get a reference to the underlying connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// `casefold(text)`: Unicode lower-casing. SQLite's own `lower()` and
    /// `LIKE` only fold ASCII.
    fn register_functions(&self) -> Result<(), StoreError> {
        self.conn.create_scalar_function(
            "casefold",
            1,
            FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
            |ctx| {
                let text = ctx.get::<Option<String>>(0)?;
                Ok(text.map(|t| t.to_lowercase()))
            },
        )?;
        Ok(())
    }

    fn run_migrations(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS account (
                id           TEXT PRIMARY KEY,
                name         TEXT NOT NULL UNIQUE,
                username     TEXT,
                password     TEXT,
                pwdmnemonic  TEXT,
                email        TEXT,
                other        TEXT NOT NULL DEFAULT '',
                created_at   TEXT NOT NULL,
                updated_at   TEXT NOT NULL
            );
            ",
        )?;

        tracing::debug!("Database migrations completed successfully");
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
