// Passbook — Account Store Repository
//
// Implements the record-store contract on the keyed SQLite database:
// insert, substring / exact lookups, single-column update, and deletes.

use chrono::Utc;
use rusqlite::{params, ErrorCode};
use uuid::Uuid;

use super::db::Database;
use super::models::{Account, NewAccount};
use super::StoreError;
use crate::command::Column;

const ACCOUNT_COLUMNS: &str =
    "id, name, username, password, pwdmnemonic, email, other, created_at, updated_at";

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the account table.
pub trait AccountStore {
    /// Insert a new account. Returns the generated UUID.
    fn insert(&self, account: NewAccount) -> Result<Uuid, StoreError>;

    /// Accounts whose name contains `fragment` (case-insensitive), ordered by
    /// lower-cased name.
    fn find_like(&self, fragment: &str) -> Result<Vec<Account>, StoreError>;

    /// The account whose name equals `name` exactly, if any.
    fn find_exact(&self, name: &str) -> Result<Option<Account>, StoreError>;

    /// Every account name, ordered by lower-cased name.
    fn list_names(&self) -> Result<Vec<String>, StoreError>;

    /// Accounts whose `other` notes contain `word` (case-insensitive).
    fn search_other(&self, word: &str) -> Result<Vec<Account>, StoreError>;

    /// Overwrite one column of the account named `name`. Returns rows affected.
    fn update_column(&self, name: &str, column: Column, value: &str) -> Result<usize, StoreError>;

    /// Delete the account named `name`. Returns rows affected.
    fn delete(&self, name: &str) -> Result<usize, StoreError>;

    /// Delete every account. Returns rows affected.
    fn delete_all(&self) -> Result<usize, StoreError>;
}

// ─── SQLite Implementation ──────────────────────────────────────────────────

pub struct SqliteAccountStore<'a> {
    db: &'a Database,
}

impl<'a> SqliteAccountStore<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Parse an account row from the database.
    fn row_to_account(row: &rusqlite::Row<'_>) -> rusqlite::Result<Account> {
        let id_str: String = row.get(0)?;
        let created_at_str: String = row.get(7)?;
        let updated_at_str: String = row.get(8)?;

        let id = Uuid::parse_str(&id_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?;

        let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());
        let updated_at = chrono::DateTime::parse_from_rfc3339(&updated_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());

        Ok(Account::new(
            id,
            row.get(1)?,
            row.get(2)?,
            row.get(3)?,
            row.get(4)?,
            row.get(5)?,
            row.get(6)?,
            created_at,
            updated_at,
        ))
    }

    fn query_accounts(&self, sql: &str, param: &str) -> Result<Vec<Account>, StoreError> {
        let mut stmt = self.db.conn().prepare(sql)?;
        let rows = stmt.query_map(params![param], Self::row_to_account)?;

        let mut accounts = Vec::new();
        for row in rows {
            accounts.push(row?);
        }

        Ok(accounts)
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(err, rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation)
}

impl<'a> AccountStore for SqliteAccountStore<'a> {
    fn insert(&self, account: NewAccount) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        let now = Utc::now().to_rfc3339();

        self.db
            .conn()
            .execute(
                "INSERT INTO account
                    (id, name, username, password, pwdmnemonic, email, other,
                     created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    id.to_string(),
                    account.name,
                    account.username,
                    account.password,
                    account.pwdmnemonic,
                    account.email,
                    account.other,
                    now,
                    now,
                ],
            )
            .map_err(|e| {
                if is_unique_violation(&e) {
                    StoreError::UniqueViolation(account.name.clone())
                } else {
                    StoreError::Database(e)
                }
            })?;

        tracing::info!(account_id = %id, name = %account.name, "Account stored");
        Ok(id)
    }

    fn find_like(&self, fragment: &str) -> Result<Vec<Account>, StoreError> {
        let sql = format!(
            "SELECT {} FROM account
             WHERE instr(casefold(name), casefold(?1)) > 0
             ORDER BY casefold(name)",
            ACCOUNT_COLUMNS
        );
        self.query_accounts(&sql, fragment)
    }

    fn find_exact(&self, name: &str) -> Result<Option<Account>, StoreError> {
        let sql = format!("SELECT {} FROM account WHERE name = ?1 LIMIT 1", ACCOUNT_COLUMNS);
        Ok(self.query_accounts(&sql, name)?.into_iter().next())
    }

    fn list_names(&self) -> Result<Vec<String>, StoreError> {
        let mut stmt = self
            .db
            .conn()
            .prepare("SELECT name FROM account ORDER BY casefold(name)")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut names = Vec::new();
        for row in rows {
            names.push(row?);
        }

        Ok(names)
    }

    fn search_other(&self, word: &str) -> Result<Vec<Account>, StoreError> {
        let sql = format!(
            "SELECT {} FROM account
             WHERE instr(casefold(other), casefold(?1)) > 0
             ORDER BY casefold(name)",
            ACCOUNT_COLUMNS
        );
        self.query_accounts(&sql, word)
    }

    fn update_column(&self, name: &str, column: Column, value: &str) -> Result<usize, StoreError> {
        // Column names come from the closed `Column` enum, never from input.
        let sql = format!(
            "UPDATE account SET {} = ?1, updated_at = ?2 WHERE name = ?3",
            column.attribute()
        );

        let affected = self
            .db
            .conn()
            .execute(&sql, params![value, Utc::now().to_rfc3339(), name])
            .map_err(|e| {
                if is_unique_violation(&e) {
                    StoreError::UniqueViolation(value.to_string())
                } else {
                    StoreError::Database(e)
                }
            })?;

        tracing::debug!(name = %name, column = %column, affected, "Account column updated");
        Ok(affected)
    }

    fn delete(&self, name: &str) -> Result<usize, StoreError> {
        let affected = self
            .db
            .conn()
            .execute("DELETE FROM account WHERE name = ?1", params![name])?;

        if affected > 0 {
            tracing::info!(name = %name, "Account deleted");
        }

        Ok(affected)
    }

    fn delete_all(&self) -> Result<usize, StoreError> {
        let affected = self.db.conn().execute("DELETE FROM account", [])?;
        tracing::warn!(affected, "All accounts deleted");
        Ok(affected)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
