// Passbook — Mutation Engine
//
// Insert, column update (append or replace), delete, and eliminate-all,
// with the domain rules the store does not enforce on its own.

use uuid::Uuid;

use crate::command::Column;
use crate::error::Result;
use crate::session::SessionError;
use crate::store::{AccountStore, NewAccount, StoreError};

use super::resolver;

/// A fully resolved column update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    pub name: String,
    pub column: Column,
    pub append: bool,
    pub data: Vec<String>,
}

impl UpdateRequest {
    /// The new data words joined by single spaces.
    pub fn joined(&self) -> String {
        self.data.join(" ")
    }
}

/// Insert a new account; fails with `DuplicateName` if the exact name exists.
pub fn insert<S: AccountStore + ?Sized>(store: &S, account: NewAccount) -> Result<Uuid> {
    if store.find_exact(&account.name)?.is_some() {
        return Err(SessionError::DuplicateName(account.name).into());
    }

    match store.insert(account) {
        Ok(id) => Ok(id),
        Err(StoreError::UniqueViolation(name)) => Err(SessionError::DuplicateName(name).into()),
        Err(e) => Err(e.into()),
    }
}

/// Renaming to blank is only allowed in append mode, where it is a no-op.
pub fn reject_blank_rename(request: &UpdateRequest) -> Result<()> {
    if request.column == Column::Name && !request.append && request.joined().is_empty() {
        return Err(SessionError::BlankNameRejected.into());
    }
    Ok(())
}

/// Combine the stored value with new data. Appending separates the two with
/// one space when both are non-empty.
pub fn merged_value(existing: &str, append: bool, joined: &str) -> String {
    if !append || existing.is_empty() {
        joined.to_string()
    } else if joined.is_empty() {
        existing.to_string()
    } else {
        format!("{} {}", existing, joined)
    }
}

/// Apply a column update to the account named exactly `request.name`.
/// Returns the value written.
pub fn update<S: AccountStore + ?Sized>(store: &S, request: &UpdateRequest) -> Result<String> {
    reject_blank_rename(request)?;

    let account = resolver::find_exact(store, &request.name)?;
    let value = merged_value(account.value(request.column), request.append, &request.joined());

    match store.update_column(&request.name, request.column, &value) {
        Ok(_) => Ok(value),
        Err(StoreError::UniqueViolation(value)) => {
            Err(SessionError::ConstraintViolation(value).into())
        }
        Err(e) => Err(e.into()),
    }
}

/// Delete the account named exactly `name`.
pub fn delete<S: AccountStore + ?Sized>(store: &S, name: &str) -> Result<()> {
    resolver::find_exact(store, name)?;
    store.delete(name)?;
    Ok(())
}

/// Whether a confirmation answer authorizes eliminate-all.
pub fn confirms_elimination(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("yes")
}

/// Delete every account once `answer` confirms; otherwise abort untouched.
pub fn eliminate_all<S: AccountStore + ?Sized>(store: &S, answer: &str) -> Result<usize> {
    if !confirms_elimination(answer) {
        return Err(SessionError::Aborted("Exit without elimination".to_string()).into());
    }
    Ok(store.delete_all()?)
}
