// Passbook — Store Module
//
// The account table on a SQLCipher-keyed SQLite database, behind the
// `AccountStore` trait so the session never touches SQL directly.

mod db;
mod error;
mod models;
mod repository;

pub use db::Database;
pub use error::StoreError;
pub use models::{Account, NewAccount, PrivilegeMarker};
pub use repository::{AccountStore, SqliteAccountStore};
