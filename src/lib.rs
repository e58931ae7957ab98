// Passbook — Library root
//
// Re-exports the command, engine, session, store, enclave and CLI modules.

pub mod cli;
pub mod command;
pub mod enclave;
pub mod engine;
pub mod error;
pub mod session;
pub mod store;

pub use error::{PassbookError, Result};
