// Passbook — Session error types
//
// Every variant ends the remaining command chain. The Display text is what
// the operator sees.

use thiserror::Error;

use crate::command::{columns, USAGE};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Wrong number of arguments({})\n{}", .0, USAGE)]
    Arity(String),

    #[error("{}", columns::listing().join("\n"))]
    UnknownColumn(String),

    #[error("{}", USAGE)]
    UnknownCommand(String),

    #[error("{0} already in Table!")]
    DuplicateName(String),

    #[error("Cannot change name to blank!")]
    BlankNameRejected,

    #[error("Cannot find {0}!")]
    NotFound(String),

    #[error("{0} already in Table!")]
    ConstraintViolation(String),

    #[error("{0}")]
    StoreConnection(String),

    #[error("No result found!")]
    EmptyResultSet,

    #[error("Option incorrect!")]
    InvalidOption(String),

    /// The operator declined a confirmation.
    #[error("{0}")]
    Aborted(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_column_lists_columns() {
        let text = SessionError::UnknownColumn("z".to_string()).to_string();
        assert!(text.starts_with("list of columns to update:"));
        assert!(text.contains("    o    other"));
    }

    #[test]
    fn test_usage_bearing_errors() {
        assert!(SessionError::UnknownCommand("q".to_string()).to_string().starts_with("Usage:"));
        let arity = SessionError::Arity("0 for 1".to_string()).to_string();
        assert!(arity.starts_with("Wrong number of arguments(0 for 1)\nUsage:"));
    }
}
