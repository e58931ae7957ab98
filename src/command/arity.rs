// Passbook — Argument Validator

use std::fmt;

use crate::session::SessionError;

/// Accepted argument count for a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Exact(usize),
    /// Inclusive range.
    Range(usize, usize),
    AtLeast(usize),
}

impl Limit {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Limit::Exact(n) => count == n,
            Limit::Range(lo, hi) => (lo..=hi).contains(&count),
            Limit::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Exact(n) => write!(f, "{}", n),
            Limit::Range(lo, hi) => write!(f, "{}..{}", lo, hi),
            Limit::AtLeast(n) => write!(f, "{}..Infinity", n),
        }
    }
}

/// Fail with an arity error unless `args.len()` satisfies `limit`.
pub fn check(args: &[String], limit: Limit) -> Result<(), SessionError> {
    let count = args.len();
    if limit.accepts(count) {
        return Ok(());
    }

    let shape = match limit {
        Limit::Exact(_) => format!("{} for {}", count, limit),
        Limit::Range(..) | Limit::AtLeast(_) => format!("{} in {}", count, limit),
    };
    Err(SessionError::Arity(shape))
}
