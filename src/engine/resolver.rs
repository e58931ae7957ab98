// Passbook — Record Resolver
//
// Name lookup in two flavors: fuzzy (substring, case-insensitive) for the
// find commands, and exact for update and delete.

use crate::error::Result;
use crate::session::SessionError;
use crate::store::{Account, AccountStore};

/// Banner printed above a find result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Headline {
    /// An account matched the fragment exactly; the banner is a blank line.
    Exact,
    OneSimilar,
    Several,
}

impl Headline {
    pub fn banner(self) -> &'static str {
        match self {
            Headline::Exact => "",
            Headline::OneSimilar => "Found one account with similar name:",
            Headline::Several => "Found several accounts:",
        }
    }
}

/// Accounts matching `fragment`. An exact (case-sensitive) name match wins
/// over any number of fuzzy matches. No match at all is `EmptyResultSet`.
pub fn find<S: AccountStore + ?Sized>(store: &S, fragment: &str) -> Result<(Vec<Account>, Headline)> {
    let mut matches = store.find_like(fragment)?;

    if let Some(pos) = matches.iter().position(|account| account.name == fragment) {
        let exact = matches.swap_remove(pos);
        return Ok((vec![exact], Headline::Exact));
    }

    let headline = match matches.len() {
        0 => return Err(SessionError::EmptyResultSet.into()),
        1 => Headline::OneSimilar,
        _ => Headline::Several,
    };

    tracing::debug!(fragment = %fragment, count = matches.len(), "Fuzzy name lookup");
    Ok((matches, headline))
}

/// The account named exactly `name`, or `NotFound`.
pub fn find_exact<S: AccountStore + ?Sized>(store: &S, name: &str) -> Result<Account> {
    store
        .find_exact(name)?
        .ok_or_else(|| SessionError::NotFound(name.to_string()).into())
}
