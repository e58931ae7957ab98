// Passbook — Column Registry
//
// Fixed, ordered mapping from single-letter column codes to account
// attributes. The order drives the column listing and the prompted insert.

use std::fmt;

use crate::session::SessionError;

/// One updatable attribute of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    Username,
    Password,
    Mnemonic,
    Email,
    Other,
}

impl Column {
    /// Every column, in registry order.
    pub const ALL: [Column; 6] = [
        Column::Name,
        Column::Username,
        Column::Password,
        Column::Mnemonic,
        Column::Email,
        Column::Other,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Column::Name => "n",
            Column::Username => "u",
            Column::Password => "p",
            Column::Mnemonic => "m",
            Column::Email => "e",
            Column::Other => "o",
        }
    }

    /// The attribute (and SQL column) name.
    pub fn attribute(self) -> &'static str {
        match self {
            Column::Name => "name",
            Column::Username => "username",
            Column::Password => "password",
            Column::Mnemonic => "pwdmnemonic",
            Column::Email => "email",
            Column::Other => "other",
        }
    }

    /// Look up a column by its command-letter code.
    pub fn resolve(code: &str) -> Result<Column, SessionError> {
        Self::ALL
            .into_iter()
            .find(|column| column.code() == code)
            .ok_or_else(|| SessionError::UnknownColumn(code.to_string()))
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.attribute())
    }
}

/// Ordered `(code, attribute)` pairs.
pub fn list() -> Vec<(&'static str, &'static str)> {
    Column::ALL
        .into_iter()
        .map(|column| (column.code(), column.attribute()))
        .collect()
}

/// Human-readable column listing, shared by `L`, `-h` and unknown-column errors.
pub fn listing() -> Vec<String> {
    let mut lines = vec!["list of columns to update:".to_string()];
    lines.extend(list().into_iter().map(|(code, attribute)| format!("    {}    {}", code, attribute)));
    lines.push("         other can accept variables and concatenated by space".to_string());
    lines
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_codes() {
        assert_eq!(Column::resolve("n").unwrap(), Column::Name);
        assert_eq!(Column::resolve("m").unwrap().attribute(), "pwdmnemonic");
        assert_eq!(Column::resolve("o").unwrap(), Column::Other);
    }

    #[test]
    fn test_resolve_unknown_code_fails() {
        let err = Column::resolve("x").unwrap_err();
        assert!(matches!(err, SessionError::UnknownColumn(ref code) if code == "x"));
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        assert!(Column::resolve("N").is_err());
    }

    #[test]
    fn test_list_preserves_registry_order() {
        let codes: Vec<&str> = list().into_iter().map(|(code, _)| code).collect();
        assert_eq!(codes, vec!["n", "u", "p", "m", "e", "o"]);
    }

    #[test]
    fn test_listing_has_header_rows_and_footer() {
        let lines = listing();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "list of columns to update:");
        assert_eq!(lines[1], "    n    name");
        assert_eq!(lines[4], "    m    pwdmnemonic");
        assert!(lines[7].contains("concatenated by space"));
    }
}
