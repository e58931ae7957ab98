// Passbook — Account data models
//
// The `password` field is private and never included in Debug output or log
// messages. Display code reads it through `password()`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::command::Column;

/// One stored account record.
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub username: Option<String>,
    password: Option<String>,
    pub pwdmnemonic: Option<String>,
    pub email: Option<String>,
    pub other: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Uuid,
        name: String,
        username: Option<String>,
        password: Option<String>,
        pwdmnemonic: Option<String>,
        email: Option<String>,
        other: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            username,
            password,
            pwdmnemonic,
            email,
            other,
            created_at,
            updated_at,
        }
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Current value of a column; absent values read as "".
    pub fn value(&self, column: Column) -> &str {
        match column {
            Column::Name => &self.name,
            Column::Username => self.username.as_deref().unwrap_or(""),
            Column::Password => self.password().unwrap_or(""),
            Column::Mnemonic => self.pwdmnemonic.as_deref().unwrap_or(""),
            Column::Email => self.email.as_deref().unwrap_or(""),
            Column::Other => &self.other,
        }
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("pwdmnemonic", &self.pwdmnemonic)
            .field("email", &self.email)
            .field("other", &self.other)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Input struct for inserting a new account.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct NewAccount {
    pub name: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub pwdmnemonic: Option<String>,
    pub email: Option<String>,
    pub other: String,
}

impl NewAccount {
    /// Build from positional fields following the name: username, password,
    /// mnemonic, email, and then any number of words joined into `other`.
    pub fn from_fields(name: String, fields: Vec<String>) -> Self {
        let mut fields = fields.into_iter();
        let username = fields.next();
        let password = fields.next();
        let pwdmnemonic = fields.next();
        let email = fields.next();
        let other = fields.collect::<Vec<_>>().join(" ");

        Self {
            name,
            username,
            password,
            pwdmnemonic,
            email,
            other,
        }
    }
}

impl fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccount")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("pwdmnemonic", &self.pwdmnemonic)
            .field("email", &self.email)
            .field("other", &self.other)
            .finish()
    }
}

/// Contents of the privilege marker file written by `sudo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivilegeMarker {
    pub granted_at: DateTime<Utc>,
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Account {
        Account::new(
            Uuid::new_v4(),
            "github".to_string(),
            Some("octocat".to_string()),
            Some("hunter2".to_string()),
            None,
            Some("cat@example.com".to_string()),
            "work account".to_string(),
            Utc::now(),
            Utc::now(),
        )
    }

    #[test]
    fn test_account_debug_redacts_password() {
        let debug_output = format!("{:?}", sample());
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("hunter2"), "Debug output must never contain the password");
    }

    #[test]
    fn test_value_reads_missing_columns_as_empty() {
        let account = sample();
        assert_eq!(account.value(Column::Password), "hunter2");
        assert_eq!(account.value(Column::Mnemonic), "");
        assert_eq!(account.value(Column::Other), "work account");
    }

    #[test]
    fn test_from_fields_joins_trailing_words_into_other() {
        let fields = ["a_user", "pw1", "mn", "a@x", "note1", "note2"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let new = NewAccount::from_fields("Alice".to_string(), fields);

        assert_eq!(new.username.as_deref(), Some("a_user"));
        assert_eq!(new.email.as_deref(), Some("a@x"));
        assert_eq!(new.other, "note1 note2");
    }

    #[test]
    fn test_from_fields_with_name_only() {
        let new = NewAccount::from_fields("solo".to_string(), vec![]);
        assert_eq!(new.username, None);
        assert_eq!(new.password, None);
        assert_eq!(new.other, "");
    }

    #[test]
    fn test_privilege_marker_serializes_timestamp() {
        let marker = PrivilegeMarker { granted_at: Utc::now() };
        let json = serde_json::to_string(&marker).unwrap();
        assert!(json.contains("granted_at"));
        let back: PrivilegeMarker = serde_json::from_str(&json).unwrap();
        assert_eq!(back, marker);
    }
}
