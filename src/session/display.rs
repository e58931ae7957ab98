// Passbook — Result rendering
//
// Turns accounts into console lines. A single match, or the `-f` display
// mode, gets a full block per account; otherwise only names are listed.

use crate::store::Account;

use super::SessionError;

/// How `a` and `p` render more than one match. Persists for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Default,
    Force,
}

impl DisplayMode {
    pub fn from_flag(flag: &str) -> Result<DisplayMode, SessionError> {
        match flag {
            "-f" => Ok(DisplayMode::Force),
            "default" => Ok(DisplayMode::Default),
            other => Err(SessionError::InvalidOption(other.to_string())),
        }
    }
}

/// Which fields a find command reveals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detail {
    Account,
    Password,
}

fn field(label: &str, value: Option<&str>) -> String {
    format!("    {}: {}", label, value.unwrap_or(""))
}

/// Full block for one account, followed by a blank line.
pub fn account_block(account: &Account, detail: Detail) -> Vec<String> {
    let mut lines = vec![
        field("Name", Some(&account.name)),
        field("Username", account.username.as_deref()),
        field("Password", account.password()),
    ];
    if detail == Detail::Account {
        lines.push(field("Password Mnemonic", account.pwdmnemonic.as_deref()));
        lines.push(field("Email", account.email.as_deref()));
        lines.push(field("Other", Some(&account.other)));
    }
    lines.push(String::new());
    lines
}

pub fn name_line(name: &str) -> String {
    format!("    {}", name)
}

/// Lines for a find result set.
pub fn render_matches(accounts: &[Account], detail: Detail, mode: DisplayMode) -> Vec<String> {
    if accounts.len() == 1 || mode == DisplayMode::Force {
        accounts
            .iter()
            .flat_map(|account| account_block(account, detail))
            .collect()
    } else {
        accounts.iter().map(|account| name_line(&account.name)).collect()
    }
}

/// Lines for one `s` search hit.
pub fn search_block(account: &Account) -> Vec<String> {
    vec![
        field("Name", Some(&account.name)),
        field("Other", Some(&account.other)),
        String::new(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn account(name: &str) -> Account {
        Account::new(
            Uuid::new_v4(),
            name.to_string(),
            Some("user".to_string()),
            Some("pw".to_string()),
            Some("hint".to_string()),
            None,
            "notes".to_string(),
            Utc::now(),
            Utc::now(),
        )
    }

    #[test]
    fn test_from_flag() {
        assert_eq!(DisplayMode::from_flag("-f").unwrap(), DisplayMode::Force);
        assert_eq!(DisplayMode::from_flag("default").unwrap(), DisplayMode::Default);
        assert!(matches!(
            DisplayMode::from_flag("-F").unwrap_err(),
            SessionError::InvalidOption(_)
        ));
    }

    #[test]
    fn test_account_block_fields() {
        let lines = account_block(&account("github"), Detail::Account);
        assert_eq!(
            lines,
            vec![
                "    Name: github",
                "    Username: user",
                "    Password: pw",
                "    Password Mnemonic: hint",
                "    Email: ",
                "    Other: notes",
                "",
            ]
        );
    }

    #[test]
    fn test_password_block_stops_at_password() {
        let lines = account_block(&account("github"), Detail::Password);
        assert_eq!(lines, vec!["    Name: github", "    Username: user", "    Password: pw", ""]);
    }

    #[test]
    fn test_several_matches_list_names_unless_forced() {
        let accounts = vec![account("git"), account("gitlab")];

        let terse = render_matches(&accounts, Detail::Password, DisplayMode::Default);
        assert_eq!(terse, vec!["    git", "    gitlab"]);

        let forced = render_matches(&accounts, Detail::Password, DisplayMode::Force);
        assert_eq!(forced.len(), 8);
    }

    #[test]
    fn test_single_match_always_verbose() {
        let accounts = vec![account("git")];
        let lines = render_matches(&accounts, Detail::Account, DisplayMode::Default);
        assert_eq!(lines[0], "    Name: git");
    }
}
