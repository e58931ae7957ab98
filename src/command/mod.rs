// Passbook — Command Module
//
// Turns one invocation (`[letter, args...]`) into a typed `Command`.
// Arity is checked and `\n` escapes are expanded here, before any store access.

pub mod arity;
pub mod columns;
pub mod parser;

pub use arity::Limit;
pub use columns::Column;
pub use parser::{split_invocations, Invocation, RawInput};

use crate::session::{DisplayMode, Encoding, SessionError};

pub const USAGE: &str = "\
Usage: passbook [commands] name [options]
    use 'passbook -h' to see help";

pub const COMMAND_HELP: &str = "\
commands list:
    a    find account. -f to force display all results
    d    delete account
    E    eliminate all accounts
    i    insert account(name, username, password, pwdmnemonic, email, other)
    I    insert account by using prompt
    l    list all accounts
    L    list account columns
    p    find password. -f to force display all results
    s    search word in 'other' column
    u    update column of account(name, column, append, data)
         append = Y/y/N/n
         Without append and data, a prompt will appear to ask
         data.

    B    Big5 encoding, default
    U    UTF-8 encoding
         use for redirect to file

    If you want to input multiple query, you can use '\\\\' to separate them.";

/// Where the new value of an update comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateValues {
    /// Only name and column were given; ask the operator.
    Prompt,
    Given { append: bool, data: Vec<String> },
}

/// A validated command, one variant per command letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `a`: find accounts and show every field.
    FindAccount { name: String, display: Option<DisplayMode> },
    /// `p`: find accounts and show name, username and password.
    FindPassword { name: String, display: Option<DisplayMode> },
    /// `d`
    Delete { name: String },
    /// `E`
    EliminateAll,
    /// `i`: name followed by username, password, mnemonic, email, other words.
    Insert { name: String, fields: Vec<String> },
    /// `I`: name only; remaining columns are prompted.
    InsertPrompted { name: String },
    /// `l`
    List,
    /// `L`
    ListColumns,
    /// `s`: search the `other` notes.
    Search { word: String },
    /// `u`
    Update { name: String, column: Column, values: UpdateValues },
    /// `sudo`: write the privilege marker.
    Privilege,
    /// `B` / `U`
    SetEncoding(Encoding),
    /// `-h`
    Help,
}

impl Command {
    /// Validate an invocation. Unknown or missing letters fail with `UnknownCommand`.
    pub fn parse(invocation: Invocation) -> Result<Command, SessionError> {
        let mut tokens = invocation.into_iter();
        let letter = match tokens.next() {
            Some(letter) => letter,
            None => return Err(SessionError::UnknownCommand(String::new())),
        };
        let mut args: Vec<String> = tokens.collect();

        let command = match letter.as_str() {
            "a" | "p" => {
                let display = if args.len() == 2 {
                    args.pop().map(|flag| DisplayMode::from_flag(&flag)).transpose()?
                } else {
                    None
                };
                let name = single(args)?;
                if letter == "a" {
                    Command::FindAccount { name, display }
                } else {
                    Command::FindPassword { name, display }
                }
            }
            "d" => Command::Delete { name: single(args)? },
            "E" => {
                arity::check(&args, Limit::Exact(0))?;
                Command::EliminateAll
            }
            "i" => {
                arity::check(&args, Limit::AtLeast(1))?;
                parser::unescape_all(&mut args);
                let name = args.remove(0);
                Command::Insert { name, fields: args }
            }
            "I" => Command::InsertPrompted { name: single(args)? },
            "l" => {
                arity::check(&args, Limit::Exact(0))?;
                Command::List
            }
            "L" => {
                arity::check(&args, Limit::Exact(0))?;
                Command::ListColumns
            }
            "s" => Command::Search { word: single(args)? },
            "u" => parse_update(args)?,
            "sudo" => Command::Privilege,
            "B" => Command::SetEncoding(Encoding::Big5),
            "U" => Command::SetEncoding(Encoding::Utf8),
            "-h" => Command::Help,
            other => return Err(SessionError::UnknownCommand(other.to_string())),
        };

        Ok(command)
    }
}

/// Exactly one (unescaped) argument.
fn single(mut args: Vec<String>) -> Result<String, SessionError> {
    arity::check(&args, Limit::Exact(1))?;
    parser::unescape_all(&mut args);
    Ok(args.remove(0))
}

fn parse_update(mut args: Vec<String>) -> Result<Command, SessionError> {
    arity::check(&args, Limit::AtLeast(2))?;
    let column = Column::resolve(&args[1])?;
    // Only `other` takes free text; every other column takes at most one word.
    if column != Column::Other {
        arity::check(&args, Limit::Range(2, 4))?;
    }

    parser::unescape_all(&mut args);
    let mut rest = args.split_off(2);
    let name = args.remove(0);

    if rest.is_empty() {
        return Ok(Command::Update { name, column, values: UpdateValues::Prompt });
    }

    let append = match rest[0].as_str() {
        "Y" | "y" => Some(true),
        "N" | "n" => Some(false),
        _ => None,
    };
    if append.is_some() {
        rest.remove(0);
    }

    Ok(Command::Update {
        name,
        column,
        values: UpdateValues::Given { append: append.unwrap_or(false), data: rest },
    })
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn inv(list: &[&str]) -> Invocation {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_invocation_is_unknown_command() {
        let err = Command::parse(vec![]).unwrap_err();
        assert!(matches!(err, SessionError::UnknownCommand(_)));
    }

    #[test]
    fn test_unknown_letter() {
        let err = Command::parse(inv(&["x", "foo"])).unwrap_err();
        assert!(matches!(err, SessionError::UnknownCommand(ref l) if l == "x"));
    }

    #[test]
    fn test_delete_arity() {
        assert!(matches!(
            Command::parse(inv(&["d"])).unwrap_err(),
            SessionError::Arity(_)
        ));
        assert!(matches!(
            Command::parse(inv(&["d", "a", "b"])).unwrap_err(),
            SessionError::Arity(_)
        ));
        assert_eq!(
            Command::parse(inv(&["d", "github"])).unwrap(),
            Command::Delete { name: "github".to_string() }
        );
    }

    #[test]
    fn test_find_with_display_flag() {
        assert_eq!(
            Command::parse(inv(&["a", "git", "-f"])).unwrap(),
            Command::FindAccount { name: "git".to_string(), display: Some(DisplayMode::Force) }
        );
        assert_eq!(
            Command::parse(inv(&["p", "git", "default"])).unwrap(),
            Command::FindPassword { name: "git".to_string(), display: Some(DisplayMode::Default) }
        );
        assert_eq!(
            Command::parse(inv(&["p", "git"])).unwrap(),
            Command::FindPassword { name: "git".to_string(), display: None }
        );
    }

    #[test]
    fn test_find_rejects_unknown_flag_eagerly() {
        let err = Command::parse(inv(&["a", "git", "-x"])).unwrap_err();
        assert!(matches!(err, SessionError::InvalidOption(ref f) if f == "-x"));
    }

    #[test]
    fn test_find_with_three_args_is_arity_error() {
        let err = Command::parse(inv(&["a", "git", "-f", "extra"])).unwrap_err();
        assert!(matches!(err, SessionError::Arity(ref s) if s == "3 for 1"));
    }

    #[test]
    fn test_insert_needs_name_and_unescapes() {
        assert!(Command::parse(inv(&["i"])).is_err());
        assert_eq!(
            Command::parse(inv(&["i", "Alice", "u", "p", "m", "e", "line1\\nline2"])).unwrap(),
            Command::Insert {
                name: "Alice".to_string(),
                fields: inv(&["u", "p", "m", "e", "line1\nline2"]),
            }
        );
    }

    #[test]
    fn test_zero_arity_commands() {
        assert_eq!(Command::parse(inv(&["l"])).unwrap(), Command::List);
        assert_eq!(Command::parse(inv(&["L"])).unwrap(), Command::ListColumns);
        assert_eq!(Command::parse(inv(&["E"])).unwrap(), Command::EliminateAll);
        assert!(Command::parse(inv(&["E", "now"])).is_err());
    }

    #[test]
    fn test_update_append_flag_consumed() {
        assert_eq!(
            Command::parse(inv(&["u", "git", "o", "Y", "more", "notes"])).unwrap(),
            Command::Update {
                name: "git".to_string(),
                column: Column::Other,
                values: UpdateValues::Given { append: true, data: inv(&["more", "notes"]) },
            }
        );
    }

    #[test]
    fn test_update_without_flag_defaults_to_replace() {
        assert_eq!(
            Command::parse(inv(&["u", "git", "p", "s3cret"])).unwrap(),
            Command::Update {
                name: "git".to_string(),
                column: Column::Password,
                values: UpdateValues::Given { append: false, data: inv(&["s3cret"]) },
            }
        );
    }

    #[test]
    fn test_update_with_name_and_column_prompts() {
        assert_eq!(
            Command::parse(inv(&["u", "git", "e"])).unwrap(),
            Command::Update {
                name: "git".to_string(),
                column: Column::Email,
                values: UpdateValues::Prompt,
            }
        );
    }

    #[test]
    fn test_update_unknown_column() {
        let err = Command::parse(inv(&["u", "git", "z", "v"])).unwrap_err();
        assert!(matches!(err, SessionError::UnknownColumn(ref c) if c == "z"));
    }

    #[test]
    fn test_update_word_columns_cap_at_four_args() {
        let err = Command::parse(inv(&["u", "git", "p", "N", "a", "b"])).unwrap_err();
        assert!(matches!(err, SessionError::Arity(ref s) if s == "5 in 2..4"));
        assert!(Command::parse(inv(&["u", "git", "o", "N", "a", "b", "c"])).is_ok());
    }

    #[test]
    fn test_help_shows_shell_escaped_separator() {
        assert!(COMMAND_HELP.ends_with("you can use '\\\\' to separate them."));
    }

    #[test]
    fn test_encoding_and_maintenance_letters() {
        assert_eq!(Command::parse(inv(&["B"])).unwrap(), Command::SetEncoding(Encoding::Big5));
        assert_eq!(Command::parse(inv(&["U"])).unwrap(), Command::SetEncoding(Encoding::Utf8));
        assert_eq!(Command::parse(inv(&["sudo"])).unwrap(), Command::Privilege);
        assert_eq!(Command::parse(inv(&["-h"])).unwrap(), Command::Help);
    }
}
