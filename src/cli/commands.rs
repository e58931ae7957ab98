// Passbook — CLI entry handler
//
// Resolves configuration, sources the store password, opens the session and
// runs the command chain.

use std::io;
use std::path::PathBuf;

use zeroize::Zeroizing;

use crate::command::split_invocations;
use crate::enclave::PasswordKeyProvider;
use crate::error::PassbookError;
use crate::session::{Console, Session};

use super::Cli;

const DB_FILE: &str = "accounts.db";
const MARKER_FILE: &str = "privilege";
const PASSWORD_PROMPT: &str = "Please Enter Password: ";

/// Default directory for Passbook data files.
fn data_dir() -> PathBuf {
    let base = dirs_next::data_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("passbook")
}

/// Resolved file locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub marker_path: PathBuf,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            db_path: cli.db.clone().unwrap_or_else(|| data_dir().join(DB_FILE)),
            marker_path: cli.marker.clone().unwrap_or_else(|| data_dir().join(MARKER_FILE)),
        }
    }

    /// Salt label for key derivation: the database file name.
    fn store_label(&self) -> String {
        self.db_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| DB_FILE.to_string())
    }
}

/// The store password: the configured one, else whatever `ask` reads.
fn store_password(
    given: Option<String>,
    ask: impl FnOnce(&str) -> io::Result<String>,
) -> io::Result<Zeroizing<String>> {
    match given {
        Some(password) => Ok(Zeroizing::new(password)),
        None => ask(PASSWORD_PROMPT).map(Zeroizing::new),
    }
}

/// Execute the parsed command line.
pub fn execute(cli: Cli) -> Result<(), PassbookError> {
    let config = Config::from_cli(&cli);
    let invocations = split_invocations(cli.tokens);
    // Typed passwords are read from the terminal without echo.
    let password = store_password(cli.password, |label| rpassword::prompt_password(label))?;

    if let Some(parent) = config.db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let keys = PasswordKeyProvider::new(&config.store_label());
    let console = Console::stdio();
    let mut session = Session::connect(
        &config.db_path,
        &password,
        &keys,
        console,
        config.marker_path.clone(),
    )?;

    tracing::debug!(
        db = %config.db_path.display(),
        invocations = invocations.len(),
        "Session connected"
    );

    session.run(invocations)
}
