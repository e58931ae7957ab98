// Passbook — Session
//
// Runs a chain of invocations against one open store connection.
//
//   Idle → Authenticating → Connected → (Validating → Executing)* → Closed
//
// Any error ends the chain. The connection is owned by the `Session` and is
// closed when it drops, whichever path ends the run.

mod console;
mod display;
mod error;

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use zeroize::Zeroizing;

use crate::command::{columns, Column, Command, Invocation, UpdateValues, COMMAND_HELP, USAGE};
use crate::enclave::{key_to_hex, StoreKeyProvider};
use crate::engine::{mutation, resolver, UpdateRequest};
use crate::error::{PassbookError, Result};
use crate::store::{AccountStore, Database, NewAccount, PrivilegeMarker, SqliteAccountStore, StoreError};

pub use console::{Console, Encoding};
pub use display::{Detail, DisplayMode};
pub use error::SessionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Authenticating,
    Connected,
    Validating,
    Executing,
    Closed,
}

pub struct Session<R, W> {
    db: Database,
    console: Console<R, W>,
    display: DisplayMode,
    marker_path: PathBuf,
    state: SessionState,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Derive the store key from `password` and open the database at `db_path`.
    /// A wrong password is a fatal `StoreConnection` error.
    pub fn connect(
        db_path: &Path,
        password: &Zeroizing<String>,
        keys: &impl StoreKeyProvider,
        console: Console<R, W>,
        marker_path: PathBuf,
    ) -> Result<Self> {
        let mut state = SessionState::Idle;
        transition(&mut state, SessionState::Authenticating);

        let key = keys.derive_db_key(password.as_bytes())?;
        let hex_key = key_to_hex(&key);

        let db = Database::open(db_path, &hex_key).map_err(|e| match e {
            StoreError::InvalidKey => SessionError::StoreConnection("Password incorrect!".to_string()),
            other => SessionError::StoreConnection(format!("Cannot open account store: {}", other)),
        })?;

        let mut session = Self::with_database(db, console, marker_path);
        session.state = state;
        transition(&mut session.state, SessionState::Connected);
        Ok(session)
    }

    /// Wrap an already open database.
    pub fn with_database(db: Database, console: Console<R, W>, marker_path: PathBuf) -> Self {
        Self {
            db,
            console,
            display: DisplayMode::default(),
            marker_path,
            state: SessionState::Connected,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display
    }

    pub fn console(&self) -> &Console<R, W> {
        &self.console
    }

    /// Run every invocation in order. Stops at the first error; the session
    /// is `Closed` afterwards either way.
    pub fn run(&mut self, invocations: Vec<Invocation>) -> Result<()> {
        if self.state == SessionState::Closed {
            return Err(PassbookError::Other("Session already closed".to_string()));
        }

        let outcome = self.run_chain(invocations);
        transition(&mut self.state, SessionState::Closed);
        if let Err(ref e) = outcome {
            tracing::debug!(error = %e, "Session aborted");
        }
        outcome
    }

    fn run_chain(&mut self, invocations: Vec<Invocation>) -> Result<()> {
        for invocation in invocations {
            transition(&mut self.state, SessionState::Validating);
            let command = Command::parse(invocation)?;

            transition(&mut self.state, SessionState::Executing);
            self.execute(command)?;
            self.console.blank()?;

            transition(&mut self.state, SessionState::Connected);
        }
        Ok(())
    }

    fn execute(&mut self, command: Command) -> Result<()> {
        let store = SqliteAccountStore::new(&self.db);
        let console = &mut self.console;

        match command {
            Command::FindAccount { name, display } => {
                if let Some(mode) = display {
                    self.display = mode;
                }
                show_matches(&store, console, &name, Detail::Account, self.display)
            }
            Command::FindPassword { name, display } => {
                if let Some(mode) = display {
                    self.display = mode;
                }
                show_matches(&store, console, &name, Detail::Password, self.display)
            }
            Command::Delete { name } => {
                console.line(&format!("Deleting {} from Table", name))?;
                mutation::delete(&store, &name)
            }
            Command::EliminateAll => {
                console.line("Are you SERIOUS? Please Enter yes")?;
                let answer = console.read_line()?;
                let removed = mutation::eliminate_all(&store, &answer)?;
                console.line("Deleting all entries in Table")?;
                tracing::info!(removed, "Eliminated all accounts");
                Ok(())
            }
            Command::Insert { name, fields } => insert(&store, console, name, fields),
            Command::InsertPrompted { name } => {
                let mut fields = Vec::with_capacity(Column::ALL.len() - 1);
                for column in &Column::ALL[1..] {
                    let answer = console.prompt(&format!("{}: ", column.attribute()))?;
                    fields.push(crate::command::parser::unescape_newlines(&answer));
                }
                insert(&store, console, name, fields)
            }
            Command::List => {
                console.line("list of accounts:")?;
                let names = store.list_names()?;
                if names.is_empty() {
                    return Err(SessionError::EmptyResultSet.into());
                }
                for name in &names {
                    console.line(&display::name_line(name))?;
                }
                Ok(())
            }
            Command::ListColumns => write_lines(console, &columns::listing()),
            Command::Search { word } => {
                console.line("Search result:")?;
                let hits = store.search_other(&word)?;
                if hits.is_empty() {
                    return Err(SessionError::EmptyResultSet.into());
                }
                for account in &hits {
                    write_lines(console, &display::search_block(account))?;
                }
                Ok(())
            }
            Command::Update { name, column, values } => update(&store, console, name, column, values),
            Command::Privilege => write_privilege_marker(&self.marker_path),
            Command::SetEncoding(encoding) => {
                console.set_encoding(encoding);
                tracing::debug!(?encoding, "Session encoding changed");
                Ok(())
            }
            Command::Help => {
                console.line(USAGE)?;
                console.blank()?;
                console.line(COMMAND_HELP)?;
                console.blank()?;
                write_lines(console, &columns::listing())
            }
        }
    }
}

fn transition(state: &mut SessionState, next: SessionState) {
    tracing::trace!(from = ?state, to = ?next, "Session state");
    *state = next;
}

fn write_lines<R: BufRead, W: Write>(console: &mut Console<R, W>, lines: &[String]) -> Result<()> {
    for line in lines {
        console.line(line)?;
    }
    Ok(())
}

fn show_matches<R: BufRead, W: Write>(
    store: &impl AccountStore,
    console: &mut Console<R, W>,
    name: &str,
    detail: Detail,
    mode: DisplayMode,
) -> Result<()> {
    let (matches, headline) = resolver::find(store, name)?;
    console.line(headline.banner())?;
    write_lines(console, &display::render_matches(&matches, detail, mode))
}

fn insert<R: BufRead, W: Write>(
    store: &impl AccountStore,
    console: &mut Console<R, W>,
    name: String,
    fields: Vec<String>,
) -> Result<()> {
    console.line(&format!("Adding {} to Table", name))?;
    mutation::insert(store, NewAccount::from_fields(name, fields))?;
    Ok(())
}

fn update<R: BufRead, W: Write>(
    store: &impl AccountStore,
    console: &mut Console<R, W>,
    name: String,
    column: Column,
    values: UpdateValues,
) -> Result<()> {
    let (append, data) = match values {
        UpdateValues::Given { append, data } => (append, data),
        UpdateValues::Prompt => {
            let current = resolver::find_exact(store, &name)?;
            console.line(&format!(
                "Original {} in {}: {:?}",
                column,
                name,
                current.value(column)
            ))?;
            let answer = console.prompt(&format!("New {} in {}: ", column, name))?;
            (false, vec![crate::command::parser::unescape_newlines(&answer)])
        }
    };

    let request = UpdateRequest { name, column, append, data };
    mutation::reject_blank_rename(&request)?;

    console.line(&format!("Updating {} in {}", column, request.name))?;
    mutation::update(store, &request)?;
    Ok(())
}

fn write_privilege_marker(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let marker = PrivilegeMarker { granted_at: Utc::now() };
    let json = serde_json::to_string(&marker)?;
    std::fs::write(path, json + "\n")?;

    tracing::info!(path = %path.display(), "Privilege marker written");
    Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
