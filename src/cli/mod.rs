// Passbook — CLI Module
//
// clap front end. Options configure the store and marker locations; every
// remaining token is handed to the command interpreter untouched, including
// `-h` and the `\` separator.

mod commands;

use std::path::PathBuf;

use clap::Parser;

pub use commands::{execute, Config};

/// Passbook — a compact command interpreter for a local table of accounts.
#[derive(Parser, Debug)]
#[command(name = "passbook")]
#[command(version, about, long_about = None, disable_help_flag = true)]
pub struct Cli {
    /// Path of the account database.
    #[arg(long, env = "PASSBOOK_DB")]
    pub db: Option<PathBuf>,

    /// Store password. Prompted for when not given.
    #[arg(long, env = "PASSBOOK_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Path of the privilege marker written by `sudo`.
    #[arg(long, env = "PASSBOOK_MARKER")]
    pub marker: Option<PathBuf>,

    /// Command letter and arguments; chain commands with a lone `\`.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 0..)]
    pub tokens: Vec<String>,
}
