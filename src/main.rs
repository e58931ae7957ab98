// Passbook — Application Entry Point
//
// Parses CLI arguments, initializes structured logging on stderr (never
// logging password values), and hands the token stream to the interpreter.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use passbook::cli::{execute, Cli};

fn main() {
    // RUST_LOG=passbook=debug for verbose output. Logs go to stderr so command
    // output on stdout stays clean for redirection.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("passbook=warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = execute(cli) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
