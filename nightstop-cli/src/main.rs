//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use nightstop_cli::{CliError, LOG_ENV, run};
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();
    match run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("nightstop: {err}");
            std::process::exit(1);
        }
    }
}

/// Log to stderr, filtered by `NIGHTSTOP_LOG` (warnings only by default).
/// Records from the `log` facade used by the library crates are forwarded.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
