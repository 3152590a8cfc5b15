//! fieldrules CLI entry point
//!
//! Initializes logging on stderr, delegates to `cli::run`, and exits with a
//! non-zero status on failure. Stdout carries JSON responses only.

use fieldrules::cli;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
