//! CLI module for fieldrules
//!
//! Provides command-line interface for:
//! - check: Load and compile schemas
//! - validate: Validate JSON documents from stdin

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check, run_command, validate, ValidateOptions};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_document, read_documents, write_error, write_response};

/// Parses process arguments and runs the selected command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}
