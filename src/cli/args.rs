//! CLI argument definitions using clap
//!
//! Commands:
//! - fieldrules check --schema <file|dir>
//! - fieldrules validate --schema <file> [--config <file>] [--lines]
//! - fieldrules validate --schema-dir <dir> --name <schema> [--config <file>] [--lines]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// fieldrules - Schema-driven validation for JSON documents
#[derive(Parser, Debug)]
#[command(name = "fieldrules")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load a schema file, or every schema in a directory, and report problems
    Check {
        /// Schema file or directory
        #[arg(long)]
        schema: PathBuf,
    },

    /// Validate JSON documents read from stdin
    Validate {
        /// Schema file
        #[arg(long, required_unless_present = "schema_dir", conflicts_with = "schema_dir")]
        schema: Option<PathBuf>,

        /// Directory of schema files, used with --name
        #[arg(long, requires = "name")]
        schema_dir: Option<PathBuf>,

        /// Schema name to select from --schema-dir
        #[arg(long)]
        name: Option<String>,

        /// Validator configuration file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Read one document per line instead of a single document
        #[arg(long)]
        lines: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
