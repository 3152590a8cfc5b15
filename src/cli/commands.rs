//! CLI command implementations
//!
//! Commands never print partial results on failure: schema and config
//! problems abort before any document is read.

use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use crate::schema::{Schema, SchemaLoader};
use crate::validator::{Validator, ValidatorConfig};

use super::args::Command;
use super::errors::{CliError, CliErrorCode, CliResult};
use super::io::{read_document, read_documents, write_error, write_response};

/// Options of the `validate` command.
#[derive(Debug, Clone, Default)]
pub struct ValidateOptions {
    pub schema: Option<PathBuf>,
    pub schema_dir: Option<PathBuf>,
    pub name: Option<String>,
    pub config: Option<PathBuf>,
    pub lines: bool,
}

/// Dispatch a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Check { schema } => write_response(check(&schema)?),
        Command::Validate {
            schema,
            schema_dir,
            name,
            config,
            lines,
        } => validate(&ValidateOptions {
            schema,
            schema_dir,
            name,
            config,
            lines,
        }),
    }
}

/// Loads and compiles a schema file or every schema in a directory.
///
/// Returns `{"schemas": [{"name": .., "rules": ..}, ..]}` with effective rule
/// counts after shadowing.
pub fn check(path: &Path) -> CliResult<Value> {
    let mut summaries = Vec::new();

    if path.is_dir() {
        let mut loader = SchemaLoader::new(path);
        loader.load_all()?;
        for name in loader.names() {
            if let Some(schema) = loader.get(name) {
                summaries.push(summarize(schema)?);
            }
        }
    } else {
        let schema = Schema::from_file(path)?;
        summaries.push(summarize(&schema)?);
    }

    Ok(json!({ "schemas": summaries }))
}

fn summarize(schema: &Schema) -> CliResult<Value> {
    let validator = Validator::new(schema)?;
    Ok(json!({
        "name": schema.name,
        "rules": validator.rules().count(),
    }))
}

/// Validates stdin documents in mapping mode and writes one report each.
///
/// In `--lines` mode a line that is not valid JSON yields an error response
/// and processing continues with the next line.
pub fn validate(options: &ValidateOptions) -> CliResult<()> {
    let schema = load_schema(options)?;
    let config = match &options.config {
        Some(path) => ValidatorConfig::load(path)?,
        None => ValidatorConfig::default(),
    };
    let validator = Validator::with_config(&schema, config)?;

    if options.lines {
        for document in read_documents() {
            match document {
                Ok(document) => write_response(validator.validate_document(&document).to_json())?,
                Err(e) => write_error(e.code_str(), e.message())?,
            }
        }
    } else {
        let document = read_document()?;
        write_response(validator.validate_document(&document).to_json())?;
    }

    Ok(())
}

/// Resolves the schema selected by `--schema` or `--schema-dir`/`--name`.
pub(crate) fn load_schema(options: &ValidateOptions) -> CliResult<Schema> {
    if let Some(path) = &options.schema {
        return Ok(Schema::from_file(path)?);
    }

    let Some(dir) = &options.schema_dir else {
        return Err(CliError::new(
            CliErrorCode::SchemaError,
            "Either --schema or --schema-dir is required",
        ));
    };
    let name = options.name.as_deref().ok_or_else(|| {
        CliError::new(CliErrorCode::SchemaError, "--name is required with --schema-dir")
    })?;

    let mut loader = SchemaLoader::new(dir);
    loader.load_all()?;
    loader
        .get(name)
        .cloned()
        .ok_or_else(|| CliError::unknown_schema(name))
}
