//! JSON I/O handling for CLI
//!
//! - Input: one JSON document on stdin, or one per line
//! - Output: one JSON object per result on stdout
//! - UTF-8 only

use std::io::{self, BufRead, Read, Write};

use serde_json::Value;

use super::errors::{CliError, CliResult};

/// Read a single JSON document from stdin
pub fn read_document() -> CliResult<Value> {
    let mut input = String::new();
    io::stdin().lock().read_to_string(&mut input)?;

    if input.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }

    Ok(serde_json::from_str(&input)?)
}

/// Read newline-delimited JSON documents from stdin, skipping blank lines
pub fn read_documents() -> impl Iterator<Item = CliResult<Value>> {
    io::stdin().lock().lines().filter_map(|line| match line {
        Ok(line) if line.trim().is_empty() => None,
        Ok(line) => Some(serde_json::from_str(&line).map_err(CliError::from)),
        Err(e) => Some(Err(CliError::from(e))),
    })
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });
    write_line(&response)
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    });
    write_line(&response)
}

fn write_line(response: &Value) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, response)?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}
