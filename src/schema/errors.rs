//! Schema error types
//!
//! Error codes:
//! - RULES_SCHEMA_MALFORMED: source could not be decoded or violates structure invariants
//! - RULES_SCHEMA_UNREADABLE: source file or directory could not be read
//! - RULES_INVALID_PATTERN: a `pattern` does not compile
//! - RULES_DUPLICATE_SCHEMA: two schemas with the same name registered
//! - RULES_CONFIG_*: validator configuration rejected at construction
//!
//! All of these abort validator construction. Data violations are never
//! reported through this type.

use thiserror::Error;

use crate::validator::ConfigError;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while loading a schema or building a validator from it
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The declarative source could not be decoded, or its structure is invalid
    #[error("malformed schema '{source_name}': {reason}")]
    Malformed {
        /// File path or in-memory source identifier
        source_name: String,
        /// Decoder or structure error
        reason: String,
    },

    /// The schema file or directory could not be read
    #[error("cannot read schema '{path}': {reason}")]
    Unreadable {
        /// Path that failed
        path: String,
        /// Underlying I/O error text
        reason: String,
    },

    /// A rule's pattern is not a valid regular expression
    #[error("invalid pattern for field '{field}': {pattern}: {reason}")]
    InvalidPattern {
        /// Dotted path of the rule
        field: String,
        /// Pattern text as declared
        pattern: String,
        /// Regex compiler error
        reason: String,
    },

    /// A schema with this name is already registered
    #[error("schema '{0}' is already registered")]
    DuplicateSchema(String),

    /// The validator configuration is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SchemaError {
    /// Create a malformed-source error
    pub fn malformed(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Create an unreadable-source error
    pub fn unreadable(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unreadable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaError::Malformed { .. } => "RULES_SCHEMA_MALFORMED",
            SchemaError::Unreadable { .. } => "RULES_SCHEMA_UNREADABLE",
            SchemaError::InvalidPattern { .. } => "RULES_INVALID_PATTERN",
            SchemaError::DuplicateSchema(_) => "RULES_DUPLICATE_SCHEMA",
            SchemaError::Config(e) => e.code(),
        }
    }
}
