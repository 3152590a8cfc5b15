//! Validator configuration
//!
//! All fields are optional and default to the most permissive behavior:
//! unbounded nesting and byte-length strings.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors, distinct from schema errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {reason}")]
    Unreadable { path: String, reason: String },

    #[error("invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Unreadable { .. } => "RULES_CONFIG_UNREADABLE",
            ConfigError::Invalid(_) => "RULES_CONFIG_INVALID",
        }
    }
}

/// Unit used by `minLength` / `maxLength`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// UTF-8 byte length
    #[default]
    Bytes,
    /// Unicode scalar values
    Chars,
}

impl LengthUnit {
    /// Measures `s` in this unit.
    pub fn measure(&self, s: &str) -> usize {
        match self {
            LengthUnit::Bytes => s.len(),
            LengthUnit::Chars => s.chars().count(),
        }
    }
}

/// Validator options.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Maximum nested-schema depth, `None` for unbounded
    #[serde(default)]
    pub max_depth: Option<usize>,

    /// Unit for string length bounds (default "bytes")
    #[serde(default)]
    pub length_unit: LengthUnit,
}

impl ValidatorConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let config: ValidatorConfig = serde_json::from_str(&content)
            .map_err(|e| ConfigError::Invalid(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Set the nesting ceiling
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Set the length unit
    pub fn with_length_unit(mut self, unit: LengthUnit) -> Self {
        self.length_unit = unit;
        self
    }

    /// Rejects settings that would make every nested rule fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == Some(0) {
            return Err(ConfigError::Invalid("max_depth must be > 0".into()));
        }
        Ok(())
    }
}
