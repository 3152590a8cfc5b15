//! Schema loading from YAML / JSON sources
//!
//! - One schema per file, `*.yaml`, `*.yml` or `*.json`
//! - Schemas are indexed by their `name`
//! - Unreadable or malformed files abort loading

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::errors::{SchemaError, SchemaResult};
use super::types::Schema;

/// Source format of a schema document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    Yaml,
    Json,
}

impl SchemaFormat {
    /// Picks the format from a file extension. Anything that is not YAML is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => SchemaFormat::Yaml,
            _ => SchemaFormat::Json,
        }
    }
}

impl Schema {
    /// Decodes a schema from YAML text and checks its structure.
    pub fn from_yaml_str(content: &str) -> SchemaResult<Self> {
        Self::parse(content, SchemaFormat::Yaml, "<yaml>")
    }

    /// Decodes a schema from JSON text and checks its structure.
    pub fn from_json_str(content: &str) -> SchemaResult<Self> {
        Self::parse(content, SchemaFormat::Json, "<json>")
    }

    /// Reads and decodes a schema file.
    pub fn from_file(path: impl AsRef<Path>) -> SchemaResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SchemaError::unreadable(path.display().to_string(), e.to_string())
        })?;

        let schema = Self::parse(
            &content,
            SchemaFormat::from_path(path),
            &path.display().to_string(),
        )?;
        tracing::debug!(
            path = %path.display(),
            schema = %schema.name,
            rules = schema.rules.len(),
            "schema file loaded"
        );
        Ok(schema)
    }

    fn parse(content: &str, format: SchemaFormat, source_name: &str) -> SchemaResult<Self> {
        let schema: Schema = match format {
            SchemaFormat::Yaml => serde_yaml::from_str(content)
                .map_err(|e| SchemaError::malformed(source_name, format!("invalid YAML: {}", e)))?,
            SchemaFormat::Json => serde_json::from_str(content)
                .map_err(|e| SchemaError::malformed(source_name, format!("invalid JSON: {}", e)))?,
        };

        schema
            .validate_structure()
            .map_err(|e| SchemaError::malformed(source_name, e))?;

        Ok(schema)
    }
}

/// Directory-backed schema registry.
pub struct SchemaLoader {
    /// Directory containing schema files
    schema_dir: PathBuf,
    /// Loaded schemas indexed by name
    schemas: HashMap<String, Schema>,
}

impl SchemaLoader {
    /// Creates a loader for the given directory. Nothing is read until [`load_all`](Self::load_all).
    pub fn new(schema_dir: impl AsRef<Path>) -> Self {
        Self {
            schema_dir: schema_dir.as_ref().to_path_buf(),
            schemas: HashMap::new(),
        }
    }

    /// Returns the schema directory path.
    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Loads every schema file in the directory.
    ///
    /// Files are read in name order so duplicate-name errors are reproducible.
    pub fn load_all(&mut self) -> SchemaResult<()> {
        let entries = fs::read_dir(&self.schema_dir).map_err(|e| {
            SchemaError::unreadable(
                self.schema_dir.display().to_string(),
                format!("Failed to read schema directory: {}", e),
            )
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                SchemaError::unreadable(
                    self.schema_dir.display().to_string(),
                    format!("Failed to read directory entry: {}", e),
                )
            })?;

            let path = entry.path();
            if is_schema_file(&path) {
                paths.push(path);
            }
        }
        paths.sort();

        for path in paths {
            let schema = Schema::from_file(&path)?;
            self.register(schema)?;
        }

        tracing::info!(
            dir = %self.schema_dir.display(),
            schemas = self.schemas.len(),
            "schema directory loaded"
        );
        Ok(())
    }

    /// Registers a schema directly.
    pub fn register(&mut self, schema: Schema) -> SchemaResult<()> {
        schema
            .validate_structure()
            .map_err(|e| SchemaError::malformed(format!("<schema {}>", schema.name), e))?;

        if self.schemas.contains_key(&schema.name) {
            return Err(SchemaError::DuplicateSchema(schema.name));
        }

        self.schemas.insert(schema.name.clone(), schema);
        Ok(())
    }

    /// Gets a schema by name.
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    /// Checks if a schema exists.
    pub fn exists(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Returns the names of all loaded schemas, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of loaded schemas.
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

fn is_schema_file(path: &Path) -> bool {
    path.is_file()
        && matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("yaml") | Some("yml") | Some("json")
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::{Rule, RuleType};
    use tempfile::TempDir;

    const USERS_YAML: &str = r#"
name: users
description: user accounts
rules:
  - field: email
    type: string
    required: true
    pattern: "^[^@]+@[^@]+$"
  - field: age
    type: integer
    min: 0
    max: 150
  - field: tags
    type: slice
    items:
      type: string
      maxLength: 5
"#;

    fn sample_schema(name: &str) -> Schema {
        Schema::new(name, vec![Rule::new("name", RuleType::String).required()])
    }

    #[test]
    fn test_from_yaml_str() {
        let schema = Schema::from_yaml_str(USERS_YAML).unwrap();
        assert_eq!(schema.name, "users");
        assert_eq!(schema.description.as_deref(), Some("user accounts"));
        assert_eq!(schema.rules.len(), 3);
        assert_eq!(schema.rules[1].min, Some(0.0));
        assert_eq!(schema.rules[2].rule_type, RuleType::Array);
        let items = schema.rules[2].items_rule.as_ref().unwrap();
        assert_eq!(items.max_length, Some(5));
    }

    #[test]
    fn test_malformed_yaml_rejected() {
        let err = Schema::from_yaml_str("rules: [field: x").unwrap_err();
        assert_eq!(err.code(), "RULES_SCHEMA_MALFORMED");
    }

    #[test]
    fn test_unknown_type_rejected() {
        let err = Schema::from_yaml_str("name: x\nrules:\n  - field: a\n    type: date\n")
            .unwrap_err();
        assert_eq!(err.code(), "RULES_SCHEMA_MALFORMED");
    }

    #[test]
    fn test_from_json_str() {
        let schema = Schema::from_json_str(
            r#"{"name":"skill","rules":[{"field":"value","type":"number","min":1}]}"#,
        )
        .unwrap();
        assert_eq!(schema.rules[0].rule_type, RuleType::Number);
    }

    #[test]
    fn test_from_file_picks_format_by_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("users.yml");
        fs::write(&path, USERS_YAML).unwrap();

        let schema = Schema::from_file(&path).unwrap();
        assert_eq!(schema.name, "users");
    }

    #[test]
    fn test_missing_file_unreadable() {
        let temp_dir = TempDir::new().unwrap();
        let err = Schema::from_file(temp_dir.path().join("nope.yaml")).unwrap_err();
        assert_eq!(err.code(), "RULES_SCHEMA_UNREADABLE");
    }

    #[test]
    fn test_register_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let mut loader = SchemaLoader::new(temp_dir.path());

        loader.register(sample_schema("users")).unwrap();

        assert!(loader.exists("users"));
        assert_eq!(loader.get("users").unwrap().rules.len(), 1);
    }

    #[test]
    fn test_duplicate_register_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let mut loader = SchemaLoader::new(temp_dir.path());

        loader.register(sample_schema("users")).unwrap();
        let err = loader.register(sample_schema("users")).unwrap_err();
        assert_eq!(err.code(), "RULES_DUPLICATE_SCHEMA");
    }

    #[test]
    fn test_load_all_mixed_formats() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("users.yaml"), USERS_YAML).unwrap();
        fs::write(
            temp_dir.path().join("skill.json"),
            r#"{"name":"skill","rules":[{"field":"name","type":"string"}]}"#,
        )
        .unwrap();
        fs::write(temp_dir.path().join("README.md"), "not a schema").unwrap();

        let mut loader = SchemaLoader::new(temp_dir.path());
        loader.load_all().unwrap();

        assert_eq!(loader.schema_count(), 2);
        assert_eq!(loader.names(), vec!["skill", "users"]);
    }

    #[test]
    fn test_load_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let mut loader = SchemaLoader::new(temp_dir.path());

        loader.load_all().unwrap();
        assert_eq!(loader.schema_count(), 0);
    }

    #[test]
    fn test_load_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let mut loader = SchemaLoader::new(temp_dir.path().join("missing"));

        let err = loader.load_all().unwrap_err();
        assert_eq!(err.code(), "RULES_SCHEMA_UNREADABLE");
    }
}
