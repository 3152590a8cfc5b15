//! Validation engine
//!
//! Validation semantics:
//! - Every rule of the schema is checked, errors from all rules are accumulated
//! - Absent or null values fail only `required` rules, nothing else is checked
//! - A type mismatch suppresses every other constraint of the same rule
//! - Array elements are checked against the item rule as `<name>[<i>]`
//! - Nested schema errors are prefixed with `<name>.`
//!
//! Records and mappings go through the same per-field logic. They differ only
//! in how a field is located: records resolve names case-insensitively and
//! through alias tags, mappings use exact key lookup.

use indexmap::IndexMap;
use regex::Regex;
use serde_json::{json, Map, Value as JsonValue};

use crate::schema::{Rule, RuleType, Schema, SchemaError, SchemaResult};

use super::config::ValidatorConfig;
use super::record::{resolve_field, Record};
use super::value::Value;

/// Outcome of one validation call. Empty error list means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<String>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self { errors }
    }

    /// Returns true if no violations were found.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Violations in the order they were found.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }

    /// Renders as `{"valid": bool, "errors": [...]}`.
    pub fn to_json(&self) -> JsonValue {
        json!({
            "valid": self.is_valid(),
            "errors": self.errors,
        })
    }
}

impl From<ValidationReport> for (bool, Vec<String>) {
    fn from(report: ValidationReport) -> Self {
        (report.is_valid(), report.errors)
    }
}

/// A rule with its pattern compiled and its children prepared.
struct CompiledRule<'s> {
    rule: &'s Rule,
    pattern: Option<Regex>,
    enum_canonical: Vec<String>,
    enum_display: String,
    items: Option<Box<CompiledRule<'s>>>,
    nested: Option<CompiledSchema<'s>>,
}

impl<'s> CompiledRule<'s> {
    fn compile(rule: &'s Rule, path: &str) -> SchemaResult<Self> {
        let pattern = match rule.pattern.as_deref() {
            Some(pattern) if !pattern.is_empty() => {
                Some(Regex::new(pattern).map_err(|e| SchemaError::InvalidPattern {
                    field: path.to_string(),
                    pattern: pattern.to_string(),
                    reason: e.to_string(),
                })?)
            }
            _ => None,
        };

        let enum_canonical: Vec<String> = rule
            .enum_values
            .iter()
            .map(|candidate| Value::from(candidate).canonical())
            .collect();
        let enum_display = format!("[{}]", enum_canonical.join(" "));

        let items = match rule.items_rule.as_deref() {
            Some(items) => Some(Box::new(CompiledRule::compile(
                items,
                &format!("{}[]", path),
            )?)),
            None => None,
        };

        let nested = match rule.nested.as_deref() {
            Some(nested) => Some(CompiledSchema::compile(nested, path)?),
            None => None,
        };

        Ok(Self {
            rule,
            pattern,
            enum_canonical,
            enum_display,
            items,
            nested,
        })
    }
}

/// Name-to-rule mapping of one schema level.
struct CompiledSchema<'s> {
    name: &'s str,
    /// Declaration order of first occurrence, contents of last occurrence
    rules: IndexMap<&'s str, CompiledRule<'s>>,
}

impl<'s> CompiledSchema<'s> {
    fn compile(schema: &'s Schema, prefix: &str) -> SchemaResult<Self> {
        let mut rules = IndexMap::with_capacity(schema.rules.len());

        for rule in &schema.rules {
            let path = make_path(prefix, &rule.field_name);
            let compiled = CompiledRule::compile(rule, &path)?;
            if rules.insert(rule.field_name.as_str(), compiled).is_some() {
                tracing::warn!(
                    schema = %schema.name,
                    field = %path,
                    "rule shadows an earlier rule for the same field"
                );
            }
        }

        Ok(Self {
            name: &schema.name,
            rules,
        })
    }
}

/// Where field values come from.
#[derive(Clone, Copy)]
enum Input<'v> {
    Record(&'v dyn Record),
    Mapping(&'v Map<String, JsonValue>),
    Entries(&'v [(&'v str, Value<'v>)]),
}

/// Validates records and mappings against one schema.
///
/// The validator borrows the schema and never mutates it; one instance can be
/// shared across threads and reused for any number of calls.
///
/// Nested schemas are owned by their parent rule, so a schema cannot refer back
/// to itself and recursion always terminates. `max_depth` in
/// [`ValidatorConfig`] additionally caps how deep nested objects are followed.
pub struct Validator<'s> {
    schema: &'s Schema,
    root: CompiledSchema<'s>,
    config: ValidatorConfig,
}

impl<'s> Validator<'s> {
    /// Creates a validator with default configuration.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` if the schema structure is invalid or a pattern
    /// does not compile.
    pub fn new(schema: &'s Schema) -> SchemaResult<Self> {
        Self::with_config(schema, ValidatorConfig::default())
    }

    /// Creates a validator with explicit configuration.
    ///
    /// The configuration is checked with [`ValidatorConfig::validate`] first.
    pub fn with_config(schema: &'s Schema, config: ValidatorConfig) -> SchemaResult<Self> {
        config.validate()?;
        schema
            .validate_structure()
            .map_err(|e| SchemaError::malformed(format!("<schema {}>", schema.name), e))?;

        let root = CompiledSchema::compile(schema, "")?;
        tracing::debug!(
            schema = %schema.name,
            rules = root.rules.len(),
            max_depth = ?config.max_depth,
            "validator built"
        );

        Ok(Self {
            schema,
            root,
            config,
        })
    }

    /// Returns the schema this validator was built from.
    pub fn schema(&self) -> &'s Schema {
        self.schema
    }

    /// Returns the effective rule for a field name, after shadowing.
    pub fn rule(&self, field_name: &str) -> Option<&'s Rule> {
        self.root.rules.get(field_name).map(|compiled| compiled.rule)
    }

    /// Returns the effective rules in check order.
    pub fn rules(&self) -> impl Iterator<Item = &'s Rule> + '_ {
        self.root.rules.values().map(|compiled| compiled.rule)
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validates a typed record.
    pub fn validate_record(&self, record: &dyn Record) -> ValidationReport {
        let errors = self.check_schema(&self.root, Input::Record(record), 0);
        self.finish(errors, "record")
    }

    /// Validates a dynamic string-keyed mapping.
    pub fn validate_mapping(&self, data: &Map<String, JsonValue>) -> ValidationReport {
        let errors = self.check_schema(&self.root, Input::Mapping(data), 0);
        self.finish(errors, "mapping")
    }

    /// Validates a decoded document, which must be an object.
    pub fn validate_document(&self, document: &JsonValue) -> ValidationReport {
        match document.as_object() {
            Some(map) => self.validate_mapping(map),
            None => self.finish(vec!["Input must be an object".to_string()], "document"),
        }
    }

    fn finish(&self, errors: Vec<String>, mode: &'static str) -> ValidationReport {
        tracing::trace!(
            schema = %self.schema.name,
            mode,
            valid = errors.is_empty(),
            violations = errors.len(),
            "validation complete"
        );
        ValidationReport::from_errors(errors)
    }

    /// Checks every rule of `schema` against `input`.
    fn check_schema(
        &self,
        schema: &CompiledSchema<'s>,
        input: Input<'_>,
        depth: usize,
    ) -> Vec<String> {
        let mut errors = Vec::new();

        match input {
            Input::Record(record) => {
                let fields = record.fields();
                for (name, rule) in &schema.rules {
                    let value = resolve_field(&fields, name).map(|field| &field.value);
                    self.check_field(name, value, rule, depth, &mut errors);
                }
            }
            Input::Mapping(map) => {
                for (name, rule) in &schema.rules {
                    let value = map.get(*name).map(Value::from);
                    self.check_field(name, value.as_ref(), rule, depth, &mut errors);
                }
            }
            Input::Entries(entries) => {
                for (name, rule) in &schema.rules {
                    let value = entries
                        .iter()
                        .find(|(key, _)| key == name)
                        .map(|(_, value)| value);
                    self.check_field(name, value, rule, depth, &mut errors);
                }
            }
        }

        errors
    }

    /// Applies the required check, then dispatches on the rule type.
    fn check_field(
        &self,
        name: &str,
        value: Option<&Value<'_>>,
        rule: &CompiledRule<'s>,
        depth: usize,
        errors: &mut Vec<String>,
    ) {
        match value {
            None | Some(Value::Null) => {
                if rule.rule.required {
                    errors.push(format!("Field '{}' is required", name));
                }
            }
            Some(value) => self.check_value(name, value, rule, depth, errors),
        }
    }

    fn check_value(
        &self,
        name: &str,
        value: &Value<'_>,
        rule: &CompiledRule<'s>,
        depth: usize,
        errors: &mut Vec<String>,
    ) {
        let spec = rule.rule;

        match spec.rule_type {
            RuleType::String => {
                let Value::String(s) = value else {
                    errors.push(type_error(name, "a string"));
                    return;
                };
                self.check_string(name, s, rule, errors);
            }
            RuleType::Number | RuleType::Integer => {
                let Some(num) = value.as_f64() else {
                    errors.push(type_error(name, "a number"));
                    return;
                };
                check_number(name, num, spec, errors);
            }
            RuleType::Boolean => {
                if !matches!(value, Value::Bool(_)) {
                    errors.push(type_error(name, "a boolean"));
                    return;
                }
            }
            RuleType::Array => {
                let Value::Sequence(items) = value else {
                    errors.push(type_error(name, "an array"));
                    return;
                };
                if let Some(item_rule) = &rule.items {
                    for (i, item) in items.iter().enumerate() {
                        let item_name = format!("{}[{}]", name, i);
                        self.check_field(&item_name, Some(item), item_rule, depth, errors);
                    }
                }
            }
            RuleType::Object => {
                let input = match value {
                    Value::Record(record) => Input::Record(*record),
                    Value::Mapping(map) => Input::Mapping(*map),
                    Value::Entries(entries) => Input::Entries(entries),
                    _ => {
                        errors.push(type_error(name, "an object"));
                        return;
                    }
                };
                if let Some(nested) = &rule.nested {
                    self.check_nested(name, nested, input, depth, errors);
                }
            }
        }

        check_enum(name, value, rule, errors);
    }

    fn check_string(
        &self,
        name: &str,
        s: &str,
        rule: &CompiledRule<'s>,
        errors: &mut Vec<String>,
    ) {
        let spec = rule.rule;
        let len = self.config.length_unit.measure(s);

        if let Some(min) = spec.min_length {
            if len < min {
                errors.push(format!(
                    "Field '{}' must have at least {} characters",
                    name, min
                ));
            }
        }
        if let Some(max) = spec.max_length {
            if len > max {
                errors.push(format!(
                    "Field '{}' must have at most {} characters",
                    name, max
                ));
            }
        }
        if let Some(pattern) = &rule.pattern {
            if !pattern.is_match(s) {
                errors.push(format!(
                    "Field '{}' must match pattern {}",
                    name,
                    pattern.as_str()
                ));
            }
        }
    }

    fn check_nested(
        &self,
        name: &str,
        nested: &CompiledSchema<'s>,
        input: Input<'_>,
        depth: usize,
        errors: &mut Vec<String>,
    ) {
        let next = depth + 1;
        if let Some(max) = self.config.max_depth {
            if next > max {
                tracing::debug!(schema = %nested.name, field = %name, max, "nesting ceiling reached");
                errors.push(format!(
                    "Field '{}' exceeds maximum nesting depth of {}",
                    name, max
                ));
                return;
            }
        }

        for err in self.check_schema(nested, input, next) {
            errors.push(format!("{}.{}", name, err));
        }
    }
}

fn check_number(name: &str, num: f64, spec: &Rule, errors: &mut Vec<String>) {
    if spec.rule_type == RuleType::Integer && num.fract() != 0.0 {
        errors.push(format!("Field '{}' must be an integer", name));
    }
    if let Some(min) = spec.min {
        if num < min {
            errors.push(format!("Field '{}' must be >= {}", name, min));
        }
    }
    if let Some(max) = spec.max {
        if num > max {
            errors.push(format!("Field '{}' must be <= {}", name, max));
        }
    }
}

/// Enum membership by canonical text.
fn check_enum(name: &str, value: &Value<'_>, rule: &CompiledRule<'_>, errors: &mut Vec<String>) {
    if rule.enum_canonical.is_empty() {
        return;
    }

    let actual = value.canonical();
    if !rule.enum_canonical.iter().any(|candidate| *candidate == actual) {
        errors.push(format!(
            "Field '{}' must be one of {}",
            name, rule.enum_display
        ));
    }
}

/// Creates a field path from prefix and field name.
fn make_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

/// Creates a type mismatch message.
fn type_error(name: &str, expected: &str) -> String {
    format!("Field '{}' must be {}", name, expected)
}
