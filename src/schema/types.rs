//! Schema type definitions
//!
//! Supported rule types:
//! - string: UTF-8 string, optional length bounds, pattern and enum
//! - number: any numeric value, optional inclusive bounds
//! - integer: numeric value with zero fractional part
//! - boolean: true / false
//! - array: sequence, optional item rule applied to every element
//! - object: record or mapping, optional nested schema

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Rule types accepted in the `type` key of a rule.
///
/// `slice` and `struct` are legacy spellings still found in older schema files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleType {
    /// UTF-8 string
    String,
    /// Any integer or floating point value
    Number,
    /// Numeric value without fractional part
    Integer,
    /// Boolean
    Boolean,
    /// Sequence of values
    #[serde(alias = "slice")]
    Array,
    /// Record or string-keyed mapping
    #[serde(alias = "struct")]
    Object,
}

impl RuleType {
    /// Returns the type name used in schema files
    pub fn type_name(&self) -> &'static str {
        match self {
            RuleType::String => "string",
            RuleType::Number => "number",
            RuleType::Integer => "integer",
            RuleType::Boolean => "boolean",
            RuleType::Array => "array",
            RuleType::Object => "object",
        }
    }
}

/// One field's contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    /// Name used to locate the value in the input
    #[serde(rename = "field", default)]
    pub field_name: String,
    /// Declared type, drives dispatch
    #[serde(rename = "type")]
    pub rule_type: RuleType,
    /// Whether the field must be present
    #[serde(default)]
    pub required: bool,
    /// Inclusive lower bound for numeric types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Inclusive upper bound for numeric types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Minimum string length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Maximum string length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Regular expression a string value must contain a match for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Allowed values, compared by canonical text
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<JsonValue>,
    /// Schema of an `object` value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nested: Option<Box<Schema>>,
    /// Rule every element of an `array` value must satisfy
    #[serde(rename = "items", default, skip_serializing_if = "Option::is_none")]
    pub items_rule: Option<Box<Rule>>,
    /// Documentation only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Rule {
    /// Create an optional rule with no constraints
    pub fn new(field_name: impl Into<String>, rule_type: RuleType) -> Self {
        Self {
            field_name: field_name.into(),
            rule_type,
            required: false,
            min: None,
            max: None,
            min_length: None,
            max_length: None,
            pattern: None,
            enum_values: Vec::new(),
            nested: None,
            items_rule: None,
            description: None,
        }
    }

    /// Create an item rule (no field name) for use with [`Rule::with_items`]
    pub fn item(rule_type: RuleType) -> Self {
        Self::new("", rule_type)
    }

    /// Mark the rule as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the inclusive lower bound
    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Set the inclusive upper bound
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Set the minimum string length
    pub fn with_min_length(mut self, len: usize) -> Self {
        self.min_length = Some(len);
        self
    }

    /// Set the maximum string length
    pub fn with_max_length(mut self, len: usize) -> Self {
        self.max_length = Some(len);
        self
    }

    /// Set the pattern
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Set the allowed values
    pub fn with_enum<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<JsonValue>,
    {
        self.enum_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Attach a nested schema (object rules)
    pub fn with_nested(mut self, schema: Schema) -> Self {
        self.nested = Some(Box::new(schema));
        self
    }

    /// Attach an item rule (array rules)
    pub fn with_items(mut self, rule: Rule) -> Self {
        self.items_rule = Some(Box::new(rule));
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Checks rule placement invariants, recursing into nested schemas and item rules.
    ///
    /// `path` names the rule in error messages.
    fn validate_structure(&self, path: &str) -> Result<(), String> {
        if self.nested.is_some() && self.rule_type != RuleType::Object {
            return Err(format!(
                "rule '{}' declares a nested schema but has type '{}'",
                path,
                self.rule_type.type_name()
            ));
        }
        if self.items_rule.is_some() && self.rule_type != RuleType::Array {
            return Err(format!(
                "rule '{}' declares an item rule but has type '{}'",
                path,
                self.rule_type.type_name()
            ));
        }

        if let Some(nested) = &self.nested {
            nested.validate_rules(path)?;
        }
        if let Some(items) = &self.items_rule {
            items.validate_structure(&format!("{}[]", path))?;
        }

        Ok(())
    }
}

/// A named, ordered collection of rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Schema name
    #[serde(default)]
    pub name: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Rules in declaration order. Later rules shadow earlier ones with the same field name.
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl Schema {
    /// Create a new schema
    pub fn new(name: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            name: name.into(),
            description: None,
            rules,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Validates the schema structure itself (not a document)
    pub fn validate_structure(&self) -> Result<(), String> {
        self.validate_rules("")
    }

    fn validate_rules(&self, prefix: &str) -> Result<(), String> {
        for (i, rule) in self.rules.iter().enumerate() {
            if rule.field_name.is_empty() {
                return Err(format!(
                    "rule #{} in schema '{}' has no field name",
                    i, self.name
                ));
            }

            let path = if prefix.is_empty() {
                rule.field_name.clone()
            } else {
                format!("{}.{}", prefix, rule.field_name)
            };
            rule.validate_structure(&path)?;
        }

        Ok(())
    }
}
