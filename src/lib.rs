//! fieldrules - Schema-driven validation for records and decoded payloads
//!
//! A [`Schema`] lists per-field rules (type, required, bounds, pattern, enum,
//! nested schema, item rule). A [`Validator`] applies it to a typed [`Record`]
//! or to a string-keyed mapping and collects every violation.

pub mod cli;
pub mod schema;
pub mod validator;

pub use schema::{Rule, RuleType, Schema, SchemaError, SchemaFormat, SchemaLoader, SchemaResult};
pub use validator::{
    resolve_field, ConfigError, Field, LengthUnit, Number, Record, ToValue, ValidationReport,
    Validator, ValidatorConfig, Value,
};
