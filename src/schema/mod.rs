//! Schema model
//!
//! A schema is an ordered list of field rules, loaded once from a YAML or
//! JSON document and read-only afterwards.
//!
//! # Design Principles
//!
//! - Closed set of rule types, unknown types fail at load
//! - Structure errors surface before any validation attempt
//! - Later rules shadow earlier rules with the same field name

mod errors;
mod loader;
mod types;

pub use errors::{SchemaError, SchemaResult};
pub use loader::{SchemaFormat, SchemaLoader};
pub use types::{Rule, RuleType, Schema};
