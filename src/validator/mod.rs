//! Validation engine
//!
//! Checks typed records and dynamic mappings against a [`Schema`](crate::Schema)
//! and reports every violation as a human-readable string.
//!
//! # Design Principles
//!
//! - One closed value model for both input kinds
//! - Accumulate all errors, never stop at the first
//! - Schemas are read-only, validators are reusable and thread-safe

mod config;
mod engine;
mod record;
mod value;

pub use config::{ConfigError, LengthUnit, ValidatorConfig};
pub use engine::{ValidationReport, Validator};
pub use record::{resolve_field, Field, Record};
pub use value::{Number, ToValue, Value};
