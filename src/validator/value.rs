//! Input value model
//!
//! Every input, typed record or decoded payload, is viewed through [`Value`]
//! before dispatch. `Null` is the no-value sentinel: a `None`, a JSON `null`.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;

use serde_json::{Map, Value as JsonValue};

use super::record::Record;

/// A numeric input in its original representation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    UInt(u64),
    Float(f64),
    Float32(f32),
}

impl Number {
    /// Coerces to a 64-bit float.
    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Int(n) => n as f64,
            Number::UInt(n) => n as f64,
            Number::Float(n) => n,
            Number::Float32(n) => f64::from(n),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{}", n),
            Number::UInt(n) => write!(f, "{}", n),
            Number::Float(n) => write!(f, "{}", n),
            Number::Float32(n) => write!(f, "{}", n),
        }
    }
}

impl From<&serde_json::Number> for Number {
    fn from(n: &serde_json::Number) -> Self {
        if let Some(i) = n.as_i64() {
            Number::Int(i)
        } else if let Some(u) = n.as_u64() {
            Number::UInt(u)
        } else {
            Number::Float(n.as_f64().unwrap_or(f64::NAN))
        }
    }
}

/// Any input value, borrowed from the record or payload being validated.
#[derive(Clone)]
pub enum Value<'a> {
    /// No value (`None`, JSON `null`)
    Null,
    Bool(bool),
    Number(Number),
    String(&'a str),
    Sequence(Vec<Value<'a>>),
    /// Dynamic string-keyed mapping, validated by exact key lookup
    Mapping(&'a Map<String, JsonValue>),
    /// String-keyed entries of a typed map, validated by exact key lookup
    Entries(Vec<(&'a str, Value<'a>)>),
    /// Typed record, validated through field resolution
    Record(&'a dyn Record),
}

impl<'a> Value<'a> {
    /// Returns true for the no-value sentinel.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the numeric value as `f64` if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    /// Builds entries from any iterable of string-keyed convertible pairs.
    pub fn entries<I, K, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a K, &'a T)>,
        K: AsRef<str> + 'a,
        T: ToValue + 'a,
    {
        Value::Entries(
            pairs
                .into_iter()
                .map(|(key, value)| (key.as_ref(), value.to_value()))
                .collect(),
        )
    }

    /// Builds a sequence from any iterable of convertible items.
    pub fn sequence<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a T>,
        T: ToValue + 'a,
    {
        Value::Sequence(items.into_iter().map(ToValue::to_value).collect())
    }

    /// Returns the canonical textual form used for enum comparison.
    ///
    /// Numbers use the default `Display` of their primitive, so `5.0_f64`
    /// renders as `5` and `0.1_f32` as `0.1`. Sequences render as `[a b]`,
    /// mappings and entries as `map[k:v]` with sorted keys, records as
    /// `{v1 v2}`.
    pub fn canonical(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => (*s).to_string(),
            Value::Sequence(items) => {
                let parts: Vec<String> = items.iter().map(Value::canonical).collect();
                format!("[{}]", parts.join(" "))
            }
            Value::Mapping(map) => {
                let mut entries: Vec<(&String, &JsonValue)> = map.iter().collect();
                entries.sort_by(|a, b| a.0.cmp(b.0));
                let parts: Vec<String> = entries
                    .into_iter()
                    .map(|(k, v)| format!("{}:{}", k, Value::from(v).canonical()))
                    .collect();
                format!("map[{}]", parts.join(" "))
            }
            Value::Entries(entries) => {
                let mut sorted: Vec<&(&str, Value<'_>)> = entries.iter().collect();
                sorted.sort_by(|a, b| a.0.cmp(b.0));
                let parts: Vec<String> = sorted
                    .into_iter()
                    .map(|(k, v)| format!("{}:{}", k, v.canonical()))
                    .collect();
                format!("map[{}]", parts.join(" "))
            }
            Value::Record(record) => {
                let parts: Vec<String> = record
                    .fields()
                    .iter()
                    .map(|field| field.value.canonical())
                    .collect();
                format!("{{{}}}", parts.join(" "))
            }
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Number(n) => write!(f, "Number({:?})", n),
            Value::String(s) => write!(f, "String({:?})", s),
            Value::Sequence(items) => f.debug_tuple("Sequence").field(items).finish(),
            Value::Mapping(map) => f.debug_tuple("Mapping").field(map).finish(),
            Value::Entries(entries) => f.debug_tuple("Entries").field(entries).finish(),
            Value::Record(_) => write!(f, "Record({})", self.canonical()),
        }
    }
}

impl<'a> From<&'a JsonValue> for Value<'a> {
    fn from(value: &'a JsonValue) -> Self {
        match value {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(*b),
            JsonValue::Number(n) => Value::Number(Number::from(n)),
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(items) => Value::Sequence(items.iter().map(Value::from).collect()),
            JsonValue::Object(map) => Value::Mapping(map),
        }
    }
}

/// Conversion of a record field into a [`Value`].
pub trait ToValue {
    fn to_value(&self) -> Value<'_>;
}

impl ToValue for str {
    fn to_value(&self) -> Value<'_> {
        Value::String(self)
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value<'_> {
        Value::String(self)
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

macro_rules! impl_to_value_number {
    ($variant:ident as $target:ty: $($t:ty),*) => {
        $(
            impl ToValue for $t {
                fn to_value(&self) -> Value<'_> {
                    Value::Number(Number::$variant(*self as $target))
                }
            }
        )*
    };
}

impl_to_value_number!(Int as i64: i8, i16, i32, i64, isize);
impl_to_value_number!(UInt as u64: u8, u16, u32, u64, usize);
impl_to_value_number!(Float as f64: f64);
impl_to_value_number!(Float32 as f32: f32);

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value<'_> {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value<'_> {
        Value::sequence(self)
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value<'_> {
        Value::sequence(self)
    }
}

impl<T: ToValue, const N: usize> ToValue for [T; N] {
    fn to_value(&self) -> Value<'_> {
        Value::sequence(self)
    }
}

impl<K: AsRef<str>, T: ToValue, S: BuildHasher> ToValue for HashMap<K, T, S> {
    fn to_value(&self) -> Value<'_> {
        Value::entries(self)
    }
}

impl<K: AsRef<str>, T: ToValue> ToValue for BTreeMap<K, T> {
    fn to_value(&self) -> Value<'_> {
        Value::entries(self)
    }
}

impl ToValue for JsonValue {
    fn to_value(&self) -> Value<'_> {
        Value::from(self)
    }
}

impl ToValue for Map<String, JsonValue> {
    fn to_value(&self) -> Value<'_> {
        Value::Mapping(self)
    }
}
