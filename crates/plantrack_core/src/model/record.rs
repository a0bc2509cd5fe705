//! Opaque record model.
//!
//! # Responsibility
//! - Hold one API row as a field-name to scalar mapping.
//! - Expose a single stringification rule shared by filtering and labels.
//!
//! # Invariants
//! - Falsy scalars (`null`, `""`, `0`, `false`) read as "no value".
//! - Stringification never depends on locale.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;

/// Read access to named scalar fields.
///
/// The cascading filter and search overlay only need this view of an item,
/// so typed structs can opt in without converting to [`Record`].
pub trait Filterable {
    /// Returns the stringified value at `key`, or `None` when the field is
    /// missing or falsy.
    fn field_text(&self, key: &str) -> Option<Cow<'_, str>>;
}

/// One row as delivered by the REST API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a JSON value when it is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Builder used by fixtures and facade adapters.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Owned convenience over [`Filterable::field_text`].
    pub fn text(&self, key: &str) -> Option<String> {
        self.field_text(key).map(Cow::into_owned)
    }
}

impl Filterable for Record {
    fn field_text(&self, key: &str) -> Option<Cow<'_, str>> {
        self.0.get(key).and_then(scalar_text)
    }
}

/// Parses a JSON array of objects into records.
///
/// Rows that are not objects are skipped; a non-array document is an error.
pub fn records_from_json(text: &str) -> Result<Vec<Record>, serde_json::Error> {
    let rows: Vec<Value> = serde_json::from_str(text)?;
    Ok(rows.into_iter().filter_map(Record::from_value).collect())
}

/// Stringifies one JSON scalar, returning `None` for falsy values.
///
/// Integral floats print without a fractional part (`3.0` -> `"3"`), arrays
/// join their items with `,` and objects fall back to compact JSON.
pub fn scalar_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::Null => None,
        Value::Bool(false) => None,
        Value::Bool(true) => Some(Cow::Borrowed("true")),
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(Cow::Borrowed(text.as_str())),
        Value::Number(number) => number_text(number).map(Cow::Owned),
        Value::Array(items) => {
            let joined = items
                .iter()
                .map(|item| scalar_text(item).map(Cow::into_owned).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(",");
            if joined.is_empty() {
                None
            } else {
                Some(Cow::Owned(joined))
            }
        }
        Value::Object(_) => Some(Cow::Owned(value.to_string())),
    }
}

fn number_text(number: &serde_json::Number) -> Option<String> {
    if let Some(int) = number.as_i64() {
        return (int != 0).then(|| int.to_string());
    }
    if let Some(uint) = number.as_u64() {
        return (uint != 0).then(|| uint.to_string());
    }
    let float = number.as_f64()?;
    if float == 0.0 || float.is_nan() {
        return None;
    }
    if float.fract() == 0.0 && float.abs() < 1e15 {
        Some(format!("{}", float as i64))
    } else {
        Some(float.to_string())
    }
}
