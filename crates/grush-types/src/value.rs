//! Value types for grush's AST and runtime.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A runtime value.
///
/// Everything that flows through a pipeline is one of these variants:
/// scalars (null, bool, int, float, string), a single structured record,
/// or an ordered list of records. The presenter and the evaluator match
/// exhaustively on this enum: there is no open-ended "any" escape hatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// A single structured record (e.g. one user, one post).
    Record(Record),
    /// An ordered list of records (e.g. a query result).
    List(Vec<Record>),
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl Value {
    /// True for the Null variant.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short tag for error messages ("int", "record", ...).
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Record(_) => "record",
            Value::List(_) => "list",
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Delegate to value_to_json for a consistent JSON representation.
        value_to_json(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = serde_json::Value::deserialize(deserializer)?;
        Ok(json_to_value(json))
    }
}

/// An ordered field → value mapping.
///
/// Field order is declaration order: the presenter derives table column
/// order from the first record of a list, so `Record` deliberately does
/// not use a hash map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, builder style. Replaces an existing field in place.
    pub fn field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.set(name, value);
        self
    }

    /// Insert or replace a field, preserving the original position on replace.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Get a field by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    /// All fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.set(name, value);
        }
        record
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            // Debug formatting keeps the decimal point on whole floats, so
            // a displayed float always reads back as a float.
            Value::Float(x) => write!(f, "{x:?}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Record(_) | Value::List(_) => {
                write!(f, "{}", value_to_json(self))
            }
        }
    }
}

/// Convert serde_json::Value to a grush Value.
///
/// Objects become records (field order = JSON order via serde_json's
/// preserve_order is *not* assumed; callers constructing records directly
/// control order). Arrays of objects become lists; any other array is
/// stringified element-wise into records with a single `value` field.
pub fn json_to_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                Value::String(n.to_string())
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Object(map) => Value::Record(json_object_to_record(map)),
        serde_json::Value::Array(items) => {
            let records = items
                .into_iter()
                .map(|item| match item {
                    serde_json::Value::Object(map) => json_object_to_record(map),
                    other => Record::new().field("value", json_to_value(other)),
                })
                .collect();
            Value::List(records)
        }
    }
}

fn json_object_to_record(map: serde_json::Map<String, serde_json::Value>) -> Record {
    map.into_iter()
        .map(|(k, v)| (k, json_to_value(v)))
        .collect()
}

/// Convert a grush Value to serde_json::Value for serialization.
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Int(i) => serde_json::Value::Number((*i).into()),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Record(record) => record_to_json(record),
        Value::List(records) => {
            serde_json::Value::Array(records.iter().map(record_to_json).collect())
        }
    }
}

fn record_to_json(record: &Record) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    for (name, value) in record.iter() {
        map.insert(name.to_string(), value_to_json(value));
    }
    serde_json::Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_preserves_field_order() {
        let record = Record::new()
            .field("id", Value::String("u1".into()))
            .field("name", Value::String("Bob".into()));
        let names: Vec<_> = record.names().collect();
        assert_eq!(names, vec!["id", "name"]);
    }

    #[test]
    fn record_set_replaces_in_place() {
        let mut record = Record::new()
            .field("a", Value::Int(1))
            .field("b", Value::Int(2));
        record.set("a", Value::Int(9));
        let names: Vec<_> = record.names().collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(record.get("a"), Some(&Value::Int(9)));
    }

    #[test]
    fn scalar_display_is_literal() {
        assert_eq!(Value::Int(42).to_string(), "42");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::String("hi".into()).to_string(), "hi");
        assert_eq!(Value::Null.to_string(), "null");
    }

    #[test]
    fn whole_float_keeps_its_decimal_point() {
        assert_eq!(Value::Float(3.0).to_string(), "3.0");
        assert_eq!(Value::Float(3.14).to_string(), "3.14");
    }

    #[test]
    fn json_round_trip_record() {
        let value = Value::Record(
            Record::new()
                .field("id", Value::String("p1".into()))
                .field("likes", Value::Int(3)),
        );
        let json = value_to_json(&value);
        assert_eq!(json["id"], serde_json::json!("p1"));
        assert_eq!(json["likes"], serde_json::json!(3));
        match json_to_value(json) {
            Value::Record(r) => assert_eq!(r.get("likes"), Some(&Value::Int(3))),
            other => panic!("expected record, got {other:?}"),
        }
    }

    #[test]
    fn json_array_of_objects_becomes_list() {
        let json = serde_json::json!([{"name": "a"}, {"name": "b"}]);
        match json_to_value(json) {
            Value::List(records) => {
                assert_eq!(records.len(), 2);
                assert_eq!(records[1].get("name"), Some(&Value::String("b".into())));
            }
            other => panic!("expected list, got {other:?}"),
        }
    }
}
