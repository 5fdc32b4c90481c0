//! Core data structures exchanged by the admin backend
//!
//! A [`Record`] is one flat row keyed by field name. A [`ColumnDescriptor`]
//! maps a record field to the header label used in CSV documents.
//! Typed dashboard entities live in [`domain`] and convert into records for
//! export.

pub mod domain;

use crate::{Error, Result};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub use domain::{Enfant, Member, OrgContent, Phase, Program, Team, Transaction};

/// A scalar field value
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Absent or explicitly null
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Convert a JSON scalar; arrays and objects are not representable
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Null => Ok(Value::Null),
            serde_json::Value::Bool(b) => Ok(Value::Bool(b)),
            serde_json::Value::Number(n) => n
                .as_f64()
                .map(Value::Number)
                .ok_or_else(|| Error::invalid_record(format!("number {} is out of range", n))),
            serde_json::Value::String(s) => Ok(Value::Text(s)),
            other => Err(Error::invalid_record(format!(
                "expected a scalar value, found {}",
                other
            ))),
        }
    }

    /// JSON form of the value; non-finite numbers become null
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => match integral(*n) {
                Some(i) => serde_json::Value::from(i),
                None => serde_json::Number::from_f64(*n)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null),
            },
            Value::Text(s) => serde_json::Value::String(s.clone()),
        }
    }
}

/// Whole numbers inside the exactly-representable range
fn integral(n: f64) -> Option<i64> {
    const MAX_SAFE: f64 = 9_007_199_254_740_991.0;
    (n.fract() == 0.0 && n.abs() <= MAX_SAFE).then_some(n as i64)
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => match integral(*n) {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(*n),
            },
            Value::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            // f64 Display already drops the fraction of integral values
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(value as f64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(value as f64)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// One row of data keyed by field name, in insertion order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Builder form of [`Record::insert`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a field, replacing an existing value in place
    ///
    /// Returns the previous value when the key was already present.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.fields.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Flatten any serialisable struct whose fields are scalars or options of scalars
    pub fn from_serializable<T: Serialize + ?Sized>(item: &T) -> Result<Self> {
        let json = serde_json::to_value(item)
            .map_err(|e| Error::json("Failed to serialise record", e))?;
        match json {
            serde_json::Value::Object(map) => Self::from_json_object(map),
            other => Err(Error::invalid_record(format!(
                "expected an object, found {}",
                other
            ))),
        }
    }

    /// Build a record from a JSON object, keeping key order
    pub fn from_json_object(map: serde_json::Map<String, serde_json::Value>) -> Result<Self> {
        let mut record = Record::with_capacity(map.len());
        for (key, value) in map {
            let value = Value::from_json(value)
                .map_err(|e| Error::invalid_record(format!("field '{}': {}", key, e)))?;
            record.insert(key, value);
        }
        Ok(record)
    }

    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect();
        serde_json::Value::Object(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = Record;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object of scalar fields")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Record, A::Error> {
                let mut record = Record::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, Value>()? {
                    record.insert(key, value);
                }
                Ok(record)
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}

/// How a column's values are rendered on export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnFormat {
    /// Date columns detected by key, booleans as Yes/No, numbers plain
    #[default]
    Auto,
    /// Always try to render the value as a date
    Date,
    /// Raw text with quote doubling only
    Text,
}

/// Maps a record field to a CSV header label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Field name read from each record
    pub key: String,
    /// Header text emitted for the column
    pub label: String,
    #[serde(default)]
    pub format: ColumnFormat,
}

impl ColumnDescriptor {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            format: ColumnFormat::Auto,
        }
    }

    pub fn with_format(mut self, format: ColumnFormat) -> Self {
        self.format = format;
        self
    }

    /// Parse a comma-separated `key:Label` list, as accepted on the command line
    pub fn parse_list(list: &str) -> Result<Vec<Self>> {
        let columns = list
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(|part| part.parse::<ColumnDescriptor>())
            .collect::<Result<Vec<Self>>>()?;

        if columns.is_empty() {
            return Err(Error::configuration("Column list is empty"));
        }
        Ok(columns)
    }
}

impl FromStr for ColumnDescriptor {
    type Err = Error;

    /// `key`, `key:Label` or `key:Label:format`
    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.trim().splitn(3, ':');
        let key = parts.next().map(str::trim).unwrap_or_default();
        if key.is_empty() {
            return Err(Error::configuration(format!("Column '{}' has no key", s)));
        }

        let label = parts.next().map(str::trim).filter(|l| !l.is_empty()).unwrap_or(key);

        let format = match parts.next().map(|f| f.trim().to_lowercase()).as_deref() {
            None | Some("") | Some("auto") => ColumnFormat::Auto,
            Some("date") => ColumnFormat::Date,
            Some("text") => ColumnFormat::Text,
            Some(other) => {
                return Err(Error::configuration(format!(
                    "Unknown column format '{}' (expected auto, date or text)",
                    other
                )));
            }
        };

        Ok(Self::new(key, label).with_format(format))
    }
}
