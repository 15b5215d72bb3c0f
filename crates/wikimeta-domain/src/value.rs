//! Property values and the mappings built from them

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Metadata block of a host document
///
/// Keys are field names, values are arbitrary JSON-compatible data.
pub type Metadata = BTreeMap<String, Value>;

/// A single normalized property value
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Plain text (strings, language strings, labels, normalized quantities)
    Text(String),

    /// Signed integer
    Integer(i64),

    /// Floating-point number; NaN when the lexical form was malformed
    Decimal(f64),

    /// Date or date-time, lexical form unchanged
    Date(String),

    /// Cross-reference markup pointing at another document, e.g. `[[db/human]]`
    Reference(String),
}

impl PropertyValue {
    /// Build a cross-reference value by wrapping a path in `[[...]]`
    pub fn reference(path: &str) -> Self {
        PropertyValue::Reference(format!("[[{}]]", path))
    }

    /// Convert to a JSON value for the metadata block
    ///
    /// Non-finite decimals have no JSON number form and are written as text.
    pub fn to_json(&self) -> Value {
        match self {
            PropertyValue::Text(s) | PropertyValue::Date(s) | PropertyValue::Reference(s) => {
                Value::String(s.clone())
            }
            PropertyValue::Integer(i) => Value::from(*i),
            PropertyValue::Decimal(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(f.to_string())),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Text(s) | PropertyValue::Date(s) | PropertyValue::Reference(s) => {
                f.write_str(s)
            }
            PropertyValue::Integer(i) => write!(f, "{}", i),
            PropertyValue::Decimal(d) => write!(f, "{}", d),
        }
    }
}

impl Serialize for PropertyValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Property name → ordered, non-empty list of values
///
/// The only way to add data is [`PropertyMapping::push`], so a key can never
/// map to an empty list. Keys are kept sorted; value order within a key is
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyMapping {
    entries: BTreeMap<String, Vec<PropertyValue>>,
}

impl PropertyMapping {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value to the list for `key`, creating the key on first use
    pub fn push(&mut self, key: impl Into<String>, value: PropertyValue) {
        self.entries.entry(key.into()).or_default().push(value);
    }

    /// Values recorded for `key`
    pub fn get(&self, key: &str) -> Option<&[PropertyValue]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Whether `key` has any values
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of distinct property names
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no property was recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, values)` pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PropertyValue])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Property names in key order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl Serialize for PropertyMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, values) in &self.entries {
            map.serialize_entry(key, values)?;
        }
        map.end()
    }
}
