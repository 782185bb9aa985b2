//! Record representation
//!
//! A [`Record`] is an ordered map of string fields, the in-memory shape of
//! one stored hash. The store keeps values as raw bytes; [`Record::from_raw`]
//! decodes them as UTF-8 and fails field-by-field so the caller learns which
//! field was undecodable.
//!
//! Records convert to and from JSON objects and, through serde, to and from
//! user-defined structs. Without a schema every value crosses the boundary
//! as a string; [`RecordSchema::typed_json`](crate::resource::RecordSchema::typed_json)
//! restores numbers and booleans for declared fields.

use crate::error::{RecordError, RecordResult};
use crate::store::RawFields;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One stored record: an ordered map of string fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    /// An empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from an existing field map
    pub fn from_fields(fields: BTreeMap<String, String>) -> Self {
        Self { fields }
    }

    /// Set one field, returning the previous value if any
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.fields.insert(name.into(), value.into())
    }

    /// Look up one field
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Whether the record carries the named field
    pub fn contains_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Remove one field, returning its value if it was present
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over fields in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Field names in order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Consume the record, yielding the field map
    pub fn into_fields(self) -> BTreeMap<String, String> {
        self.fields
    }

    /// Decode a raw hash read from the store
    ///
    /// Every value must be valid UTF-8; the first undecodable field fails
    /// the whole record.
    pub fn from_raw(raw: RawFields) -> RecordResult<Self> {
        let mut fields = BTreeMap::new();
        for (name, bytes) in raw {
            let value = String::from_utf8(bytes).map_err(|_| RecordError::InvalidUtf8 {
                field: name.clone(),
            })?;
            fields.insert(name, value);
        }
        Ok(Self { fields })
    }

    /// Encode the record for a store write, field order preserved
    pub fn to_raw(&self) -> Vec<(String, Vec<u8>)> {
        self.fields
            .iter()
            .map(|(k, v)| (k.clone(), v.clone().into_bytes()))
            .collect()
    }

    /// Render the record as a JSON object of string values
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect(),
        )
    }

    /// Build a record from a JSON object
    ///
    /// Scalar values are stringified; `null` fields are skipped. Nested
    /// arrays and objects have no flat-hash representation and are rejected.
    pub fn from_json(value: &Value) -> RecordResult<Self> {
        let object = value.as_object().ok_or_else(|| RecordError::Conversion {
            reason: format!("expected a JSON object, got {}", json_type_name(value)),
        })?;

        let mut fields = BTreeMap::new();
        for (name, value) in object {
            let rendered = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null => continue,
                Value::Array(_) | Value::Object(_) => {
                    return Err(RecordError::InvalidValue {
                        field: name.clone(),
                        reason: "nested values are not supported".to_string(),
                    });
                }
            };
            fields.insert(name.clone(), rendered);
        }
        Ok(Self { fields })
    }

    /// Deserialize the record into a user type, all values as strings
    pub fn to_object<T: DeserializeOwned>(&self) -> RecordResult<T> {
        serde_json::from_value(self.to_json()).map_err(|e| RecordError::Conversion {
            reason: e.to_string(),
        })
    }

    /// Serialize a user type into a record
    ///
    /// The type must serialize to a flat JSON object of scalars.
    pub fn from_object<T: Serialize>(object: &T) -> RecordResult<Self> {
        let value = serde_json::to_value(object).map_err(|e| RecordError::Conversion {
            reason: e.to_string(),
        })?;
        Self::from_json(&value)
    }
}

impl FromIterator<(String, String)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Record {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        let mut record = Record::new();
        record.insert("item", "apple");
        record.insert("qty", "3");
        record
    }

    #[test]
    fn test_insert_and_get() {
        let record = sample();
        assert_eq!(record.get("item"), Some("apple"));
        assert_eq!(record.get("missing"), None);
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_from_raw_decodes_utf8() {
        let mut raw = RawFields::new();
        raw.insert("item".to_string(), b"apple".to_vec());
        raw.insert("qty".to_string(), b"3".to_vec());

        let record = Record::from_raw(raw).unwrap();
        assert_eq!(record, sample());
    }

    #[test]
    fn test_from_raw_rejects_invalid_utf8() {
        let mut raw = RawFields::new();
        raw.insert("blob".to_string(), vec![0xff, 0xfe]);

        match Record::from_raw(raw) {
            Err(RecordError::InvalidUtf8 { field }) => assert_eq!(field, "blob"),
            other => panic!("expected invalid utf8 error, got {other:?}"),
        }
    }

    #[test]
    fn test_raw_roundtrip() {
        let record = sample();
        let raw: RawFields = record.to_raw().into_iter().collect();
        assert_eq!(Record::from_raw(raw).unwrap(), record);
    }

    #[test]
    fn test_json_object_roundtrip() {
        let record = sample();
        let json = record.to_json();
        assert_eq!(json["item"], "apple");
        assert_eq!(Record::from_json(&json).unwrap(), record);
    }

    #[test]
    fn test_from_json_stringifies_scalars_and_skips_null() {
        let json = serde_json::json!({
            "qty": 3,
            "price": 1.5,
            "fresh": true,
            "note": null,
        });
        let record = Record::from_json(&json).unwrap();
        assert_eq!(record.get("qty"), Some("3"));
        assert_eq!(record.get("price"), Some("1.5"));
        assert_eq!(record.get("fresh"), Some("true"));
        assert!(!record.contains_field("note"));
    }

    #[test]
    fn test_from_json_rejects_nested_values() {
        let json = serde_json::json!({ "tags": ["a", "b"] });
        match Record::from_json(&json) {
            Err(RecordError::InvalidValue { field, .. }) => assert_eq!(field, "tags"),
            other => panic!("expected invalid value error, got {other:?}"),
        }
    }

    #[test]
    fn test_from_json_requires_object() {
        let err = Record::from_json(&serde_json::json!([1, 2])).unwrap_err();
        assert!(matches!(err, RecordError::Conversion { .. }));
    }

    #[test]
    fn test_object_conversion() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Item {
            item: String,
            qty: String,
        }

        let record = sample();
        let item: Item = record.to_object().unwrap();
        assert_eq!(
            item,
            Item {
                item: "apple".to_string(),
                qty: "3".to_string()
            }
        );
        assert_eq!(Record::from_object(&item).unwrap(), record);
    }

    #[test]
    fn test_serde_transparency() {
        let record = sample();
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"item":"apple","qty":"3"}"#);
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
