//! Record schemas
//!
//! A [`RecordSchema`] describes the fields a collection's records may carry.
//! Schemas are optional: an adapter without one accepts any flat record.
//! With one attached, incoming data is validated before it is written, and
//! [`RecordSchema::typed_json`] renders stored string values back into typed
//! JSON for declared fields.

use crate::error::{RecordError, RecordResult};
use crate::resource::record::Record;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The primitive type of one schema field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Free-form text, accepted as-is
    Text,
    /// Whole number, stored as its decimal rendering
    Integer,
    /// Floating point number, stored as its decimal rendering
    Float,
    /// `true` or `false`, exactly
    Boolean,
}

impl FieldKind {
    /// Human-readable name used in validation errors
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Integer => "integer",
            FieldKind::Float => "float",
            FieldKind::Boolean => "boolean",
        }
    }

    /// Check one stored value against this kind
    fn check(&self, field: &str, value: &str) -> RecordResult<()> {
        let ok = match self {
            FieldKind::Text => true,
            FieldKind::Integer => value.parse::<i64>().is_ok(),
            FieldKind::Float => value.parse::<f64>().is_ok(),
            FieldKind::Boolean => value == "true" || value == "false",
        };
        if ok {
            Ok(())
        } else {
            Err(RecordError::InvalidValue {
                field: field.to_string(),
                reason: format!("'{}' is not a valid {}", value, self.type_name()),
            })
        }
    }

    /// Render one stored value as typed JSON
    fn render(&self, field: &str, value: &str) -> RecordResult<Value> {
        match self {
            FieldKind::Text => Ok(Value::String(value.to_string())),
            FieldKind::Integer => value
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| RecordError::InvalidValue {
                    field: field.to_string(),
                    reason: format!("'{value}' is not a valid integer"),
                }),
            FieldKind::Float => value
                .parse::<f64>()
                .map(Value::from)
                .map_err(|_| RecordError::InvalidValue {
                    field: field.to_string(),
                    reason: format!("'{value}' is not a valid float"),
                }),
            FieldKind::Boolean => match value {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                _ => Err(RecordError::InvalidValue {
                    field: field.to_string(),
                    reason: format!("'{value}' is not a valid boolean"),
                }),
            },
        }
    }
}

/// One declared field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name as stored in the hash
    pub name: String,
    /// Value type
    pub kind: FieldKind,
    /// Whether the field must be present on create and update
    pub required: bool,
}

impl FieldSpec {
    /// A field that must be present
    pub fn required(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
        }
    }

    /// A field that may be omitted
    pub fn optional(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
        }
    }
}

/// Policy for fields a record carries that the schema does not declare
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownFields {
    /// Undeclared fields fail validation
    #[default]
    Reject,
    /// Undeclared fields pass through untyped
    Allow,
}

/// Declared shape of a collection's records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSchema {
    fields: Vec<FieldSpec>,
    #[serde(default)]
    unknown_fields: UnknownFields,
}

impl RecordSchema {
    /// An empty schema that rejects every field
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare one more field
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    /// Let undeclared fields pass through instead of failing validation
    pub fn allowing_unknown_fields(mut self) -> Self {
        self.unknown_fields = UnknownFields::Allow;
        self
    }

    /// Declared fields, in declaration order
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    fn spec(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Validate a record against the schema
    ///
    /// Checks that every required field is present, every present value
    /// parses as its declared kind, and, under [`UnknownFields::Reject`],
    /// that no undeclared field sneaks in.
    pub fn validate(&self, record: &Record) -> RecordResult<()> {
        for spec in &self.fields {
            match record.get(&spec.name) {
                Some(value) => spec.kind.check(&spec.name, value)?,
                None if spec.required => {
                    return Err(RecordError::MissingField {
                        field: spec.name.clone(),
                    });
                }
                None => {}
            }
        }

        if self.unknown_fields == UnknownFields::Reject {
            for name in record.field_names() {
                if self.spec(name).is_none() {
                    return Err(RecordError::UnknownField {
                        field: name.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Render a stored record as typed JSON
    ///
    /// Declared fields come out as their declared JSON type; undeclared
    /// fields (possible under [`UnknownFields::Allow`], and always the case
    /// for the identifier field merged in by the adapter) stay strings.
    pub fn typed_json(&self, record: &Record) -> RecordResult<Value> {
        let mut object = serde_json::Map::new();
        for (name, value) in record.iter() {
            let rendered = match self.spec(name) {
                Some(spec) => spec.kind.render(name, value)?,
                None => Value::String(value.to_string()),
            };
            object.insert(name.to_string(), rendered);
        }
        Ok(Value::Object(object))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basket_schema() -> RecordSchema {
        RecordSchema::new()
            .field(FieldSpec::required("item", FieldKind::Text))
            .field(FieldSpec::required("qty", FieldKind::Integer))
            .field(FieldSpec::optional("fresh", FieldKind::Boolean))
    }

    fn basket_record() -> Record {
        let mut record = Record::new();
        record.insert("item", "apple");
        record.insert("qty", "3");
        record
    }

    #[test]
    fn test_valid_record_passes() {
        assert!(basket_schema().validate(&basket_record()).is_ok());
    }

    #[test]
    fn test_missing_required_field_rejected() {
        let mut record = basket_record();
        record.remove("qty");
        match basket_schema().validate(&record) {
            Err(RecordError::MissingField { field }) => assert_eq!(field, "qty"),
            other => panic!("expected missing field error, got {other:?}"),
        }
    }

    #[test]
    fn test_optional_field_may_be_absent() {
        let record = basket_record();
        assert!(!record.contains_field("fresh"));
        assert!(basket_schema().validate(&record).is_ok());
    }

    #[test]
    fn test_bad_integer_rejected() {
        let mut record = basket_record();
        record.insert("qty", "three");
        match basket_schema().validate(&record) {
            Err(RecordError::InvalidValue { field, .. }) => assert_eq!(field, "qty"),
            other => panic!("expected invalid value error, got {other:?}"),
        }
    }

    #[test]
    fn test_boolean_is_strict() {
        let mut record = basket_record();
        record.insert("fresh", "yes");
        assert!(basket_schema().validate(&record).is_err());
        record.insert("fresh", "true");
        assert!(basket_schema().validate(&record).is_ok());
    }

    #[test]
    fn test_unknown_field_rejected_by_default() {
        let mut record = basket_record();
        record.insert("color", "red");
        match basket_schema().validate(&record) {
            Err(RecordError::UnknownField { field }) => assert_eq!(field, "color"),
            other => panic!("expected unknown field error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_field_allowed_when_opted_in() {
        let mut record = basket_record();
        record.insert("color", "red");
        let schema = basket_schema().allowing_unknown_fields();
        assert!(schema.validate(&record).is_ok());
    }

    #[test]
    fn test_typed_json_restores_declared_types() {
        let mut record = basket_record();
        record.insert("fresh", "true");
        let json = basket_schema().typed_json(&record).unwrap();
        assert_eq!(json["item"], "apple");
        assert_eq!(json["qty"], 3);
        assert_eq!(json["fresh"], true);
    }

    #[test]
    fn test_typed_json_keeps_undeclared_fields_as_strings() {
        let mut record = basket_record();
        record.insert("pk", "42");
        let schema = basket_schema().allowing_unknown_fields();
        let json = schema.typed_json(&record).unwrap();
        assert_eq!(json["pk"], "42");
        assert_eq!(json["qty"], 3);
    }
}
