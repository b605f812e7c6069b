use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::TypeTag;
use crate::error::MalformedValueError;

pub const TYPE_FIELD: &str = "type";
pub const VALUE_FIELD: &str = "value";

/// Wire record pairing a type tag with a kind-specific payload.
///
/// Shape on the wire: `{"type": "int", "value": "ff"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaggedValue {
    #[serde(rename = "type")]
    tag: TypeTag,
    value: String,
}

impl TaggedValue {
    pub fn new(tag: impl Into<TypeTag>, value: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            value: value.into(),
        }
    }

    pub fn tag(&self) -> &TypeTag {
        &self.tag
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn to_json(&self) -> Value {
        serde_json::json!({
            TYPE_FIELD: self.tag.as_str(),
            VALUE_FIELD: self.value,
        })
    }

    /// Structural check of a raw wire record, done before any tag lookup.
    ///
    /// Reports every missing field at once; extra fields are ignored.
    pub fn from_json(record: &Value) -> Result<Self, MalformedValueError> {
        let obj = record.as_object().ok_or(MalformedValueError::NotAnObject {
            found: json_kind(record),
        })?;

        let missing: Vec<&'static str> = [TYPE_FIELD, VALUE_FIELD]
            .into_iter()
            .filter(|field| !obj.contains_key(*field))
            .collect();
        if !missing.is_empty() {
            return Err(MalformedValueError::MissingFields { fields: missing });
        }

        let tag = obj[TYPE_FIELD]
            .as_str()
            .ok_or(MalformedValueError::NotAString { field: TYPE_FIELD })?;
        let value = obj[VALUE_FIELD]
            .as_str()
            .ok_or(MalformedValueError::NotAString { field: VALUE_FIELD })?;

        Ok(Self::new(tag, value))
    }
}

pub(crate) fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
