//! Document layer: a whole structure as a JSON object of tagged fields.
//!
//! ```text
//! {
//!     "type": "Point",
//!     "x": {"type": "int", "value": "3"},
//!     "y": {"type": "int", "value": "-5"}
//! }
//! ```
//!
//! This sits outside the dispatch engine: it walks a structure's fields and
//! calls [`Codec::encode`] / [`Codec::decode_record`] once per field. Reading
//! and writing files is left to callers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::app::Codec;
use crate::domain::tagged_value::json_kind;
use crate::domain::{FieldKind, FieldValue, TYPE_FIELD, TaggedValue};
use crate::error::DocumentError;

/// How [`Document::to_json`] lays out its output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteOptions {
    /// Spaces per nesting level; `0` writes compact single-line JSON.
    pub indent: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self { indent: 4 }
    }
}

impl WriteOptions {
    pub fn compact() -> Self {
        Self { indent: 0 }
    }
}

/// A structure's persisted form: its type name plus one tagged value per field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    type_name: String,
    fields: BTreeMap<String, TaggedValue>,
}

impl Document {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn fields(&self) -> &BTreeMap<String, TaggedValue> {
        &self.fields
    }

    pub fn get(&self, field: &str) -> Option<&TaggedValue> {
        self.fields.get(field)
    }

    /// Add or replace a field. `type` is reserved for the type name.
    pub fn insert(
        &mut self,
        field: impl Into<String>,
        value: TaggedValue,
    ) -> Result<Option<TaggedValue>, DocumentError> {
        let field = field.into();
        if field == TYPE_FIELD {
            return Err(DocumentError::ReservedField(field));
        }
        Ok(self.fields.insert(field, value))
    }

    /// Fails with `TypeMismatch` unless the document was written for `expected`.
    pub fn expect_type(&self, expected: &str) -> Result<(), DocumentError> {
        if self.type_name() != expected {
            return Err(DocumentError::TypeMismatch {
                expected: expected.to_string(),
                found: self.type_name().to_string(),
            });
        }
        Ok(())
    }

    pub fn to_json_value(&self) -> Value {
        let mut obj = Map::with_capacity(self.fields.len() + 1);
        obj.insert(TYPE_FIELD.to_string(), Value::String(self.type_name.clone()));
        for (name, tv) in &self.fields {
            obj.insert(name.clone(), tv.to_json());
        }
        Value::Object(obj)
    }

    pub fn to_json(&self, options: &WriteOptions) -> Result<String, DocumentError> {
        let value = self.to_json_value();
        if options.indent == 0 {
            return Ok(serde_json::to_string(&value)?);
        }

        let indent = vec![b' '; options.indent];
        let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent);
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        value.serialize(&mut ser)?;
        // serde_json only ever writes UTF-8.
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn from_json(input: &str) -> Result<Self, DocumentError> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_json_value(&value)
    }

    pub fn from_json_value(value: &Value) -> Result<Self, DocumentError> {
        let obj = value.as_object().ok_or(DocumentError::NotAnObject {
            found: json_kind(value),
        })?;

        let type_name = obj
            .get(TYPE_FIELD)
            .and_then(Value::as_str)
            .ok_or(DocumentError::MissingTypeName)?;

        let mut doc = Document::new(type_name);
        for (name, record) in obj.iter().filter(|(name, _)| name.as_str() != TYPE_FIELD) {
            let tv = TaggedValue::from_json(record).map_err(|source| DocumentError::Malformed {
                field: name.clone(),
                source,
            })?;
            doc.fields.insert(name.clone(), tv);
        }
        Ok(doc)
    }
}

/// A structure that can be written as a [`Document`].
///
/// # Example
/// ```ignore
/// struct Point { x: i64, y: i64 }
///
/// impl Serializable for Point {
///     const TYPE_NAME: &'static str = "Point";
///
///     fn fields(&self) -> Vec<(&'static str, &dyn FieldValue)> {
///         vec![("x", &self.x as &dyn FieldValue), ("y", &self.y as &dyn FieldValue)]
///     }
///
///     fn from_fields(fields: &mut FieldReader<'_>) -> Result<Self, DocumentError> {
///         Ok(Point { x: fields.take("x")?, y: fields.take("y")? })
///     }
/// }
/// ```
pub trait Serializable: Sized {
    /// Written to, and required back from, the document's `type` field.
    const TYPE_NAME: &'static str;

    fn fields(&self) -> Vec<(&'static str, &dyn FieldValue)>;

    fn from_fields(fields: &mut FieldReader<'_>) -> Result<Self, DocumentError>;
}

/// Pulls decoded fields out of a document, one name at a time.
pub struct FieldReader<'a> {
    codec: &'a Codec,
    fields: BTreeMap<String, TaggedValue>,
}

impl<'a> FieldReader<'a> {
    pub fn new(codec: &'a Codec, document: Document) -> Self {
        Self {
            codec,
            fields: document.fields,
        }
    }

    pub fn take<T: FieldKind>(&mut self, field: &str) -> Result<T, DocumentError> {
        let tv = self
            .fields
            .remove(field)
            .ok_or_else(|| DocumentError::MissingField(field.to_string()))?;
        self.codec
            .decode_record_as::<T>(&tv)
            .map_err(|source| DocumentError::Decode {
                field: field.to_string(),
                source,
            })
    }

    /// Like [`take`](Self::take), but an absent field is `None`.
    pub fn take_optional<T: FieldKind>(&mut self, field: &str) -> Result<Option<T>, DocumentError> {
        if self.fields.contains_key(field) {
            self.take(field).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Names of fields not taken yet.
    pub fn remaining(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Fails with `UnexpectedFields` if anything was left untaken.
    pub fn finish(self) -> Result<(), DocumentError> {
        let unexpected: Vec<String> = self.remaining().map(str::to_string).collect();
        if unexpected.is_empty() {
            Ok(())
        } else {
            Err(DocumentError::UnexpectedFields(unexpected))
        }
    }
}

impl Codec {
    /// Encode every field of `value` into a document named `S::TYPE_NAME`.
    pub fn serialize<S: Serializable>(&self, value: &S) -> Result<Document, DocumentError> {
        let mut doc = Document::new(S::TYPE_NAME);
        for (name, field) in value.fields() {
            let tv = self.encode(field).map_err(|source| DocumentError::Encode {
                field: name.to_string(),
                source,
            })?;
            if doc.insert(name, tv)?.is_some() {
                return Err(DocumentError::DuplicateField(name.to_string()));
            }
        }
        tracing::debug!(type_name = S::TYPE_NAME, fields = doc.fields.len(), "serialized");
        Ok(doc)
    }

    /// Rebuild `S` from a document written for exactly `S::TYPE_NAME`.
    pub fn deserialize<S: Serializable>(&self, document: Document) -> Result<S, DocumentError> {
        document.expect_type(S::TYPE_NAME)?;
        let mut reader = FieldReader::new(self, document);
        let value = S::from_fields(&mut reader)?;
        reader.finish()?;
        Ok(value)
    }
}
