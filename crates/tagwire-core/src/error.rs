use std::fmt;

use thiserror::Error;

use crate::domain::{Direction, TypeTag};

/// A handler identifier does not satisfy the `<Tag>Field(Encoder|Decoder)` contract.
///
/// Raised while declaring handlers; a failed declaration never reaches the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamingError {
    #[error("handler identifier `{identifier}` does not match `{pattern}`")]
    Pattern {
        identifier: String,
        pattern: &'static str,
    },

    #[error(
        "handler identifier `{identifier}` names a {declared}, but the supplied handler is a {actual}"
    )]
    DirectionMismatch {
        identifier: String,
        declared: Direction,
        actual: Direction,
    },
}

/// One side of a tag that has no handler.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MissingHandler {
    pub tag: TypeTag,
    pub direction: Direction,
}

impl fmt::Display for MissingHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} missing for type `{}`", self.direction, self.tag)
    }
}

/// Encoder and decoder tag sets diverge.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("inconsistent handler registry: {}", join(.missing))]
pub struct ConsistencyError {
    /// Every offending tag, sorted by tag then direction.
    pub missing: Vec<MissingHandler>,
}

fn join(missing: &[MissingHandler]) -> String {
    missing
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no {direction} registered for type `{tag}`")]
pub struct UnsupportedTypeError {
    pub tag: TypeTag,
    pub direction: Direction,
}

/// A wire record lacks the structure of a tagged value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedValueError {
    #[error("tagged value must be a JSON object, got {found}")]
    NotAnObject { found: &'static str },

    #[error("tagged value is missing field(s): {}", .fields.join(", "))]
    MissingFields { fields: Vec<&'static str> },

    #[error("tagged value field `{field}` must be a string")]
    NotAString { field: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error(transparent)]
    Unsupported(#[from] UnsupportedTypeError),

    #[error("encoder for type `{tag}` expects `{expected}` values, got a `{found}` value")]
    KindMismatch {
        tag: TypeTag,
        expected: &'static str,
        found: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Malformed(#[from] MalformedValueError),

    #[error(transparent)]
    Unsupported(#[from] UnsupportedTypeError),

    #[error("invalid payload {payload:?} for type `{tag}`: {reason}")]
    InvalidPayload {
        tag: TypeTag,
        payload: String,
        reason: String,
    },

    #[error("value of type `{tag}` decoded as `{found}`, expected `{expected}`")]
    KindMismatch {
        tag: TypeTag,
        expected: &'static str,
        found: &'static str,
    },
}

/// Why a scalar handler rejected a payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct PayloadError {
    pub reason: String,
}

impl PayloadError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Errors of the document layer (structure <-> field map).
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document must be a JSON object, got {found}")]
    NotAnObject { found: &'static str },

    #[error("document has no string `type` field")]
    MissingTypeName,

    #[error("cannot deserialize `{expected}` from a document built for `{found}`")]
    TypeMismatch { expected: String, found: String },

    #[error("field name `{0}` is reserved for the document type name")]
    ReservedField(String),

    #[error("field `{field}`: {source}")]
    Malformed {
        field: String,
        #[source]
        source: MalformedValueError,
    },

    #[error("field `{field}`: {source}")]
    Encode {
        field: String,
        #[source]
        source: EncodeError,
    },

    #[error("field `{field}`: {source}")]
    Decode {
        field: String,
        #[source]
        source: DecodeError,
    },

    #[error("field `{0}` given more than once")]
    DuplicateField(String),

    #[error("document is missing field `{0}`")]
    MissingField(String),

    #[error("document has unexpected field(s): {}", .0.join(", "))]
    UnexpectedFields(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consistency_error_names_every_tag_and_direction() {
        let err = ConsistencyError {
            missing: vec![
                MissingHandler {
                    tag: TypeTag::new("float"),
                    direction: Direction::Encode,
                },
                MissingHandler {
                    tag: TypeTag::new("x"),
                    direction: Direction::Decode,
                },
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("encoder missing for type `float`"));
        assert!(msg.contains("decoder missing for type `x`"));
    }

    #[test]
    fn unsupported_type_names_tag_and_direction() {
        let err = UnsupportedTypeError {
            tag: TypeTag::new("bogus"),
            direction: Direction::Decode,
        };
        assert_eq!(err.to_string(), "no decoder registered for type `bogus`");
    }

    #[test]
    fn malformed_lists_missing_fields() {
        let err = MalformedValueError::MissingFields {
            fields: vec!["type", "value"],
        };
        assert_eq!(err.to_string(), "tagged value is missing field(s): type, value");
    }
}
