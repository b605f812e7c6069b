use std::sync::Arc;

use serde_json::Value;

use crate::domain::{Direction, FieldKind, FieldValue, TaggedValue, TypeTag};
use crate::error::{DecodeError, EncodeError, UnsupportedTypeError};
use crate::typed::Registry;

/// Dispatch engine over a frozen, validated registry.
///
/// Cheap to clone and safe to share across threads: every call is a map
/// lookup followed by one handler invocation, with no shared mutable state.
#[derive(Debug, Clone)]
pub struct Codec {
    registry: Arc<Registry>,
}

impl Codec {
    /// Only [`CodecBuilder::build`](super::CodecBuilder::build) hands out a
    /// `Codec`, after the registry passed validation.
    pub(crate) fn from_frozen(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Encode one runtime value.
    ///
    /// The value's kind name is the lookup tag.
    pub fn encode(&self, value: &dyn FieldValue) -> Result<TaggedValue, EncodeError> {
        let tag = TypeTag::new(value.kind());
        let encoder = self
            .registry
            .encoder(&tag)
            .ok_or_else(|| unsupported(&tag, Direction::Encode))?;

        tracing::trace!(tag = %tag, "encode");
        encoder.encode_dyn(&tag, value)
    }

    /// Decode one raw wire record.
    ///
    /// Structure is checked before the tag is looked up, so a record without
    /// `type` or `value` is `Malformed` even when its tag is unknown.
    pub fn decode(&self, record: &Value) -> Result<Box<dyn FieldValue>, DecodeError> {
        let record = TaggedValue::from_json(record)?;
        self.decode_record(&record)
    }

    /// Decode an already structured record.
    pub fn decode_record(&self, record: &TaggedValue) -> Result<Box<dyn FieldValue>, DecodeError> {
        let tag = record.tag();
        let decoder = self
            .registry
            .decoder(tag)
            .ok_or_else(|| unsupported(tag, Direction::Decode))?;

        tracing::trace!(tag = %tag, "decode");
        decoder.decode_dyn(record)
    }

    /// Decode and downcast to `T`.
    pub fn decode_as<T: FieldKind>(&self, record: &Value) -> Result<T, DecodeError> {
        let record = TaggedValue::from_json(record)?;
        self.decode_record_as(&record)
    }

    pub fn decode_record_as<T: FieldKind>(&self, record: &TaggedValue) -> Result<T, DecodeError> {
        self.decode_record(record)?
            .downcast::<T>()
            .map_err(|other| DecodeError::KindMismatch {
                tag: record.tag().clone(),
                expected: T::KIND,
                found: other.kind(),
            })
    }
}

fn unsupported(tag: &TypeTag, direction: Direction) -> UnsupportedTypeError {
    tracing::debug!(tag = %tag, direction = %direction, "no handler for tag");
    UnsupportedTypeError {
        tag: tag.clone(),
        direction,
    }
}
