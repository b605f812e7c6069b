//! Domain model: type tags, directions, wire records and runtime values.

pub mod tag;
pub mod tagged_value;
pub mod value;

pub use self::tag::{Direction, TypeTag};
pub use self::tagged_value::{TYPE_FIELD, TaggedValue, VALUE_FIELD};
pub use self::value::{FieldKind, FieldValue};
