//! Runtime values and their kind names.
//!
//! There is deliberately no enum of supported kinds. A Rust type opts in by
//! implementing [`FieldKind`]; whether it can actually be encoded depends only
//! on which handlers are registered.

use std::any::Any;
use std::fmt;

/// A Rust type that can travel through the dispatch engine.
///
/// # Example
/// ```ignore
/// #[derive(Debug, PartialEq)]
/// struct Celsius(f64);
///
/// impl FieldKind for Celsius {
///     const KIND: &'static str = "celsius";
/// }
/// ```
pub trait FieldKind: Any + fmt::Debug + Send + Sync {
    /// Kind name reported at runtime; the encode path uses it as the type tag.
    const KIND: &'static str;
}

/// Object-safe view of a [`FieldKind`] value.
///
/// Implemented for every `FieldKind`; decoded values come back as
/// `Box<dyn FieldValue>` and are recovered with `downcast`.
pub trait FieldValue: Any + fmt::Debug + Send + Sync + 'static {
    fn kind(&self) -> &'static str;

    /// Name of the concrete Rust type, for diagnostics.
    fn type_name(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: FieldKind> FieldValue for T {
    fn kind(&self) -> &'static str {
        T::KIND
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl dyn FieldValue {
    pub fn is<T: FieldKind>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: FieldKind>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Recover the concrete value, handing the box back on a type mismatch.
    pub fn downcast<T: FieldKind>(self: Box<Self>) -> Result<T, Box<dyn FieldValue>> {
        if self.is::<T>() {
            match self.into_any().downcast::<T>() {
                Ok(value) => Ok(*value),
                Err(_) => unreachable!("type checked above"),
            }
        } else {
            Err(self)
        }
    }
}
