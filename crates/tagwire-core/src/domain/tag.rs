use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable string key identifying one supported value kind (e.g. `"int"`).
///
/// This is the join key between the encoder side and the decoder side of the
/// registry, and the `type` field of every [`TaggedValue`](super::TaggedValue).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeTag(String);

impl TypeTag {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for TypeTag {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TypeTag {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for TypeTag {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TypeTag {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Which way a handler converts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Encode,
    Decode,
}

impl Direction {
    /// The identifier suffix that declares this direction.
    pub fn suffix(self) -> &'static str {
        match self {
            Direction::Encode => "Encoder",
            Direction::Decode => "Decoder",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Encode => f.write_str("encoder"),
            Direction::Decode => f.write_str("decoder"),
        }
    }
}
