//! tagwire-core
//!
//! Tagged wire values with pluggable per-kind handlers.
//!
//! # モジュール構成
//! - **domain**: TypeTag, Direction, TaggedValue, FieldKind / FieldValue
//! - **typed**: Handler trait（Typed / Dyn の二層）, Tag Resolver, Registry, Consistency Validator
//! - **app**: CodecBuilder（宣言 → 検証 → 凍結）, Codec（encode / decode の dispatch）
//! - **scalars**: 組み込みの scalar handler（`int`）
//! - **document**: 構造体 ⇔ tagged field の JSON オブジェクト
//! - **error**: エラー型
//!
//! ```ignore
//! let codec = CodecBuilder::standard()?.build()?;
//! let tv = codec.encode(&255_i64)?;            // {"type":"int","value":"ff"}
//! let n: i64 = codec.decode_as(&tv.to_json())?; // 255
//! ```

pub mod app;
pub mod document;
pub mod domain;
pub mod error;
pub mod scalars;
pub mod typed;

pub use app::{Codec, CodecBuilder};
pub use document::{Document, FieldReader, Serializable, WriteOptions};
pub use domain::{Direction, FieldKind, FieldValue, TaggedValue, TypeTag};
pub use error::{
    ConsistencyError, DecodeError, DocumentError, EncodeError, MalformedValueError, NamingError,
    PayloadError, UnsupportedTypeError,
};
pub use typed::{FieldDecoder, FieldEncoder, Handler, Registry};
