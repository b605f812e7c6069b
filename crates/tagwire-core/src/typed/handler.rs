//! Handler traits - 1 つの値の種類 (kind) を 1 方向に変換する Handler の定義
//!
//! # 二層構造
//! - **表層（Typed）**: `FieldEncoder<T>` / `FieldDecoder<T>` - 具体型 `T` だけを扱う
//! - **内部（Dyn）**: `DynEncoder` / `DynDecoder` - object-safe, Registry に格納される
//!
//! `TypedEncoder<T, H>` / `TypedDecoder<T, H>` が両者をつなぐ型消去アダプタです。

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::domain::{Direction, FieldKind, FieldValue, TaggedValue, TypeTag};
use crate::error::{DecodeError, EncodeError, PayloadError};

/// `T` を payload 文字列に変換する
///
/// # 使用例
/// ```ignore
/// struct BoolFieldEncoder;
///
/// impl FieldEncoder<bool> for BoolFieldEncoder {
///     fn encode(&self, value: &bool) -> String {
///         if *value { "1".into() } else { "0".into() }
///     }
/// }
/// ```
pub trait FieldEncoder<T: FieldKind>: Send + Sync {
    fn encode(&self, value: &T) -> String;
}

/// payload 文字列から `T` を復元する
///
/// 受け付けられない payload は `PayloadError` で理由を返します。
pub trait FieldDecoder<T: FieldKind>: Send + Sync {
    fn decode(&self, payload: &str) -> Result<T, PayloadError>;
}

/// object-safe な encoder
///
/// `tag` は Registry 上のキーで、生成する `TaggedValue` の `type` になります。
pub trait DynEncoder: Send + Sync {
    fn encode_dyn(&self, tag: &TypeTag, value: &dyn FieldValue) -> Result<TaggedValue, EncodeError>;

    /// 受け付ける値の kind
    fn kind(&self) -> &'static str;
}

/// object-safe な decoder
pub trait DynDecoder: Send + Sync {
    fn decode_dyn(&self, record: &TaggedValue) -> Result<Box<dyn FieldValue>, DecodeError>;

    /// 生成する値の kind
    fn kind(&self) -> &'static str;
}

pub struct TypedEncoder<T: FieldKind, H: FieldEncoder<T>> {
    handler: H,
    _marker: PhantomData<fn(&T)>,
}

impl<T: FieldKind, H: FieldEncoder<T>> TypedEncoder<T, H> {
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            _marker: PhantomData,
        }
    }
}

impl<T: FieldKind, H: FieldEncoder<T>> DynEncoder for TypedEncoder<T, H> {
    fn encode_dyn(&self, tag: &TypeTag, value: &dyn FieldValue) -> Result<TaggedValue, EncodeError> {
        let typed = value.downcast_ref::<T>().ok_or_else(|| {
            tracing::debug!(
                tag = %tag,
                value_type = value.type_name(),
                "encoder got a value of another kind"
            );
            EncodeError::KindMismatch {
                tag: tag.clone(),
                expected: T::KIND,
                found: value.kind(),
            }
        })?;
        Ok(TaggedValue::new(tag.clone(), self.handler.encode(typed)))
    }

    fn kind(&self) -> &'static str {
        T::KIND
    }
}

pub struct TypedDecoder<T: FieldKind, H: FieldDecoder<T>> {
    handler: H,
    _marker: PhantomData<fn() -> T>,
}

impl<T: FieldKind, H: FieldDecoder<T>> TypedDecoder<T, H> {
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            _marker: PhantomData,
        }
    }
}

impl<T: FieldKind, H: FieldDecoder<T>> DynDecoder for TypedDecoder<T, H> {
    fn decode_dyn(&self, record: &TaggedValue) -> Result<Box<dyn FieldValue>, DecodeError> {
        let value = self
            .handler
            .decode(record.value())
            .map_err(|e| DecodeError::InvalidPayload {
                tag: record.tag().clone(),
                payload: record.value().to_string(),
                reason: e.reason,
            })?;
        Ok(Box::new(value))
    }

    fn kind(&self) -> &'static str {
        T::KIND
    }
}

/// Registry に登録される Handler（方向つき）
///
/// `register(tag, handler)` の方向は `Handler` の variant が運びます。
#[derive(Clone)]
pub enum Handler {
    Encoder(Arc<dyn DynEncoder>),
    Decoder(Arc<dyn DynDecoder>),
}

impl Handler {
    /// 型付き encoder を型消去して包む
    pub fn encoder<T, H>(handler: H) -> Self
    where
        T: FieldKind,
        H: FieldEncoder<T> + 'static,
    {
        Handler::Encoder(Arc::new(TypedEncoder::new(handler)))
    }

    /// 型付き decoder を型消去して包む
    pub fn decoder<T, H>(handler: H) -> Self
    where
        T: FieldKind,
        H: FieldDecoder<T> + 'static,
    {
        Handler::Decoder(Arc::new(TypedDecoder::new(handler)))
    }

    pub fn direction(&self) -> Direction {
        match self {
            Handler::Encoder(_) => Direction::Encode,
            Handler::Decoder(_) => Direction::Decode,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Handler::Encoder(h) => h.kind(),
            Handler::Decoder(h) => h.kind(),
        }
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("direction", &self.direction())
            .field("kind", &self.kind())
            .finish()
    }
}
