//! CodecBuilder - 宣言フェーズ（Declaring）
//!
//! Handler の登録はすべて builder 上で行い、`build()` で一貫性を検証してから
//! 読み取り専用の [`Codec`] に凍結（Frozen）します。凍結後に宣言フェーズへ戻る
//! 手段はありません。

use std::sync::Arc;

use super::codec::Codec;
use crate::domain::TypeTag;
use crate::error::{ConsistencyError, NamingError};
use crate::scalars;
use crate::typed::{Handler, Registry};

/// CodecBuilder は Registry を組み立てる
///
/// # 使用例
/// ```ignore
/// let codec = CodecBuilder::new()
///     .declare("IntFieldEncoder", Handler::encoder(IntFieldEncoder))?
///     .declare("IntFieldDecoder", Handler::decoder(IntFieldDecoder))?
///     .build()?;
/// ```
///
/// # Fail-fast 設計
/// - `declare()` は命名規約違反を `NamingError` で即座に返す（Registry には入らない）
/// - `build()` は encoder/decoder の対称性を検証し、不足があれば `ConsistencyError`
#[derive(Debug, Default)]
pub struct CodecBuilder {
    registry: Registry,
}

impl CodecBuilder {
    /// 空の CodecBuilder を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 組み込みの scalar handler（`int`）を宣言済みの CodecBuilder
    pub fn standard() -> Result<Self, NamingError> {
        scalars::standard_declarations()
            .into_iter()
            .try_fold(Self::new(), |builder, (identifier, handler)| {
                builder.declare(identifier, handler)
            })
    }

    /// 明示的な TypeTag で登録（後勝ち）
    pub fn register(mut self, tag: impl Into<TypeTag>, handler: Handler) -> Self {
        self.registry.register(tag.into(), handler);
        self
    }

    /// 識別子から TypeTag と方向を導いて登録（[`Registry::declare`]）
    pub fn declare(mut self, identifier: &str, handler: Handler) -> Result<Self, NamingError> {
        self.registry.declare(identifier, handler)?;
        Ok(self)
    }

    /// 宣言中の Registry（読み取りのみ）
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// 検証して凍結する
    pub fn build(self) -> Result<Codec, ConsistencyError> {
        self.registry.validate()?;
        tracing::info!(
            encoders = self.registry.encoders().len(),
            decoders = self.registry.decoders().len(),
            "handler registry frozen"
        );
        Ok(Codec::from_frozen(Arc::new(self.registry)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Direction, FieldKind};
    use crate::error::{MissingHandler, PayloadError};
    use crate::scalars::{IntFieldDecoder, IntFieldEncoder};
    use crate::typed::{FieldDecoder, FieldEncoder};

    #[derive(Debug, PartialEq)]
    struct Flag(bool);

    impl FieldKind for Flag {
        const KIND: &'static str = "flag";
    }

    struct FlagFieldEncoder;

    impl FieldEncoder<Flag> for FlagFieldEncoder {
        fn encode(&self, value: &Flag) -> String {
            u8::from(value.0).to_string()
        }
    }

    struct FlagFieldDecoder;

    impl FieldDecoder<Flag> for FlagFieldDecoder {
        fn decode(&self, payload: &str) -> Result<Flag, PayloadError> {
            match payload {
                "0" => Ok(Flag(false)),
                "1" => Ok(Flag(true)),
                _ => Err(PayloadError::new("expected 0 or 1")),
            }
        }
    }

    #[test]
    fn test_build_standard() {
        let builder = CodecBuilder::standard().unwrap();
        assert!(builder.registry().contains(&TypeTag::new("int"), Direction::Encode));
        assert!(builder.registry().contains(&TypeTag::new("int"), Direction::Decode));
        assert!(builder.build().is_ok());
    }

    #[test]
    fn test_declare_rejects_bad_name_before_registry() {
        let result = CodecBuilder::new().declare("IntDecoder", Handler::decoder(IntFieldDecoder));
        assert!(matches!(result, Err(NamingError::Pattern { identifier, .. }) if identifier == "IntDecoder"));
    }

    #[test]
    fn test_declare_direction_mismatch() {
        let err = CodecBuilder::new()
            .declare("IntFieldDecoder", Handler::encoder(IntFieldEncoder))
            .unwrap_err();
        assert_eq!(
            err,
            NamingError::DirectionMismatch {
                identifier: "IntFieldDecoder".to_string(),
                declared: Direction::Decode,
                actual: Direction::Encode,
            }
        );
    }

    #[test]
    fn test_build_missing_decoder() {
        let result = CodecBuilder::standard()
            .unwrap()
            .declare("FlagFieldEncoder", Handler::encoder(FlagFieldEncoder))
            .unwrap()
            .build();
        assert!(matches!(
            result,
            Err(ConsistencyError { missing }) if missing == vec![MissingHandler {
                tag: TypeTag::new("flag"),
                direction: Direction::Decode,
            }]
        ));
    }

    #[test]
    fn test_register_with_explicit_tag() {
        // "flag" は命名規約を通さず、明示的な tag で登録できる
        let codec = CodecBuilder::new()
            .register("flag", Handler::encoder(FlagFieldEncoder))
            .register("flag", Handler::decoder(FlagFieldDecoder))
            .build()
            .unwrap();
        assert_eq!(codec.registry().len(), 1);
    }

    #[test]
    fn test_duplicate_encoder_keeps_second_and_still_validates() {
        struct LoudIntEncoder;

        impl FieldEncoder<i64> for LoudIntEncoder {
            fn encode(&self, value: &i64) -> String {
                format!("{value:X}")
            }
        }

        let codec = CodecBuilder::standard()
            .unwrap()
            .register("int", Handler::encoder(LoudIntEncoder))
            .build()
            .unwrap();
        assert_eq!(codec.encode(&255_i64).unwrap().value(), "FF");
    }
}
