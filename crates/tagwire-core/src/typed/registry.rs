//! Registry - TypeTag → Handler の対応表
//!
//! - 宣言フェーズ（`CodecBuilder` が所有、可変）で組み立てる
//! - `CodecBuilder::build()` 後は `Arc<Registry>` として読み取り専用
//! 削除 API は持ちません。

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use super::handler::{DynDecoder, DynEncoder, Handler};
use super::{naming, validator};
use crate::domain::{Direction, TypeTag};
use crate::error::{ConsistencyError, NamingError};

/// Registry は TypeTag ごとに encoder と decoder を 1 つずつ保持
///
/// # 使用例
/// ```ignore
/// let mut registry = Registry::new();
/// registry.register(TypeTag::new("int"), Handler::encoder(IntFieldEncoder));
/// registry.register(TypeTag::new("int"), Handler::decoder(IntFieldDecoder));
/// registry.validate()?;
/// ```
///
/// # 二重登録
/// 同じ (tag, direction) への再登録は **後勝ち**（last writer wins）。
/// 置き換えられた Handler を返し、debug ログを出します。
#[derive(Clone, Default)]
pub struct Registry {
    encoders: BTreeMap<TypeTag, Arc<dyn DynEncoder>>,
    decoders: BTreeMap<TypeTag, Arc<dyn DynDecoder>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// `handler.direction()` 側に `tag` で登録し、置き換えた Handler があれば返す
    pub fn register(&mut self, tag: TypeTag, handler: Handler) -> Option<Handler> {
        let direction = handler.direction();
        let kind = handler.kind();
        if direction == Direction::Encode && tag != kind {
            // encode は値の kind で引くため、この encoder には到達しない
            tracing::warn!(tag = %tag, kind, "encoder tag differs from its kind and is unreachable");
        }
        let replaced = match handler {
            Handler::Encoder(h) => self.encoders.insert(tag.clone(), h).map(Handler::Encoder),
            Handler::Decoder(h) => self.decoders.insert(tag.clone(), h).map(Handler::Decoder),
        };

        if let Some(prev) = &replaced {
            tracing::debug!(
                tag = %tag,
                direction = %direction,
                previous_kind = prev.kind(),
                kind,
                "replaced previously registered handler"
            );
        } else {
            tracing::debug!(tag = %tag, direction = %direction, kind, "registered handler");
        }
        replaced
    }

    /// 識別子 `<Tag>Field(Encoder|Decoder)` から TypeTag を導いて登録
    ///
    /// 命名規約違反、または識別子の方向と `handler` の方向の食い違いは
    /// `NamingError` になり、Registry は変更されません。
    pub fn declare(
        &mut self,
        identifier: &str,
        handler: Handler,
    ) -> Result<Option<Handler>, NamingError> {
        let (tag, declared) = naming::resolve(identifier)?;
        let actual = handler.direction();
        if declared != actual {
            return Err(NamingError::DirectionMismatch {
                identifier: identifier.to_string(),
                declared,
                actual,
            });
        }
        Ok(self.register(tag, handler))
    }

    pub fn encoder(&self, tag: &TypeTag) -> Option<&Arc<dyn DynEncoder>> {
        self.encoders.get(tag)
    }

    pub fn decoder(&self, tag: &TypeTag) -> Option<&Arc<dyn DynDecoder>> {
        self.decoders.get(tag)
    }

    pub fn encoders(&self) -> &BTreeMap<TypeTag, Arc<dyn DynEncoder>> {
        &self.encoders
    }

    pub fn decoders(&self) -> &BTreeMap<TypeTag, Arc<dyn DynDecoder>> {
        &self.decoders
    }

    /// 指定方向に登録済みの TypeTag 集合
    pub fn tags(&self, direction: Direction) -> BTreeSet<&TypeTag> {
        match direction {
            Direction::Encode => self.encoders.keys().collect(),
            Direction::Decode => self.decoders.keys().collect(),
        }
    }

    pub fn contains(&self, tag: &TypeTag, direction: Direction) -> bool {
        match direction {
            Direction::Encode => self.encoders.contains_key(tag),
            Direction::Decode => self.decoders.contains_key(tag),
        }
    }

    /// encoder と decoder のどちらかを持つ TypeTag の数
    pub fn len(&self) -> usize {
        self.encoders
            .keys()
            .chain(self.decoders.keys())
            .collect::<BTreeSet<_>>()
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.encoders.is_empty() && self.decoders.is_empty()
    }

    /// 一貫性チェック（[`validator::validate`] への委譲）
    pub fn validate(&self) -> Result<(), ConsistencyError> {
        validator::validate(self)
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("encoders", &self.encoders.keys().collect::<Vec<_>>())
            .field("decoders", &self.decoders.keys().collect::<Vec<_>>())
            .finish()
    }
}
