//! Consistency Validator - encoder 側と decoder 側の TypeTag 集合が一致するか
//!
//! Registry 以外に状態を持たないので、何度呼んでも同じ結果になります。

use super::registry::Registry;
use crate::domain::Direction;
use crate::error::{ConsistencyError, MissingHandler};

/// 全ての不一致をまとめて `ConsistencyError` で返す
///
/// - encoder だけある tag → decoder missing
/// - decoder だけある tag → encoder missing
pub fn validate(registry: &Registry) -> Result<(), ConsistencyError> {
    let encoder_tags = registry.tags(Direction::Encode);
    let decoder_tags = registry.tags(Direction::Decode);

    let mut missing: Vec<MissingHandler> = encoder_tags
        .difference(&decoder_tags)
        .map(|tag| MissingHandler {
            tag: (*tag).clone(),
            direction: Direction::Decode,
        })
        .chain(decoder_tags.difference(&encoder_tags).map(|tag| MissingHandler {
            tag: (*tag).clone(),
            direction: Direction::Encode,
        }))
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    missing.sort();
    for m in &missing {
        tracing::warn!(tag = %m.tag, direction = %m.direction, "handler missing");
    }
    Err(ConsistencyError { missing })
}
