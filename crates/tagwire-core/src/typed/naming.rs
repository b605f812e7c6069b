//! Tag Resolver - handler 識別子から (TypeTag, Direction) を導く
//!
//! # 命名規約
//! - `<Tag>Field(Encoder|Decoder)`
//! - 例: `IntFieldEncoder` → (`int`, Encode)
//!
//! `<Tag>` は UpperCamelCase → snake_case に変換して TypeTag にします。

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{Direction, TypeTag};
use crate::error::NamingError;

pub const HANDLER_NAME_PATTERN: &str = r"^(?P<tag>\w+)Field(?P<dir>Encoder|Decoder)$";

static HANDLER_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(HANDLER_NAME_PATTERN).expect("handler name pattern is valid"));

/// 識別子を解析して (TypeTag, Direction) を返す
///
/// 副作用なし。規約に合わなければ `NamingError::Pattern`。
pub fn resolve(identifier: &str) -> Result<(TypeTag, Direction), NamingError> {
    let caps = HANDLER_NAME
        .captures(identifier)
        .ok_or_else(|| NamingError::Pattern {
            identifier: identifier.to_string(),
            pattern: HANDLER_NAME_PATTERN,
        })?;

    let direction = if &caps["dir"] == Direction::Encode.suffix() {
        Direction::Encode
    } else {
        Direction::Decode
    };
    Ok((TypeTag::new(snake_case(&caps["tag"])), direction))
}

/// `DateTime` → `date_time`, `Int` → `int`, `U8` → `u8`, `IOError` → `io_error`
fn snake_case(segment: &str) -> String {
    let chars: Vec<char> = segment.chars().collect();
    let mut out = String::with_capacity(segment.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            // 頭字語の終わり: `IOError` の `E`
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::int_encoder("IntFieldEncoder", "int", Direction::Encode)]
    #[case::int_decoder("IntFieldDecoder", "int", Direction::Decode)]
    #[case::camel("DateTimeFieldEncoder", "date_time", Direction::Encode)]
    #[case::digits("U8FieldDecoder", "u8", Direction::Decode)]
    #[case::already_snake("raw_bytesFieldEncoder", "raw_bytes", Direction::Encode)]
    #[case::greedy("FooFieldBarFieldDecoder", "foo_field_bar", Direction::Decode)]
    #[case::leading_acronym("IOErrorFieldEncoder", "io_error", Direction::Encode)]
    #[case::whole_acronym("HTTPFieldDecoder", "http", Direction::Decode)]
    #[case::inner_acronym("RawHTTPHeaderFieldEncoder", "raw_http_header", Direction::Encode)]
    fn resolves_tag_and_direction(
        #[case] identifier: &str,
        #[case] tag: &str,
        #[case] direction: Direction,
    ) {
        assert_eq!(resolve(identifier).unwrap(), (TypeTag::new(tag), direction));
    }

    #[rstest]
    #[case::no_field_infix("IntDecoder")]
    #[case::no_tag("FieldEncoder")]
    #[case::wrong_suffix("IntFieldCodec")]
    #[case::lowercase_suffix("IntFieldencoder")]
    #[case::trailing("IntFieldEncoderX")]
    #[case::space("Int FieldEncoder")]
    #[case::empty("")]
    fn rejects_identifiers_outside_the_contract(#[case] identifier: &str) {
        let err = resolve(identifier).unwrap_err();
        assert_eq!(
            err,
            NamingError::Pattern {
                identifier: identifier.to_string(),
                pattern: HANDLER_NAME_PATTERN,
            }
        );
    }

    #[test]
    fn naming_error_mentions_expected_pattern() {
        let msg = resolve("IntDecoder").unwrap_err().to_string();
        assert!(msg.contains("IntDecoder"));
        assert!(msg.contains("Field(?P<dir>Encoder|Decoder)"));
    }
}
