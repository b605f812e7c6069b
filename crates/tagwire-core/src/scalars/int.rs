//! Integer kind (`i64`, tag `int`).
//!
//! Payload is the lowercase hex magnitude with no radix prefix. Negative
//! values carry a single leading `-`: `255` → `ff`, `-255` → `-ff`, `0` → `0`.

use crate::domain::FieldKind;
use crate::error::PayloadError;
use crate::typed::{FieldDecoder, FieldEncoder};

impl FieldKind for i64 {
    const KIND: &'static str = "int";
}

pub const INT_ENCODER: &str = "IntFieldEncoder";
pub const INT_DECODER: &str = "IntFieldDecoder";

const SIGN: char = '-';

#[derive(Debug, Clone, Copy, Default)]
pub struct IntFieldEncoder;

impl FieldEncoder<i64> for IntFieldEncoder {
    fn encode(&self, value: &i64) -> String {
        if *value < 0 {
            format!("{SIGN}{:x}", value.unsigned_abs())
        } else {
            format!("{value:x}")
        }
    }
}

/// Accepts an optional leading `-` followed by hex digits of either case.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntFieldDecoder;

impl FieldDecoder<i64> for IntFieldDecoder {
    fn decode(&self, payload: &str) -> Result<i64, PayloadError> {
        let (negative, digits) = match payload.strip_prefix(SIGN) {
            Some(rest) => (true, rest),
            None => (false, payload),
        };

        if digits.is_empty() {
            return Err(PayloadError::new("no hex digits"));
        }
        if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(PayloadError::new(format!("{bad:?} is not a hex digit")));
        }

        let magnitude = u64::from_str_radix(digits, 16)
            .map_err(|_| PayloadError::new("magnitude does not fit in 64 bits"))?;

        if negative {
            // i64::MIN has magnitude 2^63, one past i64::MAX.
            if magnitude > i64::MIN.unsigned_abs() {
                return Err(PayloadError::new("value is below i64::MIN"));
            }
            Ok((magnitude as i64).wrapping_neg())
        } else {
            i64::try_from(magnitude).map_err(|_| PayloadError::new("value is above i64::MAX"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case::zero(0, "0")]
    #[case::one(1, "1")]
    #[case::ff(255, "ff")]
    #[case::large(0x1234_abcd, "1234abcd")]
    #[case::max(i64::MAX, "7fffffffffffffff")]
    #[case::minus_one(-1, "-1")]
    #[case::minus_ff(-255, "-ff")]
    #[case::min(i64::MIN, "-8000000000000000")]
    fn encodes_lowercase_hex_with_sign_marker(#[case] value: i64, #[case] payload: &str) {
        assert_eq!(IntFieldEncoder.encode(&value), payload);
        assert_eq!(IntFieldDecoder.decode(payload).unwrap(), value);
    }

    #[rstest]
    #[case::uppercase("FF", 255)]
    #[case::leading_zeros("00ff", 255)]
    #[case::negative_zero("-0", 0)]
    fn decodes_lenient_spellings(#[case] payload: &str, #[case] value: i64) {
        assert_eq!(IntFieldDecoder.decode(payload).unwrap(), value);
    }

    #[rstest]
    #[case::empty("")]
    #[case::bare_sign("-")]
    #[case::plus("+ff")]
    #[case::prefix("0xff")]
    #[case::double_sign("--1")]
    #[case::whitespace(" ff")]
    #[case::not_hex("fg")]
    #[case::too_large("8000000000000000")]
    #[case::too_small("-8000000000000001")]
    #[case::too_wide("10000000000000000")]
    fn rejects_invalid_payloads(#[case] payload: &str) {
        assert!(IntFieldDecoder.decode(payload).is_err());
    }

    #[test]
    fn int_kind_name() {
        assert_eq!(<i64 as FieldKind>::KIND, "int");
    }

    proptest! {
        #[test]
        fn round_trips_every_i64(v in any::<i64>()) {
            let payload = IntFieldEncoder.encode(&v);
            prop_assert_eq!(IntFieldDecoder.decode(&payload).unwrap(), v);
        }

        #[test]
        fn payload_is_canonical_lowercase(v in any::<i64>()) {
            let payload = IntFieldEncoder.encode(&v);
            let digits = payload.strip_prefix('-').unwrap_or(&payload);
            prop_assert!(!digits.is_empty());
            prop_assert!(digits.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
            prop_assert!(digits == "0" || !digits.starts_with('0'));
            prop_assert_eq!(payload.starts_with('-'), v < 0);
        }
    }
}
