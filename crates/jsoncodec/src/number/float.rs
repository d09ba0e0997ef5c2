use core::str::FromStr;

use crate::{
    context::{DecodeContext, EncodeContext},
    error::{DecodeError, DecodeErrorKind, EncodeError},
};

pub(crate) trait Float: Copy + FromStr + ryu::Float {
    fn is_finite(self) -> bool;
}

impl Float for f32 {
    fn is_finite(self) -> bool {
        f32::is_finite(self)
    }
}

impl Float for f64 {
    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }
}

/// Decodes one number token with correct rounding.
///
/// Magnitudes beyond the target range become infinite, as in ECMAScript.
pub(crate) fn decode_float<T: Float>(ctx: &mut DecodeContext<'_>) -> Result<T, DecodeError> {
    let start = ctx.offset();
    ctx.skip_number()?;
    core::str::from_utf8(ctx.slice(start, ctx.offset()))
        .ok()
        .and_then(|text| text.parse::<T>().ok())
        .ok_or_else(|| ctx.error_at(DecodeErrorKind::InvalidNumber, start))
}

/// Writes the shortest representation that reads back as the same value.
pub(crate) fn encode_float<T: Float>(ctx: &mut EncodeContext, value: T) -> Result<(), EncodeError> {
    if !value.is_finite() {
        return Err(EncodeError::NonFiniteNumber);
    }
    let mut buffer = ryu::Buffer::new();
    ctx.append_slice(buffer.format_finite(value).as_bytes());
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;
    use rstest::rstest;

    use super::*;

    fn decode<T: Float>(input: &str) -> Result<T, DecodeError> {
        decode_float(&mut DecodeContext::new(input.as_bytes()))
    }

    fn encode<T: Float>(value: T) -> Result<Vec<u8>, EncodeError> {
        let mut ctx = EncodeContext::new();
        encode_float(&mut ctx, value)?;
        Ok(ctx.into_vec())
    }

    #[rstest]
    #[case("0", 0.0)]
    #[case("-0.0", -0.0)]
    #[case("1.5", 1.5)]
    #[case("-2.5e-3", -0.0025)]
    #[case("1E2", 100.0)]
    #[case("0.1", 0.1)]
    #[case("1.7976931348623157e308", f64::MAX)]
    #[case("5e-324", 5e-324)]
    fn decodes_f64(#[case] input: &str, #[case] expected: f64) {
        assert_eq!(decode::<f64>(input).unwrap().to_bits(), expected.to_bits());
    }

    #[test]
    fn overflowing_magnitude_is_infinite() {
        assert_eq!(decode::<f64>("1e400"), Ok(f64::INFINITY));
        assert_eq!(decode::<f32>("-1e39"), Ok(f32::NEG_INFINITY));
    }

    #[rstest]
    #[case("NaN")]
    #[case("Infinity")]
    #[case("-")]
    #[case(".1")]
    #[case("+1")]
    fn rejects_non_json_numbers(#[case] input: &str) {
        assert!(decode::<f64>(input).is_err());
    }

    #[test]
    fn encodes_shortest_form() {
        assert_eq!(encode(0.1f64).unwrap(), b"0.1");
        assert_eq!(encode(1.0f64).unwrap(), b"1.0");
        assert_eq!(encode(-0.0f64).unwrap(), b"-0.0");
        assert_eq!(encode(1e21f64).unwrap(), b"1e21");
        assert_eq!(encode(0.3f32).unwrap(), b"0.3");
    }

    #[test]
    fn non_finite_values_do_not_encode() {
        assert_eq!(encode(f64::NAN), Err(EncodeError::NonFiniteNumber));
        assert_eq!(encode(f64::INFINITY), Err(EncodeError::NonFiniteNumber));
        assert_eq!(encode(f32::NEG_INFINITY), Err(EncodeError::NonFiniteNumber));
    }

    #[quickcheck]
    fn round_trips(value: f64) -> TestResult {
        if !value.is_finite() {
            return TestResult::discard();
        }
        let text = encode(value).unwrap();
        let back = decode::<f64>(core::str::from_utf8(&text).unwrap()).unwrap();
        TestResult::from_bool(back.to_bits() == value.to_bits())
    }

    #[test]
    fn output_parses_as_json() {
        for value in [0.1, -1.5e-9, 123_456_789.0, f64::MIN_POSITIVE, f64::MAX] {
            let text = encode(value).unwrap();
            let parsed: f64 = serde_json::from_slice(&text).unwrap();
            assert_eq!(parsed.to_bits(), f64::to_bits(value));
        }
    }
}
