use crate::{
    codec::Codec,
    context::{DecodeContext, EncodeContext},
    encoded_value::EncodedValue,
    error::{DecodeError, DecodeErrorKind, EncodeError},
    skip,
};

/// Captures any JSON value verbatim as an [`EncodedValue`] instead of
/// interpreting it.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyValueCodec;

#[must_use]
pub fn any_value() -> AnyValueCodec {
    AnyValueCodec
}

impl Codec for AnyValueCodec {
    type Object = EncodedValue;

    fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<EncodedValue, DecodeError> {
        let (begin, end) = skip::capture_value(ctx)?;
        core::str::from_utf8(ctx.slice(begin, end))
            .map(EncodedValue::from_validated)
            .map_err(|e| ctx.error_at(DecodeErrorKind::InvalidUtf8, begin + e.valid_up_to()))
    }

    fn encode(&self, ctx: &mut EncodeContext, value: &EncodedValue) -> Result<(), EncodeError> {
        ctx.append_slice(value.as_str().as_bytes());
        Ok(())
    }
}
