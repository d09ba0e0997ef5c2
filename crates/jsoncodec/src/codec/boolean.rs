use crate::{
    codec::Codec,
    context::{DecodeContext, EncodeContext},
    error::{DecodeError, EncodeError},
};

/// `true` and `false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolCodec;

#[must_use]
pub fn boolean() -> BoolCodec {
    BoolCodec
}

impl Codec for BoolCodec {
    type Object = bool;

    fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<bool, DecodeError> {
        match ctx.peek() {
            b't' => ctx.skip_true().map(|()| true),
            b'f' => ctx.skip_false().map(|()| false),
            _ => Err(ctx.unexpected()),
        }
    }

    fn encode(&self, ctx: &mut EncodeContext, value: &bool) -> Result<(), EncodeError> {
        let literal: &[u8] = if *value { b"true" } else { b"false" };
        ctx.append_slice(literal);
        Ok(())
    }
}
