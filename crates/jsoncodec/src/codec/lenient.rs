use crate::{
    codec::Codec,
    context::{DecodeContext, EncodeContext},
    error::{DecodeError, EncodeError},
};

/// Falls back to `Default::default()` when the inner codec rejects a value.
///
/// The rejected value is skipped, so it still has to be well-formed JSON;
/// only schema mismatches are tolerated, not syntax errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct LenientCodec<C>(C);

#[must_use]
pub fn lenient<C>(inner: C) -> LenientCodec<C>
where
    C: Codec,
    C::Object: Default,
{
    LenientCodec(inner)
}

impl<C> Codec for LenientCodec<C>
where
    C: Codec,
    C::Object: Default,
{
    type Object = C::Object;

    fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<C::Object, DecodeError> {
        let start = ctx.offset();
        match self.0.decode(ctx) {
            Ok(value) => Ok(value),
            Err(err) => {
                log::trace!("lenient decode fell back to default: {err}");
                ctx.rewind_to(start);
                ctx.skip_value()?;
                Ok(C::Object::default())
            }
        }
    }

    fn encode(&self, ctx: &mut EncodeContext, value: &C::Object) -> Result<(), EncodeError> {
        self.0.encode(ctx, value)
    }

    fn should_encode(&self, value: &C::Object) -> bool {
        self.0.should_encode(value)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::{
        DecodeErrorKind,
        codec::{array, number},
        decode,
    };

    #[test]
    fn mismatches_become_default() {
        let codec = array(lenient(number::<u8>()));
        assert_eq!(
            decode(&codec, r#"[1, "two", 300, {"x": [3]}, 5]"#),
            Ok(vec![1, 0, 0, 0, 5])
        );
    }

    #[test]
    fn syntax_errors_still_fail() {
        let err = decode(&lenient(number::<u8>()), r#"{"x": }"#).unwrap_err();
        assert_eq!((err.kind(), err.offset()), (&DecodeErrorKind::UnexpectedInput, 6));
    }
}
