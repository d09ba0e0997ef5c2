use crate::{
    codec::{Codec, NullCodec, OneOf, null, one_of},
    context::{DecodeContext, EncodeContext},
    error::{DecodeError, EncodeError},
};

/// Wraps `inner` so its values become `Option`s.
///
/// Decoding always produces `Some`; this codec does not accept `null` by
/// itself. Combine it with [`null`](crate::codec::null) via [`one_of`], or use
/// [`nullable`], to also accept `null`. `None` is skipped inside objects and
/// arrays, and encodes as `null` when written on its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionalCodec<C>(C);

#[must_use]
pub fn optional<C: Codec>(inner: C) -> OptionalCodec<C> {
    OptionalCodec(inner)
}

/// An optional value that may also be written as `null`.
#[must_use]
pub fn nullable<C: Codec>(inner: C) -> OneOf<(OptionalCodec<C>, NullCodec<Option<C::Object>>)> {
    one_of((optional(inner), null()))
}

impl<C: Codec> Codec for OptionalCodec<C> {
    type Object = Option<C::Object>;

    fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<Self::Object, DecodeError> {
        self.0.decode(ctx).map(Some)
    }

    fn encode(&self, ctx: &mut EncodeContext, value: &Self::Object) -> Result<(), EncodeError> {
        match value {
            Some(value) => self.0.encode(ctx, value),
            None => {
                ctx.append_slice(b"null");
                Ok(())
            }
        }
    }

    fn should_encode(&self, value: &Self::Object) -> bool {
        value.as_ref().is_some_and(|value| self.0.should_encode(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DecodeErrorKind, codec::number, decode, encode_string};

    #[test]
    fn optional_alone_rejects_null() {
        let codec = optional(number::<u8>());
        assert_eq!(decode(&codec, "4"), Ok(Some(4)));
        assert_eq!(
            decode(&codec, "null").unwrap_err().kind(),
            &DecodeErrorKind::InvalidNumber
        );
        assert!(!codec.should_encode(&None));
        assert!(codec.should_encode(&Some(0)));
        assert_eq!(encode_string(&codec, &None).unwrap(), "null");
    }

    #[test]
    fn nullable_accepts_both() {
        let codec = nullable(number::<u8>());
        assert_eq!(decode(&codec, "null"), Ok(None));
        assert_eq!(decode(&codec, " 9 "), Ok(Some(9)));
        assert_eq!(encode_string(&codec, &Some(9)).unwrap(), "9");
        assert_eq!(encode_string(&codec, &None).unwrap(), "null");
        let err = decode(&codec, "true").unwrap_err();
        assert_eq!((err.kind(), err.offset()), (&DecodeErrorKind::InvalidNumber, 0));
    }
}
