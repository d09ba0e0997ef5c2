use crate::{
    codec::{Codec, DefaultCodec},
    context::{DecodeContext, EncodeContext},
    error::{DecodeError, DecodeErrorKind, EncodeError},
};

/// Accepts exactly one value.
///
/// Decoding anything else fails with [`DecodeErrorKind::UnexpectedValue`]
/// at the start of the value. Encoding always writes the expected value,
/// whatever it is given, which makes this handy for discriminator fields such
/// as `"version": 2`.
#[derive(Debug, Clone)]
pub struct EqCodec<C: Codec> {
    inner: C,
    expected: C::Object,
}

/// `value`, compared through its default codec.
#[must_use]
pub fn eq<T>(value: T) -> EqCodec<T::Codec>
where
    T: DefaultCodec + PartialEq,
{
    eq_with(T::default_codec(), value)
}

#[must_use]
pub fn eq_with<C>(inner: C, expected: C::Object) -> EqCodec<C>
where
    C: Codec,
    C::Object: PartialEq,
{
    EqCodec { inner, expected }
}

impl<C> Codec for EqCodec<C>
where
    C: Codec,
    C::Object: PartialEq,
{
    type Object = C::Object;

    fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<C::Object, DecodeError> {
        let start = ctx.offset();
        let value = self.inner.decode(ctx)?;
        if value == self.expected {
            Ok(value)
        } else {
            Err(ctx.error_at(DecodeErrorKind::UnexpectedValue, start))
        }
    }

    fn encode(&self, ctx: &mut EncodeContext, _: &C::Object) -> Result<(), EncodeError> {
        self.inner.encode(ctx, &self.expected)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::*;
    use crate::{
        codec::{object, string},
        decode, encode_string, member,
    };

    #[test]
    fn only_the_expected_value() {
        let codec = eq(2u8);
        assert_eq!(decode(&codec, "2"), Ok(2));
        let err = decode(&codec, "[3]").unwrap_err();
        assert_eq!(err.kind(), &DecodeErrorKind::InvalidNumber);
        let err = decode(&codec, " 3").unwrap_err();
        assert_eq!((err.kind(), err.offset()), (&DecodeErrorKind::UnexpectedValue, 1));
        assert_eq!(encode_string(&codec, &9).unwrap(), "2");
    }

    #[derive(Debug, Default, PartialEq)]
    struct Tagged {
        kind: String,
        body: String,
    }

    #[test]
    fn discriminator_field() {
        let codec = object::<Tagged>()
            .required_with("kind", member!(Tagged, kind), eq_with(string(), "note".into()))
            .required("body", member!(Tagged, body));
        let value = decode(&codec, r#"{"body":"b","kind":"note"}"#).unwrap();
        assert_eq!(value.kind, "note");
        assert!(decode(&codec, r#"{"body":"b","kind":"todo"}"#).is_err());
        assert_eq!(
            encode_string(&codec, &Tagged::default()).unwrap(),
            r#"{"kind":"note","body":""}"#
        );
    }
}
