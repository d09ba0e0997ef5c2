use core::marker::PhantomData;

use crate::{
    codec::Codec,
    context::{DecodeContext, EncodeContext},
    error::{DecodeError, DecodeErrorKind, EncodeError},
};

/// Skips whatever value is present and produces a fixed value instead.
///
/// Never written: `should_encode` is always false, so objects and arrays
/// leave it out, and encoding it directly fails with
/// [`EncodeError::Ignored`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreCodec<T>(T);

/// Skips the value and decodes `T::default()`.
#[must_use]
pub fn ignore<T: Default + Clone>() -> IgnoreCodec<T> {
    IgnoreCodec(T::default())
}

/// Skips the value and decodes a clone of `value`.
#[must_use]
pub fn ignore_as<T: Clone>(value: T) -> IgnoreCodec<T> {
    IgnoreCodec(value)
}

impl<T: Clone> Codec for IgnoreCodec<T> {
    type Object = T;

    fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<T, DecodeError> {
        ctx.skip_value()?;
        Ok(self.0.clone())
    }

    fn encode(&self, _: &mut EncodeContext, _: &T) -> Result<(), EncodeError> {
        Err(EncodeError::Ignored)
    }

    fn should_encode(&self, _: &T) -> bool {
        false
    }
}

/// Rejects any value and is never written.
///
/// Registered as an optional field, this forbids a key from appearing in the
/// input while keeping it out of the output.
pub struct OmitCodec<T>(PhantomData<fn() -> T>);

impl<T> Clone for OmitCodec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for OmitCodec<T> {}

impl<T> core::fmt::Debug for OmitCodec<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("OmitCodec")
    }
}

#[must_use]
pub fn omit<T>() -> OmitCodec<T> {
    OmitCodec(PhantomData)
}

impl<T> Codec for OmitCodec<T> {
    type Object = T;

    fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<T, DecodeError> {
        Err(ctx.error(DecodeErrorKind::Omitted))
    }

    fn encode(&self, _: &mut EncodeContext, _: &T) -> Result<(), EncodeError> {
        Err(EncodeError::Omitted)
    }

    fn should_encode(&self, _: &T) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::*;
    use crate::{codec::object, decode, encode, encode_string, member};

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Record {
        id: u32,
        cache: String,
        secret: String,
    }

    fn record() -> impl Codec<Object = Record> {
        object::<Record>()
            .required("id", member!(Record, id))
            .optional_with("cache", member!(Record, cache), ignore_as(String::from("cold")))
            .optional_with("secret", member!(Record, secret), omit())
    }

    #[test]
    fn ignored_fields_are_skipped_both_ways() {
        let value = decode(&record(), r#"{"id":1,"cache":{"big":[1,2,3]}}"#).unwrap();
        assert_eq!(value.cache, "cold");
        let value = Record {
            id: 1,
            cache: "warm".into(),
            secret: "s".into(),
        };
        assert_eq!(encode_string(&record(), &value).unwrap(), r#"{"id":1}"#);
    }

    #[test]
    fn omitted_fields_are_rejected() {
        let err = decode(&record(), r#"{"id":1,"secret":"x"}"#).unwrap_err();
        assert_eq!((err.kind(), err.offset()), (&DecodeErrorKind::Omitted, 17));
    }

    #[test]
    fn direct_encoding_fails() {
        assert_eq!(encode(&ignore::<u8>(), &1), Err(EncodeError::Ignored));
        assert_eq!(encode(&omit::<u8>(), &1), Err(EncodeError::Omitted));
        assert_eq!(decode(&ignore::<u8>(), "[true]"), Ok(0));
    }
}
