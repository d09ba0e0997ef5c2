use crate::{
    codec::{Codec, NullCodec, null},
    context::{DecodeContext, EncodeContext},
    error::{DecodeError, EncodeError},
};

/// Writes a designated value through a sentinel codec, and everything else
/// through the inner codec.
///
/// Decoding tries the sentinel first and yields the designated value when it
/// matches; otherwise the cursor is rewound and the inner codec decides.
/// When both fail the inner codec's error is returned.
#[derive(Debug, Clone)]
pub struct DefaultAsCodec<T, S, C> {
    default: T,
    sentinel: S,
    inner: C,
}

/// Maps `default` to whatever `sentinel` accepts.
#[must_use]
pub fn default_as<T, S, C>(default: T, sentinel: S, inner: C) -> DefaultAsCodec<T, S, C>
where
    T: PartialEq + Clone,
    S: Codec<Object = T>,
    C: Codec<Object = T>,
{
    DefaultAsCodec {
        default,
        sentinel,
        inner,
    }
}

/// Maps `T::default()` to whatever `sentinel` accepts.
#[must_use]
pub fn empty_as<T, S, C>(sentinel: S, inner: C) -> DefaultAsCodec<T, S, C>
where
    T: Default + PartialEq + Clone,
    S: Codec<Object = T>,
    C: Codec<Object = T>,
{
    default_as(T::default(), sentinel, inner)
}

/// Maps `T::default()` to `null`, e.g. an empty string or list.
///
/// # Examples
///
/// ```rust
/// use jsoncodec::{codec::{empty_as_null, string}, decode, encode_string};
///
/// let codec = empty_as_null(string());
/// assert_eq!(encode_string(&codec, &String::new()).unwrap(), "null");
/// assert_eq!(encode_string(&codec, &"a".into()).unwrap(), "\"a\"");
/// assert_eq!(decode(&codec, "null").unwrap(), "");
/// ```
#[must_use]
pub fn empty_as_null<C>(inner: C) -> DefaultAsCodec<C::Object, NullCodec<C::Object>, C>
where
    C: Codec,
    C::Object: Default + PartialEq + Clone,
{
    empty_as(null(), inner)
}

impl<T, S, C> Codec for DefaultAsCodec<T, S, C>
where
    T: PartialEq + Clone,
    S: Codec<Object = T>,
    C: Codec<Object = T>,
{
    type Object = T;

    fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<T, DecodeError> {
        let start = ctx.offset();
        if self.sentinel.decode(ctx).is_ok() {
            return Ok(self.default.clone());
        }
        ctx.rewind_to(start);
        self.inner.decode(ctx)
    }

    fn encode(&self, ctx: &mut EncodeContext, value: &T) -> Result<(), EncodeError> {
        if *value == self.default {
            self.sentinel.encode(ctx, value)
        } else {
            self.inner.encode(ctx, value)
        }
    }

    fn should_encode(&self, value: &T) -> bool {
        if *value == self.default {
            self.sentinel.should_encode(value)
        } else {
            self.inner.should_encode(value)
        }
    }
}
