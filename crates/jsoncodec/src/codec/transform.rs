use crate::{
    codec::Codec,
    context::{DecodeContext, EncodeContext},
    error::{DecodeError, EncodeError},
};

/// Converts between `T` and the object type of an inner codec.
///
/// `to_inner` runs before encoding. `from_inner` runs after decoding and
/// receives the offset at which the inner value started, so it can report
/// its own failures at the right place.
///
/// # Examples
///
/// ```rust
/// use jsoncodec::{DecodeError, codec::{string, transform}, decode, encode_string};
///
/// let upper = transform(
///     string(),
///     |s: &String| s.to_lowercase(),
///     |s: String, offset| {
///         if s.is_empty() {
///             Err(DecodeError::custom("empty name", offset))
///         } else {
///             Ok(s.to_uppercase())
///         }
///     },
/// );
/// assert_eq!(decode(&upper, "\"ab\"").unwrap(), "AB");
/// assert_eq!(encode_string(&upper, &"AB".into()).unwrap(), "\"ab\"");
/// assert_eq!(decode(&upper, " \"\"").unwrap_err().to_string(), "empty name at offset 1");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TransformCodec<C, E, D> {
    inner: C,
    to_inner: E,
    from_inner: D,
}

#[must_use]
pub fn transform<C, E, D, T>(inner: C, to_inner: E, from_inner: D) -> TransformCodec<C, E, D>
where
    C: Codec,
    E: Fn(&T) -> C::Object,
    D: Fn(C::Object, usize) -> Result<T, DecodeError>,
{
    TransformCodec {
        inner,
        to_inner,
        from_inner,
    }
}

impl<C, E, D, T> Codec for TransformCodec<C, E, D>
where
    C: Codec,
    E: Fn(&T) -> C::Object,
    D: Fn(C::Object, usize) -> Result<T, DecodeError>,
{
    type Object = T;

    fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<T, DecodeError> {
        let start = ctx.offset();
        let value = self.inner.decode(ctx)?;
        (self.from_inner)(value, start)
    }

    fn encode(&self, ctx: &mut EncodeContext, value: &T) -> Result<(), EncodeError> {
        self.inner.encode(ctx, &(self.to_inner)(value))
    }
}
