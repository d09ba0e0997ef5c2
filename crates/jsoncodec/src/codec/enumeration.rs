use alloc::{string::String, vec::Vec};

use crate::{
    codec::{Codec, StringCodec, string},
    context::{DecodeContext, EncodeContext},
    error::{DecodeError, DecodeErrorKind, EncodeError},
};

/// Maps a fixed set of values to fixed JSON values.
///
/// Lookups are linear in both directions; the table is expected to be small.
/// Decoding a JSON value absent from the table fails with
/// [`DecodeErrorKind::UnexpectedValue`] at the start of that value, and
/// encoding a value absent from the table fails with
/// [`EncodeError::UnmappedValue`].
///
/// # Examples
///
/// ```rust
/// use jsoncodec::{codec::string_enumeration, decode, encode_string};
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Level { Low, High }
///
/// let codec = string_enumeration([(Level::Low, "low"), (Level::High, "high")]);
/// assert_eq!(decode(&codec, "\"high\"").unwrap(), Level::High);
/// assert_eq!(encode_string(&codec, &Level::Low).unwrap(), "\"low\"");
/// assert!(decode(&codec, "\"medium\"").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct EnumerationCodec<C: Codec, T> {
    inner: C,
    table: Vec<(T, C::Object)>,
}

#[must_use]
pub fn enumeration<C, T>(
    inner: C,
    table: impl IntoIterator<Item = (T, C::Object)>,
) -> EnumerationCodec<C, T>
where
    C: Codec,
    C::Object: PartialEq,
    T: PartialEq + Clone,
{
    EnumerationCodec {
        inner,
        table: table.into_iter().collect(),
    }
}

/// An enumeration whose JSON values are strings.
#[must_use]
pub fn string_enumeration<'n, T>(
    table: impl IntoIterator<Item = (T, &'n str)>,
) -> EnumerationCodec<StringCodec, T>
where
    T: PartialEq + Clone,
{
    enumeration(
        string(),
        table
            .into_iter()
            .map(|(value, name)| (value, String::from(name))),
    )
}

impl<C, T> Codec for EnumerationCodec<C, T>
where
    C: Codec,
    C::Object: PartialEq,
    T: PartialEq + Clone,
{
    type Object = T;

    fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<T, DecodeError> {
        let start = ctx.offset();
        let json = self.inner.decode(ctx)?;
        self.table
            .iter()
            .find(|(_, candidate)| *candidate == json)
            .map(|(value, _)| value.clone())
            .ok_or_else(|| ctx.error_at(DecodeErrorKind::UnexpectedValue, start))
    }

    fn encode(&self, ctx: &mut EncodeContext, value: &T) -> Result<(), EncodeError> {
        let (_, json) = self
            .table
            .iter()
            .find(|(candidate, _)| candidate == value)
            .ok_or(EncodeError::UnmappedValue)?;
        self.inner.encode(ctx, json)
    }
}
