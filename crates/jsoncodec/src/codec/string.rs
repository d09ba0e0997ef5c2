use alloc::string::String;

use bstr::BString;

use crate::{
    codec::Codec,
    context::{DecodeContext, EncodeContext},
    error::{DecodeError, DecodeErrorKind, EncodeError},
    string::{decode_bytes, decode_str, encode_bytes},
};

/// JSON strings as `String`.
///
/// Decoding fails with [`DecodeErrorKind::InvalidUtf8`] on an unpaired
/// surrogate escape; use [`byte_string`] to keep those.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringCodec;

/// Strings whose escapes leave an unpaired surrogate are rejected with
/// [`DecodeErrorKind::InvalidUtf8`] at the opening quote, since `String`
/// cannot hold them.
#[must_use]
pub fn string() -> StringCodec {
    StringCodec
}

impl Codec for StringCodec {
    type Object = String;

    fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<String, DecodeError> {
        decode_str(ctx).map(alloc::borrow::Cow::into_owned)
    }

    fn encode(&self, ctx: &mut EncodeContext, value: &String) -> Result<(), EncodeError> {
        encode_bytes(ctx, value.as_bytes());
        Ok(())
    }
}

/// JSON strings as raw bytes.
///
/// Lossless for every string token: an unpaired surrogate escape is stored
/// as its three-byte encoding and written back unchanged, so the output is
/// only valid UTF-8 when the input was.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByteStringCodec;

#[must_use]
pub fn byte_string() -> ByteStringCodec {
    ByteStringCodec
}

impl Codec for ByteStringCodec {
    type Object = BString;

    fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<BString, DecodeError> {
        decode_bytes(ctx).map(|bytes| BString::from(bytes.into_owned()))
    }

    fn encode(&self, ctx: &mut EncodeContext, value: &BString) -> Result<(), EncodeError> {
        encode_bytes(ctx, value.as_slice());
        Ok(())
    }
}

/// A string holding exactly one `char`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharCodec;

#[must_use]
pub fn character() -> CharCodec {
    CharCodec
}

impl Codec for CharCodec {
    type Object = char;

    fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<char, DecodeError> {
        let start = ctx.offset();
        let text = decode_str(ctx)?;
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(ctx.error_at(DecodeErrorKind::UnexpectedValue, start)),
        }
    }

    fn encode(&self, ctx: &mut EncodeContext, value: &char) -> Result<(), EncodeError> {
        let mut buf = [0u8; 4];
        encode_bytes(ctx, value.encode_utf8(&mut buf).as_bytes());
        Ok(())
    }
}
