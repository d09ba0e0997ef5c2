mod escape;
mod unescape;

use alloc::{borrow::Cow, string::String};

pub(crate) use escape::encode_bytes;
pub(crate) use unescape::decode_bytes;

use crate::{
    context::DecodeContext,
    error::{DecodeError, DecodeErrorKind},
};

/// Decodes a string token that must be valid UTF-8.
///
/// Unpaired surrogate escapes are rejected here since `str` cannot hold them.
pub(crate) fn decode_str<'a>(ctx: &mut DecodeContext<'a>) -> Result<Cow<'a, str>, DecodeError> {
    let start = ctx.offset();
    match decode_bytes(ctx)? {
        Cow::Borrowed(bytes) => core::str::from_utf8(bytes)
            .map(Cow::Borrowed)
            .map_err(|e| ctx.error_at(DecodeErrorKind::InvalidUtf8, start + 1 + e.valid_up_to())),
        Cow::Owned(bytes) => String::from_utf8(bytes)
            .map(Cow::Owned)
            .map_err(|_| ctx.error_at(DecodeErrorKind::InvalidUtf8, start)),
    }
}
