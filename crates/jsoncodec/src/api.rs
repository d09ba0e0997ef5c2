//! Whole-document entry points.

use alloc::{string::String, vec::Vec};

use crate::{
    codec::{Codec, DefaultCodec},
    context::{DecodeContext, EncodeContext},
    error::{DecodeError, DecodeErrorKind, EncodeError},
    options::{DecodeOptions, EncodeOptions},
};

/// Decodes `json` as exactly one value.
///
/// Whitespace around the value is allowed; anything else after it fails with
/// [`DecodeErrorKind::UnexpectedTrailingInput`] at the first offending byte.
///
/// # Errors
///
/// When `json` is malformed or `codec` rejects the value.
pub fn decode<C>(codec: &C, json: impl AsRef<[u8]>) -> Result<C::Object, DecodeError>
where
    C: Codec + ?Sized,
{
    decode_with(codec, json, DecodeOptions::default())
}

/// [`decode`] with explicit options.
///
/// # Errors
///
/// When `json` is malformed or `codec` rejects the value.
pub fn decode_with<C>(
    codec: &C,
    json: impl AsRef<[u8]>,
    options: DecodeOptions,
) -> Result<C::Object, DecodeError>
where
    C: Codec + ?Sized,
{
    let mut ctx = DecodeContext::with_options(json.as_ref(), options);
    ctx.skip_whitespace();
    let value = codec.decode(&mut ctx)?;
    ctx.skip_whitespace();
    if !ctx.is_at_end() {
        return Err(ctx.error(DecodeErrorKind::UnexpectedTrailingInput));
    }
    Ok(value)
}

/// Decodes `json` with the default codec of `T`.
///
/// ```rust
/// let pairs: Vec<(String, Option<u8>)> =
///     jsoncodec::decode_default(r#"[["a", 1], ["b", null]]"#).unwrap();
/// assert_eq!(pairs[1], ("b".to_string(), None));
/// ```
///
/// # Errors
///
/// When `json` is malformed or does not describe a `T`.
pub fn decode_default<T: DefaultCodec>(json: impl AsRef<[u8]>) -> Result<T, DecodeError> {
    decode(&T::default_codec(), json)
}

/// Like [`decode`], but stores the value into `out` and reports failure as
/// `false`, leaving `out` untouched.
pub fn try_decode<C>(out: &mut C::Object, codec: &C, json: impl AsRef<[u8]>) -> bool
where
    C: Codec + ?Sized,
{
    match decode(codec, json) {
        Ok(value) => {
            *out = value;
            true
        }
        Err(err) => {
            log::trace!("try_decode failed: {err}");
            false
        }
    }
}

pub fn try_decode_default<T: DefaultCodec>(out: &mut T, json: impl AsRef<[u8]>) -> bool {
    try_decode(out, &T::default_codec(), json)
}

/// Checks that `json` is exactly one well-formed value without decoding it.
///
/// # Errors
///
/// The first syntax error found.
pub fn validate(json: impl AsRef<[u8]>) -> Result<(), DecodeError> {
    let mut ctx = DecodeContext::new(json.as_ref());
    ctx.skip_value()?;
    ctx.skip_whitespace();
    if !ctx.is_at_end() {
        return Err(ctx.error(DecodeErrorKind::UnexpectedTrailingInput));
    }
    Ok(())
}

/// Encodes `value` as a complete JSON text without surrounding whitespace.
///
/// # Errors
///
/// When `codec` cannot represent `value`.
pub fn encode<C>(codec: &C, value: &C::Object) -> Result<Vec<u8>, EncodeError>
where
    C: Codec + ?Sized,
{
    encode_with(codec, value, EncodeOptions::default())
}

/// [`encode`] with explicit options.
///
/// # Errors
///
/// When `codec` cannot represent `value`.
pub fn encode_with<C>(
    codec: &C,
    value: &C::Object,
    options: EncodeOptions,
) -> Result<Vec<u8>, EncodeError>
where
    C: Codec + ?Sized,
{
    let mut ctx = EncodeContext::with_options(options);
    codec.encode(&mut ctx, value)?;
    Ok(ctx.into_vec())
}

/// Encodes `value` with the default codec of `T`.
///
/// # Errors
///
/// When `value` cannot be represented, such as a NaN float.
pub fn encode_default<T: DefaultCodec>(value: &T) -> Result<Vec<u8>, EncodeError> {
    encode(&T::default_codec(), value)
}

/// [`encode`] into a `String`.
///
/// # Errors
///
/// When `codec` cannot represent `value`, or
/// [`EncodeError::InvalidUtf8`] when the output is not valid UTF-8, which
/// can only happen with byte strings holding unpaired surrogates or other
/// invalid sequences.
pub fn encode_string<C>(codec: &C, value: &C::Object) -> Result<String, EncodeError>
where
    C: Codec + ?Sized,
{
    String::from_utf8(encode(codec, value)?).map_err(|_| EncodeError::InvalidUtf8)
}
