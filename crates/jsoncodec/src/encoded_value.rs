use alloc::{
    boxed::Box,
    string::{String, ToString},
};
use core::{fmt, str::FromStr};

use crate::{
    codec::Codec,
    context::{DecodeContext, EncodeContext},
    error::{DecodeError, DecodeErrorKind, EncodeError},
    skip,
};

/// One complete, already-encoded JSON value.
///
/// Construction checks that the text is exactly one well-formed value;
/// surrounding whitespace is accepted and dropped. After that the fragment is
/// written verbatim wherever it is encoded, without being parsed again.
///
/// # Examples
///
/// ```rust
/// use jsoncodec::EncodedValue;
///
/// let value = EncodedValue::new(" [1, {\"a\": null}] ").unwrap();
/// assert_eq!(value.as_str(), "[1, {\"a\": null}]");
/// assert!(EncodedValue::new("[1] [2]").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EncodedValue(Box<str>);

impl EncodedValue {
    /// Validates `json` and keeps the value it contains.
    ///
    /// # Errors
    ///
    /// When `json` is not exactly one JSON value.
    pub fn new(json: &str) -> Result<Self, DecodeError> {
        let mut ctx = DecodeContext::new(json.as_bytes());
        let (begin, end) = skip::capture_value(&mut ctx)?;
        ctx.skip_whitespace();
        if !ctx.is_at_end() {
            return Err(ctx.error(DecodeErrorKind::UnexpectedTrailingInput));
        }
        Ok(Self(json[begin..end].into()))
    }

    /// Encodes `value` with `codec` into a fragment.
    ///
    /// # Errors
    ///
    /// When `codec` cannot encode `value`.
    pub fn encode<C: Codec + ?Sized>(codec: &C, value: &C::Object) -> Result<Self, EncodeError> {
        let mut ctx = EncodeContext::new();
        codec.encode(&mut ctx, value)?;
        let text = String::from_utf8(ctx.into_vec()).map_err(|_| EncodeError::InvalidUtf8)?;
        Ok(Self(text.into_boxed_str()))
    }

    /// Wraps text already known to hold exactly one value.
    pub(crate) fn from_validated(json: &str) -> Self {
        Self(json.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0.into_string()
    }
}

/// `null`.
impl Default for EncodedValue {
    fn default() -> Self {
        Self::from_validated("null")
    }
}

impl fmt::Display for EncodedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EncodedValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<[u8]> for EncodedValue {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl FromStr for EncodedValue {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for EncodedValue {
    type Error = DecodeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for EncodedValue {
    type Error = DecodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<EncodedValue> for String {
    fn from(value: EncodedValue) -> Self {
        value.0.to_string()
    }
}
