use alloc::{
    borrow::Cow,
    string::{String, ToString},
};

use thiserror::Error;

/// What went wrong while decoding. The `Display` form is the human-readable
/// message carried by [`DecodeError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeErrorKind {
    #[error("Unexpected input")]
    UnexpectedInput,
    #[error("Unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("Unexpected trailing input")]
    UnexpectedTrailingInput,
    #[error("Invalid escape character")]
    InvalidEscape,
    #[error("\\u must be followed by 4 hex digits")]
    InvalidUnicodeEscape,
    #[error("Invalid UTF-8")]
    InvalidUtf8,
    #[error("Invalid number")]
    InvalidNumber,
    #[error("Integer overflow")]
    IntegerOverflow,
    #[error("Missing required field '{0}'")]
    MissingRequiredField(String),
    #[error("Unexpected value")]
    UnexpectedValue,
    #[error("Value is omitted")]
    Omitted,
    #[error("{0}")]
    Custom(Cow<'static, str>),
}

/// A decode failure: a message and the byte offset into the input where it
/// was detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at offset {offset}")]
pub struct DecodeError {
    kind: DecodeErrorKind,
    offset: usize,
}

impl DecodeError {
    #[must_use]
    pub fn new(kind: DecodeErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    /// A failure with a caller-supplied message, for use by custom codecs and
    /// `transform` decode functions.
    #[must_use]
    pub fn custom(message: impl Into<Cow<'static, str>>, offset: usize) -> Self {
        Self::new(DecodeErrorKind::Custom(message.into()), offset)
    }

    #[must_use]
    pub fn kind(&self) -> &DecodeErrorKind {
        &self.kind
    }

    /// Byte offset from the start of the input.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The message without the offset suffix.
    #[must_use]
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

/// Encode failures. These are never retried by any combinator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("JSON cannot represent NaN or infinite numbers")]
    NonFiniteNumber,
    #[error("cannot encode a null pointer")]
    NullPointer,
    #[error("cannot encode an omitted value")]
    Omitted,
    #[error("cannot encode an ignored value")]
    Ignored,
    #[error("value has no JSON mapping")]
    UnmappedValue,
    #[error("value cannot be cast to the encoded type")]
    BadCast,
    #[error("encoded output is not valid UTF-8")]
    InvalidUtf8,
    #[error("{0}")]
    Custom(Cow<'static, str>),
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn display_includes_offset() {
        let err = DecodeError::new(DecodeErrorKind::UnexpectedInput, 7);
        assert_eq!(err.to_string(), "Unexpected input at offset 7");
        assert_eq!(err.message(), "Unexpected input");
        assert_eq!(err.offset(), 7);
    }

    #[test]
    fn custom_message() {
        let err = DecodeError::custom("bad duration", 3);
        assert_eq!(err.kind(), &DecodeErrorKind::Custom("bad duration".into()));
        assert_eq!(err.to_string(), "bad duration at offset 3");
    }

    #[test]
    fn missing_field_names_the_field() {
        let err = DecodeError::new(DecodeErrorKind::MissingRequiredField("id".into()), 2);
        assert_eq!(err.to_string(), "Missing required field 'id' at offset 2");
    }
}
