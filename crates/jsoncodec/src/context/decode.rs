use crate::{
    cpu::CpuFeatures,
    error::{DecodeError, DecodeErrorKind},
    options::DecodeOptions,
    scan, skip,
};

/// The cursor threaded through every [`Codec::decode`](crate::Codec::decode)
/// call.
///
/// A context borrows the whole input and tracks a single position into it.
/// Offsets reported by errors and accepted by [`rewind_to`](Self::rewind_to)
/// are always measured from the first byte of the input, so a codec can
/// remember `ctx.offset()`, try something, and restore the cursor if that
/// failed.
///
/// After a codec returns an error the position is unspecified; the only
/// meaningful follow-up is `rewind_to` or dropping the context.
#[derive(Debug, Clone)]
pub struct DecodeContext<'a> {
    input: &'a [u8],
    position: usize,
    cpu: CpuFeatures,
}

impl<'a> DecodeContext<'a> {
    #[must_use]
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_options(input, DecodeOptions::default())
    }

    #[must_use]
    pub fn with_options(input: &'a [u8], options: DecodeOptions) -> Self {
        Self {
            input,
            position: 0,
            cpu: CpuFeatures::for_mode(options.simd),
        }
    }

    /// The complete input, independent of the cursor.
    #[must_use]
    pub fn input(&self) -> &'a [u8] {
        self.input
    }

    /// Current position, in bytes from the start of the input.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.input.len() - self.position
    }

    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    #[must_use]
    pub fn cpu_features(&self) -> CpuFeatures {
        self.cpu
    }

    /// The byte under the cursor, or `0` at the end of the input.
    ///
    /// A NUL byte can never start or continue a valid token, so callers may
    /// branch on the result without checking for the end first.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> u8 {
        self.peek_at(0)
    }

    /// The byte `delta` positions past the cursor, or `0` past the end.
    #[inline]
    #[must_use]
    pub fn peek_at(&self, delta: usize) -> u8 {
        self.input
            .get(self.position.saturating_add(delta))
            .copied()
            .unwrap_or(0)
    }

    /// Consumes one byte.
    ///
    /// # Errors
    ///
    /// [`DecodeErrorKind::UnexpectedEndOfInput`] when the input is exhausted.
    #[inline]
    pub fn next_byte(&mut self) -> Result<u8, DecodeError> {
        match self.input.get(self.position) {
            Some(&b) => {
                self.position += 1;
                Ok(b)
            }
            None => Err(self.error(DecodeErrorKind::UnexpectedEndOfInput)),
        }
    }

    /// Moves the cursor forward without inspecting the bytes. Never moves past
    /// the end of the input.
    #[inline]
    pub fn advance(&mut self, n: usize) {
        debug_assert!(n <= self.remaining(), "advanced past the end of the input");
        self.position = self.position.saturating_add(n).min(self.input.len());
    }

    /// Fails unless at least `n` more bytes are available.
    ///
    /// # Errors
    ///
    /// [`DecodeErrorKind::UnexpectedEndOfInput`].
    #[inline]
    pub fn require(&self, n: usize) -> Result<(), DecodeError> {
        if self.remaining() < n {
            return Err(self.error_at(DecodeErrorKind::UnexpectedEndOfInput, self.input.len()));
        }
        Ok(())
    }

    /// Consumes `expected` or fails at the current offset.
    ///
    /// # Errors
    ///
    /// [`DecodeErrorKind::UnexpectedEndOfInput`] at the end of the input,
    /// [`DecodeErrorKind::UnexpectedInput`] on any other byte.
    #[inline]
    pub fn expect_byte(&mut self, expected: u8) -> Result<(), DecodeError> {
        match self.input.get(self.position) {
            Some(&b) if b == expected => {
                self.position += 1;
                Ok(())
            }
            Some(_) => Err(self.error(DecodeErrorKind::UnexpectedInput)),
            None => Err(self.error(DecodeErrorKind::UnexpectedEndOfInput)),
        }
    }

    #[inline]
    pub fn skip_whitespace(&mut self) {
        self.position = scan::skip_whitespace(self.input, self.position, self.cpu);
    }

    /// Skips plain string content, stopping at `"`, `\` or the end of input.
    #[inline]
    pub fn skip_simple(&mut self) {
        self.position = scan::skip_simple(self.input, self.position, self.cpu);
    }

    /// Consumes exactly the four bytes of `word`.
    ///
    /// The fast path is a single word comparison. On mismatch the bytes are
    /// re-checked one by one so the error points at the first wrong byte.
    ///
    /// # Errors
    ///
    /// [`DecodeErrorKind::UnexpectedInput`] or
    /// [`DecodeErrorKind::UnexpectedEndOfInput`].
    #[inline]
    pub fn skip_literal(&mut self, word: [u8; 4]) -> Result<(), DecodeError> {
        let end = self.position + 4;
        if let Some(&[a, b, c, d]) = self.input.get(self.position..end) {
            if u32::from_ne_bytes([a, b, c, d]) == u32::from_ne_bytes(word) {
                self.position = end;
                return Ok(());
            }
        }
        self.skip_literal_slow(word)
    }

    #[cold]
    fn skip_literal_slow(&mut self, word: [u8; 4]) -> Result<(), DecodeError> {
        for expected in word {
            self.expect_byte(expected)?;
        }
        Ok(())
    }

    /// # Errors
    ///
    /// When the next bytes are not `true`.
    pub fn skip_true(&mut self) -> Result<(), DecodeError> {
        self.skip_literal(*b"true")
    }

    /// # Errors
    ///
    /// When the next bytes are not `false`.
    pub fn skip_false(&mut self) -> Result<(), DecodeError> {
        self.skip_literal(*b"fals")?;
        self.expect_byte(b'e')
    }

    /// # Errors
    ///
    /// When the next bytes are not `null`.
    pub fn skip_null(&mut self) -> Result<(), DecodeError> {
        self.skip_literal(*b"null")
    }

    /// Consumes one number token following the JSON grammar: optional `-`,
    /// `0` or a non-zero digit run, optional fraction, optional exponent.
    ///
    /// # Errors
    ///
    /// [`DecodeErrorKind::InvalidNumber`] when a required digit is missing.
    pub fn skip_number(&mut self) -> Result<(), DecodeError> {
        if self.peek() == b'-' {
            self.position += 1;
        }
        match self.peek() {
            b'0' => self.position += 1,
            b'1'..=b'9' => {
                self.skip_digits();
            }
            _ => return Err(self.number_error()),
        }
        if self.peek() == b'.' {
            self.position += 1;
            if self.skip_digits() == 0 {
                return Err(self.number_error());
            }
        }
        if matches!(self.peek(), b'e' | b'E') {
            self.position += 1;
            if matches!(self.peek(), b'+' | b'-') {
                self.position += 1;
            }
            if self.skip_digits() == 0 {
                return Err(self.number_error());
            }
        }
        Ok(())
    }

    /// Consumes a run of ASCII digits and returns its length.
    #[inline]
    pub(crate) fn skip_digits(&mut self) -> usize {
        let start = self.position;
        while self.peek().is_ascii_digit() {
            self.position += 1;
        }
        self.position - start
    }

    pub(crate) fn number_error(&self) -> DecodeError {
        if self.is_at_end() {
            self.error(DecodeErrorKind::UnexpectedEndOfInput)
        } else {
            self.error(DecodeErrorKind::InvalidNumber)
        }
    }

    /// [`DecodeErrorKind::UnexpectedEndOfInput`] at the end of the input,
    /// [`DecodeErrorKind::UnexpectedInput`] otherwise.
    #[must_use]
    pub fn unexpected(&self) -> DecodeError {
        if self.is_at_end() {
            self.error(DecodeErrorKind::UnexpectedEndOfInput)
        } else {
            self.error(DecodeErrorKind::UnexpectedInput)
        }
    }

    /// Consumes one complete JSON value of any nesting depth.
    ///
    /// Uses an explicit stack, so adversarially deep input cannot overflow the
    /// native stack.
    ///
    /// # Errors
    ///
    /// When the input at the cursor is not a well-formed value.
    pub fn skip_value(&mut self) -> Result<(), DecodeError> {
        skip::skip_value(self)
    }

    /// Restores a position previously obtained from [`offset`](Self::offset).
    #[inline]
    pub fn rewind_to(&mut self, offset: usize) {
        debug_assert!(offset <= self.input.len());
        self.position = offset.min(self.input.len());
    }

    /// The input bytes in `[begin, end)`, clamped to the input.
    #[must_use]
    pub fn slice(&self, begin: usize, end: usize) -> &'a [u8] {
        let end = end.min(self.input.len());
        self.input.get(begin.min(end)..end).unwrap_or_default()
    }

    /// An error at the current offset.
    #[must_use]
    pub fn error(&self, kind: DecodeErrorKind) -> DecodeError {
        DecodeError::new(kind, self.position)
    }

    #[must_use]
    pub fn error_at(&self, kind: DecodeErrorKind, offset: usize) -> DecodeError {
        DecodeError::new(kind, offset)
    }

    /// An error blaming a byte `delta` positions behind the cursor.
    #[must_use]
    pub fn error_behind(&self, kind: DecodeErrorKind, delta: usize) -> DecodeError {
        DecodeError::new(kind, self.position.saturating_sub(delta))
    }
}
