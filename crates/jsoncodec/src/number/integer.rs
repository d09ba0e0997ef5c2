//! Exact integer decoding.
//!
//! The common case, a plain digit run that fits, is accumulated directly.
//! Anything else (a fraction, an exponent, or a value that overflowed on the
//! way) is handed to a slower routine that works on the digit spans and
//! decides exactly whether the decimal value, truncated toward zero, fits the
//! target type. No floating point is involved at any step.

use crate::{
    context::DecodeContext,
    error::{DecodeError, DecodeErrorKind},
};

/// Checked arithmetic needed by the decoder and the formatter.
pub(crate) trait Integer: Copy + PartialEq {
    const ZERO: Self;

    /// `self * 10 + digit` for non-negative accumulation, `self * 10 - digit`
    /// when accumulating a negative number, or `None` on overflow.
    fn push_digit(self, digit: u8, negative: bool) -> Option<Self>;

    fn times_ten(self) -> Option<Self>;

    /// Sign and magnitude, for formatting.
    fn split(self) -> (bool, u64);
}

macro_rules! impl_integer {
    (@common $t:ty) => {
        const ZERO: Self = 0;

        #[inline]
        #[allow(clippy::cast_possible_wrap, clippy::cast_lossless)]
        fn push_digit(self, digit: u8, negative: bool) -> Option<Self> {
            let shifted = self.checked_mul(10)?;
            if negative {
                shifted.checked_sub(digit as $t)
            } else {
                shifted.checked_add(digit as $t)
            }
        }

        #[inline]
        fn times_ten(self) -> Option<Self> {
            self.checked_mul(10)
        }
    };
    (signed: $($t:ty),*) => {$(
        impl Integer for $t {
            impl_integer!(@common $t);

            #[inline]
            #[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
            fn split(self) -> (bool, u64) {
                (self < 0, self.unsigned_abs() as u64)
            }
        }
    )*};
    (unsigned: $($t:ty),*) => {$(
        impl Integer for $t {
            impl_integer!(@common $t);

            #[inline]
            #[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
            fn split(self) -> (bool, u64) {
                (false, self as u64)
            }
        }
    )*};
}

impl_integer!(signed: i8, i16, i32, i64, isize);
impl_integer!(unsigned: u8, u16, u32, u64, usize);

/// Decodes one integer at the cursor.
pub(crate) fn decode_integer<T: Integer>(ctx: &mut DecodeContext<'_>) -> Result<T, DecodeError> {
    let start = ctx.offset();
    let negative = ctx.peek() == b'-';
    if negative {
        ctx.advance(1);
    }

    let mut value = T::ZERO;
    match ctx.peek() {
        b'0' => ctx.advance(1),
        b'1'..=b'9' => {
            while ctx.peek().is_ascii_digit() {
                match value.push_digit(ctx.peek() - b'0', negative) {
                    Some(next) => value = next,
                    None => return decode_exact(ctx, start),
                }
                ctx.advance(1);
            }
        }
        _ => return Err(ctx.number_error()),
    }

    match ctx.peek() {
        b'.' | b'e' | b'E' => decode_exact(ctx, start),
        _ => Ok(value),
    }
}

/// Digit spans of one number token.
struct Parts<'a> {
    negative: bool,
    integer: &'a [u8],
    fraction: &'a [u8],
    exponent_negative: bool,
    exponent: &'a [u8],
}

impl<'a> Parts<'a> {
    /// Splits a token already validated by `skip_number`.
    fn split(mut text: &'a [u8]) -> Self {
        let negative = text.first() == Some(&b'-');
        if negative {
            text = &text[1..];
        }
        let (integer, mut text) = split_digits(text);
        let mut fraction: &[u8] = &[];
        if text.first() == Some(&b'.') {
            (fraction, text) = split_digits(&text[1..]);
        }
        let mut exponent_negative = false;
        let mut exponent: &[u8] = &[];
        if let Some((_, rest)) = text.split_first() {
            let rest = match rest.split_first() {
                Some((b'-', rest)) => {
                    exponent_negative = true;
                    rest
                }
                Some((b'+', rest)) => rest,
                _ => rest,
            };
            exponent = split_digits(rest).0;
        }
        Self {
            negative,
            integer,
            fraction,
            exponent_negative,
            exponent,
        }
    }

    fn is_zero(&self) -> bool {
        self.integer
            .iter()
            .chain(self.fraction)
            .all(|&d| d == b'0')
    }
}

fn split_digits(text: &[u8]) -> (&[u8], &[u8]) {
    let len = text.iter().take_while(|b| b.is_ascii_digit()).count();
    text.split_at(len)
}

#[cold]
#[inline(never)]
fn decode_exact<T: Integer>(ctx: &mut DecodeContext<'_>, start: usize) -> Result<T, DecodeError> {
    ctx.rewind_to(start);
    ctx.skip_number()?;
    let parts = Parts::split(ctx.slice(start, ctx.offset()));
    let overflow = || ctx.error_at(DecodeErrorKind::IntegerOverflow, start);

    let mut exponent: usize = 0;
    for &d in parts.exponent {
        let Some(next) = exponent
            .checked_mul(10)
            .and_then(|e| e.checked_add(usize::from(d - b'0')))
        else {
            // Past any representable shift: everything truncates away or
            // nothing fits.
            return if parts.exponent_negative || parts.is_zero() {
                Ok(T::ZERO)
            } else {
                Err(overflow())
            };
        };
        exponent = next;
    }

    let accumulate = |value: T, digits: &[u8]| {
        digits.iter().try_fold(value, |value, &d| {
            value.push_digit(d - b'0', parts.negative)
        })
    };

    let value = if parts.exponent_negative {
        let kept = parts.integer.len().saturating_sub(exponent);
        accumulate(T::ZERO, &parts.integer[..kept])
    } else {
        let taken = exponent.min(parts.fraction.len());
        let mut value = accumulate(T::ZERO, parts.integer)
            .and_then(|value| accumulate(value, &parts.fraction[..taken]));
        let mut remaining = exponent - taken;
        while remaining > 0 {
            match value {
                Some(v) if v != T::ZERO => value = v.times_ten(),
                _ => break,
            }
            remaining -= 1;
        }
        value
    };

    value.ok_or_else(overflow)
}
