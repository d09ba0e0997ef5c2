//! Integer formatting.
//!
//! The digit count is found first by comparing against powers of ten, so the
//! exact output length is reserved up front and digits are written
//! back-to-front, two at a time.

use super::integer::Integer;
use crate::context::EncodeContext;

const DIGIT_PAIRS: [u8; 200] = {
    let mut table = [0u8; 200];
    let mut i = 0;
    while i < 100 {
        table[i * 2] = b'0' + (i / 10) as u8;
        table[i * 2 + 1] = b'0' + (i % 10) as u8;
        i += 1;
    }
    table
};

/// Number of decimal digits in `v`.
#[allow(clippy::inline_always)]
#[inline(always)]
pub(crate) fn digit_count(v: u64) -> usize {
    if v < 10_000_000_000 {
        if v < 100_000 {
            if v < 100 {
                if v < 10 { 1 } else { 2 }
            } else if v < 1_000 {
                3
            } else if v < 10_000 {
                4
            } else {
                5
            }
        } else if v < 10_000_000 {
            if v < 1_000_000 { 6 } else { 7 }
        } else if v < 100_000_000 {
            8
        } else if v < 1_000_000_000 {
            9
        } else {
            10
        }
    } else if v < 1_000_000_000_000_000 {
        if v < 1_000_000_000_000 {
            if v < 100_000_000_000 { 11 } else { 12 }
        } else if v < 10_000_000_000_000 {
            13
        } else if v < 100_000_000_000_000 {
            14
        } else {
            15
        }
    } else if v < 100_000_000_000_000_000 {
        if v < 10_000_000_000_000_000 { 16 } else { 17 }
    } else if v < 1_000_000_000_000_000_000 {
        18
    } else if v < 10_000_000_000_000_000_000 {
        19
    } else {
        20
    }
}

/// Fills `out` with the digits of `v`; `out.len()` must be `digit_count(v)`.
#[allow(clippy::cast_possible_truncation)]
fn write_digits(out: &mut [u8], mut v: u64) {
    let mut end = out.len();
    while v >= 100 {
        let pair = (v % 100) as usize * 2;
        v /= 100;
        end -= 2;
        out[end..end + 2].copy_from_slice(&DIGIT_PAIRS[pair..pair + 2]);
    }
    if v >= 10 {
        let pair = v as usize * 2;
        out[..2].copy_from_slice(&DIGIT_PAIRS[pair..pair + 2]);
    } else {
        out[0] = b'0' + v as u8;
    }
}

pub(crate) fn encode_integer<T: Integer>(ctx: &mut EncodeContext, value: T) {
    let (negative, magnitude) = value.split();
    let sign = usize::from(negative);
    let len = sign + digit_count(magnitude);
    let out = ctx.reserve(len);
    if negative {
        out[0] = b'-';
    }
    write_digits(&mut out[sign..len], magnitude);
    ctx.advance(len);
}
