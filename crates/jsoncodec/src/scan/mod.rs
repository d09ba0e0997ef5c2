//! Byte scanning primitives shared by the decoder, the structural skipper and
//! the string escaper.
//!
//! Every function takes the whole input plus a start position and returns the
//! position where the run ends, so callers never hand out sub-slices that
//! would lose the offset needed for error reporting.
//!
//! Each scan has a portable implementation and, on `x86_64`, an SSE2 one. The
//! vector routines process 16 bytes at a time with unaligned loads and finish
//! the tail with the portable routine, so both stop at exactly the same
//! position for every input, including unaligned starts and embedded NULs.

#[cfg(target_arch = "x86_64")]
mod simd;

use crate::cpu::CpuFeatures;

/// JSON insignificant whitespace: space, tab, line feed, carriage return.
#[inline]
pub(crate) fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Bytes that end a run of plain string content.
#[inline]
pub(crate) fn is_string_special(b: u8) -> bool {
    b == b'"' || b == b'\\'
}

/// Bytes that must be escaped when written inside a JSON string.
#[inline]
pub(crate) fn needs_escape(b: u8) -> bool {
    b < 0x20 || b == b'"' || b == b'\\'
}

#[inline]
pub(crate) fn skip_whitespace(input: &[u8], pos: usize, cpu: CpuFeatures) -> usize {
    #[cfg(target_arch = "x86_64")]
    if cpu.has_sse2() {
        return simd::skip_whitespace(input, pos);
    }
    let _ = cpu;
    skip_whitespace_scalar(input, pos)
}

#[inline]
pub(crate) fn skip_whitespace_scalar(input: &[u8], pos: usize) -> usize {
    scan_while(input, pos, is_whitespace)
}

/// Skips string content up to the next `"` or `\`, or the end of input.
#[inline]
pub(crate) fn skip_simple(input: &[u8], pos: usize, cpu: CpuFeatures) -> usize {
    #[cfg(target_arch = "x86_64")]
    if cpu.has_sse2() {
        return simd::skip_simple(input, pos);
    }
    let _ = cpu;
    skip_simple_scalar(input, pos)
}

#[inline]
pub(crate) fn skip_simple_scalar(input: &[u8], pos: usize) -> usize {
    scan_while(input, pos, |b| !is_string_special(b))
}

/// Position of the first byte at or after `pos` that needs escaping.
#[inline]
pub(crate) fn find_escape(input: &[u8], pos: usize, cpu: CpuFeatures) -> usize {
    #[cfg(target_arch = "x86_64")]
    if cpu.has_sse2() {
        return simd::find_escape(input, pos);
    }
    let _ = cpu;
    find_escape_scalar(input, pos)
}

#[inline]
pub(crate) fn find_escape_scalar(input: &[u8], pos: usize) -> usize {
    scan_while(input, pos, |b| !needs_escape(b))
}

#[inline(always)]
fn scan_while(input: &[u8], mut pos: usize, keep: impl Fn(u8) -> bool) -> usize {
    while let Some(&b) = input.get(pos) {
        if !keep(b) {
            break;
        }
        pos += 1;
    }
    pos
}
