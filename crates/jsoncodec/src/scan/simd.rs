//! SSE2 versions of the scanning primitives.
//!
//! The safe wrappers may only be called after
//! [`CpuFeatures::has_sse2`](crate::cpu::CpuFeatures::has_sse2) returned `true`.

use core::arch::x86_64::{
    __m128i, _mm_cmpeq_epi8, _mm_loadu_si128, _mm_max_epu8, _mm_movemask_epi8, _mm_or_si128,
    _mm_set1_epi8,
};

use super::{find_escape_scalar, skip_simple_scalar, skip_whitespace_scalar};

const LANES: usize = 16;

pub(super) fn skip_whitespace(input: &[u8], pos: usize) -> usize {
    // SAFETY: only reached when the context detected SSE2.
    unsafe { skip_whitespace_sse2(input, pos) }
}

pub(super) fn skip_simple(input: &[u8], pos: usize) -> usize {
    // SAFETY: only reached when the context detected SSE2.
    unsafe { skip_simple_sse2(input, pos) }
}

pub(super) fn find_escape(input: &[u8], pos: usize) -> usize {
    // SAFETY: only reached when the context detected SSE2.
    unsafe { find_escape_sse2(input, pos) }
}

/// Loads 16 bytes starting at `pos`.
///
/// # Safety
///
/// `pos + 16 <= input.len()` and the CPU supports SSE2.
#[inline]
#[target_feature(enable = "sse2")]
unsafe fn load(input: &[u8], pos: usize) -> __m128i {
    debug_assert!(pos + LANES <= input.len());
    // SAFETY: the caller guarantees the 16 bytes are inside `input`.
    unsafe { _mm_loadu_si128(input.as_ptr().add(pos).cast::<__m128i>()) }
}

#[target_feature(enable = "sse2")]
unsafe fn skip_whitespace_sse2(input: &[u8], mut pos: usize) -> usize {
    // SAFETY: SSE2 is available and every load is bounds-checked by the loop
    // condition.
    unsafe {
        let space = _mm_set1_epi8(b' ' as i8);
        let tab = _mm_set1_epi8(b'\t' as i8);
        let newline = _mm_set1_epi8(b'\n' as i8);
        let cr = _mm_set1_epi8(b'\r' as i8);

        while pos + LANES <= input.len() {
            let chunk = load(input, pos);
            let is_ws = _mm_or_si128(
                _mm_or_si128(_mm_cmpeq_epi8(chunk, space), _mm_cmpeq_epi8(chunk, tab)),
                _mm_or_si128(_mm_cmpeq_epi8(chunk, newline), _mm_cmpeq_epi8(chunk, cr)),
            );
            let mask = _mm_movemask_epi8(is_ws) as u32;
            if mask != 0xFFFF {
                return pos + (!mask).trailing_zeros() as usize;
            }
            pos += LANES;
        }
    }
    skip_whitespace_scalar(input, pos)
}

#[target_feature(enable = "sse2")]
unsafe fn skip_simple_sse2(input: &[u8], mut pos: usize) -> usize {
    // SAFETY: as above.
    unsafe {
        let quote = _mm_set1_epi8(b'"' as i8);
        let backslash = _mm_set1_epi8(b'\\' as i8);

        while pos + LANES <= input.len() {
            let chunk = load(input, pos);
            let special = _mm_or_si128(
                _mm_cmpeq_epi8(chunk, quote),
                _mm_cmpeq_epi8(chunk, backslash),
            );
            let mask = _mm_movemask_epi8(special) as u32;
            if mask != 0 {
                return pos + mask.trailing_zeros() as usize;
            }
            pos += LANES;
        }
    }
    skip_simple_scalar(input, pos)
}

#[target_feature(enable = "sse2")]
unsafe fn find_escape_sse2(input: &[u8], mut pos: usize) -> usize {
    // SAFETY: as above.
    unsafe {
        let quote = _mm_set1_epi8(b'"' as i8);
        let backslash = _mm_set1_epi8(b'\\' as i8);
        let control_max = _mm_set1_epi8(0x1F);

        while pos + LANES <= input.len() {
            let chunk = load(input, pos);
            // Unsigned `chunk <= 0x1F`: the byte-wise maximum is unchanged.
            let control = _mm_cmpeq_epi8(_mm_max_epu8(chunk, control_max), control_max);
            let special = _mm_or_si128(
                control,
                _mm_or_si128(
                    _mm_cmpeq_epi8(chunk, quote),
                    _mm_cmpeq_epi8(chunk, backslash),
                ),
            );
            let mask = _mm_movemask_epi8(special) as u32;
            if mask != 0 {
                return pos + mask.trailing_zeros() as usize;
            }
            pos += LANES;
        }
    }
    find_escape_scalar(input, pos)
}
