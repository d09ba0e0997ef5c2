//! String token encoding.
//!
//! Input is escaped in windows of [`CHUNK`] bytes. Each window reserves its
//! worst case (every byte becoming a six-byte `\u00XX`), so the output
//! reservation stays bounded no matter how long the string is.

use crate::{context::EncodeContext, cpu::CpuFeatures, scan};

const CHUNK: usize = 1024;
const MAX_ESCAPE_LEN: usize = 6;
const HEX: &[u8; 16] = b"0123456789abcdef";

/// Writes `bytes` as a quoted JSON string.
///
/// `"` and `\` get a backslash, control bytes get their short form or
/// `\u00XX`. Everything else, `/` and non-ASCII bytes included, is copied
/// unchanged.
pub(crate) fn encode_bytes(ctx: &mut EncodeContext, bytes: &[u8]) {
    let cpu = ctx.cpu_features();
    ctx.append(b'"');
    for chunk in bytes.chunks(CHUNK) {
        let out = ctx.reserve(chunk.len() * MAX_ESCAPE_LEN);
        let written = escape_chunk(chunk, out, cpu);
        ctx.advance(written);
    }
    ctx.append(b'"');
}

fn escape_chunk(chunk: &[u8], out: &mut [u8], cpu: CpuFeatures) -> usize {
    let mut written = 0;
    let mut pos = 0;
    loop {
        let run_end = scan::find_escape(chunk, pos, cpu);
        let run = &chunk[pos..run_end];
        out[written..written + run.len()].copy_from_slice(run);
        written += run.len();
        let Some(&byte) = chunk.get(run_end) else {
            return written;
        };
        written += write_escape(byte, &mut out[written..]);
        pos = run_end + 1;
    }
}

fn write_escape(byte: u8, out: &mut [u8]) -> usize {
    let short = match byte {
        b'"' => b'"',
        b'\\' => b'\\',
        0x08 => b'b',
        0x0C => b'f',
        b'\n' => b'n',
        b'\r' => b'r',
        b'\t' => b't',
        _ => {
            out[..MAX_ESCAPE_LEN].copy_from_slice(&[
                b'\\',
                b'u',
                b'0',
                b'0',
                HEX[usize::from(byte >> 4)],
                HEX[usize::from(byte & 0xF)],
            ]);
            return MAX_ESCAPE_LEN;
        }
    };
    out[..2].copy_from_slice(&[b'\\', short]);
    2
}
