//! String token decoding.
//!
//! The result is the raw UTF-8 content with escapes resolved. Strings without
//! escapes are returned as a borrowed slice of the input.

use alloc::{borrow::Cow, vec::Vec};

use crate::{
    context::DecodeContext,
    error::{DecodeError, DecodeErrorKind},
};

const HIGH_SURROGATES: core::ops::Range<u32> = 0xD800..0xDC00;
const LOW_SURROGATES: core::ops::Range<u32> = 0xDC00..0xE000;

/// Decodes the string token at the cursor.
///
/// A `\uXXXX` high surrogate followed by a `\uXXXX` low surrogate becomes one
/// four-byte sequence. Any other surrogate is kept as its own three-byte
/// encoding, so the output is not always valid UTF-8 but never loses input.
pub(crate) fn decode_bytes<'a>(ctx: &mut DecodeContext<'a>) -> Result<Cow<'a, [u8]>, DecodeError> {
    ctx.expect_byte(b'"')?;
    let start = ctx.offset();
    ctx.skip_simple();
    match ctx.peek() {
        b'"' => {
            let content = ctx.slice(start, ctx.offset());
            ctx.advance(1);
            Ok(Cow::Borrowed(content))
        }
        b'\\' => {
            let prefix = ctx.slice(start, ctx.offset());
            let mut out = Vec::with_capacity(prefix.len() + 16);
            out.extend_from_slice(prefix);
            decode_escaped(ctx, out).map(Cow::Owned)
        }
        _ => Err(ctx.error(DecodeErrorKind::UnexpectedEndOfInput)),
    }
}

/// Continues at a `\` or the closing quote, alternating between escapes and
/// runs of plain content.
fn decode_escaped(ctx: &mut DecodeContext<'_>, mut out: Vec<u8>) -> Result<Vec<u8>, DecodeError> {
    loop {
        match ctx.peek() {
            b'"' => {
                ctx.advance(1);
                return Ok(out);
            }
            b'\\' => {
                ctx.advance(1);
                unescape_one(ctx, &mut out)?;
            }
            _ => return Err(ctx.error(DecodeErrorKind::UnexpectedEndOfInput)),
        }
        let run = ctx.offset();
        ctx.skip_simple();
        out.extend_from_slice(ctx.slice(run, ctx.offset()));
    }
}

/// Resolves the escape whose backslash was just consumed.
fn unescape_one(ctx: &mut DecodeContext<'_>, out: &mut Vec<u8>) -> Result<(), DecodeError> {
    let byte = match ctx.next_byte()? {
        b'"' => b'"',
        b'\\' => b'\\',
        b'/' => b'/',
        b'b' => 0x08,
        b'f' => 0x0C,
        b'n' => b'\n',
        b'r' => b'\r',
        b't' => b'\t',
        b'u' => {
            unescape_unicode(ctx, out)?;
            return Ok(());
        }
        _ => return Err(ctx.error_behind(DecodeErrorKind::InvalidEscape, 1)),
    };
    out.push(byte);
    Ok(())
}

fn unescape_unicode(ctx: &mut DecodeContext<'_>, out: &mut Vec<u8>) -> Result<(), DecodeError> {
    let unit = read_hex4(ctx)?;
    let mut code = unit;
    if HIGH_SURROGATES.contains(&unit) && ctx.peek() == b'\\' && ctx.peek_at(1) == b'u' {
        let after_high = ctx.offset();
        ctx.advance(2);
        match read_hex4(ctx) {
            Ok(low) if LOW_SURROGATES.contains(&low) => {
                code = (((unit & 0x3FF) << 10) | (low & 0x3FF)) + 0x10000;
            }
            // Unpaired: the next escape is decoded on its own.
            _ => ctx.rewind_to(after_high),
        }
    }
    push_code_point(out, code);
    Ok(())
}

fn read_hex4(ctx: &mut DecodeContext<'_>) -> Result<u32, DecodeError> {
    let mut acc = 0u32;
    for _ in 0..4 {
        let digit = match ctx.peek() {
            b @ b'0'..=b'9' => b - b'0',
            b @ b'a'..=b'f' => b - b'a' + 10,
            b @ b'A'..=b'F' => b - b'A' + 10,
            _ if ctx.is_at_end() => {
                return Err(ctx.error(DecodeErrorKind::UnexpectedEndOfInput));
            }
            _ => return Err(ctx.error(DecodeErrorKind::InvalidUnicodeEscape)),
        };
        acc = (acc << 4) | u32::from(digit);
        ctx.advance(1);
    }
    Ok(acc)
}

/// UTF-8 encoding of any code point below 0x110000, surrogates included.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn push_code_point(out: &mut Vec<u8>, code: u32) {
    match code {
        0..=0x7F => out.push(code as u8),
        0x80..=0x7FF => out.extend_from_slice(&[
            0xC0 | (code >> 6) as u8,
            0x80 | (code & 0x3F) as u8,
        ]),
        0x800..=0xFFFF => out.extend_from_slice(&[
            0xE0 | (code >> 12) as u8,
            0x80 | ((code >> 6) & 0x3F) as u8,
            0x80 | (code & 0x3F) as u8,
        ]),
        _ => out.extend_from_slice(&[
            0xF0 | (code >> 18) as u8,
            0x80 | ((code >> 12) & 0x3F) as u8,
            0x80 | ((code >> 6) & 0x3F) as u8,
            0x80 | (code & 0x3F) as u8,
        ]),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn decode(input: &str) -> Result<Vec<u8>, (DecodeErrorKind, usize)> {
        let mut ctx = DecodeContext::new(input.as_bytes());
        let out = decode_bytes(&mut ctx).map_err(|e| (e.kind().clone(), e.offset()))?;
        Ok(out.into_owned())
    }

    #[test]
    fn plain_strings_borrow_the_input() {
        let input = br#""hello" tail"#;
        let mut ctx = DecodeContext::new(input);
        let out = decode_bytes(&mut ctx).unwrap();
        assert!(matches!(out, Cow::Borrowed(b"hello")));
        assert_eq!(ctx.offset(), 7);
    }

    #[test]
    fn escaped_strings_are_owned() {
        let mut ctx = DecodeContext::new(br#""a\nb""#);
        let out = decode_bytes(&mut ctx).unwrap();
        assert!(matches!(out, Cow::Owned(_)));
        assert_eq!(&*out, b"a\nb");
    }

    #[rstest]
    #[case(r#""""#, b"")]
    #[case(r#""\"\\\/\b\f\n\r\t""#, b"\"\\/\x08\x0c\n\r\t")]
    #[case(r#""Aé€""#, "Aé€".as_bytes())]
    #[case(r#""😀""#, "😀".as_bytes())]
    #[case(r#""x𝄞y""#, "x𝄞y".as_bytes())]
    #[case(r#""\u0000""#, b"\0")]
    #[case("\"raw\ttab\"", b"raw\ttab")]
    fn resolves_escapes(#[case] input: &str, #[case] expected: &[u8]) {
        assert_eq!(decode(input).unwrap(), expected);
    }

    #[rstest]
    #[case(r#""\ud800""#, &[0xED, 0xA0, 0x80])]
    #[case(r#""\udc00""#, &[0xED, 0xB0, 0x80])]
    #[case(r#""\ud800x""#, &[0xED, 0xA0, 0x80, b'x'])]
    #[case(r#""\ud800\n""#, &[0xED, 0xA0, 0x80, b'\n'])]
    #[case(r#""\ud800A""#, &[0xED, 0xA0, 0x80, b'A'])]
    #[case(r#""\ud800\ud800""#, &[0xED, 0xA0, 0x80, 0xED, 0xA0, 0x80])]
    fn keeps_unpaired_surrogates(#[case] input: &str, #[case] expected: &[u8]) {
        assert_eq!(decode(input).unwrap(), expected);
    }

    #[rstest]
    #[case(r#""abc"#, DecodeErrorKind::UnexpectedEndOfInput, 4)]
    #[case(r#""ab\"#, DecodeErrorKind::UnexpectedEndOfInput, 4)]
    #[case(r#""a\q""#, DecodeErrorKind::InvalidEscape, 3)]
    #[case(r#""\u12""#, DecodeErrorKind::InvalidUnicodeEscape, 5)]
    #[case(r#""\u12"#, DecodeErrorKind::UnexpectedEndOfInput, 5)]
    #[case(r#""\ud800\u12""#, DecodeErrorKind::InvalidUnicodeEscape, 11)]
    #[case("abc", DecodeErrorKind::UnexpectedInput, 0)]
    fn rejects_malformed(#[case] input: &str, #[case] kind: DecodeErrorKind, #[case] offset: usize) {
        assert_eq!(decode(input), Err((kind, offset)));
    }

    #[test]
    fn code_point_encoding_matches_char() {
        for code in [0x41, 0xE9, 0x7FF, 0x800, 0x20AC, 0xFFFF, 0x10000, 0x1F600, 0x10FFFF] {
            let mut out = Vec::new();
            push_code_point(&mut out, code);
            let ch = char::from_u32(code).unwrap();
            let mut buf = [0u8; 4];
            assert_eq!(out, ch.encode_utf8(&mut buf).as_bytes());
        }
    }
}
