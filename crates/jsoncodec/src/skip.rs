//! Non-recursive structural walker.
//!
//! Skipping a value never recurses: nesting is tracked on an explicit stack
//! that lives inline for the first 64 levels and spills to the heap beyond
//! that, while a small flag-based state machine decides which token may come
//! next.

use smallvec::SmallVec;

use crate::{
    context::DecodeContext,
    error::{DecodeError, DecodeErrorKind},
};

const WANT: u8 = 1;
const NEED: u8 = 1 << 1;
const SEPARATOR: u8 = 1 << 2;
const KEY: u8 = 1 << 3;
const VALUE: u8 = 1 << 4;

const DONE: u8 = 0;
const WANT_SEPARATOR: u8 = WANT | SEPARATOR;
const WANT_KEY: u8 = WANT | KEY;
const NEED_KEY: u8 = NEED | KEY;
const WANT_VALUE: u8 = WANT | VALUE;
const NEED_VALUE: u8 = NEED | VALUE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    TopLevel,
    Object,
    Array,
}

impl Container {
    fn state_after_value(self) -> u8 {
        match self {
            Container::TopLevel => DONE,
            Container::Object | Container::Array => WANT_SEPARATOR,
        }
    }
}

/// Consumes exactly one JSON value, including leading whitespace.
pub(crate) fn skip_value(ctx: &mut DecodeContext<'_>) -> Result<(), DecodeError> {
    let mut stack: SmallVec<[Container; 64]> = SmallVec::new();
    let mut container = Container::TopLevel;
    let mut state = NEED_VALUE;

    while state != DONE {
        ctx.skip_whitespace();
        match ctx.peek() {
            b',' if state == WANT_SEPARATOR => {
                ctx.advance(1);
                state = if container == Container::Object {
                    NEED_KEY
                } else {
                    NEED_VALUE
                };
            }
            b'"' if state & KEY != 0 => {
                skip_string(ctx)?;
                ctx.skip_whitespace();
                ctx.expect_byte(b':')?;
                state = NEED_VALUE;
            }
            b'}' if container == Container::Object && state & WANT != 0 => {
                ctx.advance(1);
                container = stack.pop().unwrap_or(Container::TopLevel);
                state = container.state_after_value();
            }
            b']' if container == Container::Array && state & WANT != 0 => {
                ctx.advance(1);
                container = stack.pop().unwrap_or(Container::TopLevel);
                state = container.state_after_value();
            }
            b'{' if state & VALUE != 0 => {
                ctx.advance(1);
                stack.push(container);
                container = Container::Object;
                state = WANT_KEY;
            }
            b'[' if state & VALUE != 0 => {
                ctx.advance(1);
                stack.push(container);
                container = Container::Array;
                state = WANT_VALUE;
            }
            _ if state & VALUE != 0 => {
                skip_simple_value(ctx)?;
                state = container.state_after_value();
            }
            _ => return Err(ctx.unexpected()),
        }
    }

    debug_assert!(stack.is_empty() && container == Container::TopLevel);
    Ok(())
}

/// Like [`skip_value`], but returns the `[begin, end)` span of the value
/// itself, without the leading whitespace.
pub(crate) fn capture_value(ctx: &mut DecodeContext<'_>) -> Result<(usize, usize), DecodeError> {
    ctx.skip_whitespace();
    let begin = ctx.offset();
    skip_value(ctx)?;
    Ok((begin, ctx.offset()))
}

/// A string, number or literal at the cursor.
fn skip_simple_value(ctx: &mut DecodeContext<'_>) -> Result<(), DecodeError> {
    match ctx.peek() {
        b'"' => skip_string(ctx),
        b't' => ctx.skip_true(),
        b'f' => ctx.skip_false(),
        b'n' => ctx.skip_null(),
        b'-' | b'0'..=b'9' => ctx.skip_number(),
        _ => Err(ctx.unexpected()),
    }
}

/// Consumes a string token, checking escape syntax but not decoding it.
pub(crate) fn skip_string(ctx: &mut DecodeContext<'_>) -> Result<(), DecodeError> {
    ctx.expect_byte(b'"')?;
    loop {
        ctx.skip_simple();
        match ctx.peek() {
            b'"' => {
                ctx.advance(1);
                return Ok(());
            }
            b'\\' => {
                ctx.advance(1);
                match ctx.next_byte()? {
                    b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't' => {}
                    b'u' => skip_hex4(ctx)?,
                    _ => return Err(ctx.error_behind(DecodeErrorKind::InvalidEscape, 1)),
                }
            }
            _ => return Err(ctx.error(DecodeErrorKind::UnexpectedEndOfInput)),
        }
    }
}

fn skip_hex4(ctx: &mut DecodeContext<'_>) -> Result<(), DecodeError> {
    for _ in 0..4 {
        if !ctx.peek().is_ascii_hexdigit() {
            return Err(if ctx.is_at_end() {
                ctx.error(DecodeErrorKind::UnexpectedEndOfInput)
            } else {
                ctx.error(DecodeErrorKind::InvalidUnicodeEscape)
            });
        }
        ctx.advance(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use rstest::rstest;

    use super::*;

    fn skip(input: &str) -> Result<usize, (DecodeErrorKind, usize)> {
        let mut ctx = DecodeContext::new(input.as_bytes());
        skip_value(&mut ctx)
            .map(|()| ctx.offset())
            .map_err(|e| (e.kind().clone(), e.offset()))
    }

    #[rstest]
    #[case("null", 4)]
    #[case("  true ", 6)]
    #[case("false", 5)]
    #[case("-12.5e3,", 7)]
    #[case(r#""a\"b\\cé\/""#, 13)]
    #[case("[]", 2)]
    #[case("{}", 2)]
    #[case("[ 1 , [ ] , { } ]  ", 17)]
    #[case(r#"{"a" : [1, {"b": null}], "c": "d"} x"#, 34)]
    #[case("[[[[[[]]]]]]]", 12)]
    fn skips_well_formed_values(#[case] input: &str, #[case] end: usize) {
        assert_eq!(skip(input), Ok(end));
    }

    #[rstest]
    #[case("", DecodeErrorKind::UnexpectedEndOfInput, 0)]
    #[case("   ", DecodeErrorKind::UnexpectedEndOfInput, 3)]
    #[case("[1,]", DecodeErrorKind::UnexpectedInput, 3)]
    #[case("[,1]", DecodeErrorKind::UnexpectedInput, 1)]
    #[case("[1 2]", DecodeErrorKind::UnexpectedInput, 3)]
    #[case("{,}", DecodeErrorKind::UnexpectedInput, 1)]
    #[case(r#"{"a":1,}"#, DecodeErrorKind::UnexpectedInput, 7)]
    #[case(r#"{"a" 1}"#, DecodeErrorKind::UnexpectedInput, 5)]
    #[case(r#"{"a":}"#, DecodeErrorKind::UnexpectedInput, 5)]
    #[case("{1:2}", DecodeErrorKind::UnexpectedInput, 1)]
    #[case("[1}", DecodeErrorKind::UnexpectedInput, 2)]
    #[case("{]", DecodeErrorKind::UnexpectedInput, 1)]
    #[case("[[1]", DecodeErrorKind::UnexpectedEndOfInput, 4)]
    #[case(r#""abc"#, DecodeErrorKind::UnexpectedEndOfInput, 4)]
    #[case(r#""\x""#, DecodeErrorKind::InvalidEscape, 2)]
    #[case(r#""\u12G4""#, DecodeErrorKind::InvalidUnicodeEscape, 5)]
    #[case("nul", DecodeErrorKind::UnexpectedEndOfInput, 3)]
    #[case("tru e", DecodeErrorKind::UnexpectedInput, 3)]
    #[case("+1", DecodeErrorKind::UnexpectedInput, 0)]
    fn rejects_malformed_values(
        #[case] input: &str,
        #[case] kind: DecodeErrorKind,
        #[case] offset: usize,
    ) {
        assert_eq!(skip(input), Err((kind, offset)));
    }

    #[test]
    fn capture_excludes_leading_whitespace() {
        let mut ctx = DecodeContext::new(b"  {\"k\": [1]}  ");
        assert_eq!(capture_value(&mut ctx), Ok((2, 12)));
    }

    #[test]
    fn million_nested_arrays() {
        const DEPTH: usize = 1_000_000;
        let mut input = String::with_capacity(DEPTH * 2);
        input.extend(core::iter::repeat_n('[', DEPTH));
        input.extend(core::iter::repeat_n(']', DEPTH));
        assert_eq!(skip(&input), Ok(DEPTH * 2));
    }

    #[test]
    fn million_nested_objects() {
        const DEPTH: usize = 1_000_000;
        let mut input = String::with_capacity(DEPTH * 6 + 1);
        for _ in 0..DEPTH {
            input.push_str(r#"{"k":"#);
        }
        input.push('0');
        input.extend(core::iter::repeat_n('}', DEPTH));
        assert_eq!(skip(&input), Ok(input.len()));
    }

    #[test]
    fn unterminated_deep_nesting_fails_cleanly() {
        let input: String = core::iter::repeat_n('[', 100_000).collect();
        assert_eq!(
            skip(&input),
            Err((DecodeErrorKind::UnexpectedEndOfInput, 100_000))
        );
    }
}
