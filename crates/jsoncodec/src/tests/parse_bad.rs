use rstest::rstest;

use super::arbitrary::ValueCodec;
use crate::{
    DecodeErrorKind::{self, *},
    decode, validate,
};

#[rstest]
#[case::empty_document("", UnexpectedEndOfInput, 0)]
#[case::comment("/", UnexpectedInput, 0)]
#[case::bare_identifier("a", UnexpectedInput, 0)]
#[case::unquoted_property_name("{\\a:1}", UnexpectedInput, 1)]
#[case::invalid_property_name("{!:1}", UnexpectedInput, 1)]
#[case::sign_without_digits("-a", InvalidNumber, 1)]
#[case::exponent_without_digits("1ea", InvalidNumber, 2)]
#[case::exponent_sign_without_digits("1e-a", InvalidNumber, 3)]
#[case::exponent_followed_by_space("1e ", InvalidNumber, 2)]
#[case::fraction_at_end("1.", UnexpectedEndOfInput, 2)]
#[case::lone_minus("-", UnexpectedEndOfInput, 1)]
#[case::leading_dot(".5", UnexpectedInput, 0)]
#[case::leading_plus("+1", UnexpectedInput, 0)]
#[case::nan("NaN", UnexpectedInput, 0)]
#[case::leading_zero("01", UnexpectedTrailingInput, 1)]
#[case::bad_array_separator("[1!]", UnexpectedInput, 2)]
#[case::missing_array_separator("[true false]", UnexpectedInput, 6)]
#[case::mismatched_closer("[1}", UnexpectedInput, 2)]
#[case::extra_closer("[]]", UnexpectedTrailingInput, 2)]
#[case::bad_literal("tru!", UnexpectedInput, 3)]
#[case::truncated_literal("nul", UnexpectedEndOfInput, 3)]
#[case::unterminated_escape("\"\\", UnexpectedEndOfInput, 2)]
#[case::unterminated_string("\"abc", UnexpectedEndOfInput, 4)]
#[case::hex_escape("\"\\xg\"", InvalidEscape, 2)]
#[case::digit_escape("\"\\1\"", InvalidEscape, 2)]
#[case::short_unicode_escape("\"\\u000g\"", InvalidUnicodeEscape, 6)]
#[case::short_low_surrogate("\"\\ud800\\u12\"", InvalidUnicodeEscape, 11)]
#[case::multiple_values("1 2", UnexpectedTrailingInput, 2)]
#[case::control_character("\x01", UnexpectedInput, 0)]
#[case::unclosed_object("{", UnexpectedEndOfInput, 1)]
#[case::unclosed_object_after_name("{\"a\"", UnexpectedEndOfInput, 4)]
#[case::unclosed_object_before_value("{\"a\":", UnexpectedEndOfInput, 5)]
#[case::unclosed_object_after_value("{\"a\":1", UnexpectedEndOfInput, 6)]
#[case::missing_colon("{\"a\" 1}", UnexpectedInput, 5)]
#[case::missing_object_separator("{\"a\":1 \"b\":2}", UnexpectedInput, 7)]
#[case::trailing_object_comma("{\"a\":1,}", UnexpectedInput, 7)]
#[case::leading_object_comma("{,}", UnexpectedInput, 1)]
#[case::unclosed_array("[", UnexpectedEndOfInput, 1)]
#[case::unclosed_array_after_value("[1", UnexpectedEndOfInput, 2)]
#[case::trailing_array_comma("[1,]", UnexpectedInput, 3)]
#[case::leading_array_comma("[,1]", UnexpectedInput, 1)]
fn rejected_documents(#[case] input: &str, #[case] kind: DecodeErrorKind, #[case] offset: usize) {
    let err = validate(input).unwrap_err();
    assert_eq!((err.kind(), err.offset()), (&kind, offset), "input: {input:?}");
}

#[rstest]
#[case("{\"a\":[1,{\"b\":tru}]}", UnexpectedInput, 16)]
#[case("[\"\\uZZZZ\"]", InvalidUnicodeEscape, 4)]
#[case("{\"a\":1,\"b\":}", InvalidNumber, 11)]
#[case("[1, 2] x", UnexpectedTrailingInput, 7)]
fn rejected_by_the_tree_codec(
    #[case] input: &str,
    #[case] kind: DecodeErrorKind,
    #[case] offset: usize,
) {
    let err = decode(&ValueCodec, input).unwrap_err();
    assert_eq!((err.kind(), err.offset()), (&kind, offset), "input: {input:?}");
}
