use alloc::{collections::BTreeMap, string::String, vec};

use rstest::rstest;

use super::arbitrary::{Value, ValueCodec};
use crate::{DecodeOptions, SimdMode, decode, decode_with, encode_string, validate};

fn obj<const N: usize>(entries: [(&str, Value); N]) -> Value {
    Value::Object(
        entries
            .into_iter()
            .map(|(k, v)| (String::from(k), v))
            .collect::<BTreeMap<_, _>>(),
    )
}

fn s(text: &str) -> Value {
    Value::String(String::from(text))
}

#[rstest]
#[case::empty_object("{}", obj([]))]
#[case::single_property("{\"a\":1}", obj([("a", Value::Number(1.0))]))]
#[case::multiple_properties(
    "{\"abc\":1,\"def\":2}",
    obj([("abc", Value::Number(1.0)), ("def", Value::Number(2.0))])
)]
#[case::nested_objects(
    "{\"a\":{\"b\":2}}",
    obj([("a", obj([("b", Value::Number(2.0))]))])
)]
#[case::empty_array("[]", Value::Array(vec![]))]
#[case::arrays(
    "[1,[2,[]],{}]",
    Value::Array(vec![
        Value::Number(1.0),
        Value::Array(vec![Value::Number(2.0), Value::Array(vec![])]),
        obj([]),
    ])
)]
#[case::literals(
    "[null,true,false]",
    Value::Array(vec![Value::Null, Value::Boolean(true), Value::Boolean(false)])
)]
#[case::numbers(
    "[0,-0,1.5,-2.25,1e3,1E+3,25e-1,123456789]",
    Value::Array(vec![
        Value::Number(0.0),
        Value::Number(-0.0),
        Value::Number(1.5),
        Value::Number(-2.25),
        Value::Number(1000.0),
        Value::Number(1000.0),
        Value::Number(2.5),
        Value::Number(123_456_789.0),
    ])
)]
#[case::proto_property("{\"__proto__\":1}", obj([("__proto__", Value::Number(1.0))]))]
#[case::escapes(
    r#""\"\\\/\b\f\n\r\t\u0041\u00e9\ud83d\ude00""#,
    s("\"\\/\u{8}\u{c}\n\r\tAé😀")
)]
#[case::raw_control_character("\"a\nb\"", s("a\nb"))]
#[case::whitespace_everywhere(
    " \t\r\n{ \"a\" :\n[ 1 ,\t2 ] } \n",
    obj([("a", Value::Array(vec![Value::Number(1.0), Value::Number(2.0)]))])
)]
#[case::duplicate_keys_keep_the_last("{\"a\":1,\"a\":2}", obj([("a", Value::Number(2.0))]))]
fn accepted_documents(#[case] input: &str, #[case] expected: Value) {
    assert_eq!(decode(&ValueCodec, input), Ok(expected.clone()));
    let scalar = DecodeOptions {
        simd: SimdMode::Scalar,
    };
    assert_eq!(decode_with(&ValueCodec, input, scalar), Ok(expected));
    assert!(validate(input).is_ok());
}

#[rstest]
#[case("{\"b\":[1,2],\"a\":{\"c\":null}}")]
#[case("[\"x\",-1.5,true,null,{}]")]
#[case("\"\\u0000 and \\u001f\"")]
fn agrees_with_serde_json(#[case] input: &str) {
    let theirs: serde_json::Value = serde_json::from_str(input).unwrap();
    assert_eq!(decode(&ValueCodec, input), Ok(Value::from_serde(&theirs)));
}

#[test]
fn encoding_is_compact_and_ordered() {
    let value = decode(&ValueCodec, " { \"b\" : [ 1 , 2.5 ] , \"a\" : \"\\u0001\" } ").unwrap();
    assert_eq!(
        encode_string(&ValueCodec, &value).unwrap(),
        r#"{"a":"\u0001","b":[1.0,2.5]}"#
    );
}

#[test]
fn deep_nesting_is_validated_without_recursion() {
    let depth = 100_000;
    let mut input = String::with_capacity(depth * 6);
    for _ in 0..depth {
        input.push_str("{\"a\":[");
    }
    for _ in 0..depth {
        input.push_str("]}");
    }
    assert!(validate(&input).is_ok());
    input.pop();
    assert!(validate(&input).is_err());
}
