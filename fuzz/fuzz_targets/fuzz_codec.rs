#![no_main]
use std::cell::RefCell;

use arbitrary::Arbitrary;
use jsoncodec::{
    DecodeOptions, EncodeOptions, SimdMode,
    codec::{any_value, byte_string},
    decode_with, encode_with, validate,
};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use serde::de::IgnoredAny;
use serde_json::{Map, Value};

const HEADER: usize = 1; // flags

thread_local! {
    static RNG: RefCell<SmallRng> =
        RefCell::new(SmallRng::from_os_rng());
}

// JSON whitespace plus a few near misses that must be rejected.
static WS_TABLE: &[&[u8]] = &[
    b" ",
    b"\t",
    b"\n",
    b"\r",
    b"\x0b",
    b"\x0c",
    "\u{a0}".as_bytes(),
    "\u{2028}".as_bytes(),
];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed.is_multiple_of(10) {
        data[0] = with_rng(|rng| rng.next_u32() as u8);

        let limit = max_size - HEADER;
        let mut written = HEADER;
        written += append_whitespace(&mut data[written..], limit);
        written += append_value(&mut data[written..], size.max(16), max_size - written);
        written += append_whitespace(&mut data[written..], max_size - written);
        written
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

/// Appends up to eight whitespace sequences to `buf`, never exceeding
/// `limit`. Returns the number of bytes written.
fn append_whitespace(buf: &mut [u8], limit: usize) -> usize {
    with_rng(|rng| {
        if limit == 0 {
            return 0;
        }

        let count = rng.random_range(0..=limit.min(8));
        let mut written = 0;
        for _ in 0..count {
            // Mostly real whitespace.
            let w = if rng.random_ratio(15, 16) {
                WS_TABLE[rng.random_range(0..4)]
            } else {
                WS_TABLE[rng.random_range(0..WS_TABLE.len())]
            };
            if written + w.len() > limit {
                break;
            }
            buf[written..written + w.len()].copy_from_slice(w);
            written += w.len();
        }
        written
    })
}

fn append_value(data: &mut [u8], size: usize, limit: usize) -> usize {
    let value = loop {
        let s = with_rng(|rng| rng.random_range(size / 2..size * 2).min(limit));
        let bytes: Vec<u8> = with_rng(|rng| (0..s).map(|_| rng.random::<u8>()).collect());
        if let Ok(value) = ArbitraryValue::arbitrary(&mut arbitrary::Unstructured::new(&bytes)) {
            break value;
        }
    };

    let serialized = serde_json::to_vec(&value.0).expect("Failed to serialize arbitrary value");

    // Truncation doubles as a source of unterminated documents.
    let len = serialized.len().min(limit);
    data[..len].copy_from_slice(&serialized[..len]);
    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        let value = match u.choose_index(21)? {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                Value::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            3..=10 => Value::String(u.arbitrary()?),
            11..=15 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            16..=20 => {
                let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                Value::Object(Map::from_iter(m.into_iter().map(|(k, v)| (k, v.0))))
            }
            _ => Err(arbitrary::Error::IncorrectFormat)?,
        };
        Ok(ArbitraryValue(value))
    }
}

fn check(data: &[u8]) {
    let Some((&flags, json)) = data.split_first() else {
        return;
    };
    let simd = if flags & 1 == 0 {
        SimdMode::Auto
    } else {
        SimdMode::Scalar
    };

    // Structural validity matches serde_json, except that raw control
    // characters, invalid UTF-8 inside strings and nesting past serde_json's
    // recursion limit are accepted here.
    let ours = validate(json);
    let theirs = serde_json::from_slice::<IgnoredAny>(json);
    match (&ours, &theirs) {
        (Ok(()), Err(err)) => assert!(
            err.to_string().starts_with("recursion limit exceeded")
                || json.iter().any(|&b| b < 0x20)
                || std::str::from_utf8(json).is_err(),
            "accepted what serde_json rejects: {err}"
        ),
        (Err(err), Ok(_)) => panic!("rejected what serde_json accepts: {err}"),
        _ => {}
    }

    // Both scanning routines behave identically.
    let auto = decode_with(&any_value(), json, DecodeOptions::default());
    let scalar = decode_with(&any_value(), json, DecodeOptions { simd: SimdMode::Scalar });
    assert_eq!(auto, scalar);
    if let Ok(captured) = &auto {
        let trimmed = std::str::from_utf8(json)
            .expect("captured values are UTF-8")
            .trim_matches([' ', '\t', '\n', '\r']);
        assert_eq!(captured.as_str(), trimmed);
    }

    // String tokens survive a byte-exact round trip.
    if let Ok(bytes) = decode_with(&byte_string(), json, DecodeOptions { simd }) {
        let options = EncodeOptions {
            simd,
            ..EncodeOptions::default()
        };
        let encoded = encode_with(&byte_string(), &bytes, options).expect("byte strings encode");
        assert_eq!(decode_with(&byte_string(), &encoded, DecodeOptions { simd }), Ok(bytes));
    }
}

fuzz_target!(|data: &[u8]| check(data));
