//! Composable JSON codecs.
//!
//! A [`Codec`] decodes one JSON value from a [`DecodeContext`] and encodes one
//! value into an [`EncodeContext`]. Small codecs for primitives combine into
//! codecs for containers, alternatives and named-field structs; see
//! [`codec`] for the full set.
//!
//! Decoding works on one contiguous byte slice. Strings without escapes are
//! borrowed from it until converted to their final type, nesting depth is
//! bounded only by memory, and every failure carries the byte offset where it
//! was detected.
//!
//! ```rust
//! use jsoncodec::{codec::{array, number, object, string}, decode, encode_string, member};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Track {
//!     title: String,
//!     plays: Vec<u32>,
//! }
//!
//! let codec = object::<Track>()
//!     .required_with("title", member!(Track, title), string())
//!     .required_with("plays", member!(Track, plays), array(number::<u32>()));
//!
//! let track = decode(&codec, r#"{"plays": [3, 1], "title": "Intro"}"#).unwrap();
//! assert_eq!(track.plays, [3, 1]);
//! assert_eq!(
//!     encode_string(&codec, &track).unwrap(),
//!     r#"{"title":"Intro","plays":[3,1]}"#
//! );
//!
//! let err = decode(&codec, r#"{"title": 5}"#).unwrap_err();
//! assert_eq!(err.to_string(), "Unexpected input at offset 10");
//! ```

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod api;
pub mod codec;
mod context;
mod cpu;
mod encoded_value;
mod error;
mod number;
mod options;
mod scan;
mod skip;
mod string;

#[cfg(test)]
mod tests;

pub use api::{
    decode, decode_default, decode_with, encode, encode_default, encode_string, encode_with,
    try_decode, try_decode_default, validate,
};
pub use codec::{Codec, DefaultCodec, default_codec};
pub use context::{DecodeContext, EncodeContext};
pub use cpu::CpuFeatures;
pub use encoded_value::EncodedValue;
pub use error::{DecodeError, DecodeErrorKind, EncodeError};
pub use number::Number;
pub use options::{DecodeOptions, EncodeOptions, SimdMode};

/// Field access for [`ObjectCodec`](codec::ObjectCodec) through a struct
/// member, possibly nested.
///
/// ```rust
/// # use jsoncodec::{codec::object, member};
/// #[derive(Default)]
/// struct Inner { depth: u8 }
/// #[derive(Default)]
/// struct Outer { inner: Inner }
///
/// let codec = object::<Outer>().required("depth", member!(Outer, inner.depth));
/// # let _ = codec;
/// ```
#[macro_export]
macro_rules! member {
    ($ty:ty, $($field:tt).+) => {
        $crate::codec::Member::new(
            |object: &$ty| &object.$($field).+,
            |object: &mut $ty| &mut object.$($field).+,
        )
    };
}
