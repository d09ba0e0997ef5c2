//! [`DefaultCodec`] for the types that have an obvious JSON form.

use alloc::{
    boxed::Box,
    collections::{BTreeMap, BTreeSet, VecDeque},
    rc::Rc,
    string::String,
    sync::Arc,
    vec::Vec,
};
use core::time::Duration;

use bstr::BString;

use crate::{
    codec::{
        AnyValueCodec, ArrayCodec, BoolCodec, ByteStringCodec, CharCodec, DefaultCodec, MapCodec,
        NullCodec, NumberCodec, OneOf, OptionalCodec, SmartPtrCodec, StringCodec, TransformCodec,
        TupleCodec, any_value, array_into, boolean, byte_string, character, map_into, null,
        nullable, number, smart_ptr, string, transform, tuple,
    },
    encoded_value::EncodedValue,
    error::DecodeError,
};

/// The default codec of `Option<T>`: `null` or a `T`.
pub type NullableCodec<T> =
    OneOf<(OptionalCodec<<T as DefaultCodec>::Codec>, NullCodec<Option<T>>)>;

/// The default codec of [`Duration`]: whole milliseconds as an integer.
///
/// Durations longer than `u64::MAX` milliseconds saturate on encode.
pub type DurationCodec = TransformCodec<
    NumberCodec<u64>,
    fn(&Duration) -> u64,
    fn(u64, usize) -> Result<Duration, DecodeError>,
>;

macro_rules! impl_default_codec {
    ($($ty:ty => $codec:ty = $make:expr;)+) => {$(
        impl DefaultCodec for $ty {
            type Codec = $codec;

            fn default_codec() -> Self::Codec {
                $make
            }
        }
    )+};
}

impl_default_codec! {
    bool => BoolCodec = boolean();
    String => StringCodec = string();
    BString => ByteStringCodec = byte_string();
    char => CharCodec = character();
    () => NullCodec<()> = null();
    EncodedValue => AnyValueCodec = any_value();
}

macro_rules! impl_default_number {
    ($($ty:ty),+) => {$(
        impl DefaultCodec for $ty {
            type Codec = NumberCodec<$ty>;

            fn default_codec() -> Self::Codec {
                number()
            }
        }
    )+};
}

impl_default_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl DefaultCodec for Duration {
    type Codec = DurationCodec;

    fn default_codec() -> Self::Codec {
        fn to_millis(duration: &Duration) -> u64 {
            u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
        }
        fn from_millis(millis: u64, _: usize) -> Result<Duration, DecodeError> {
            Ok(Duration::from_millis(millis))
        }
        transform(
            number(),
            to_millis as fn(&Duration) -> u64,
            from_millis as fn(u64, usize) -> Result<Duration, DecodeError>,
        )
    }
}

impl<T: DefaultCodec> DefaultCodec for Option<T> {
    type Codec = NullableCodec<T>;

    fn default_codec() -> Self::Codec {
        nullable(T::default_codec())
    }
}

macro_rules! impl_default_sequence {
    ($($ctr:ident $(: $bound:path)?),+) => {$(
        impl<T: DefaultCodec $(+ $bound)?> DefaultCodec for $ctr<T> {
            type Codec = ArrayCodec<T::Codec, $ctr<T>>;

            fn default_codec() -> Self::Codec {
                array_into(T::default_codec())
            }
        }
    )+};
}

impl_default_sequence!(Vec, VecDeque, BTreeSet: Ord);

impl<T: DefaultCodec> DefaultCodec for BTreeMap<String, T> {
    type Codec = MapCodec<T::Codec, Self>;

    fn default_codec() -> Self::Codec {
        map_into(T::default_codec())
    }
}

#[cfg(feature = "std")]
impl<T, S> DefaultCodec for std::collections::HashMap<String, T, S>
where
    T: DefaultCodec,
    S: core::hash::BuildHasher + Default,
{
    type Codec = MapCodec<T::Codec, Self>;

    fn default_codec() -> Self::Codec {
        map_into(T::default_codec())
    }
}

#[cfg(feature = "std")]
impl<T, S> DefaultCodec for std::collections::HashSet<T, S>
where
    T: DefaultCodec + Eq + core::hash::Hash,
    S: core::hash::BuildHasher + Default,
{
    type Codec = ArrayCodec<T::Codec, Self>;

    fn default_codec() -> Self::Codec {
        array_into(T::default_codec())
    }
}

macro_rules! impl_default_pointer {
    ($($ptr:ident),+) => {$(
        impl<T: DefaultCodec> DefaultCodec for $ptr<T> {
            type Codec = SmartPtrCodec<T::Codec, $ptr<T>>;

            fn default_codec() -> Self::Codec {
                smart_ptr(T::default_codec())
            }
        }
    )+};
}

impl_default_pointer!(Box, Rc, Arc);

macro_rules! impl_default_tuple {
    ($($T:ident),+) => {
        impl<$($T: DefaultCodec),+> DefaultCodec for ($($T,)+) {
            type Codec = TupleCodec<($($T::Codec,)+)>;

            fn default_codec() -> Self::Codec {
                tuple(($($T::default_codec(),)+))
            }
        }
    };
}

impl_default_tuple!(A, B);
impl_default_tuple!(A, B, C);
impl_default_tuple!(A, B, C, D);
impl_default_tuple!(A, B, C, D, E);
impl_default_tuple!(A, B, C, D, E, F);
