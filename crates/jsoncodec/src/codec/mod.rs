//! The [`Codec`] abstraction and every built-in codec.
//!
//! Primitive codecs expect the cursor on the first byte of their value and
//! leave it directly after the value. Codecs for containers skip the
//! whitespace between their own tokens, so a codec never has to deal with
//! whitespace in front of the value it was asked to decode.

mod any;
mod any_value;
mod array;
mod boolean;
mod cast;
mod defaults;
mod empty_as;
mod enumeration;
mod eq;
mod ignore;
mod lenient;
mod map;
mod null;
mod number;
mod object;
mod one_of;
mod optional;
mod smart_ptr;
mod string;
mod transform;
mod tuple;

use alloc::{borrow::Cow, boxed::Box, sync::Arc};

pub use any::{AnyCodec, any};
pub use any_value::{AnyValueCodec, any_value};
pub use array::{ArrayCodec, array, array_into, set};
pub use boolean::{BoolCodec, boolean};
pub use cast::{CastCodec, cast};
pub use defaults::{DurationCodec, NullableCodec};
pub use empty_as::{DefaultAsCodec, default_as, empty_as, empty_as_null};
pub use enumeration::{EnumerationCodec, enumeration, string_enumeration};
pub use eq::{EqCodec, eq, eq_with};
pub use ignore::{IgnoreCodec, OmitCodec, ignore, ignore_as, omit};
pub use lenient::{LenientCodec, lenient};
pub use map::{MapCodec, map, map_into};
pub use null::{NullCodec, null};
pub use number::{NumberCodec, number};
pub use object::{Accessor, Field, FieldAccess, Member, ObjectCodec, object, object_with};
pub use one_of::{OneOf, one_of};
pub use optional::{OptionalCodec, nullable, optional};
pub use smart_ptr::{SmartPointer, SmartPtrCodec, smart_ptr};
pub use string::{ByteStringCodec, CharCodec, StringCodec, byte_string, character, string};
pub use transform::{TransformCodec, transform};
pub use tuple::{TupleCodec, pair, tuple};

use crate::{
    context::{DecodeContext, EncodeContext},
    error::{DecodeError, DecodeErrorKind, EncodeError},
    string as strings,
};

/// Knows how to decode one JSON value into a `Self::Object` and how to encode
/// one back.
///
/// Codecs are immutable once built: every call receives its own context, so
/// one codec can serve any number of threads at once.
///
/// # Examples
///
/// ```rust
/// use jsoncodec::{Codec, DecodeContext, DecodeError, EncodeContext, EncodeError, decode, encode};
///
/// /// A boolean written as `0` or `1`.
/// struct Bit;
///
/// impl Codec for Bit {
///     type Object = bool;
///
///     fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<bool, DecodeError> {
///         match ctx.peek() {
///             b'0' | b'1' => Ok(ctx.next_byte()? == b'1'),
///             _ => Err(ctx.unexpected()),
///         }
///     }
///
///     fn encode(&self, ctx: &mut EncodeContext, value: &bool) -> Result<(), EncodeError> {
///         ctx.append(if *value { b'1' } else { b'0' });
///         Ok(())
///     }
/// }
///
/// assert_eq!(decode(&Bit, " 1 ").unwrap(), true);
/// assert_eq!(encode(&Bit, &false).unwrap(), b"0");
/// ```
pub trait Codec {
    type Object;

    /// Decodes one value starting exactly at the cursor.
    ///
    /// # Errors
    ///
    /// When the input at the cursor is malformed or does not match what this
    /// codec accepts.
    fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<Self::Object, DecodeError>;

    /// Appends the JSON form of `value`.
    ///
    /// # Errors
    ///
    /// When `value` has no JSON representation under this codec.
    fn encode(&self, ctx: &mut EncodeContext, value: &Self::Object) -> Result<(), EncodeError>;

    /// Whether `value` should be written at all when it is a member of an
    /// object or an element of a sequence.
    fn should_encode(&self, value: &Self::Object) -> bool {
        let _ = value;
        true
    }
}

impl<C: Codec + ?Sized> Codec for &C {
    type Object = C::Object;

    fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<Self::Object, DecodeError> {
        (**self).decode(ctx)
    }

    fn encode(&self, ctx: &mut EncodeContext, value: &Self::Object) -> Result<(), EncodeError> {
        (**self).encode(ctx, value)
    }

    fn should_encode(&self, value: &Self::Object) -> bool {
        (**self).should_encode(value)
    }
}

impl<C: Codec + ?Sized> Codec for Box<C> {
    type Object = C::Object;

    fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<Self::Object, DecodeError> {
        (**self).decode(ctx)
    }

    fn encode(&self, ctx: &mut EncodeContext, value: &Self::Object) -> Result<(), EncodeError> {
        (**self).encode(ctx, value)
    }

    fn should_encode(&self, value: &Self::Object) -> bool {
        (**self).should_encode(value)
    }
}

impl<C: Codec + ?Sized> Codec for Arc<C> {
    type Object = C::Object;

    fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<Self::Object, DecodeError> {
        (**self).decode(ctx)
    }

    fn encode(&self, ctx: &mut EncodeContext, value: &Self::Object) -> Result<(), EncodeError> {
        (**self).encode(ctx, value)
    }

    fn should_encode(&self, value: &Self::Object) -> bool {
        (**self).should_encode(value)
    }
}

/// Associates a type with its canonical codec.
///
/// Implemented for the primitive types, the standard containers and smart
/// pointers, and tuples. Implement it for your own types to make them usable
/// with [`decode_default`](crate::decode_default) and as members registered
/// with [`ObjectCodec::required`].
pub trait DefaultCodec: Sized {
    type Codec: Codec<Object = Self>;

    fn default_codec() -> Self::Codec;
}

/// The canonical codec of `T`.
#[must_use]
pub fn default_codec<T: DefaultCodec>() -> T::Codec {
    T::default_codec()
}

/// Walks a `[ ... ]` sequence, calling `item` with the cursor on the first
/// byte of each element.
pub(crate) fn decode_array_items<'a>(
    ctx: &mut DecodeContext<'a>,
    mut item: impl FnMut(&mut DecodeContext<'a>) -> Result<(), DecodeError>,
) -> Result<(), DecodeError> {
    ctx.expect_byte(b'[')?;
    ctx.skip_whitespace();
    if ctx.peek() == b']' {
        ctx.advance(1);
        return Ok(());
    }
    loop {
        ctx.skip_whitespace();
        item(ctx)?;
        ctx.skip_whitespace();
        match ctx.peek() {
            b',' => ctx.advance(1),
            b']' => {
                ctx.advance(1);
                return Ok(());
            }
            _ => return Err(ctx.unexpected()),
        }
    }
}

/// Walks a `{ ... }` object, calling `entry` with each decoded key, the
/// offset of that key, and the cursor on the first byte of its value.
pub(crate) fn decode_object_entries<'a>(
    ctx: &mut DecodeContext<'a>,
    mut entry: impl FnMut(&mut DecodeContext<'a>, Cow<'a, [u8]>, usize) -> Result<(), DecodeError>,
) -> Result<(), DecodeError> {
    ctx.expect_byte(b'{')?;
    ctx.skip_whitespace();
    if ctx.peek() == b'}' {
        ctx.advance(1);
        return Ok(());
    }
    loop {
        ctx.skip_whitespace();
        let key_offset = ctx.offset();
        let key = strings::decode_bytes(ctx)?;
        ctx.skip_whitespace();
        ctx.expect_byte(b':')?;
        ctx.skip_whitespace();
        entry(ctx, key, key_offset)?;
        ctx.skip_whitespace();
        match ctx.peek() {
            b',' => ctx.advance(1),
            b'}' => {
                ctx.advance(1);
                return Ok(());
            }
            _ => return Err(ctx.unexpected()),
        }
    }
}

/// Writes `[a,b,...]`, leaving out elements the codec declines to encode.
pub(crate) fn encode_array_items<'v, C>(
    ctx: &mut EncodeContext,
    codec: &C,
    items: impl IntoIterator<Item = &'v C::Object>,
) -> Result<(), EncodeError>
where
    C: Codec + ?Sized,
    C::Object: 'v,
{
    ctx.append(b'[');
    let mut first = true;
    for item in items {
        if !codec.should_encode(item) {
            continue;
        }
        if !first {
            ctx.append(b',');
        }
        first = false;
        codec.encode(ctx, item)?;
    }
    ctx.append(b']');
    Ok(())
}

/// Converts a decoded key to a `String`.
pub(crate) fn key_to_string(
    ctx: &DecodeContext<'_>,
    key: Cow<'_, [u8]>,
    key_offset: usize,
) -> Result<alloc::string::String, DecodeError> {
    alloc::string::String::from_utf8(key.into_owned())
        .map_err(|_| ctx.error_at(DecodeErrorKind::InvalidUtf8, key_offset))
}
