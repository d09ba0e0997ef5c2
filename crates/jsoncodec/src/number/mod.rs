//! Numeric decoding and encoding.

mod float;
mod format;
mod integer;

use crate::{
    context::{DecodeContext, EncodeContext},
    error::{DecodeError, EncodeError},
};

mod sealed {
    pub trait Sealed {}
}

/// Primitive numeric types with a built-in JSON representation.
///
/// Integers decode exactly: a fraction or exponent is accepted and the value
/// is truncated toward zero, but a value outside the type's range fails with
/// [`IntegerOverflow`](crate::DecodeErrorKind::IntegerOverflow). Floats use
/// correctly rounded conversions in both directions and refuse to encode NaN
/// or infinities.
///
/// This trait is sealed.
pub trait Number: sealed::Sealed + Copy {
    #[doc(hidden)]
    fn decode_number(ctx: &mut DecodeContext<'_>) -> Result<Self, DecodeError>;

    #[doc(hidden)]
    fn encode_number(self, ctx: &mut EncodeContext) -> Result<(), EncodeError>;
}

macro_rules! impl_integer_number {
    ($($t:ty),*) => {$(
        impl sealed::Sealed for $t {}

        impl Number for $t {
            #[inline]
            fn decode_number(ctx: &mut DecodeContext<'_>) -> Result<Self, DecodeError> {
                integer::decode_integer(ctx)
            }

            #[inline]
            fn encode_number(self, ctx: &mut EncodeContext) -> Result<(), EncodeError> {
                format::encode_integer(ctx, self);
                Ok(())
            }
        }
    )*};
}

impl_integer_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! impl_float_number {
    ($($t:ty),*) => {$(
        impl sealed::Sealed for $t {}

        impl Number for $t {
            #[inline]
            fn decode_number(ctx: &mut DecodeContext<'_>) -> Result<Self, DecodeError> {
                float::decode_float(ctx)
            }

            #[inline]
            fn encode_number(self, ctx: &mut EncodeContext) -> Result<(), EncodeError> {
                float::encode_float(ctx, self)
            }
        }
    )*};
}

impl_float_number!(f32, f64);
