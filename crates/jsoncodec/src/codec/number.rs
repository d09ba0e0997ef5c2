use core::marker::PhantomData;

use crate::{
    codec::Codec,
    context::{DecodeContext, EncodeContext},
    error::{DecodeError, EncodeError},
    number::Number,
};

/// Any primitive integer or float. See [`Number`] for the exact rules.
pub struct NumberCodec<T>(PhantomData<fn() -> T>);

impl<T> Clone for NumberCodec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NumberCodec<T> {}

impl<T> core::fmt::Debug for NumberCodec<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("NumberCodec")
    }
}

#[must_use]
pub fn number<T: Number>() -> NumberCodec<T> {
    NumberCodec(PhantomData)
}

impl<T: Number> Codec for NumberCodec<T> {
    type Object = T;

    #[inline]
    fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<T, DecodeError> {
        T::decode_number(ctx)
    }

    #[inline]
    fn encode(&self, ctx: &mut EncodeContext, value: &T) -> Result<(), EncodeError> {
        value.encode_number(ctx)
    }
}
