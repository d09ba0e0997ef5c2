use core::marker::PhantomData;

use crate::{
    codec::Codec,
    context::{DecodeContext, EncodeContext},
    error::{DecodeError, EncodeError},
};

/// Accepts only `null`, decoding it as `T::default()`. Encodes any value as
/// `null`.
///
/// Mostly useful as the fallback of [`one_of`](crate::codec::one_of) or as the
/// sentinel of [`default_as`](crate::codec::default_as).
pub struct NullCodec<T>(PhantomData<fn() -> T>);

impl<T> Clone for NullCodec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NullCodec<T> {}

impl<T> core::fmt::Debug for NullCodec<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("NullCodec")
    }
}

#[must_use]
pub fn null<T: Default>() -> NullCodec<T> {
    NullCodec(PhantomData)
}

impl<T: Default> Codec for NullCodec<T> {
    type Object = T;

    fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<T, DecodeError> {
        ctx.skip_null()?;
        Ok(T::default())
    }

    fn encode(&self, ctx: &mut EncodeContext, _: &T) -> Result<(), EncodeError> {
        ctx.append_slice(b"null");
        Ok(())
    }
}
