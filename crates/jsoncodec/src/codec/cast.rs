use core::marker::PhantomData;

use crate::{
    codec::Codec,
    context::{DecodeContext, EncodeContext},
    error::{DecodeError, EncodeError},
};

/// Presents the values of an inner codec as a related type `T`.
///
/// Decoded values are widened with `T::from`. Encoding narrows back with
/// `TryFrom` and fails with [`EncodeError::BadCast`] when the value does not
/// fit.
pub struct CastCodec<C, T> {
    inner: C,
    target: PhantomData<fn() -> T>,
}

impl<C: Clone, T> Clone for CastCodec<C, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            target: PhantomData,
        }
    }
}

impl<C: core::fmt::Debug, T> core::fmt::Debug for CastCodec<C, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("CastCodec").field(&self.inner).finish()
    }
}

#[must_use]
pub fn cast<T, C>(inner: C) -> CastCodec<C, T>
where
    C: Codec,
    T: From<C::Object> + Clone,
    C::Object: TryFrom<T>,
{
    CastCodec {
        inner,
        target: PhantomData,
    }
}

impl<C, T> Codec for CastCodec<C, T>
where
    C: Codec,
    T: From<C::Object> + Clone,
    C::Object: TryFrom<T>,
{
    type Object = T;

    fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<T, DecodeError> {
        self.inner.decode(ctx).map(T::from)
    }

    fn encode(&self, ctx: &mut EncodeContext, value: &T) -> Result<(), EncodeError> {
        let inner = <C::Object as TryFrom<T>>::try_from(value.clone())
            .map_err(|_| EncodeError::BadCast)?;
        self.inner.encode(ctx, &inner)
    }
}
