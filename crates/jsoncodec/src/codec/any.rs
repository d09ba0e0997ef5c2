use alloc::sync::Arc;

use crate::{
    codec::Codec,
    context::{DecodeContext, EncodeContext},
    error::{DecodeError, EncodeError},
};

/// A type-erased codec for `T`.
///
/// Cloning shares the wrapped codec. Useful for storing codecs of different
/// concrete types side by side, or for recursive data where a codec has to
/// refer to itself.
pub struct AnyCodec<T>(Arc<dyn Codec<Object = T> + Send + Sync>);

impl<T> Clone for AnyCodec<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> core::fmt::Debug for AnyCodec<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("AnyCodec")
    }
}

#[must_use]
pub fn any<C>(codec: C) -> AnyCodec<C::Object>
where
    C: Codec + Send + Sync + 'static,
{
    AnyCodec(Arc::new(codec))
}

impl<T> Codec for AnyCodec<T> {
    type Object = T;

    fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<T, DecodeError> {
        self.0.decode(ctx)
    }

    fn encode(&self, ctx: &mut EncodeContext, value: &T) -> Result<(), EncodeError> {
        self.0.encode(ctx, value)
    }

    fn should_encode(&self, value: &T) -> bool {
        self.0.should_encode(value)
    }
}
