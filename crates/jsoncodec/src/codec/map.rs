use alloc::{collections::BTreeMap, string::String};
use core::marker::PhantomData;

use crate::{
    codec::{Codec, decode_object_entries, key_to_string},
    context::{DecodeContext, EncodeContext},
    error::{DecodeError, EncodeError},
    string::encode_bytes,
};

/// A JSON object with arbitrary keys, every value decoded by the same inner
/// codec.
///
/// Entries are inserted in input order, so with a map type that replaces on
/// insert a repeated key keeps its last value. Encoding follows the map's
/// iteration order.
pub struct MapCodec<C, M> {
    inner: C,
    map: PhantomData<fn() -> M>,
}

impl<C: Clone, M> Clone for MapCodec<C, M> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            map: PhantomData,
        }
    }
}

impl<C: core::fmt::Debug, M> core::fmt::Debug for MapCodec<C, M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MapCodec").field("inner", &self.inner).finish()
    }
}

/// A `BTreeMap<String, _>` of `inner` values.
#[must_use]
pub fn map<C: Codec>(inner: C) -> MapCodec<C, BTreeMap<String, C::Object>> {
    map_into(inner)
}

/// `inner` values collected into any string-keyed map `M`.
#[must_use]
pub fn map_into<M, C: Codec>(inner: C) -> MapCodec<C, M> {
    MapCodec {
        inner,
        map: PhantomData,
    }
}

impl<C, M> Codec for MapCodec<C, M>
where
    C: Codec,
    M: Default + Extend<(String, C::Object)>,
    for<'a> &'a M: IntoIterator<Item = (&'a String, &'a C::Object)>,
{
    type Object = M;

    fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<M, DecodeError> {
        let mut out = M::default();
        decode_object_entries(ctx, |ctx, key, key_offset| {
            let key = key_to_string(ctx, key, key_offset)?;
            let value = self.inner.decode(ctx)?;
            out.extend(Some((key, value)));
            Ok(())
        })?;
        Ok(out)
    }

    fn encode(&self, ctx: &mut EncodeContext, value: &M) -> Result<(), EncodeError> {
        ctx.append(b'{');
        let mut first = true;
        for (key, item) in value {
            if !self.inner.should_encode(item) {
                continue;
            }
            if !first {
                ctx.append(b',');
            }
            first = false;
            encode_bytes(ctx, key.as_bytes());
            ctx.append(b':');
            self.inner.encode(ctx, item)?;
        }
        ctx.append(b'}');
        Ok(())
    }
}
