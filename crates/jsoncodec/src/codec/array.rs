use alloc::{collections::BTreeSet, vec::Vec};
use core::marker::PhantomData;

use crate::{
    codec::{Codec, decode_array_items, encode_array_items},
    context::{DecodeContext, EncodeContext},
    error::{DecodeError, EncodeError},
};

/// A JSON array decoded into any container that can be extended one element
/// at a time and iterated by reference.
///
/// Elements are appended in input order, so sequence containers keep the
/// order and set-like containers apply their own insertion rules.
pub struct ArrayCodec<C, Ctr> {
    inner: C,
    container: PhantomData<fn() -> Ctr>,
}

impl<C: Clone, Ctr> Clone for ArrayCodec<C, Ctr> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            container: PhantomData,
        }
    }
}

impl<C: core::fmt::Debug, Ctr> core::fmt::Debug for ArrayCodec<C, Ctr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ArrayCodec").field("inner", &self.inner).finish()
    }
}

/// A `Vec` of `inner` values.
#[must_use]
pub fn array<C: Codec>(inner: C) -> ArrayCodec<C, Vec<C::Object>> {
    array_into(inner)
}

/// A `BTreeSet` of `inner` values. Duplicates in the input collapse.
#[must_use]
pub fn set<C>(inner: C) -> ArrayCodec<C, BTreeSet<C::Object>>
where
    C: Codec,
    C::Object: Ord,
{
    array_into(inner)
}

/// `inner` values collected into `Ctr`.
#[must_use]
pub fn array_into<Ctr, C: Codec>(inner: C) -> ArrayCodec<C, Ctr> {
    ArrayCodec {
        inner,
        container: PhantomData,
    }
}

impl<C, Ctr> Codec for ArrayCodec<C, Ctr>
where
    C: Codec,
    Ctr: Default + Extend<C::Object>,
    for<'a> &'a Ctr: IntoIterator<Item = &'a C::Object>,
{
    type Object = Ctr;

    fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<Ctr, DecodeError> {
        let mut out = Ctr::default();
        decode_array_items(ctx, |ctx| {
            out.extend(Some(self.inner.decode(ctx)?));
            Ok(())
        })?;
        Ok(out)
    }

    fn encode(&self, ctx: &mut EncodeContext, value: &Ctr) -> Result<(), EncodeError> {
        encode_array_items(ctx, &self.inner, value)
    }
}
