use alloc::{boxed::Box, rc::Rc, sync::Arc};
use core::marker::PhantomData;

use crate::{
    codec::Codec,
    context::{DecodeContext, EncodeContext},
    error::{DecodeError, EncodeError},
};

/// An owning pointer, possibly nullable, that can be built from a decoded
/// value and dereferenced for encoding.
pub trait SmartPointer {
    type Target;

    fn from_value(value: Self::Target) -> Self;

    /// `None` for a null pointer.
    fn get(&self) -> Option<&Self::Target>;
}

macro_rules! impl_smart_pointer {
    ($($ptr:ident),+) => {$(
        impl<T> SmartPointer for $ptr<T> {
            type Target = T;

            fn from_value(value: T) -> Self {
                $ptr::new(value)
            }

            fn get(&self) -> Option<&T> {
                Some(&**self)
            }
        }

        impl<T> SmartPointer for Option<$ptr<T>> {
            type Target = T;

            fn from_value(value: T) -> Self {
                Some($ptr::new(value))
            }

            fn get(&self) -> Option<&T> {
                self.as_deref()
            }
        }
    )+};
}

impl_smart_pointer!(Box, Rc, Arc);

/// Allocates decoded values behind a pointer `P`.
///
/// A null pointer cannot be encoded ([`EncodeError::NullPointer`]) and is
/// skipped inside objects and arrays.
pub struct SmartPtrCodec<C, P> {
    inner: C,
    pointer: PhantomData<fn() -> P>,
}

impl<C: Clone, P> Clone for SmartPtrCodec<C, P> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            pointer: PhantomData,
        }
    }
}

impl<C: core::fmt::Debug, P> core::fmt::Debug for SmartPtrCodec<C, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("SmartPtrCodec").field(&self.inner).finish()
    }
}

#[must_use]
pub fn smart_ptr<P, C>(inner: C) -> SmartPtrCodec<C, P>
where
    C: Codec,
    P: SmartPointer<Target = C::Object>,
{
    SmartPtrCodec {
        inner,
        pointer: PhantomData,
    }
}

impl<C, P> Codec for SmartPtrCodec<C, P>
where
    C: Codec,
    P: SmartPointer<Target = C::Object>,
{
    type Object = P;

    fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<P, DecodeError> {
        self.inner.decode(ctx).map(P::from_value)
    }

    fn encode(&self, ctx: &mut EncodeContext, value: &P) -> Result<(), EncodeError> {
        let target = value.get().ok_or(EncodeError::NullPointer)?;
        self.inner.encode(ctx, target)
    }

    fn should_encode(&self, value: &P) -> bool {
        value
            .get()
            .is_some_and(|target| self.inner.should_encode(target))
    }
}
