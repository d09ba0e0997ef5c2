use crate::{
    codec::Codec,
    context::{DecodeContext, EncodeContext},
    error::{DecodeError, EncodeError},
};

/// A fixed-length JSON array with one codec per position.
///
/// Every position is always written, even where its codec would decline in
/// an object, so positions never shift.
#[derive(Debug, Clone, Copy)]
pub struct TupleCodec<Cs>(Cs);

/// Combines a tuple of 2 to 6 codecs.
#[must_use]
pub fn tuple<Cs>(codecs: Cs) -> TupleCodec<Cs>
where
    TupleCodec<Cs>: Codec,
{
    TupleCodec(codecs)
}

/// A two-element array.
#[must_use]
pub fn pair<A: Codec, B: Codec>(first: A, second: B) -> TupleCodec<(A, B)> {
    TupleCodec((first, second))
}

macro_rules! impl_tuple {
    ($A:ident $a:ident $(, $R:ident $r:ident $i:tt)+) => {
        impl<$A: Codec, $($R: Codec),+> Codec for TupleCodec<($A, $($R),+)> {
            type Object = ($A::Object, $($R::Object),+);

            fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<Self::Object, DecodeError> {
                ctx.expect_byte(b'[')?;
                ctx.skip_whitespace();
                let $a = self.0.0.decode(ctx)?;
                $(
                    ctx.skip_whitespace();
                    ctx.expect_byte(b',')?;
                    ctx.skip_whitespace();
                    let $r = self.0.$i.decode(ctx)?;
                )+
                ctx.skip_whitespace();
                ctx.expect_byte(b']')?;
                Ok(($a, $($r),+))
            }

            fn encode(
                &self,
                ctx: &mut EncodeContext,
                value: &Self::Object,
            ) -> Result<(), EncodeError> {
                ctx.append(b'[');
                self.0.0.encode(ctx, &value.0)?;
                $(
                    ctx.append(b',');
                    self.0.$i.encode(ctx, &value.$i)?;
                )+
                ctx.append(b']');
                Ok(())
            }
        }
    };
}

impl_tuple!(A a, B b 1);
impl_tuple!(A a, B b 1, C c 2);
impl_tuple!(A a, B b 1, C c 2, D d 3);
impl_tuple!(A a, B b 1, C c 2, D d 3, E e 4);
impl_tuple!(A a, B b 1, C c 2, D d 3, E e 4, F f 5);
