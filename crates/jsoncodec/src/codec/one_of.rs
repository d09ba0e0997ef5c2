use crate::{
    codec::Codec,
    context::{DecodeContext, EncodeContext},
    error::{DecodeError, EncodeError},
};

/// Ordered alternatives over the same object type.
///
/// Decoding tries each codec in turn, rewinding the cursor after every
/// failed attempt. When all of them fail, the error of the first alternative
/// is returned, since that is normally the shape the caller expected.
/// Encoding always goes through the first codec.
///
/// # Examples
///
/// ```rust
/// use jsoncodec::{codec::{null, one_of, string}, decode, encode_string};
///
/// let codec = one_of((string(), null::<String>()));
/// assert_eq!(decode(&codec, "null").unwrap(), "");
/// assert_eq!(decode(&codec, "\"x\"").unwrap(), "x");
/// assert_eq!(encode_string(&codec, &String::new()).unwrap(), "\"\"");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct OneOf<Cs>(Cs);

/// Combines a tuple of 2 to 8 codecs with identical object types.
#[must_use]
pub fn one_of<Cs>(codecs: Cs) -> OneOf<Cs>
where
    OneOf<Cs>: Codec,
{
    OneOf(codecs)
}

macro_rules! impl_one_of {
    ($first:ident $(, $rest:ident $index:tt)+) => {
        impl<$first, $($rest),+> Codec for OneOf<($first, $($rest),+)>
        where
            $first: Codec,
            $($rest: Codec<Object = $first::Object>,)+
        {
            type Object = $first::Object;

            fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<Self::Object, DecodeError> {
                let start = ctx.offset();
                let first_error = match self.0.0.decode(ctx) {
                    Ok(value) => return Ok(value),
                    Err(err) => err,
                };
                log::trace!("alternative 0 rejected: {first_error}");
                $(
                    ctx.rewind_to(start);
                    match self.0.$index.decode(ctx) {
                        Ok(value) => return Ok(value),
                        Err(_err) => log::trace!("alternative {} rejected: {_err}", $index),
                    }
                )+
                ctx.rewind_to(start);
                Err(first_error)
            }

            fn encode(
                &self,
                ctx: &mut EncodeContext,
                value: &Self::Object,
            ) -> Result<(), EncodeError> {
                self.0.0.encode(ctx, value)
            }

            fn should_encode(&self, value: &Self::Object) -> bool {
                self.0.0.should_encode(value)
            }
        }
    };
}

impl_one_of!(A, B 1);
impl_one_of!(A, B 1, C 2);
impl_one_of!(A, B 1, C 2, D 3);
impl_one_of!(A, B 1, C 2, D 3, E 4);
impl_one_of!(A, B 1, C 2, D 3, E 4, F 5);
impl_one_of!(A, B 1, C 2, D 3, E 4, F 5, G 6);
impl_one_of!(A, B 1, C 2, D 3, E 4, F 5, G 6, H 7);
