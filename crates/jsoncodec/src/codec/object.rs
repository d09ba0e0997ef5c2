//! Named-field aggregates.
//!
//! An [`ObjectCodec`] is a registry of fields, each pairing a JSON key with a
//! way to read and write one part of `T`. Fields are encoded in registration
//! order. On decode, keys may come in any order, unknown keys are skipped,
//! and a key that appears twice overwrites the earlier value.

use alloc::{
    boxed::Box,
    collections::BTreeMap,
    string::{String, ToString},
    vec::Vec,
};

use bstr::ByteSlice;
use smallvec::{SmallVec, smallvec};

use crate::{
    codec::{Codec, DefaultCodec, decode_object_entries},
    context::{DecodeContext, EncodeContext},
    error::{DecodeError, DecodeErrorKind, EncodeError},
    string::encode_bytes,
};

/// Reads and writes one value of type `V` inside a `T`.
pub trait FieldAccess<T, V> {
    /// Calls `f` with the current value.
    fn read<R>(&self, object: &T, f: impl FnOnce(&V) -> R) -> R;

    fn write(&self, object: &mut T, value: V);
}

/// Direct access to a struct member through a pair of projections.
///
/// Usually built with the [`member!`](crate::member) macro.
#[derive(Debug, Clone, Copy)]
pub struct Member<G, M> {
    get: G,
    get_mut: M,
}

impl<G, M> Member<G, M> {
    pub fn new<T, V>(get: G, get_mut: M) -> Self
    where
        G: Fn(&T) -> &V,
        M: Fn(&mut T) -> &mut V,
    {
        Self { get, get_mut }
    }
}

impl<T, V, G, M> FieldAccess<T, V> for Member<G, M>
where
    G: Fn(&T) -> &V,
    M: Fn(&mut T) -> &mut V,
{
    fn read<R>(&self, object: &T, f: impl FnOnce(&V) -> R) -> R {
        f((self.get)(object))
    }

    fn write(&self, object: &mut T, value: V) {
        *(self.get_mut)(object) = value;
    }
}

/// Access through a getter returning the value and a setter consuming it.
#[derive(Debug, Clone, Copy)]
pub struct Accessor<G, S> {
    get: G,
    set: S,
}

impl<G, S> Accessor<G, S> {
    pub fn new<T, V>(get: G, set: S) -> Self
    where
        G: Fn(&T) -> V,
        S: Fn(&mut T, V),
    {
        Self { get, set }
    }
}

impl<T, V, G, S> FieldAccess<T, V> for Accessor<G, S>
where
    G: Fn(&T) -> V,
    S: Fn(&mut T, V),
{
    fn read<R>(&self, object: &T, f: impl FnOnce(&V) -> R) -> R {
        f(&(self.get)(object))
    }

    fn write(&self, object: &mut T, value: V) {
        (self.set)(object, value);
    }
}

/// One registered field of an [`ObjectCodec`].
pub trait Field<T>: Send + Sync {
    /// Decodes the value at the cursor into `object`.
    ///
    /// # Errors
    ///
    /// When the value is malformed.
    fn decode_into(&self, ctx: &mut DecodeContext<'_>, object: &mut T) -> Result<(), DecodeError>;

    /// Writes this field's value from `object`; the key is already written.
    ///
    /// # Errors
    ///
    /// When the value cannot be encoded.
    fn encode_from(&self, ctx: &mut EncodeContext, object: &T) -> Result<(), EncodeError>;

    /// Whether the key/value pair should appear in the output at all.
    fn should_encode(&self, object: &T) -> bool;
}

struct CodecField<A, C> {
    access: A,
    codec: C,
}

impl<T, A, C> Field<T> for CodecField<A, C>
where
    A: FieldAccess<T, C::Object> + Send + Sync,
    C: Codec + Send + Sync,
{
    fn decode_into(&self, ctx: &mut DecodeContext<'_>, object: &mut T) -> Result<(), DecodeError> {
        let value = self.codec.decode(ctx)?;
        self.access.write(object, value);
        Ok(())
    }

    fn encode_from(&self, ctx: &mut EncodeContext, object: &T) -> Result<(), EncodeError> {
        self.access.read(object, |value| self.codec.encode(ctx, value))
    }

    fn should_encode(&self, object: &T) -> bool {
        self.access
            .read(object, |value| self.codec.should_encode(value))
    }
}

struct CustomField<D, E> {
    decode: D,
    encode: E,
}

impl<T, D, E> Field<T> for CustomField<D, E>
where
    D: Fn(&mut DecodeContext<'_>, &mut T) -> Result<(), DecodeError> + Send + Sync,
    E: Fn(&mut EncodeContext, &T) -> Result<(), EncodeError> + Send + Sync,
{
    fn decode_into(&self, ctx: &mut DecodeContext<'_>, object: &mut T) -> Result<(), DecodeError> {
        (self.decode)(ctx, object)
    }

    fn encode_from(&self, ctx: &mut EncodeContext, object: &T) -> Result<(), EncodeError> {
        (self.encode)(ctx, object)
    }

    fn should_encode(&self, _: &T) -> bool {
        true
    }
}

struct FieldEntry<T> {
    name: Box<str>,
    /// `"name":`, escaped once at registration.
    encoded_key: Box<[u8]>,
    required_index: Option<usize>,
    field: Box<dyn Field<T>>,
}

/// Tracks which required fields one decode has seen, counting each at most
/// once.
struct RequiredSet {
    words: SmallVec<[u64; 2]>,
    count: usize,
}

impl RequiredSet {
    fn new(len: usize) -> Self {
        Self {
            words: smallvec![0; len.div_ceil(64)],
            count: 0,
        }
    }

    fn insert(&mut self, index: usize) {
        let bit = 1u64 << (index % 64);
        let word = &mut self.words[index / 64];
        if *word & bit == 0 {
            *word |= bit;
            self.count += 1;
        }
    }

    fn contains(&self, index: usize) -> bool {
        self.words[index / 64] & (1u64 << (index % 64)) != 0
    }
}

/// Decodes a JSON object into a `T` field by field.
///
/// # Examples
///
/// ```rust
/// use jsoncodec::{codec::{number, object, string}, decode, encode_string, member};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct User {
///     id: u64,
///     name: String,
///     nickname: Option<String>,
/// }
///
/// let codec = object::<User>()
///     .required_with("id", member!(User, id), number())
///     .required_with("name", member!(User, name), string())
///     .optional("nickname", member!(User, nickname));
///
/// let user = decode(&codec, r#"{"name": "Ada", "id": 7, "extra": [1]}"#).unwrap();
/// assert_eq!(user, User { id: 7, name: "Ada".into(), nickname: None });
/// assert_eq!(encode_string(&codec, &user).unwrap(), r#"{"id":7,"name":"Ada"}"#);
///
/// let err = decode(&codec, r#"{"id": 7}"#).unwrap_err();
/// assert_eq!(err.to_string(), "Missing required field 'name' at offset 9");
/// ```
pub struct ObjectCodec<T> {
    construct: Box<dyn Fn() -> T + Send + Sync>,
    fields: Vec<FieldEntry<T>>,
    lookup: BTreeMap<Box<[u8]>, usize>,
    required_count: usize,
}

impl<T> core::fmt::Debug for ObjectCodec<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ObjectCodec")
            .field(
                "fields",
                &self.fields.iter().map(|entry| &*entry.name).collect::<Vec<_>>(),
            )
            .field("required_count", &self.required_count)
            .finish_non_exhaustive()
    }
}

/// An empty registry for a default-constructible `T`.
#[must_use]
pub fn object<T: Default + 'static>() -> ObjectCodec<T> {
    object_with(T::default)
}

/// An empty registry; `construct` provides the initial value for each
/// decode.
#[must_use]
pub fn object_with<T>(construct: impl Fn() -> T + Send + Sync + 'static) -> ObjectCodec<T> {
    ObjectCodec {
        construct: Box::new(construct),
        fields: Vec::new(),
        lookup: BTreeMap::new(),
        required_count: 0,
    }
}

impl<T> ObjectCodec<T> {
    /// A field that must be present, using the default codec of its type.
    ///
    /// # Panics
    ///
    /// If `name` is already registered.
    #[must_use]
    pub fn required<V, A>(self, name: &str, access: A) -> Self
    where
        V: DefaultCodec,
        V::Codec: Send + Sync + 'static,
        A: FieldAccess<T, V> + Send + Sync + 'static,
    {
        self.required_with(name, access, V::default_codec())
    }

    /// A field that must be present, decoded and encoded with `codec`.
    ///
    /// # Panics
    ///
    /// If `name` is already registered.
    #[must_use]
    pub fn required_with<C, A>(self, name: &str, access: A, codec: C) -> Self
    where
        C: Codec + Send + Sync + 'static,
        A: FieldAccess<T, C::Object> + Send + Sync + 'static,
    {
        self.register(name, true, Box::new(CodecField { access, codec }))
    }

    /// A field that must be present, handled by free functions.
    ///
    /// `decode` is called with the cursor on the value; `encode` must write
    /// exactly one value.
    ///
    /// # Panics
    ///
    /// If `name` is already registered.
    #[must_use]
    pub fn required_custom<D, E>(self, name: &str, decode: D, encode: E) -> Self
    where
        D: Fn(&mut DecodeContext<'_>, &mut T) -> Result<(), DecodeError> + Send + Sync + 'static,
        E: Fn(&mut EncodeContext, &T) -> Result<(), EncodeError> + Send + Sync + 'static,
    {
        self.register(name, true, Box::new(CustomField { decode, encode }))
    }

    /// A field that may be absent, using the default codec of its type.
    ///
    /// # Panics
    ///
    /// If `name` is already registered.
    #[must_use]
    pub fn optional<V, A>(self, name: &str, access: A) -> Self
    where
        V: DefaultCodec,
        V::Codec: Send + Sync + 'static,
        A: FieldAccess<T, V> + Send + Sync + 'static,
    {
        self.optional_with(name, access, V::default_codec())
    }

    /// # Panics
    ///
    /// If `name` is already registered.
    #[must_use]
    pub fn optional_with<C, A>(self, name: &str, access: A, codec: C) -> Self
    where
        C: Codec + Send + Sync + 'static,
        A: FieldAccess<T, C::Object> + Send + Sync + 'static,
    {
        self.register(name, false, Box::new(CodecField { access, codec }))
    }

    /// # Panics
    ///
    /// If `name` is already registered.
    #[must_use]
    pub fn optional_custom<D, E>(self, name: &str, decode: D, encode: E) -> Self
    where
        D: Fn(&mut DecodeContext<'_>, &mut T) -> Result<(), DecodeError> + Send + Sync + 'static,
        E: Fn(&mut EncodeContext, &T) -> Result<(), EncodeError> + Send + Sync + 'static,
    {
        self.register(name, false, Box::new(CustomField { decode, encode }))
    }

    fn register(mut self, name: &str, required: bool, field: Box<dyn Field<T>>) -> Self {
        let index = self.fields.len();
        let previous = self
            .lookup
            .insert(name.as_bytes().to_vec().into_boxed_slice(), index);
        assert!(previous.is_none(), "duplicate field name '{name}'");

        let mut key = EncodeContext::new();
        encode_bytes(&mut key, name.as_bytes());
        key.append(b':');

        let required_index = required.then(|| {
            self.required_count += 1;
            self.required_count - 1
        });
        self.fields.push(FieldEntry {
            name: name.into(),
            encoded_key: key.into_vec().into_boxed_slice(),
            required_index,
            field,
        });
        self
    }

    /// Names of the registered fields, in encode order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|entry| &*entry.name)
    }

    fn first_missing(&self, seen: &RequiredSet) -> String {
        self.fields
            .iter()
            .find(|entry| entry.required_index.is_some_and(|index| !seen.contains(index)))
            .map(|entry| entry.name.to_string())
            .unwrap_or_default()
    }
}

impl<T> Codec for ObjectCodec<T> {
    type Object = T;

    fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<T, DecodeError> {
        let mut object = (self.construct)();
        let mut seen = RequiredSet::new(self.required_count);
        decode_object_entries(ctx, |ctx, key, _| {
            let Some(&index) = self.lookup.get(&*key) else {
                log::trace!("skipping unknown field \"{}\"", key.as_bstr());
                return ctx.skip_value();
            };
            let entry = &self.fields[index];
            entry.field.decode_into(ctx, &mut object)?;
            if let Some(required) = entry.required_index {
                seen.insert(required);
            }
            Ok(())
        })?;

        if seen.count != self.required_count {
            return Err(ctx.error(DecodeErrorKind::MissingRequiredField(
                self.first_missing(&seen),
            )));
        }
        Ok(object)
    }

    fn encode(&self, ctx: &mut EncodeContext, value: &T) -> Result<(), EncodeError> {
        ctx.append(b'{');
        let mut first = true;
        for entry in &self.fields {
            if !entry.field.should_encode(value) {
                continue;
            }
            if !first {
                ctx.append(b',');
            }
            first = false;
            ctx.append_slice(&entry.encoded_key);
            entry.field.encode_from(ctx, value)?;
        }
        ctx.append(b'}');
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::{format, vec, vec::Vec};

    use super::*;
    use crate::{
        codec::{array, number, optional, string},
        decode, encode_string, member,
    };

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    fn point() -> ObjectCodec<Point> {
        object::<Point>()
            .required("x", member!(Point, x))
            .required("y", member!(Point, y))
    }

    #[test]
    fn keys_in_any_order() {
        assert_eq!(decode(&point(), r#"{"y":2,"x":1}"#), Ok(Point { x: 1, y: 2 }));
        assert_eq!(
            encode_string(&point(), &Point { x: 1, y: 2 }).unwrap(),
            r#"{"x":1,"y":2}"#
        );
    }

    #[test]
    fn unknown_fields_are_skipped() {
        let input = r#"{"x":1,"extra":{"nested":[1,2,{"deep":null}]},"y":2}"#;
        assert_eq!(decode(&point(), input), Ok(Point { x: 1, y: 2 }));
    }

    #[test]
    fn duplicate_required_key_counts_once() {
        let err = decode(&point(), r#"{"x":1,"x":3}"#).unwrap_err();
        assert_eq!(err.kind(), &DecodeErrorKind::MissingRequiredField("y".into()));
        assert_eq!(decode(&point(), r#"{"x":1,"x":3,"y":0}"#), Ok(Point { x: 3, y: 0 }));
    }

    #[test]
    fn missing_field_reported_at_object_end() {
        let err = decode(&point(), r#" { "y" : 5 } "#).unwrap_err();
        assert_eq!(err.to_string(), "Missing required field 'x' at offset 12");
    }

    #[test]
    fn more_than_sixty_four_required_fields() {
        let mut codec = object_with(|| vec![0u8; 70]);
        for i in 0..70 {
            codec = codec.required_custom(
                &format!("f{i}"),
                move |ctx, out: &mut Vec<u8>| {
                    out[i] = number::<u8>().decode(ctx)?;
                    Ok(())
                },
                move |ctx, values: &Vec<u8>| number::<u8>().encode(ctx, &values[i]),
            );
        }
        let mut input = String::from("{");
        for i in 0..70 {
            if i > 0 {
                input.push(',');
            }
            input.push_str(&format!("\"f{i}\":{i}"));
        }
        input.push('}');
        let values = decode(&codec, &input).unwrap();
        assert_eq!(values[69], 69);
        assert_eq!(encode_string(&codec, &values).unwrap(), input);

        let truncated = input.replace(",\"f69\":69", "");
        let err = decode(&codec, &truncated).unwrap_err();
        assert_eq!(err.kind(), &DecodeErrorKind::MissingRequiredField("f69".into()));
    }

    #[derive(Debug, Default, PartialEq)]
    struct Celsius {
        tenths: i64,
    }

    #[test]
    fn accessor_fields() {
        let codec = object::<Celsius>().required_with(
            "degrees",
            Accessor::new(
                |c: &Celsius| c.tenths as f64 / 10.0,
                |c: &mut Celsius, v: f64| c.tenths = (v * 10.0).round() as i64,
            ),
            number::<f64>(),
        );
        let value = decode(&codec, r#"{"degrees": 21.5}"#).unwrap();
        assert_eq!(value.tenths, 215);
        assert_eq!(encode_string(&codec, &value).unwrap(), r#"{"degrees":21.5}"#);
    }

    #[derive(Debug, Default, PartialEq)]
    struct Outer {
        label: String,
        inner: Inner,
        tags: Vec<String>,
        note: Option<String>,
    }

    #[derive(Debug, Default, PartialEq)]
    struct Inner {
        depth: u8,
    }

    #[test]
    fn nested_member_paths_and_optional_fields() {
        let codec = object::<Outer>()
            .required_with("label", member!(Outer, label), string())
            .required("depth", member!(Outer, inner.depth))
            .optional_with("tags", member!(Outer, tags), array(string()))
            .optional_with("note", member!(Outer, note), optional(string()));

        let value = decode(&codec, r#"{"label":"a","depth":3}"#).unwrap();
        assert_eq!(value.inner.depth, 3);
        assert!(value.tags.is_empty());
        assert_eq!(
            encode_string(&codec, &value).unwrap(),
            r#"{"label":"a","depth":3,"tags":[]}"#
        );

        let value = decode(&codec, r#"{"label":"b","depth":0,"note":"hi"}"#).unwrap();
        assert_eq!(value.note.as_deref(), Some("hi"));
        assert_eq!(
            encode_string(&codec, &value).unwrap(),
            r#"{"label":"b","depth":0,"tags":[],"note":"hi"}"#
        );
    }

    #[test]
    fn escaped_key_lookup() {
        let codec = object::<Point>()
            .required("x\"", member!(Point, x))
            .optional("y", member!(Point, y));
        assert_eq!(decode(&codec, r#"{"x\"":4,"y":5}"#), Ok(Point { x: 4, y: 5 }));
        assert_eq!(
            encode_string(&codec, &Point { x: 4, y: 5 }).unwrap(),
            r#"{"x\"":4,"y":5}"#
        );
    }

    #[test]
    #[should_panic(expected = "duplicate field name 'x'")]
    fn duplicate_registration_panics() {
        let _ = object::<Point>()
            .required("x", member!(Point, x))
            .optional("x", member!(Point, y));
    }

    #[test]
    fn field_names_in_order() {
        assert_eq!(point().field_names().collect::<Vec<_>>(), ["x", "y"]);
    }
}
