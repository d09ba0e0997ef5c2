/// Selects between the vectorized and the portable scanning routines.
///
/// Both produce identical results; `Scalar` exists for testing and for
/// targets where the vector path is undesirable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SimdMode {
    /// Use vector instructions when the running CPU supports them.
    #[default]
    Auto,
    /// Always use the portable byte-at-a-time routines.
    Scalar,
}

/// Configuration for a [`DecodeContext`](crate::DecodeContext).
///
/// # Examples
///
/// ```rust
/// use jsoncodec::{DecodeOptions, SimdMode, codec::string, decode_with};
///
/// let options = DecodeOptions {
///     simd: SimdMode::Scalar,
/// };
/// let value = decode_with(&string(), r#""plain""#, options).unwrap();
/// assert_eq!(value, "plain");
/// ```
///
/// # Default
///
/// `simd` defaults to [`SimdMode::Auto`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeOptions {
    /// Whether whitespace and string scanning may use vector instructions.
    ///
    /// # Default
    ///
    /// [`SimdMode::Auto`]
    pub simd: SimdMode,
}

/// Configuration for an [`EncodeContext`](crate::EncodeContext).
///
/// # Default
///
/// `simd` defaults to [`SimdMode::Auto`] and `initial_capacity` to 1024 bytes.
#[derive(Debug, Clone, Copy)]
pub struct EncodeOptions {
    /// Whether string escaping may use vector instructions.
    ///
    /// # Default
    ///
    /// [`SimdMode::Auto`]
    pub simd: SimdMode,

    /// Number of bytes allocated on the first write. The buffer doubles
    /// from there whenever it runs out of room.
    ///
    /// # Default
    ///
    /// `1024`
    pub initial_capacity: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            simd: SimdMode::Auto,
            initial_capacity: 1024,
        }
    }
}
