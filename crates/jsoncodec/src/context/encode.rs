use alloc::vec::Vec;

use crate::{cpu::CpuFeatures, options::EncodeOptions};

/// The output buffer threaded through every
/// [`Codec::encode`](crate::Codec::encode) call.
///
/// Writers ask for room with [`reserve`](Self::reserve), fill some prefix of
/// the returned slice, and then commit exactly that many bytes with
/// [`advance`](Self::advance). Growing the buffer never touches bytes that
/// were already committed.
#[derive(Debug, Clone)]
pub struct EncodeContext {
    // Always fully initialized: `buf.len()` is the capacity.
    buf: Vec<u8>,
    size: usize,
    cpu: CpuFeatures,
    initial_capacity: usize,
}

impl Default for EncodeContext {
    fn default() -> Self {
        Self::new()
    }
}

impl EncodeContext {
    /// An empty context. Nothing is allocated until the first write.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(EncodeOptions::default())
    }

    #[must_use]
    pub fn with_options(options: EncodeOptions) -> Self {
        Self {
            buf: Vec::new(),
            size: 0,
            cpu: CpuFeatures::for_mode(options.simd),
            initial_capacity: options.initial_capacity.max(1),
        }
    }

    #[must_use]
    pub fn cpu_features(&self) -> CpuFeatures {
        self.cpu
    }

    /// Returns `n` contiguous writable bytes directly after the committed
    /// output. Their contents are unspecified.
    ///
    /// # Panics
    ///
    /// If the total size would overflow `usize`.
    #[inline]
    pub fn reserve(&mut self, n: usize) -> &mut [u8] {
        let Some(required) = self.size.checked_add(n) else {
            capacity_overflow()
        };
        if required > self.buf.len() {
            self.grow(required);
        }
        &mut self.buf[self.size..required]
    }

    #[cold]
    #[inline(never)]
    fn grow(&mut self, required: usize) {
        let old = self.buf.len();
        let capacity = required
            .max(old.saturating_mul(2))
            .max(self.initial_capacity);
        if old != 0 {
            log::debug!("encode buffer grows from {old} to {capacity} bytes");
        }
        // Zero-fills only the new tail `old..capacity`, so each byte of
        // capacity is initialized once over the buffer's lifetime.
        self.buf.resize(capacity, 0);
    }

    /// Commits `n` bytes written into the slice returned by the last
    /// [`reserve`](Self::reserve).
    #[inline]
    pub fn advance(&mut self, n: usize) {
        debug_assert!(
            self.size + n <= self.buf.len(),
            "committed more bytes than were reserved"
        );
        self.size = self.size.saturating_add(n).min(self.buf.len());
    }

    #[inline]
    pub fn append(&mut self, byte: u8) {
        self.reserve(1)[0] = byte;
        self.size += 1;
    }

    #[inline]
    pub fn append_slice(&mut self, bytes: &[u8]) {
        self.reserve(bytes.len()).copy_from_slice(bytes);
        self.size += bytes.len();
    }

    /// The committed output.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.buf[..self.size]
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Takes the committed output and leaves the context empty, without an
    /// allocation, ready for another encode.
    pub fn steal_data(&mut self) -> Vec<u8> {
        let mut buf = core::mem::take(&mut self.buf);
        buf.truncate(self.size);
        self.size = 0;
        buf
    }

    #[must_use]
    pub fn into_vec(mut self) -> Vec<u8> {
        self.steal_data()
    }

    /// Discards the committed output but keeps the allocation.
    pub fn clear(&mut self) {
        self.size = 0;
    }
}

#[cold]
#[inline(never)]
fn capacity_overflow() -> ! {
    panic!("encode buffer size overflows usize")
}
