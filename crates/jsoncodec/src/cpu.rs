//! Runtime CPU feature detection for the vectorized scanning paths.

use core::sync::atomic::{AtomicU8, Ordering};

use crate::options::SimdMode;

/// 0 = not yet detected, 1 = scalar only, 2 = SSE2 available.
static DETECTED: AtomicU8 = AtomicU8::new(0);

/// The instruction-set extensions a context may use.
///
/// Carried by every [`DecodeContext`](crate::DecodeContext) and
/// [`EncodeContext`](crate::EncodeContext) so the scanning primitives can pick
/// a fast path with a single branch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuFeatures {
    sse2: bool,
}

impl CpuFeatures {
    /// No extensions; every primitive takes the portable path.
    pub const SCALAR: Self = Self { sse2: false };

    /// Features of the running CPU. Detection happens once per process.
    #[must_use]
    pub fn detect() -> Self {
        match DETECTED.load(Ordering::Relaxed) {
            1 => Self::SCALAR,
            2 => Self { sse2: true },
            _ => {
                let sse2 = detect_sse2();
                log::debug!("jsoncodec cpu features: sse2={sse2}");
                DETECTED.store(if sse2 { 2 } else { 1 }, Ordering::Relaxed);
                Self { sse2 }
            }
        }
    }

    /// Features allowed under `mode`.
    #[must_use]
    pub fn for_mode(mode: SimdMode) -> Self {
        match mode {
            SimdMode::Auto => Self::detect(),
            SimdMode::Scalar => Self::SCALAR,
        }
    }

    #[must_use]
    pub fn has_sse2(self) -> bool {
        self.sse2
    }
}

#[cfg(all(target_arch = "x86_64", feature = "std"))]
fn detect_sse2() -> bool {
    std::is_x86_feature_detected!("sse2")
}

#[cfg(all(target_arch = "x86_64", not(feature = "std")))]
fn detect_sse2() -> bool {
    cfg!(target_feature = "sse2")
}

#[cfg(not(target_arch = "x86_64"))]
fn detect_sse2() -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_mode_disables_everything() {
        assert!(!CpuFeatures::for_mode(SimdMode::Scalar).has_sse2());
    }

    #[test]
    fn detection_is_stable() {
        assert_eq!(CpuFeatures::detect(), CpuFeatures::detect());
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn x86_64_always_has_sse2() {
        assert!(CpuFeatures::detect().has_sse2());
    }
}
