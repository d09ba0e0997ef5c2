//! Mutable state threaded through one decode or encode call.

mod decode;
mod encode;

pub use decode::DecodeContext;
pub use encode::EncodeContext;
