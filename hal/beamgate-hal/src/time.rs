//! Millisecond time source
//!
//! The core only ever compares timestamps by subtraction, so a clock that
//! wraps at `u32::MAX` (about 49.7 days) is fine.

/// Monotonic millisecond clock
///
/// Implementations return milliseconds since an arbitrary epoch (usually
/// boot). The value is non-decreasing except for wrapping past `u32::MAX`.
pub trait Monotonic {
    /// Current time in milliseconds
    fn now_ms(&self) -> u32;
}

impl<T: Monotonic + ?Sized> Monotonic for &T {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}
