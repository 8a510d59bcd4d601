//! Wrapping millisecond arithmetic
//!
//! Timestamps are `u32` milliseconds that wrap at `u32::MAX`. Never compare
//! two timestamps directly; compare the elapsed time between them.

/// Milliseconds elapsed from `since` to `now`
///
/// Correct across a single wrap of the clock.
#[inline]
pub fn elapsed(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}
