//! Millisecond clock backed by the embassy time driver

use beamgate_hal::Monotonic;
use embassy_time::Instant;

/// Milliseconds since boot, truncated to `u32`
///
/// Wraps after about 49.7 days; the core compares timestamps by
/// subtraction so the wrap is harmless.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Monotonic for EmbassyClock {
    fn now_ms(&self) -> u32 {
        Instant::now().as_millis() as u32
    }
}
