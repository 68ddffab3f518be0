// src/common/timing.rs

use core::time::Duration;

// Nominal values from the SPS30 datasheet (Sec 6.3, command execution times).

/// Wait between two data-ready polls.
pub const POLL_BACKOFF: Duration = Duration::from_millis(500);
/// Data-ready polls made before giving up on a measurement read.
pub const MAX_POLL_ATTEMPTS: u32 = 5;

/// Time the sensor needs after a reset before it accepts commands again.
pub const RESET_STARTUP: Duration = Duration::from_millis(100);

/// Converts a duration to the whole milliseconds taken by `Sps30Timer`,
/// saturating at `u32::MAX`.
pub(crate) fn as_delay_ms(d: Duration) -> u32 {
    u32::try_from(d.as_millis()).unwrap_or(u32::MAX)
}
