//! Wall-Clock Timing
//!
//! Thin wrapper over `std::time::Instant` that reports whole microseconds,
//! the resolution every tablebench measurement is recorded at.

use std::time::{Duration, Instant};

// ─── Timer ───────────────────────────────────────────────────────────────────

/// Timer for a single render iteration
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer
    #[inline(always)]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed time since `start`
    #[inline(always)]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer and return elapsed whole microseconds (truncated)
    #[inline(always)]
    pub fn stop_micros(&self) -> u64 {
        duration_micros(self.elapsed())
    }
}

/// Truncate a duration to whole microseconds, saturating at `u64::MAX`
pub fn duration_micros(d: Duration) -> u64 {
    u64::try_from(d.as_micros()).unwrap_or(u64::MAX)
}
