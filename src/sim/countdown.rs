//! Cancellable one-second ticker
//!
//! The driver feeds wall-clock deltas; the countdown reports how many whole
//! seconds elapsed and carries the remainder. A cancelled countdown never
//! fires and forgets any partial second.

use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct Countdown {
    armed: bool,
    accumulated: Duration,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start ticking from a clean slate
    pub fn arm(&mut self) {
        self.armed = true;
        self.accumulated = Duration::ZERO;
    }

    /// Stop ticking; safe to call when already cancelled
    pub fn cancel(&mut self) {
        self.armed = false;
        self.accumulated = Duration::ZERO;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Feed elapsed wall time, returning the number of whole seconds that fired
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if !self.armed {
            return 0;
        }
        self.accumulated = self.accumulated.saturating_add(dt);
        let whole = self.accumulated.as_secs();
        self.accumulated -= Duration::from_secs(whole);
        u32::try_from(whole).unwrap_or(u32::MAX)
    }
}

/// Wall-clock delta from a host timestamp difference in milliseconds.
///
/// Negative and NaN deltas count as zero; oversized ones saturate.
pub fn duration_from_millis(ms: f64) -> Duration {
    if ms.is_nan() || ms <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(ms / 1000.0).unwrap_or(Duration::MAX)
}
