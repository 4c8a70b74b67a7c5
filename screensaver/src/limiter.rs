//! Frame-rate cap for hosts that tick faster than the target rate.
//!
//! Ticks arriving sooner than one interval after the last admitted tick are
//! skipped. The remainder past a whole interval is carried over, so the sum of
//! admitted deltas tracks wall-clock time.

#[cfg(test)]
#[path = "limiter_test.rs"]
mod limiter_test;

use crate::consts::TARGET_FPS;

#[derive(Debug, Clone)]
pub struct FrameLimiter {
    interval_ms: f64,
    last_ms: Option<f64>,
}

impl Default for FrameLimiter {
    fn default() -> Self {
        Self::new(TARGET_FPS)
    }
}

impl FrameLimiter {
    /// A limiter admitting at most `fps` ticks per second. `fps <= 0` disables the cap.
    #[must_use]
    pub fn new(fps: f64) -> Self {
        let interval_ms = if fps > 0.0 && fps.is_finite() { 1000.0 / fps } else { 0.0 };
        Self { interval_ms, last_ms: None }
    }

    /// Offer a tick at `now_ms`. Returns the seconds to integrate, or `None`
    /// when the tick is skipped. The first tick admits with zero delta.
    pub fn admit(&mut self, now_ms: f64) -> Option<f64> {
        let Some(last) = self.last_ms else {
            self.last_ms = Some(now_ms);
            return Some(0.0);
        };
        let elapsed = now_ms - last;
        if elapsed < 0.0 {
            // Clock went backwards; restart the reference point.
            self.last_ms = Some(now_ms);
            return Some(0.0);
        }
        if self.interval_ms <= 0.0 {
            self.last_ms = Some(now_ms);
            return Some(elapsed / 1000.0);
        }
        if elapsed < self.interval_ms {
            return None;
        }
        let carry = elapsed % self.interval_ms;
        let admitted = elapsed - carry;
        self.last_ms = Some(now_ms - carry);
        Some(admitted / 1000.0)
    }

    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
