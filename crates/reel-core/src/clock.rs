#![forbid(unsafe_code)]

//! Per-frame clock sources.
//!
//! A [`FrameClock`] answers "what time is it" once per display refresh. The
//! [`FrameTicker`] turns successive frame timestamps into bounded deltas that
//! animations can be advanced by.
//!
//! # Invariants
//!
//! 1. The first delta a ticker reports is zero.
//! 2. Deltas never exceed the ticker's `max_delta` (a backgrounded tab must
//!    not fast-forward a tween to completion in one frame).
//! 3. A timestamp earlier than the previous one yields a zero delta.

use std::cell::Cell;
use std::time::Duration;

use web_time::Instant;

/// Default cap on a single frame delta.
pub const DEFAULT_MAX_FRAME_DELTA: Duration = Duration::from_millis(100);

/// Source of frame timestamps.
pub trait FrameClock {
    /// Timestamp of the current frame.
    fn now(&self) -> Instant;
}

/// Wall clock (uses `performance.now()` on wasm via `web-time`).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl FrameClock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock for tests and deterministic replays.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<Instant>,
}

impl ManualClock {
    /// Create a clock frozen at `start`.
    #[must_use]
    pub fn new(start: Instant) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Move the clock forward by `dt`.
    pub fn advance(&self, dt: Duration) {
        self.now.set(self.now.get() + dt);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

impl FrameClock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Converts frame timestamps into capped deltas.
#[derive(Debug, Clone)]
pub struct FrameTicker {
    last: Option<Instant>,
    max_delta: Duration,
}

impl FrameTicker {
    /// Create a ticker with the default delta cap.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last: None,
            max_delta: DEFAULT_MAX_FRAME_DELTA,
        }
    }

    /// Set the delta cap (builder pattern). Zero disables capping.
    #[must_use]
    pub fn with_max_delta(mut self, max_delta: Duration) -> Self {
        self.max_delta = max_delta;
        self
    }

    /// Record a frame at `now` and return the time since the previous frame.
    pub fn delta(&mut self, now: Instant) -> Duration {
        let dt = match self.last {
            Some(last) => now.saturating_duration_since(last),
            None => Duration::ZERO,
        };
        self.last = Some(now);
        if self.max_delta.is_zero() {
            dt
        } else {
            dt.min(self.max_delta)
        }
    }

    /// Forget the previous frame (e.g. after the host stopped rendering).
    pub fn reset(&mut self) {
        self.last = None;
    }
}

impl Default for FrameTicker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_16: Duration = Duration::from_millis(16);

    #[test]
    fn first_delta_is_zero() {
        let clock = ManualClock::default();
        let mut ticker = FrameTicker::new();
        assert_eq!(ticker.delta(clock.now()), Duration::ZERO);
        clock.advance(MS_16);
        assert_eq!(ticker.delta(clock.now()), MS_16);
    }

    #[test]
    fn long_gap_is_capped() {
        let clock = ManualClock::default();
        let mut ticker = FrameTicker::new();
        ticker.delta(clock.now());
        clock.advance(Duration::from_secs(5));
        assert_eq!(ticker.delta(clock.now()), DEFAULT_MAX_FRAME_DELTA);
    }

    #[test]
    fn zero_cap_disables_capping() {
        let clock = ManualClock::default();
        let mut ticker = FrameTicker::new().with_max_delta(Duration::ZERO);
        ticker.delta(clock.now());
        clock.advance(Duration::from_secs(5));
        assert_eq!(ticker.delta(clock.now()), Duration::from_secs(5));
    }

    #[test]
    fn reset_restarts_from_zero() {
        let clock = ManualClock::default();
        let mut ticker = FrameTicker::new();
        ticker.delta(clock.now());
        clock.advance(MS_16);
        ticker.reset();
        assert_eq!(ticker.delta(clock.now()), Duration::ZERO);
    }
}
