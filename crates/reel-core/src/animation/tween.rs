#![forbid(unsafe_code)]

//! Eased interpolation between two values.
//!
//! # Failure Modes
//!
//! - Zero duration: the tween is complete on construction and reports `to`.

use std::time::Duration;

use super::{Animation, EasingFn, linear};
use crate::geometry::lerp;

/// Interpolates from `from` to `to` over `duration`.
#[derive(Debug, Clone)]
pub struct Tween {
    from: f64,
    to: f64,
    duration: Duration,
    elapsed: Duration,
    easing: EasingFn,
}

impl Tween {
    /// Create a linear tween.
    #[must_use]
    pub fn new(from: f64, to: f64, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing: linear,
        }
    }

    /// Set the easing curve (builder pattern).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Total duration.
    #[inline]
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Normalized time in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }
}

impl Animation for Tween {
    fn tick(&mut self, dt: Duration) {
        if self.is_complete() {
            return;
        }
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f64 {
        if self.is_complete() {
            return self.to;
        }
        lerp(self.from, self.to, (self.easing)(self.progress()))
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}
