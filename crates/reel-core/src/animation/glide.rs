#![forbid(unsafe_code)]

//! Exponential glide: momentum settling after a throw.
//!
//! A thrown object with velocity `v` under exponential friction with time
//! constant `τ` travels `v × τ` before it stops:
//!
//!   x(t) = x₀ + v·τ·(1 − e^(−t/τ))
//!
//! Settling to a snapped target is the same curve with the target
//! substituted for the natural end point, so a [`Glide`] is parameterized by
//! its start and target rather than by velocity. Use
//! [`GlideConfig::projected_end`] to find the natural end point first, snap
//! it, then glide there.
//!
//! # Invariants
//!
//! 1. `value()` moves monotonically from start toward target.
//! 2. Once at rest, `value() == target()` exactly.
//! 3. A glide never runs longer than `max_duration`.
//!
//! # Failure Modes
//!
//! - Zero time constant: clamped to 1ms.
//! - Start already within the rest threshold: at rest on construction.

use std::time::Duration;

use super::Animation;

/// Minimum time constant to avoid division by zero.
const MIN_TIME_CONSTANT_SECS: f64 = 0.001;

/// Friction and rest parameters for momentum settling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlideConfig {
    /// Exponential decay time constant (default: 325ms).
    pub time_constant: Duration,
    /// Distance below which the glide is at rest (default: 0.5).
    pub rest_threshold: f64,
    /// Hard cap on settling time (default: 2.5s).
    pub max_duration: Duration,
}

impl Default for GlideConfig {
    fn default() -> Self {
        Self {
            time_constant: Duration::from_millis(325),
            rest_threshold: 0.5,
            max_duration: Duration::from_millis(2500),
        }
    }
}

impl GlideConfig {
    /// Where a throw starting at `position` with `velocity` (units/s) comes to rest.
    #[must_use]
    pub fn projected_end(&self, position: f64, velocity: f64) -> f64 {
        position + velocity * self.time_constant_secs()
    }

    fn time_constant_secs(&self) -> f64 {
        self.time_constant.as_secs_f64().max(MIN_TIME_CONSTANT_SECS)
    }
}

/// Exponential approach from a start value to a target.
#[derive(Debug, Clone)]
pub struct Glide {
    initial: f64,
    position: f64,
    target: f64,
    config: GlideConfig,
    elapsed: Duration,
    at_rest: bool,
}

impl Glide {
    /// Create a glide from `start` to `target`.
    #[must_use]
    pub fn new(start: f64, target: f64, config: GlideConfig) -> Self {
        let mut glide = Self {
            initial: start,
            position: start,
            target,
            config,
            elapsed: Duration::ZERO,
            at_rest: false,
        };
        glide.settle_if_close();
        glide
    }

    /// Current target.
    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    fn settle_if_close(&mut self) {
        if (self.position - self.target).abs() < self.config.rest_threshold {
            self.position = self.target;
            self.at_rest = true;
        }
    }
}

impl Animation for Glide {
    fn tick(&mut self, dt: Duration) {
        if self.at_rest || dt.is_zero() {
            return;
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        let decay = (-dt.as_secs_f64() / self.config.time_constant_secs()).exp();
        self.position = self.target + (self.position - self.target) * decay;
        self.settle_if_close();
        if self.elapsed >= self.config.max_duration {
            self.position = self.target;
            self.at_rest = true;
        }
    }

    fn is_complete(&self) -> bool {
        self.at_rest
    }

    fn value(&self) -> f64 {
        self.position
    }

    fn reset(&mut self) {
        self.position = self.initial;
        self.elapsed = Duration::ZERO;
        self.at_rest = false;
        self.settle_if_close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_16: Duration = Duration::from_millis(16);

    fn simulate(glide: &mut Glide, frames: usize) {
        for _ in 0..frames {
            glide.tick(MS_16);
        }
    }

    #[test]
    fn glide_reaches_target() {
        let mut glide = Glide::new(0.0, 300.0, GlideConfig::default());
        simulate(&mut glide, 200);
        assert!(glide.is_complete());
        assert_eq!(glide.value(), 300.0);
    }

    #[test]
    fn glide_is_monotonic() {
        let mut glide = Glide::new(100.0, -50.0, GlideConfig::default());
        let mut prev = glide.value();
        for _ in 0..60 {
            glide.tick(MS_16);
            assert!(glide.value() <= prev, "glide overshot backwards");
            assert!(glide.value() >= -50.0, "glide overshot target");
            prev = glide.value();
        }
    }

    #[test]
    fn start_at_target_is_at_rest() {
        let glide = Glide::new(10.0, 10.2, GlideConfig::default());
        assert!(glide.is_complete());
        assert_eq!(glide.value(), 10.2);
    }

    #[test]
    fn max_duration_forces_rest() {
        let config = GlideConfig {
            time_constant: Duration::from_secs(100),
            ..GlideConfig::default()
        };
        let mut glide = Glide::new(0.0, 1000.0, config);
        glide.tick(Duration::from_secs(3));
        assert!(glide.is_complete());
        assert_eq!(glide.value(), 1000.0);
    }

    #[test]
    fn projected_end_scales_with_velocity() {
        let config = GlideConfig::default();
        let end = config.projected_end(10.0, 1000.0);
        assert!((end - (10.0 + 325.0)).abs() < 1e-9);
    }
}
