#![forbid(unsafe_code)]

//! Animation primitives.
//!
//! Everything that moves over time implements [`Animation`]: a value that
//! advances when ticked by a frame delta and eventually completes.
//!
//! | Type | Role |
//! |------|------|
//! | [`Tween`] | Eased interpolation between two values over a fixed duration |
//! | [`Glide`] | Exponential approach to a target (momentum settling) |
//! | [`LoopTimeline`] | Cyclic playhead with loop counts and direction |
//! | [`TweenScheduler`] | Handle-based set of running motions with overwrite |
//!
//! # Invariants
//!
//! 1. Easing functions map 0.0 → 0.0 and 1.0 → 1.0.
//! 2. `tick()` on a completed animation is a no-op.
//! 3. `reset()` restores the initial value and clears completion.

use std::time::Duration;

pub mod glide;
pub mod scheduler;
pub mod timeline;
pub mod tween;

pub use glide::{Glide, GlideConfig};
pub use scheduler::{MotionSample, TweenHandle, TweenScheduler};
pub use timeline::{LoopCount, LoopTimeline, PlaybackState};
pub use tween::Tween;

/// A value that evolves over time.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end state.
    fn is_complete(&self) -> bool;

    /// Current value.
    fn value(&self) -> f64;

    /// Return to the initial state.
    fn reset(&mut self);
}

/// Easing curve: maps normalized time in `[0, 1]` to normalized progress.
pub type EasingFn = fn(f64) -> f64;

/// Constant speed.
#[must_use]
pub fn linear(t: f64) -> f64 {
    t
}

/// Quadratic acceleration from rest.
#[must_use]
pub fn ease_in(t: f64) -> f64 {
    t * t
}

/// Quadratic deceleration to rest.
#[must_use]
pub fn ease_out(t: f64) -> f64 {
    t * (2.0 - t)
}

/// Quadratic acceleration then deceleration.
#[must_use]
pub fn ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

/// Cubic acceleration from rest.
#[must_use]
pub fn ease_in_cubic(t: f64) -> f64 {
    t * t * t
}

/// Cubic deceleration to rest.
#[must_use]
pub fn ease_out_cubic(t: f64) -> f64 {
    let u = 1.0 - t;
    1.0 - u * u * u
}

/// Cubic acceleration then deceleration.
#[must_use]
pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: [EasingFn; 7] = [
        linear,
        ease_in,
        ease_out,
        ease_in_out,
        ease_in_cubic,
        ease_out_cubic,
        ease_in_out_cubic,
    ];

    #[test]
    fn curves_hit_endpoints() {
        for curve in CURVES {
            assert!(curve(0.0).abs() < 1e-12);
            assert!((curve(1.0) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn in_out_is_symmetric_at_midpoint() {
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-12);
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-12);
    }
}
