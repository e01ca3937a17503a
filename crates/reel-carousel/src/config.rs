#![forbid(unsafe_code)]

//! Loop and navigation configuration.

use std::time::Duration;

use reel_core::animation::{EasingFn, LoopCount, linear};

use crate::error::{ConfigError, Result};

/// Increment that item x-percent offsets are rounded to.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SnapIncrement {
    /// Keep offsets exactly as measured.
    Disabled,
    /// Round to the nearest multiple.
    Step(f64),
}

impl SnapIncrement {
    /// Apply the increment to `value`.
    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::Disabled => value,
            Self::Step(step) => reel_core::geometry::snap(step, value),
        }
    }
}

impl Default for SnapIncrement {
    fn default() -> Self {
        Self::Step(1.0)
    }
}

/// Configuration for a [`LoopController`](crate::LoopController).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoopConfig {
    /// Playback speed; 1.0 moves 100px per second (default: 1.0).
    pub speed: f64,
    /// Rounding for x-percent offsets (default: step 1).
    pub snap: SnapIncrement,
    /// The active item is the one centered in the container rather than the
    /// one at its leading edge (default: false).
    pub center: bool,
    /// Enable pointer drag and throw (default: false).
    pub draggable: bool,
    /// Start paused (default: false).
    pub paused: bool,
    /// How often playback repeats (default: once).
    pub repeat: LoopCount,
    /// Play backward (default: false).
    pub reversed: bool,
    /// Extra space after the last item before the loop restarts, in px
    /// (default: 0).
    pub padding_right: f64,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            snap: SnapIncrement::default(),
            center: false,
            draggable: false,
            paused: false,
            repeat: LoopCount::Once,
            reversed: false,
            padding_right: 0.0,
        }
    }
}

impl LoopConfig {
    /// Set playback speed.
    #[must_use]
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    /// Set the x-percent rounding increment.
    #[must_use]
    pub fn with_snap(mut self, snap: SnapIncrement) -> Self {
        self.snap = snap;
        self
    }

    /// Measure the active item at the container's center.
    #[must_use]
    pub fn with_center(mut self, center: bool) -> Self {
        self.center = center;
        self
    }

    /// Enable or disable pointer dragging.
    #[must_use]
    pub fn with_draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    /// Start paused.
    #[must_use]
    pub fn with_paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }

    /// Set the loop count.
    #[must_use]
    pub fn with_repeat(mut self, repeat: LoopCount) -> Self {
        self.repeat = repeat;
        self
    }

    /// Play backward.
    #[must_use]
    pub fn with_reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    /// Set trailing padding in px.
    #[must_use]
    pub fn with_padding_right(mut self, padding: f64) -> Self {
        self.padding_right = padding;
        self
    }

    /// Pixels travelled per second of timeline time.
    ///
    /// Non-positive speeds are clamped so geometry stays finite.
    #[must_use]
    pub fn pixels_per_second(&self) -> f64 {
        let pps = self.speed * 100.0;
        if pps.is_finite() && pps > MIN_PIXELS_PER_SECOND {
            pps
        } else {
            MIN_PIXELS_PER_SECOND
        }
    }

    /// Reject speeds and snap increments the loop cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(ConfigError::NonPositiveSpeed(self.speed));
        }
        if let SnapIncrement::Step(step) = self.snap
            && !(step.is_finite() && step > 0.0)
        {
            return Err(ConfigError::InvalidSnap(step));
        }
        Ok(())
    }
}

const MIN_PIXELS_PER_SECOND: f64 = 1e-6;

/// How a navigation call moves the timeline.
#[derive(Debug, Clone, Copy)]
pub struct NavOptions {
    /// Transition length. `None` travels at playback speed; zero jumps.
    pub duration: Option<Duration>,
    /// Easing curve for the transition.
    pub ease: EasingFn,
}

impl NavOptions {
    /// Jump without animating.
    #[must_use]
    pub fn instant() -> Self {
        Self::over(Duration::ZERO)
    }

    /// Animate over a fixed duration.
    #[must_use]
    pub fn over(duration: Duration) -> Self {
        Self {
            duration: Some(duration),
            ease: linear,
        }
    }

    /// Set the easing curve (builder pattern).
    #[must_use]
    pub fn ease(mut self, ease: EasingFn) -> Self {
        self.ease = ease;
        self
    }
}

impl Default for NavOptions {
    fn default() -> Self {
        Self {
            duration: None,
            ease: linear,
        }
    }
}
