#![forbid(unsafe_code)]

//! Cyclic playhead for looping animations.
//!
//! A [`LoopTimeline`] is a time position on a circle of circumference
//! `duration` seconds. It can be driven two ways:
//!
//! - **Playback**: while `Playing`, [`advance`](LoopTimeline::advance) moves
//!   the playhead forward (or backward when reversed) and applies the loop
//!   count at the boundary.
//! - **Direct**: [`set_time`](LoopTimeline::set_time) and
//!   [`set_progress`](LoopTimeline::set_progress) place the playhead anywhere;
//!   values outside the cycle are wrapped, so callers can tween through the
//!   seam with unwrapped times.
//!
//! Times are `f64` seconds rather than `Duration` because seam-crossing
//! navigation needs negative and beyond-the-end targets.
//!
//! # Invariants
//!
//! 1. `time()` is always in `[0, duration]`; it equals `duration` only when a
//!    finite loop count finished playing forward.
//! 2. `duration()` is always positive (clamped to [`MIN_DURATION`]).
//! 3. The loop counter decrements only when forward playback crosses the end.
//! 4. Reversed playback wraps through zero indefinitely.
//!
//! # Failure Modes
//!
//! - Zero or negative duration: clamped to [`MIN_DURATION`].
//! - Non-finite time: treated as zero.

use std::time::Duration;

use super::Animation;
use crate::geometry::wrap;

/// Smallest permitted cycle length in seconds.
pub const MIN_DURATION: f64 = 1e-9;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// How many times to loop the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoopCount {
    /// Play once (no looping).
    #[default]
    Once,
    /// Repeat a fixed number of times (total plays = times + 1).
    Times(u32),
    /// Loop forever.
    Infinite,
}

impl LoopCount {
    fn remaining(self) -> u32 {
        match self {
            Self::Once => 0,
            Self::Times(n) => n,
            Self::Infinite => u32::MAX,
        }
    }
}

/// Playback state of the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Advancing on every frame.
    Playing,
    /// Held at the current position.
    Paused,
    /// Reached the end (all loops exhausted).
    Finished,
}

/// A looping playhead.
#[derive(Debug, Clone)]
pub struct LoopTimeline {
    duration: f64,
    time: f64,
    loop_count: LoopCount,
    loops_remaining: u32,
    state: PlaybackState,
    reversed: bool,
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl LoopTimeline {
    /// Create a paused timeline with the given cycle length in seconds.
    #[must_use]
    pub fn new(duration: f64) -> Self {
        Self {
            duration: clamp_duration(duration),
            time: 0.0,
            loop_count: LoopCount::Once,
            loops_remaining: 0,
            state: PlaybackState::Paused,
            reversed: false,
        }
    }

    /// Set the loop count (builder pattern).
    #[must_use]
    pub fn with_loop_count(mut self, count: LoopCount) -> Self {
        self.loop_count = count;
        self.loops_remaining = count.remaining();
        self
    }

    /// Play backward (builder pattern).
    #[must_use]
    pub fn with_reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    /// Replace the cycle length keeping the playhead at the same fraction
    /// of the cycle. Playback state is untouched.
    pub fn rescale(&mut self, duration: f64) {
        let progress = self.progress();
        self.duration = clamp_duration(duration);
        self.time = (progress * self.duration).min(self.duration);
    }
}

impl Default for LoopTimeline {
    fn default() -> Self {
        Self::new(1.0)
    }
}

fn clamp_duration(duration: f64) -> f64 {
    if duration.is_finite() && duration > MIN_DURATION {
        duration
    } else {
        MIN_DURATION
    }
}

// ---------------------------------------------------------------------------
// Playback control
// ---------------------------------------------------------------------------

impl LoopTimeline {
    /// Start or resume playback from the current position.
    ///
    /// A finished timeline restarts from the beginning with its loop count
    /// replenished.
    pub fn play(&mut self) {
        if self.state == PlaybackState::Finished {
            self.time = if self.reversed { self.duration } else { 0.0 };
            self.loops_remaining = self.loop_count.remaining();
        }
        self.state = PlaybackState::Playing;
    }

    /// Hold at the current position. No-op unless playing.
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    /// Place the playhead at `time` seconds, wrapping into the cycle.
    pub fn set_time(&mut self, time: f64) {
        self.time = if time.is_finite() {
            wrap(0.0, self.duration, time)
        } else {
            0.0
        };
        if self.state == PlaybackState::Finished {
            self.state = PlaybackState::Paused;
        }
    }

    /// Place the playhead at a fraction of the cycle, wrapping into `[0, 1)`.
    pub fn set_progress(&mut self, progress: f64) {
        self.set_time(progress * self.duration);
    }

    /// Advance playback by `dt`. Returns `true` if the playhead moved.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if self.state != PlaybackState::Playing || dt.is_zero() {
            return false;
        }
        let step = dt.as_secs_f64();
        if self.reversed {
            self.time = wrap(0.0, self.duration, self.time - step);
            return true;
        }

        let next = self.time + step;
        if next < self.duration {
            self.time = next;
            return true;
        }
        if self.loop_count != LoopCount::Infinite {
            // Number of times the end was crossed during this step.
            let cycles = (next / self.duration).floor();
            if cycles > f64::from(self.loops_remaining) {
                self.time = self.duration;
                self.state = PlaybackState::Finished;
                return true;
            }
            self.loops_remaining -= cycles as u32;
        }
        self.time = wrap(0.0, self.duration, next);
        true
    }

    /// Current playhead in seconds.
    #[inline]
    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Cycle length in seconds.
    #[inline]
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Playhead as a fraction of the cycle, in `[0, 1]`.
    #[inline]
    #[must_use]
    pub fn progress(&self) -> f64 {
        (self.time / self.duration).clamp(0.0, 1.0)
    }

    /// Current playback state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Whether playback is advancing.
    #[inline]
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Whether playback runs backward.
    #[inline]
    #[must_use]
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }
}

// ---------------------------------------------------------------------------
// Animation trait implementation
// ---------------------------------------------------------------------------

impl Animation for LoopTimeline {
    fn tick(&mut self, dt: Duration) {
        self.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.state == PlaybackState::Finished
    }

    fn value(&self) -> f64 {
        self.progress()
    }

    fn reset(&mut self) {
        self.time = 0.0;
        self.loops_remaining = self.loop_count.remaining();
        self.state = PlaybackState::Paused;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const MS_250: Duration = Duration::from_millis(250);
    const SEC_1: Duration = Duration::from_secs(1);

    #[test]
    fn new_timeline_is_paused_at_zero() {
        let tl = LoopTimeline::new(2.0);
        assert_eq!(tl.state(), PlaybackState::Paused);
        assert_eq!(tl.time(), 0.0);
        assert_eq!(tl.duration(), 2.0);
    }

    #[test]
    fn paused_timeline_does_not_advance() {
        let mut tl = LoopTimeline::new(2.0);
        assert!(!tl.advance(SEC_1));
        assert_eq!(tl.time(), 0.0);
    }

    #[test]
    fn once_finishes_at_end() {
        let mut tl = LoopTimeline::new(1.0);
        tl.play();
        tl.advance(Duration::from_millis(1500));
        assert_eq!(tl.state(), PlaybackState::Finished);
        assert_eq!(tl.time(), 1.0);
        assert!(tl.is_complete());
    }

    #[test]
    fn infinite_wraps_with_overshoot() {
        let mut tl = LoopTimeline::new(1.0).with_loop_count(LoopCount::Infinite);
        tl.play();
        tl.advance(Duration::from_millis(2250));
        assert!(tl.is_playing());
        assert!((tl.time() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn times_counts_down() {
        let mut tl = LoopTimeline::new(1.0).with_loop_count(LoopCount::Times(1));
        tl.play();
        tl.advance(Duration::from_millis(1500));
        assert!(tl.is_playing(), "first repeat still running");
        tl.advance(SEC_1);
        assert_eq!(tl.state(), PlaybackState::Finished);
    }

    #[test]
    fn reversed_wraps_through_zero() {
        let mut tl = LoopTimeline::new(1.0).with_reversed(true);
        tl.play();
        tl.advance(MS_250);
        assert!((tl.time() - 0.75).abs() < 1e-9);
        assert!(tl.is_playing());
    }

    #[test]
    fn set_time_wraps() {
        let mut tl = LoopTimeline::new(4.0);
        tl.set_time(-1.0);
        assert_eq!(tl.time(), 3.0);
        tl.set_time(9.0);
        assert_eq!(tl.time(), 1.0);
        tl.set_time(f64::NAN);
        assert_eq!(tl.time(), 0.0);
    }

    #[test]
    fn set_progress_maps_fraction() {
        let mut tl = LoopTimeline::new(4.0);
        tl.set_progress(0.25);
        assert_eq!(tl.time(), 1.0);
        assert_eq!(tl.progress(), 0.25);
        tl.set_progress(1.25);
        assert_eq!(tl.progress(), 0.25);
    }

    #[test]
    fn zero_duration_clamped() {
        let tl = LoopTimeline::new(0.0);
        assert!(tl.duration() > 0.0);
    }

    #[test]
    fn play_after_finish_restarts() {
        let mut tl = LoopTimeline::new(1.0);
        tl.play();
        tl.advance(Duration::from_secs(2));
        tl.play();
        assert_eq!(tl.time(), 0.0);
        assert!(tl.is_playing());
    }

    #[test]
    fn rescale_preserves_progress_and_state() {
        let mut tl = LoopTimeline::new(4.0);
        tl.set_time(1.0);
        tl.play();
        tl.rescale(8.0);
        assert_eq!(tl.time(), 2.0);
        assert_eq!(tl.progress(), 0.25);
        assert!(tl.is_playing());
    }

    #[test]
    fn huge_step_wraps_in_constant_time() {
        let mut tl = LoopTimeline::new(6.0).with_loop_count(LoopCount::Infinite);
        tl.play();
        assert!(tl.advance(Duration::from_secs(u64::MAX / 2)));
        assert!(tl.is_playing());
        assert!((0.0..6.0).contains(&tl.time()));

        let mut tiny = LoopTimeline::new(0.0).with_loop_count(LoopCount::Infinite);
        tiny.play();
        tiny.advance(SEC_1);
        assert!((0.0..MIN_DURATION).contains(&tiny.time()));
    }

    #[test]
    fn times_skips_several_cycles_in_one_step() {
        let mut tl = LoopTimeline::new(1.0).with_loop_count(LoopCount::Times(3));
        tl.play();
        tl.advance(Duration::from_millis(2500));
        assert!(tl.is_playing());
        assert!((tl.time() - 0.5).abs() < 1e-9);
        tl.advance(SEC_1);
        assert!(tl.is_playing(), "last repeat still running");
        tl.advance(SEC_1);
        assert_eq!(tl.state(), PlaybackState::Finished);
        assert_eq!(tl.time(), 1.0);

        let mut capped = LoopTimeline::new(1.0).with_loop_count(LoopCount::Times(2));
        capped.play();
        capped.advance(Duration::from_secs(u64::MAX / 2));
        assert_eq!(capped.state(), PlaybackState::Finished);
    }
}
