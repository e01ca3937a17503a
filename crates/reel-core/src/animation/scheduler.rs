#![forbid(unsafe_code)]

//! Handle-based motion scheduler.
//!
//! The scheduler owns running motions (any [`Animation`]) and advances them
//! once per frame. Instead of invoking update/complete callbacks, which would
//! need to borrow the owner mutably, [`TweenScheduler::advance`] returns one
//! [`MotionSample`] per running motion; the owner applies the values and
//! reacts to completion itself. Each motion carries a caller-defined tag so
//! the owner knows what the value drives.
//!
//! # Invariants
//!
//! 1. Handles are never reused within one scheduler.
//! 2. A completed motion yields exactly one sample with `complete == true`
//!    and is then dropped.
//! 3. A cancelled motion yields no further samples.
//! 4. Samples are returned in scheduling order.

use std::time::Duration;

use super::{Animation, EasingFn, Tween};

/// Identifies a scheduled motion; used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenHandle(u64);

/// Value produced by one motion during [`TweenScheduler::advance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSample<T> {
    /// Handle of the motion.
    pub handle: TweenHandle,
    /// Caller-defined tag.
    pub tag: T,
    /// Motion value after this frame.
    pub value: f64,
    /// The motion finished this frame.
    pub complete: bool,
}

struct Entry<T> {
    handle: TweenHandle,
    tag: T,
    motion: Box<dyn Animation>,
}

/// Running motions keyed by handle.
pub struct TweenScheduler<T> {
    entries: Vec<Entry<T>>,
    next_id: u64,
}

impl<T: std::fmt::Debug> std::fmt::Debug for TweenScheduler<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tags: Vec<&T> = self.entries.iter().map(|e| &e.tag).collect();
        f.debug_struct("TweenScheduler")
            .field("active", &tags)
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl<T: Copy> TweenScheduler<T> {
    /// Create an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Start running `motion` under `tag`.
    pub fn schedule(&mut self, tag: T, motion: impl Animation + 'static) -> TweenHandle {
        let handle = TweenHandle(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            handle,
            tag,
            motion: Box::new(motion),
        });
        handle
    }

    /// Start an eased tween from `from` to `to`.
    pub fn schedule_tween(
        &mut self,
        tag: T,
        from: f64,
        to: f64,
        duration: Duration,
        easing: EasingFn,
    ) -> TweenHandle {
        self.schedule(tag, Tween::new(from, to, duration).easing(easing))
    }

    /// Cancel one motion. Returns `false` if it already finished or was cancelled.
    pub fn cancel(&mut self, handle: TweenHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    /// Cancel every motion whose tag matches. Returns how many were cancelled.
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&T) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !pred(&e.tag));
        before - self.entries.len()
    }

    /// Cancel everything.
    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    /// Number of running motions.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// No motions running.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Advance every motion by `dt`, returning their new values.
    pub fn advance(&mut self, dt: Duration) -> Vec<MotionSample<T>> {
        let mut out = Vec::with_capacity(self.entries.len());
        for entry in &mut self.entries {
            entry.motion.tick(dt);
            out.push(MotionSample {
                handle: entry.handle,
                tag: entry.tag,
                value: entry.motion.value(),
                complete: entry.motion.is_complete(),
            });
        }
        self.entries.retain(|e| !e.motion.is_complete());
        out
    }
}

impl<T: Copy> Default for TweenScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::linear;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Tag {
        Nav,
        Settle,
    }

    const MS_100: Duration = Duration::from_millis(100);

    #[test]
    fn samples_until_complete_then_drops() {
        let mut sched = TweenScheduler::new();
        let h = sched.schedule_tween(Tag::Nav, 0.0, 2.0, Duration::from_millis(200), linear);

        let s = sched.advance(MS_100);
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].handle, h);
        assert!((s[0].value - 1.0).abs() < 1e-9);
        assert!(!s[0].complete);

        let s = sched.advance(MS_100);
        assert!(s[0].complete);
        assert_eq!(s[0].value, 2.0);
        assert!(sched.is_empty());
        assert!(sched.advance(MS_100).is_empty());
    }

    #[test]
    fn cancel_stops_samples() {
        let mut sched = TweenScheduler::new();
        let h = sched.schedule_tween(Tag::Nav, 0.0, 1.0, MS_100, linear);
        assert!(sched.cancel(h));
        assert!(!sched.cancel(h));
        assert!(sched.advance(MS_100).is_empty());
    }

    #[test]
    fn cancel_where_filters_by_tag() {
        let mut sched = TweenScheduler::new();
        sched.schedule_tween(Tag::Nav, 0.0, 1.0, MS_100, linear);
        let settle = sched.schedule_tween(Tag::Settle, 0.0, 1.0, MS_100, linear);
        assert_eq!(sched.cancel_where(|t| *t == Tag::Nav), 1);
        assert_eq!(sched.len(), 1);
        assert!(sched.cancel(settle));
    }

    #[test]
    fn handles_are_unique() {
        let mut sched = TweenScheduler::new();
        let a = sched.schedule_tween(Tag::Nav, 0.0, 1.0, MS_100, linear);
        sched.cancel_all();
        let b = sched.schedule_tween(Tag::Nav, 0.0, 1.0, MS_100, linear);
        assert_ne!(a, b);
    }

    #[test]
    fn zero_duration_completes_on_first_advance() {
        let mut sched = TweenScheduler::new();
        sched.schedule_tween(Tag::Nav, 0.0, 5.0, Duration::ZERO, linear);
        let s = sched.advance(Duration::ZERO);
        assert!(s[0].complete);
        assert_eq!(s[0].value, 5.0);
    }
}
