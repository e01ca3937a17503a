#![forbid(unsafe_code)]

//! Geometric primitives and cyclic helpers.
//!
//! Horizontal layout in reel is one-dimensional: an item occupies a [`Span`]
//! in page pixels, and timeline positions live on a circle of some period.
//! The free functions here implement the wrap/snap/distance arithmetic the
//! loop controller is built on.
//!
//! # Invariants
//!
//! 1. `wrap(min, max, v)` lies in `[min, max)` for every finite `v` when
//!    `max > min`.
//! 2. `cyclic_distance(a, b, p)` lies in `[0, p / 2]` for finite inputs and
//!    `p > 0`.
//!
//! # Failure Modes
//!
//! - Empty or inverted ranges (`max <= min`) collapse to `min`.
//! - A non-positive snap increment disables snapping.

/// A horizontal extent in pixels.
///
/// Mirrors the left/right pair of a client bounding rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Span {
    /// Leading edge.
    pub left: f64,
    /// Trailing edge.
    pub right: f64,
}

impl Span {
    /// Create a span from its two edges.
    #[inline]
    #[must_use]
    pub const fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }

    /// Create a span from a leading edge and a width.
    #[inline]
    #[must_use]
    pub fn from_width(left: f64, width: f64) -> Self {
        Self::new(left, left + width)
    }

    /// Width of the span (never negative).
    #[inline]
    #[must_use]
    pub fn width(&self) -> f64 {
        (self.right - self.left).max(0.0)
    }

    /// Check if the span has no extent.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.right <= self.left
    }

    /// Shift both edges by `dx`.
    #[inline]
    #[must_use]
    pub fn translate(&self, dx: f64) -> Self {
        Self::new(self.left + dx, self.right + dx)
    }

    /// Gap from `self`'s trailing edge to `next`'s leading edge.
    ///
    /// Negative when the spans overlap.
    #[inline]
    #[must_use]
    pub fn gap_to(&self, next: &Span) -> f64 {
        next.left - self.right
    }
}

/// Wrap `value` into `[min, max)`.
#[must_use]
pub fn wrap(min: f64, max: f64, value: f64) -> f64 {
    let range = max - min;
    if !(range > 0.0) || !value.is_finite() {
        return min;
    }
    if value >= min && value < max {
        return value;
    }
    let wrapped = min + (range + (value - min) % range) % range;
    // `(range + r) % range` can round up to exactly `range` for tiny negative r.
    if wrapped >= max { min } else { wrapped }
}

/// Wrap `value` into `[0, 1)`.
#[inline]
#[must_use]
pub fn wrap_unit(value: f64) -> f64 {
    wrap(0.0, 1.0, value)
}

/// Wrap an integer index into `[0, len)`.
///
/// Returns 0 when `len == 0`.
#[must_use]
pub fn wrap_index(index: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let len = len as isize;
    (((index % len) + len) % len) as usize
}

/// Round `value` to the nearest multiple of `increment`.
///
/// A non-positive or non-finite increment returns `value` unchanged.
#[must_use]
pub fn snap(increment: f64, value: f64) -> f64 {
    if !(increment > 0.0) || !increment.is_finite() {
        return value;
    }
    (value / increment).round() * increment
}

/// Shortest distance between `a` and `b` on a circle of circumference `period`.
///
/// Distances larger than half the period are measured the other way round.
#[must_use]
pub fn cyclic_distance(a: f64, b: f64, period: f64) -> f64 {
    let d = (a - b).abs();
    if d > period / 2.0 { period - d } else { d }
}

/// Express `px` as a percentage of `width`, guarding zero widths.
#[inline]
#[must_use]
pub fn percent_of(px: f64, width: f64) -> f64 {
    if width > 0.0 { px / width * 100.0 } else { 0.0 }
}

/// Linear interpolation between `from` and `to`.
#[inline]
#[must_use]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
