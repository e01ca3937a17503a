#![forbid(unsafe_code)]

//! Loop geometry: item widths, per-item motion tracks and label times.
//!
//! Every item travels left at `pixels_per_second` until its trailing edge
//! passes the loop start, then re-enters from the far end of the strip and
//! travels back to its home offset. Offsets are expressed as x-percent of the
//! item's own width so that items of different sizes share one timeline.
//!
//! # Invariants
//!
//! 1. `widths`, `x_percents`, `space_before`, `tracks`, `labels` and `times`
//!    always have one entry per item.
//! 2. `duration()` is the latest track end, floored at [`MIN_DURATION`] so
//!    it always matches the cycle of the driving [`LoopTimeline`].
//! 3. In centered mode every entry of `times` lies in `[0, duration)`.
//!
//! # Failure Modes
//!
//! - Zero-width items: their percentages collapse to 0 and their tracks
//!   degenerate, but nothing divides by zero.
//! - Zero total width: centering offsets are skipped and the period falls
//!   back to [`MIN_DURATION`].
//!
//! [`LoopTimeline`]: reel_core::animation::LoopTimeline

use reel_core::animation::timeline::MIN_DURATION;
use reel_core::geometry::{cyclic_distance, lerp, percent_of, wrap};

use crate::config::{LoopConfig, SnapIncrement};
use crate::stage::Stage;

/// Motion of one item across a single loop cycle, in x-percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Track {
    /// Resting offset.
    home: f64,
    /// Offset once the trailing edge reaches the loop start.
    exit: f64,
    /// Time the exit offset is reached.
    exit_at: f64,
    /// Offset the item re-enters at, one strip width to the right.
    enter: f64,
    /// Time the item is back home.
    end: f64,
}

impl Track {
    fn x_percent_at(&self, time: f64) -> f64 {
        if time < self.exit_at {
            let t = if self.exit_at > 0.0 { time / self.exit_at } else { 1.0 };
            return lerp(self.home, self.exit, t);
        }
        let span = self.end - self.exit_at;
        if span > 0.0 {
            lerp(self.enter, self.home, ((time - self.exit_at) / span).min(1.0))
        } else {
            self.home
        }
    }
}

/// Measured geometry of a loop.
#[derive(Debug, Clone)]
pub struct LoopLayout {
    pps: f64,
    snap: SnapIncrement,
    center: bool,
    padding_right: f64,
    start_x: f64,
    widths: Vec<f64>,
    x_percents: Vec<f64>,
    space_before: Vec<f64>,
    total_width: f64,
    tracks: Vec<Track>,
    labels: Vec<f64>,
    times: Vec<f64>,
    duration: f64,
    time_offset: f64,
}

impl LoopLayout {
    /// Empty layout. `start_x` is the natural left offset of the first item.
    #[must_use]
    pub fn new(config: &LoopConfig, start_x: f64) -> Self {
        Self {
            pps: config.pixels_per_second(),
            snap: config.snap,
            center: config.center,
            padding_right: config.padding_right,
            start_x,
            widths: Vec::new(),
            x_percents: Vec::new(),
            space_before: Vec::new(),
            total_width: 0.0,
            tracks: Vec::new(),
            labels: Vec::new(),
            times: Vec::new(),
            duration: MIN_DURATION,
            time_offset: 0.0,
        }
    }

    // -----------------------------------------------------------------------
    // Measurement
    // -----------------------------------------------------------------------

    /// Measure every item, fold any pixel translation into its x-percent,
    /// and recompute the strip's total width.
    ///
    /// Items are written back at their snapped home offset.
    pub fn populate_widths<S: Stage>(&mut self, stage: &mut S, items: &[S::Item]) {
        self.widths.clear();
        self.x_percents.clear();
        self.space_before.clear();

        let mut prev = stage.container().bounds;
        for (i, item) in items.iter().enumerate() {
            let m = stage.measure(item);
            self.widths.push(m.width);
            self.x_percents
                .push(self.snap.apply(percent_of(m.x, m.width) + m.x_percent));
            let space = if i > 0 {
                prev.gap_to(&m.bounds)
            } else {
                m.bounds.left - prev.left
            };
            self.space_before.push(space);
            prev = m.bounds;
        }
        for (item, &xp) in items.iter().zip(&self.x_percents) {
            stage.set_x_percent(item, xp);
        }

        self.total_width = match items.last() {
            Some(last) => {
                let m = stage.measure(last);
                let n = items.len() - 1;
                m.offset_left + self.x_percents[n] / 100.0 * self.widths[n] - self.start_x
                    + self.space_before[0]
                    + m.offset_width * m.scale_x
                    + self.padding_right
            }
            None => 0.0,
        };
    }

    /// Build one motion track per item and the label times.
    ///
    /// Requires [`populate_widths`](Self::populate_widths) to have run.
    pub fn populate_timeline<S: Stage>(&mut self, stage: &S, items: &[S::Item]) {
        self.tracks.clear();
        self.labels.clear();
        self.times.clear();

        let lead = self.space_before.first().copied().unwrap_or(0.0);
        let loop_end = self.total_width / self.pps;
        for (i, item) in items.iter().enumerate() {
            let m = stage.measure(item);
            let width = self.widths[i];
            let home = self.x_percents[i];
            let cur_x = home / 100.0 * width;
            let to_start = m.offset_left + cur_x - self.start_x + lead;
            let to_loop = to_start + width * m.scale_x;
            let exit_at = to_loop / self.pps;

            self.tracks.push(Track {
                home,
                exit: self.snap.apply(percent_of(cur_x - to_loop, width)),
                exit_at,
                enter: self
                    .snap
                    .apply(percent_of(cur_x - to_loop + self.total_width, width)),
                end: exit_at.max(loop_end),
            });
            let label = to_start / self.pps;
            self.labels.push(label);
            self.times.push(label);
        }
        self.duration = self
            .tracks
            .iter()
            .map(|t| t.end)
            .fold(MIN_DURATION, f64::max);
    }

    /// Shift label times so they mark the moment each item is centered in
    /// a container of `container_width`. No-op unless centering is enabled.
    pub fn populate_offsets(&mut self, container_width: f64) {
        if !self.center || !(self.total_width > 0.0) {
            self.time_offset = 0.0;
            return;
        }
        let d = self.duration;
        self.time_offset = d * (container_width / 2.0) / self.total_width;
        for (i, time) in self.times.iter_mut().enumerate() {
            let half_item = d * self.widths[i] / 2.0 / self.total_width;
            *time = wrap(0.0, d, self.labels[i] + half_item - self.time_offset);
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// X-percent offset of item `index` at timeline `time`.
    #[must_use]
    pub fn x_percent_at(&self, index: usize, time: f64) -> f64 {
        self.tracks
            .get(index)
            .map_or(0.0, |track| track.x_percent_at(time))
    }

    /// Index whose label time is cyclically nearest `time`. Ties go to the
    /// lowest index.
    #[must_use]
    pub fn closest(&self, time: f64) -> usize {
        let mut best = 0;
        let mut closest = f64::INFINITY;
        for (i, &t) in self.times.iter().enumerate() {
            let d = cyclic_distance(t, time, self.duration);
            if d < closest {
                closest = d;
                best = i;
            }
        }
        best
    }

    /// `time` moved to the nearest label time, without wrapping: the result
    /// differs from `time` by at most half a cycle.
    #[must_use]
    pub fn snap_time(&self, time: f64) -> f64 {
        let d = self.duration;
        if self.times.is_empty() || !(d > 0.0) {
            return time;
        }
        let wrapped = wrap(0.0, d, time);
        let mut dif = self.times[self.closest(wrapped)] - wrapped;
        if dif.abs() > d / 2.0 {
            dif += if dif < 0.0 { d } else { -d };
        }
        time + dif
    }

    /// Number of items measured.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    /// No items measured.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    /// Cycle length in seconds.
    #[inline]
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Strip width including spacing and trailing padding.
    #[inline]
    #[must_use]
    pub fn total_width(&self) -> f64 {
        self.total_width
    }

    /// Label time per item (center-adjusted when centering).
    #[inline]
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Label time per item before any centering adjustment.
    #[inline]
    #[must_use]
    pub fn labels(&self) -> &[f64] {
        &self.labels
    }

    /// Measured width per item.
    #[inline]
    #[must_use]
    pub fn widths(&self) -> &[f64] {
        &self.widths
    }

    /// Home x-percent per item.
    #[inline]
    #[must_use]
    pub fn home_offsets(&self) -> &[f64] {
        &self.x_percents
    }

    /// Gap preceding each item (the first relative to the container).
    #[inline]
    #[must_use]
    pub fn space_before(&self) -> &[f64] {
        &self.space_before
    }

    /// Time shift applied by centering.
    #[inline]
    #[must_use]
    pub fn time_offset(&self) -> f64 {
        self.time_offset
    }
}
