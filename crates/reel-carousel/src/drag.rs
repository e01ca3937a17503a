#![forbid(unsafe_code)]

//! Drag proxy state.
//!
//! While the user drags, the loop follows a virtual proxy position `x`
//! measured in strip pixels. Progress is derived from the proxy:
//!
//! ```text
//! progress = wrap_unit(start_progress + (proxy_start - proxy_x) / total_width)
//! ```
//!
//! so dragging one full strip width left moves the timeline one full cycle
//! forward. On release the proxy is snapped (optionally after projecting a
//! throw) to the position that puts the nearest label at the playhead.
//!
//! # Phases
//!
//! ```text
//! Idle --press--> Dragging --release--> Settling --complete--> Idle
//!                     \--release (no throw)---------------------/
//! ```

use reel_core::animation::GlideConfig;
use reel_core::geometry::wrap_unit;
use reel_core::gesture::{PointerConfig, PointerTracker};

use crate::layout::LoopLayout;

/// Proxy displacement below which a release counts as a tap and returns
/// to the press position.
pub const TAP_TOLERANCE: f64 = 10.0;

/// Where the drag interaction is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    /// Not interacting.
    #[default]
    Idle,
    /// Pointer is down and the loop follows it.
    Dragging,
    /// Released; the loop is gliding to a snapped position.
    Settling,
}

/// State of one drag-enabled loop.
#[derive(Debug)]
pub(crate) struct DragSession {
    pub(crate) tracker: PointerTracker,
    pub(crate) phase: DragPhase,
    pub(crate) inertia: bool,
    pub(crate) glide: GlideConfig,
    /// Playback state captured at press, restored after settling.
    pub(crate) was_playing: bool,
    pub(crate) start_progress: f64,
    pub(crate) proxy_start: f64,
    pub(crate) proxy_x: f64,
    /// Pointer displacement the current anchor corresponds to.
    pub(crate) anchor_displacement: f64,
    pub(crate) last_displacement: f64,
    /// 1 / total_width at anchor time.
    pub(crate) ratio: f64,
    pub(crate) settle_target: f64,
}

impl DragSession {
    pub(crate) fn new(inertia: bool, pointer: PointerConfig, glide: GlideConfig) -> Self {
        Self {
            tracker: PointerTracker::new(pointer),
            phase: DragPhase::Idle,
            inertia,
            glide,
            was_playing: false,
            start_progress: 0.0,
            proxy_start: 0.0,
            proxy_x: 0.0,
            anchor_displacement: 0.0,
            last_displacement: 0.0,
            ratio: 0.0,
            settle_target: 0.0,
        }
    }

    /// Pin the proxy to `progress` for a strip of `total_width`, treating
    /// `displacement` as the pointer position the anchor corresponds to.
    pub(crate) fn anchor(&mut self, progress: f64, total_width: f64, displacement: f64) {
        self.ratio = if total_width > 0.0 { 1.0 / total_width } else { 0.0 };
        self.start_progress = progress;
        self.proxy_start = if self.ratio > 0.0 { -progress / self.ratio } else { 0.0 };
        self.proxy_x = self.proxy_start;
        self.anchor_displacement = displacement;
    }

    /// Move the proxy with the pointer.
    pub(crate) fn follow(&mut self, displacement: f64) {
        self.last_displacement = displacement;
        self.proxy_x = self.proxy_start + (displacement - self.anchor_displacement);
    }

    /// Timeline progress the current proxy position maps to.
    pub(crate) fn aligned_progress(&self) -> f64 {
        wrap_unit(self.start_progress + (self.proxy_start - self.proxy_x) * self.ratio)
    }

    /// Whether `x` is close enough to the press position to count as a tap.
    pub(crate) fn is_tap(&self, x: f64) -> bool {
        (x - self.proxy_start).abs() < TAP_TOLERANCE
    }
}

/// Snap a proxy position so that the resulting playhead sits on the nearest
/// label time. `ratio` is `1 / total_width`; a zero ratio returns `value`.
pub(crate) fn snap_proxy(layout: &LoopLayout, value: f64, ratio: f64) -> f64 {
    let d = layout.duration();
    if !(ratio > 0.0) || !(d > 0.0) {
        return value;
    }
    let time = -(value * ratio) * d;
    -(layout.snap_time(time) / d) / ratio
}
