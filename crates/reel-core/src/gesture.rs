#![forbid(unsafe_code)]

//! Pointer tracking: turns raw press/move/release input into drag events.
//!
//! [`PointerTracker`] is a stateful processor for one-dimensional (horizontal)
//! dragging. It reports the press immediately, starts a drag once the pointer
//! has moved past a small threshold, and on release reports the throw
//! velocity measured over a short trailing window.
//!
//! # State Machine
//!
//! ```text
//! Idle --Down--> Pressed --Move(≥ threshold)--> Dragging
//!   ^               |                              |
//!   +-----Up/Cancel-+------------Up/Cancel---------+
//! ```
//!
//! # Invariants
//!
//! 1. Every `Press` is followed by exactly one `Release` or `Cancel`.
//! 2. `Start` is emitted at most once per press, before any `Move`.
//! 3. `Move` is only emitted while dragging.
//! 4. Release velocity is zero when the drag never started.
//!
//! # Failure Modes
//!
//! - Move or Up without a prior Down is ignored (hover movement, stray
//!   release after focus loss).
//! - Two samples with the same timestamp produce zero velocity rather than
//!   an infinite one.

use std::collections::VecDeque;
use std::time::Duration;

use web_time::Instant;

// ---------------------------------------------------------------------------
// Input and output
// ---------------------------------------------------------------------------

/// Kind of raw pointer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// Button pressed / touch began.
    Down,
    /// Pointer moved.
    Move,
    /// Button released / touch ended.
    Up,
    /// Gesture aborted by the host (focus loss, touch cancel).
    Cancel,
}

/// A raw pointer event in page pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// What happened.
    pub kind: PointerKind,
    /// Horizontal pointer position.
    pub x: f64,
}

impl PointerEvent {
    /// Press at `x`.
    #[must_use]
    pub const fn down(x: f64) -> Self {
        Self {
            kind: PointerKind::Down,
            x,
        }
    }

    /// Move to `x`.
    #[must_use]
    pub const fn moved(x: f64) -> Self {
        Self {
            kind: PointerKind::Move,
            x,
        }
    }

    /// Release at `x`.
    #[must_use]
    pub const fn up(x: f64) -> Self {
        Self {
            kind: PointerKind::Up,
            x,
        }
    }

    /// Host cancelled the gesture.
    #[must_use]
    pub const fn cancel() -> Self {
        Self {
            kind: PointerKind::Cancel,
            x: 0.0,
        }
    }
}

/// Drag-level events produced by the tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    /// Pointer went down at `x`.
    Press { x: f64 },
    /// Movement exceeded the threshold; dragging begins.
    Start { origin: f64 },
    /// Pointer moved while dragging.
    Move {
        /// Current position.
        x: f64,
        /// Movement since the previous event.
        delta: f64,
        /// Movement since the press.
        displacement: f64,
    },
    /// Pointer released.
    Release {
        /// Release position.
        x: f64,
        /// Movement since the press.
        displacement: f64,
        /// Recent velocity in px/s (positive = rightward).
        velocity: f64,
        /// Whether the drag threshold was crossed.
        dragged: bool,
    },
    /// Gesture aborted.
    Cancel,
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Thresholds for pointer tracking.
#[derive(Debug, Clone)]
pub struct PointerConfig {
    /// Minimum distance (px) before a drag starts (default: 2.0).
    pub drag_threshold: f64,
    /// Trailing window used to estimate release velocity (default: 100ms).
    pub velocity_window: Duration,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            drag_threshold: 2.0,
            velocity_window: Duration::from_millis(100),
        }
    }
}

// ---------------------------------------------------------------------------
// Internal state
// ---------------------------------------------------------------------------

/// Tracks an ongoing press.
#[derive(Debug, Clone)]
struct PressState {
    origin: f64,
    last: f64,
    started: bool,
    samples: VecDeque<(Instant, f64)>,
}

// ---------------------------------------------------------------------------
// PointerTracker
// ---------------------------------------------------------------------------

/// Stateful tracker converting pointer input into [`DragEvent`]s.
pub struct PointerTracker {
    config: PointerConfig,
    press: Option<PressState>,
}

impl std::fmt::Debug for PointerTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerTracker")
            .field("pressed", &self.is_pressed())
            .field("dragging", &self.is_dragging())
            .finish()
    }
}

impl PointerTracker {
    /// Create a tracker with the given configuration.
    #[must_use]
    pub fn new(config: PointerConfig) -> Self {
        Self {
            config,
            press: None,
        }
    }

    /// Process a raw event, returning the drag events it produced.
    ///
    /// Most events produce 0 or 1 drag events; the move that crosses the
    /// threshold produces `Start` followed by `Move`.
    pub fn process(&mut self, event: &PointerEvent, now: Instant) -> Vec<DragEvent> {
        let mut out = Vec::with_capacity(2);
        match event.kind {
            PointerKind::Down => self.on_down(event.x, now, &mut out),
            PointerKind::Move => self.on_move(event.x, now, &mut out),
            PointerKind::Up => self.on_up(event.x, now, &mut out),
            PointerKind::Cancel => {
                if self.press.take().is_some() {
                    out.push(DragEvent::Cancel);
                }
            }
        }
        out
    }

    /// Whether a press is in progress.
    #[inline]
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    /// Whether a drag (past threshold) is in progress.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.press.as_ref().is_some_and(|p| p.started)
    }

    /// Drop any in-progress press without emitting events.
    pub fn reset(&mut self) {
        self.press = None;
    }

    /// Get a reference to the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &PointerConfig {
        &self.config
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(PointerConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Internal event handlers
// ---------------------------------------------------------------------------

impl PointerTracker {
    fn on_down(&mut self, x: f64, now: Instant, out: &mut Vec<DragEvent>) {
        if self.press.take().is_some() {
            // A second Down without Up: the host lost the release.
            out.push(DragEvent::Cancel);
        }
        let mut samples = VecDeque::with_capacity(8);
        samples.push_back((now, x));
        self.press = Some(PressState {
            origin: x,
            last: x,
            started: false,
            samples,
        });
        out.push(DragEvent::Press { x });
    }

    fn on_move(&mut self, x: f64, now: Instant, out: &mut Vec<DragEvent>) {
        let threshold = self.config.drag_threshold;
        let window = self.config.velocity_window;
        let Some(press) = self.press.as_mut() else {
            return;
        };
        record_sample(&mut press.samples, now, x, window);

        if !press.started && (x - press.origin).abs() >= threshold {
            press.started = true;
            out.push(DragEvent::Start {
                origin: press.origin,
            });
        }
        if press.started {
            out.push(DragEvent::Move {
                x,
                delta: x - press.last,
                displacement: x - press.origin,
            });
        }
        press.last = x;
    }

    fn on_up(&mut self, x: f64, now: Instant, out: &mut Vec<DragEvent>) {
        let window = self.config.velocity_window;
        let Some(mut press) = self.press.take() else {
            return;
        };
        record_sample(&mut press.samples, now, x, window);
        let velocity = if press.started {
            estimate_velocity(&press.samples)
        } else {
            0.0
        };
        out.push(DragEvent::Release {
            x,
            displacement: x - press.origin,
            velocity,
            dragged: press.started,
        });
    }
}

fn record_sample(samples: &mut VecDeque<(Instant, f64)>, now: Instant, x: f64, window: Duration) {
    samples.push_back((now, x));
    while samples.len() > 2 {
        let Some(&(t, _)) = samples.front() else {
            break;
        };
        if now.saturating_duration_since(t) > window {
            samples.pop_front();
        } else {
            break;
        }
    }
}

fn estimate_velocity(samples: &VecDeque<(Instant, f64)>) -> f64 {
    let (Some(&(t0, x0)), Some(&(t1, x1))) = (samples.front(), samples.back()) else {
        return 0.0;
    };
    let dt = t1.saturating_duration_since(t0).as_secs_f64();
    if dt > 0.0 { (x1 - x0) / dt } else { 0.0 }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
