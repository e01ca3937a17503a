#![forbid(unsafe_code)]

//! The infinite-loop controller.
//!
//! [`LoopController`] owns a [`Stage`] and a list of item handles, measures
//! them into a [`LoopLayout`], and drives a cyclic [`LoopTimeline`] whose
//! every position maps to an x-percent offset per item. It is advanced by
//! the host once per frame with [`tick`](LoopController::tick) or
//! [`frame`](LoopController::frame) and reports the item nearest the
//! playhead through the active-change callback.
//!
//! # Invariants
//!
//! 1. After every render, if the nearest item differs from the last one
//!    reported, the callback fires exactly once for it.
//! 2. [`current`](LoopController::current) is always in `[0, len)` for a
//!    non-empty loop.
//! 3. Only one motion (navigation or settle) runs at a time; starting a new
//!    one cancels the previous.
//! 4. A refresh preserves playback progress.
//!
//! # Failure Modes
//!
//! - Empty item list: builds an inert controller; navigation is a no-op and
//!   the callback never fires. [`LoopControllerBuilder::try_build`] rejects
//!   this instead.
//! - Drag requested on a host without drag support: one warning, recorded as
//!   [`Diagnostic::DragUnavailable`]; the loop works without dragging.
//! - Drag without inertia: one warning, recorded as
//!   [`Diagnostic::InertiaUnavailable`]; releases snap immediately.
//! - Layout change after [`teardown`](LoopController::teardown): ignored.

use std::time::Duration;

use web_time::Instant;

use reel_core::animation::{Glide, GlideConfig, LoopTimeline, TweenScheduler};
use reel_core::capability::Capabilities;
use reel_core::clock::FrameTicker;
use reel_core::geometry::wrap_index;
use reel_core::gesture::{DragEvent, PointerConfig, PointerEvent};

#[cfg(feature = "tracing")]
use reel_core::logging::{debug, warn};
#[cfg(not(feature = "tracing"))]
use reel_core::{debug, warn};

use crate::config::{LoopConfig, NavOptions};
use crate::drag::{DragPhase, DragSession, snap_proxy};
use crate::error::{ConfigError, Result};
use crate::layout::LoopLayout;
use crate::stage::Stage;

/// Callback invoked with the newly active item and its index.
pub type ActiveChangeFn<T> = Box<dyn FnMut(&T, usize)>;

/// Degradations recorded at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// Dragging was requested but the host cannot provide it.
    DragUnavailable,
    /// Dragging works but releases cannot glide.
    InertiaUnavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Motion {
    Navigate,
    Settle,
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builder for [`LoopController`].
pub struct LoopControllerBuilder<S: Stage> {
    stage: S,
    items: Vec<S::Item>,
    config: LoopConfig,
    capabilities: Capabilities,
    pointer: PointerConfig,
    glide: GlideConfig,
    on_change: Option<ActiveChangeFn<S::Item>>,
}

impl<S: Stage> LoopControllerBuilder<S> {
    /// Set the loop configuration.
    #[must_use]
    pub fn config(mut self, config: LoopConfig) -> Self {
        self.config = config;
        self
    }

    /// Declare what the host supports (default: everything).
    #[must_use]
    pub fn capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Pointer tracking parameters.
    #[must_use]
    pub fn pointer_config(mut self, pointer: PointerConfig) -> Self {
        self.pointer = pointer;
        self
    }

    /// Momentum parameters for throws.
    #[must_use]
    pub fn glide_config(mut self, glide: GlideConfig) -> Self {
        self.glide = glide;
        self
    }

    /// Called with `(item, index)` whenever the nearest item changes, and
    /// once at construction.
    #[must_use]
    pub fn on_active_change(mut self, f: impl FnMut(&S::Item, usize) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    /// Build, rejecting empty lists, bad configuration and zero-width items.
    pub fn try_build(self) -> Result<LoopController<S>> {
        if self.items.is_empty() {
            return Err(ConfigError::NoItems);
        }
        self.config.validate()?;
        for (index, item) in self.items.iter().enumerate() {
            let width = self.stage.measure(item).width;
            if !(width > 0.0) {
                return Err(ConfigError::NonPositiveWidth { index, width });
            }
        }
        Ok(self.build())
    }

    /// Build without validation.
    #[must_use]
    pub fn build(self) -> LoopController<S> {
        LoopController::construct(self)
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Drives a seamless horizontal loop of items.
pub struct LoopController<S: Stage> {
    stage: S,
    items: Vec<S::Item>,
    config: LoopConfig,
    layout: LoopLayout,
    timeline: LoopTimeline,
    motions: TweenScheduler<Motion>,
    ticker: FrameTicker,
    current_index: usize,
    index_dirty: bool,
    last_notified: Option<usize>,
    on_change: Option<ActiveChangeFn<S::Item>>,
    drag: Option<DragSession>,
    attached: bool,
    diagnostics: Vec<Diagnostic>,
}

impl<S: Stage> std::fmt::Debug for LoopController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoopController")
            .field("len", &self.items.len())
            .field("time", &self.timeline.time())
            .field("duration", &self.timeline.duration())
            .field("current_index", &self.current_index)
            .field("index_dirty", &self.index_dirty)
            .field("drag_phase", &self.drag_phase())
            .field("attached", &self.attached)
            .finish()
    }
}

impl<S: Stage> LoopController<S> {
    /// Start building a loop over `items` hosted by `stage`.
    #[must_use]
    pub fn builder(stage: S, items: Vec<S::Item>) -> LoopControllerBuilder<S> {
        LoopControllerBuilder {
            stage,
            items,
            config: LoopConfig::default(),
            capabilities: Capabilities::default(),
            pointer: PointerConfig::default(),
            glide: GlideConfig::default(),
            on_change: None,
        }
    }

    fn construct(builder: LoopControllerBuilder<S>) -> Self {
        let LoopControllerBuilder {
            mut stage,
            items,
            config,
            capabilities,
            pointer,
            glide,
            on_change,
        } = builder;

        for item in &items {
            stage.reset_x(item);
        }
        let start_x = items
            .first()
            .map_or(0.0, |first| stage.measure(first).offset_left);
        let mut layout = LoopLayout::new(&config, start_x);
        layout.populate_widths(&mut stage, &items);
        layout.populate_timeline(&stage, &items);
        layout.populate_offsets(stage.container().width);

        let mut timeline = LoopTimeline::new(layout.duration())
            .with_loop_count(config.repeat)
            .with_reversed(config.reversed);
        if !config.paused {
            timeline.play();
        }

        let mut diagnostics = Vec::new();
        let drag = if !config.draggable {
            None
        } else if !capabilities.drag_supported {
            warn!(
                message = "loop.capability",
                capability = "drag",
                fallback = "no_drag"
            );
            diagnostics.push(Diagnostic::DragUnavailable);
            None
        } else {
            if !capabilities.inertia_supported {
                warn!(
                    message = "loop.capability",
                    capability = "inertia",
                    fallback = "instant_snap"
                );
                diagnostics.push(Diagnostic::InertiaUnavailable);
            }
            Some(DragSession::new(
                capabilities.inertia_supported,
                pointer,
                glide,
            ))
        };

        let mut controller = Self {
            stage,
            items,
            config,
            layout,
            timeline,
            motions: TweenScheduler::new(),
            ticker: FrameTicker::new(),
            current_index: 0,
            index_dirty: false,
            last_notified: None,
            on_change,
            drag,
            attached: true,
            diagnostics,
        };
        controller.render();
        let index = controller.closest_index(true);
        controller.last_notified = Some(index);
        controller.notify(index);

        debug!(
            message = "loop.init",
            items = controller.items.len(),
            duration = controller.layout.duration(),
            total_width = controller.layout.total_width(),
            draggable = controller.drag.is_some()
        );
        controller
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    fn render_at(&mut self, time: f64) {
        for (i, item) in self.items.iter().enumerate() {
            self.stage
                .set_x_percent(item, self.layout.x_percent_at(i, time));
        }
    }

    fn render(&mut self) {
        self.render_at(self.timeline.time());
    }

    fn notify(&mut self, index: usize) {
        if let (Some(item), Some(f)) = (self.items.get(index), self.on_change.as_mut()) {
            f(item, index);
        }
    }

    /// Render and report a change of the nearest item.
    fn after_update(&mut self) {
        self.render();
        if self.items.is_empty() {
            return;
        }
        let index = self.layout.closest(self.timeline.time());
        if self.last_notified != Some(index) {
            self.last_notified = Some(index);
            self.notify(index);
        }
    }

    fn apply_progress(&mut self, progress: f64) {
        self.timeline.set_progress(progress);
        self.after_update();
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    /// Move to item `index` (wrapped into range) by the shortest path.
    ///
    /// Crossing the seam tweens through unwrapped times so motion stays in
    /// the travel direction. With no explicit duration the transition runs
    /// at playback speed; a zero duration jumps. The timeline is paused while
    /// a transition runs.
    pub fn to_index(&mut self, index: isize, opts: NavOptions) {
        let len = self.items.len();
        if len == 0 {
            return;
        }
        let current = self.current();
        let target = wrap_index(index, len);
        let mut delta = wrap_index(target as isize - current as isize, len) as isize;
        if delta > (len / 2) as isize {
            delta -= len as isize;
        }
        let target = wrap_index(current as isize + delta, len);

        let d = self.timeline.duration();
        let now = self.timeline.time();
        let mut time = self.layout.times()[target];
        if delta > 0 && time <= now {
            time += d;
        } else if delta < 0 && time > now {
            time -= d;
        }

        self.current_index = target;
        self.index_dirty = false;
        self.cancel_motions();

        let duration = opts
            .duration
            .unwrap_or_else(|| Duration::from_secs_f64((time - now).abs()));
        debug!(
            message = "loop.navigate",
            from = current,
            to = target,
            delta,
            time,
            duration_ms = duration.as_millis() as u64
        );
        if duration.is_zero() {
            self.timeline.set_time(time);
            self.after_update();
        } else {
            self.timeline.pause();
            self.motions
                .schedule_tween(Motion::Navigate, now, time, duration, opts.ease);
        }
    }

    /// Advance one item.
    pub fn next(&mut self, opts: NavOptions) {
        let current = self.current() as isize;
        self.to_index(current + 1, opts);
    }

    /// Go back one item.
    pub fn previous(&mut self, opts: NavOptions) {
        let current = self.current() as isize;
        self.to_index(current - 1, opts);
    }

    /// The active index, recomputed from the playhead if a settle left it
    /// stale.
    pub fn current(&mut self) -> usize {
        if self.index_dirty {
            self.closest_index(true)
        } else {
            self.current_index
        }
    }

    /// Index whose label is nearest the playhead. With `set_current` the
    /// result also becomes [`current`](Self::current).
    pub fn closest_index(&mut self, set_current: bool) -> usize {
        let index = self.layout.closest(self.timeline.time());
        if set_current {
            self.current_index = index;
            self.index_dirty = false;
        }
        index
    }

    /// Nearest item as last reported to the callback.
    #[inline]
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.last_notified
    }

    // -----------------------------------------------------------------------
    // Playback
    // -----------------------------------------------------------------------

    /// Place the playhead at `time` seconds (wrapped) and render.
    pub fn seek(&mut self, time: f64) {
        self.timeline.set_time(time);
        self.after_update();
    }

    /// Place the playhead at a fraction of the cycle (wrapped) and render.
    pub fn set_progress(&mut self, progress: f64) {
        self.apply_progress(progress);
    }

    /// Resume playback.
    pub fn play(&mut self) {
        self.timeline.play();
    }

    /// Hold playback.
    pub fn pause(&mut self) {
        self.timeline.pause();
    }

    /// Whether playback is advancing.
    #[inline]
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.timeline.is_playing()
    }

    /// Advance running transitions and playback by `dt`, then render.
    pub fn tick(&mut self, dt: Duration) {
        for sample in self.motions.advance(dt) {
            match sample.tag {
                Motion::Navigate => {
                    self.timeline.set_time(sample.value);
                    self.after_update();
                }
                Motion::Settle => {
                    let progress = self.drag.as_mut().map(|drag| {
                        drag.proxy_x = sample.value;
                        drag.aligned_progress()
                    });
                    if let Some(progress) = progress {
                        self.apply_progress(progress);
                    }
                    if sample.complete {
                        self.finish_settle();
                    }
                }
            }
        }
        if self.timeline.advance(dt) {
            self.after_update();
        }
    }

    /// Advance by the time elapsed since the previous frame.
    pub fn frame(&mut self, now: Instant) {
        let dt = self.ticker.delta(now);
        self.tick(dt);
    }

    fn cancel_motions(&mut self) {
        self.motions.cancel_all();
        if let Some(drag) = self.drag.as_mut()
            && drag.phase == DragPhase::Settling
        {
            drag.phase = DragPhase::Idle;
            drag.was_playing = false;
        }
    }

    // -----------------------------------------------------------------------
    // Layout
    // -----------------------------------------------------------------------

    /// Re-measure the items, preserving progress. A deep refresh also
    /// rebuilds the timeline (needed when item sizes or the speed changed).
    pub fn refresh(&mut self, deep: bool) {
        self.render_at(0.0);
        self.layout.populate_widths(&mut self.stage, &self.items);
        if deep {
            self.layout.populate_timeline(&self.stage, &self.items);
            self.timeline.rescale(self.layout.duration());
        }
        self.layout.populate_offsets(self.stage.container().width);
        self.after_update();
        self.resync_drag();
        debug!(
            message = "loop.refresh",
            deep,
            duration = self.layout.duration(),
            total_width = self.layout.total_width(),
            progress = self.timeline.progress()
        );
    }

    /// Host viewport or content changed. Returns `false` once torn down.
    pub fn on_layout_change(&mut self) -> bool {
        if !self.attached {
            return false;
        }
        self.refresh(true);
        true
    }

    /// Stop reacting to layout changes and pointer input.
    pub fn teardown(&mut self) {
        if !self.attached {
            return;
        }
        self.attached = false;
        self.motions.cancel_all();
        self.drag = None;
        debug!(message = "loop.teardown", items = self.items.len());
    }

    /// Whether layout changes and pointer input are still handled.
    #[inline]
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    // -----------------------------------------------------------------------
    // Dragging
    // -----------------------------------------------------------------------

    /// Whether the host should route pointer events to
    /// [`handle_pointer`](Self::handle_pointer).
    #[inline]
    #[must_use]
    pub fn wants_pointer_input(&self) -> bool {
        self.attached && self.drag.is_some()
    }

    /// Current drag phase (`Idle` when dragging is disabled).
    #[must_use]
    pub fn drag_phase(&self) -> DragPhase {
        self.drag.as_ref().map_or(DragPhase::Idle, |d| d.phase)
    }

    /// Feed a pointer event. Returns `true` if the loop consumed it.
    pub fn handle_pointer(&mut self, event: &PointerEvent, now: Instant) -> bool {
        if !self.attached {
            return false;
        }
        let Some(drag) = self.drag.as_mut() else {
            return false;
        };
        for ev in drag.tracker.process(event, now) {
            match ev {
                DragEvent::Press { .. } => self.on_press(),
                DragEvent::Start { .. } => {}
                DragEvent::Move { displacement, .. } => self.on_drag(displacement),
                DragEvent::Release { velocity, .. } => self.on_release(velocity),
                DragEvent::Cancel => self.on_release(0.0),
            }
        }
        true
    }

    fn on_press(&mut self) {
        self.motions.cancel_all();
        let playing = self.timeline.is_playing();
        self.timeline.pause();
        if let Some(drag) = self.drag.as_mut() {
            drag.was_playing = match drag.phase {
                DragPhase::Settling => drag.was_playing || playing,
                _ => playing,
            };
            drag.phase = DragPhase::Dragging;
            drag.last_displacement = 0.0;
        }
        // Shallow refresh re-measures and anchors the proxy at the playhead.
        self.refresh(false);
        debug!(
            message = "loop.drag.press",
            progress = self.timeline.progress()
        );
    }

    fn on_drag(&mut self, displacement: f64) {
        let progress = match self.drag.as_mut() {
            Some(drag) if drag.phase == DragPhase::Dragging => {
                drag.follow(displacement);
                drag.aligned_progress()
            }
            _ => return,
        };
        self.apply_progress(progress);
    }

    fn on_release(&mut self, velocity: f64) {
        if self.drag_phase() != DragPhase::Dragging {
            return;
        }
        self.closest_index(true);
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let x = drag.proxy_x;
        let target = if drag.is_tap(x) {
            drag.proxy_start
        } else {
            let raw = if drag.inertia {
                drag.glide.projected_end(x, velocity)
            } else {
                x
            };
            snap_proxy(&self.layout, raw, drag.ratio)
        };
        debug!(
            message = "loop.drag.release",
            velocity,
            from = x,
            to = target,
            inertia = drag.inertia
        );

        if drag.inertia && (target - x).abs() >= drag.glide.rest_threshold {
            drag.phase = DragPhase::Settling;
            drag.settle_target = target;
            self.motions
                .schedule(Motion::Settle, Glide::new(x, target, drag.glide));
            self.index_dirty = true;
        } else {
            drag.proxy_x = target;
            let progress = drag.aligned_progress();
            self.apply_progress(progress);
            self.finish_settle();
        }
    }

    fn finish_settle(&mut self) {
        let resume = match self.drag.as_mut() {
            Some(drag) => {
                drag.phase = DragPhase::Idle;
                std::mem::take(&mut drag.was_playing)
            }
            None => false,
        };
        self.closest_index(true);
        if resume {
            self.timeline.play();
        }
        debug!(
            message = "loop.settle.complete",
            index = self.current_index,
            resumed = resume
        );
    }

    /// Re-anchor an in-progress drag or settle after the layout changed.
    fn resync_drag(&mut self) {
        let progress = self.timeline.progress();
        let total = self.layout.total_width();
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let displacement = drag.last_displacement;
        match drag.phase {
            DragPhase::Idle => {}
            DragPhase::Dragging => drag.anchor(progress, total, displacement),
            DragPhase::Settling => {
                let remaining = (drag.settle_target - drag.proxy_x) * drag.ratio;
                drag.anchor(progress, total, displacement);
                let raw = if drag.ratio > 0.0 {
                    drag.proxy_x + remaining / drag.ratio
                } else {
                    drag.proxy_x
                };
                let target = snap_proxy(&self.layout, raw, drag.ratio);
                drag.settle_target = target;
                self.motions.cancel_where(|m| *m == Motion::Settle);
                self.motions
                    .schedule(Motion::Settle, Glide::new(drag.proxy_x, target, drag.glide));
            }
        }
    }

    /// Snap a drag displacement (proxy pixels) so the playhead lands on the
    /// nearest label. Unwrapped: may differ from `value` by up to half a
    /// strip width.
    #[must_use]
    pub fn snap_displacement(&self, value: f64) -> f64 {
        let ratio = match &self.drag {
            Some(drag) if drag.ratio > 0.0 => drag.ratio,
            _ if self.layout.total_width() > 0.0 => 1.0 / self.layout.total_width(),
            _ => 0.0,
        };
        snap_proxy(&self.layout, value, ratio)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Degradations recorded at construction.
    #[inline]
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Number of items.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// No items.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item handles.
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[S::Item] {
        &self.items
    }

    /// Item handle at `index`.
    #[must_use]
    pub fn item(&self, index: usize) -> Option<&S::Item> {
        self.items.get(index)
    }

    /// Label time per item.
    #[inline]
    #[must_use]
    pub fn times(&self) -> &[f64] {
        self.layout.times()
    }

    /// Measured geometry.
    #[inline]
    #[must_use]
    pub fn layout(&self) -> &LoopLayout {
        &self.layout
    }

    /// Cycle length in seconds.
    #[inline]
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.timeline.duration()
    }

    /// Playhead in seconds.
    #[inline]
    #[must_use]
    pub fn time(&self) -> f64 {
        self.timeline.time()
    }

    /// Playhead as a fraction of the cycle.
    #[inline]
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.timeline.progress()
    }

    /// Strip width in px.
    #[inline]
    #[must_use]
    pub fn total_width(&self) -> f64 {
        self.layout.total_width()
    }

    /// Whether the active index awaits recomputation after a settle.
    #[inline]
    #[must_use]
    pub fn is_index_dirty(&self) -> bool {
        self.index_dirty
    }

    /// Whether a navigation or settle transition is running.
    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.motions.is_empty()
    }

    /// Configuration the loop was built with.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    /// The hosting stage.
    #[inline]
    #[must_use]
    pub fn stage(&self) -> &S {
        &self.stage
    }

    /// Mutable access to the stage, e.g. to resize it before
    /// [`on_layout_change`](Self::on_layout_change).
    #[inline]
    pub fn stage_mut(&mut self) -> &mut S {
        &mut self.stage
    }

    /// X-percent offset last written for item `index`.
    #[must_use]
    pub fn x_percent(&self, index: usize) -> f64 {
        self.layout.x_percent_at(index, self.timeline.time())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::Strip;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn paused() -> LoopConfig {
        LoopConfig::default().with_paused(true)
    }

    fn recorded(
        strip: Strip,
        config: LoopConfig,
    ) -> (LoopController<Strip>, Rc<RefCell<Vec<usize>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let items = strip.items();
        let ctl = LoopController::builder(strip, items)
            .config(config)
            .on_active_change(move |_, i| sink.borrow_mut().push(i))
            .build();
        (ctl, seen)
    }

    #[test]
    fn construction_notifies_once() {
        let (ctl, seen) = recorded(Strip::uniform(4, 100.0, 0.0, 250.0), paused());
        assert_eq!(*seen.borrow(), vec![0]);
        assert_eq!(ctl.duration(), 4.0);
        assert!(!ctl.is_playing());
    }

    #[test]
    fn unpaused_loop_plays() {
        let (mut ctl, seen) = recorded(Strip::uniform(4, 100.0, 0.0, 250.0), LoopConfig::default());
        assert!(ctl.is_playing());
        ctl.tick(Duration::from_millis(600));
        assert_eq!(*seen.borrow(), vec![0, 1]);
        assert_eq!(ctl.stage().x_percent(0), -60.0);
    }

    #[test]
    fn instant_navigation_seeks() {
        let (mut ctl, seen) = recorded(Strip::uniform(4, 100.0, 0.0, 250.0), paused());
        ctl.to_index(2, NavOptions::instant());
        assert_eq!(ctl.time(), 2.0);
        assert_eq!(ctl.current(), 2);
        assert_eq!(*seen.borrow(), vec![0, 2]);
    }

    #[test]
    fn previous_from_zero_wraps_backwards() {
        let (mut ctl, _) = recorded(Strip::uniform(4, 100.0, 0.0, 250.0), paused());
        ctl.previous(NavOptions::over(Duration::from_millis(400)));
        assert_eq!(ctl.current(), 3);
        assert!(ctl.is_animating());
        ctl.tick(Duration::from_millis(200));
        // Halfway from 0 to -1, wrapped.
        assert!((ctl.time() - 3.5).abs() < 1e-9);
        ctl.tick(Duration::from_millis(200));
        assert!((ctl.time() - 3.0).abs() < 1e-9);
        assert!(!ctl.is_animating());
    }

    #[test]
    fn default_navigation_travels_at_playback_speed() {
        let (mut ctl, _) = recorded(Strip::uniform(4, 100.0, 0.0, 250.0), paused());
        ctl.to_index(1, NavOptions::default());
        ctl.tick(Duration::from_millis(500));
        assert!((ctl.time() - 0.5).abs() < 1e-9);
        ctl.tick(Duration::from_millis(500));
        assert!((ctl.time() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn navigation_pauses_playback() {
        let (mut ctl, _) = recorded(Strip::uniform(4, 100.0, 0.0, 250.0), LoopConfig::default());
        ctl.next(NavOptions::over(Duration::from_millis(400)));
        assert!(!ctl.is_playing());
    }

    #[test]
    fn empty_controller_is_inert() {
        let (mut ctl, seen) = recorded(Strip::uniform(0, 100.0, 0.0, 250.0), paused());
        ctl.next(NavOptions::instant());
        ctl.tick(Duration::from_millis(100));
        assert!(ctl.is_empty());
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn try_build_rejects_empty_and_zero_width() {
        let strip = Strip::uniform(0, 100.0, 0.0, 250.0);
        let err = LoopController::builder(strip, Vec::new()).try_build().err();
        assert_eq!(err, Some(ConfigError::NoItems));

        let strip = Strip::new(vec![100.0, 0.0], 0.0, 250.0);
        let items = strip.items();
        let err = LoopController::builder(strip, items).try_build().err();
        assert_eq!(
            err,
            Some(ConfigError::NonPositiveWidth {
                index: 1,
                width: 0.0
            })
        );
    }

    #[test]
    fn teardown_stops_layout_and_pointer_handling() {
        let strip = Strip::uniform(4, 100.0, 0.0, 250.0);
        let items = strip.items();
        let mut ctl = LoopController::builder(strip, items)
            .config(paused().with_draggable(true))
            .build();
        assert!(ctl.wants_pointer_input());
        ctl.teardown();
        assert!(!ctl.on_layout_change());
        assert!(!ctl.wants_pointer_input());
        assert!(!ctl.handle_pointer(&PointerEvent::down(0.0), Instant::now()));
    }
}
