#![forbid(unsafe_code)]

//! Project panel thumbnail carousels.
//!
//! Each project panel owns a strip of thumbnails and a preview image. Panels
//! with more than [`LOOP_THRESHOLD`] thumbnails run a paused, draggable
//! [`LoopController`] whose active-change notification moves the active
//! marker and swaps the preview. Smaller panels cycle through their
//! thumbnails with a plain index. Either way thumbnail 0 is active on open.
//!
//! A [`Gallery`] initializes each panel at most once, on first open.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use ahash::{AHashMap, AHashSet};
use web_time::Instant;

use reel_core::animation::ease_in_out;
use reel_core::capability::Capabilities;
use reel_core::gesture::PointerEvent;

#[cfg(feature = "tracing")]
use reel_core::logging::debug;
#[cfg(not(feature = "tracing"))]
use reel_core::debug;

use crate::config::{LoopConfig, NavOptions};
use crate::controller::LoopController;
use crate::error::{ConfigError, Result};
use crate::stage::Stage;

/// Panels with more thumbnails than this run an infinite loop.
pub const LOOP_THRESHOLD: usize = 5;

/// Transition used by the next/previous buttons.
#[must_use]
pub fn button_nav() -> NavOptions {
    NavOptions::over(Duration::from_millis(400)).ease(ease_in_out)
}

/// A thumbnail that can be shown in the preview.
pub trait Thumbnail {
    /// Image source for the preview.
    fn image_src(&self) -> &str;
}

impl Thumbnail for String {
    fn image_src(&self) -> &str {
        self
    }
}

impl Thumbnail for &'static str {
    fn image_src(&self) -> &str {
        self
    }
}

/// What the panel currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelView {
    /// Thumbnail carrying the active marker.
    pub active: Option<usize>,
    /// Image shown in the preview.
    pub preview_src: Option<String>,
}

impl PanelView {
    fn show(&mut self, index: usize, thumb: &impl Thumbnail) {
        self.active = Some(index);
        self.preview_src = Some(thumb.image_src().to_owned());
    }
}

enum Mode<S: Stage> {
    Looping(LoopController<S>),
    Manual { thumbs: Vec<S::Item>, index: usize },
}

/// Thumbnail carousel of one project panel.
pub struct ProjectCarousel<S: Stage> {
    mode: Mode<S>,
    view: Rc<RefCell<PanelView>>,
}

impl<S: Stage> std::fmt::Debug for ProjectCarousel<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectCarousel")
            .field("looping", &self.is_looping())
            .field("view", &*self.view.borrow())
            .finish()
    }
}

impl<S> ProjectCarousel<S>
where
    S: Stage + 'static,
    S::Item: Thumbnail + 'static,
{
    /// Set up a panel. Fails on an empty panel or if the loop rejects its
    /// thumbnails.
    pub fn new(stage: S, thumbs: Vec<S::Item>, capabilities: Capabilities) -> Result<Self> {
        if thumbs.is_empty() {
            return Err(ConfigError::NoItems);
        }
        let view = Rc::new(RefCell::new(PanelView::default()));
        if thumbs.len() <= LOOP_THRESHOLD {
            view.borrow_mut().show(0, &thumbs[0]);
            return Ok(Self {
                mode: Mode::Manual { thumbs, index: 0 },
                view,
            });
        }

        let sink = Rc::clone(&view);
        let controller = LoopController::builder(stage, thumbs)
            .config(LoopConfig::default().with_paused(true).with_draggable(true))
            .capabilities(capabilities)
            .on_active_change(move |thumb, index| sink.borrow_mut().show(index, thumb))
            .try_build()?;
        Ok(Self {
            mode: Mode::Looping(controller),
            view,
        })
    }

    /// Advance to the next thumbnail.
    pub fn next(&mut self) {
        match &mut self.mode {
            Mode::Looping(controller) => controller.next(button_nav()),
            Mode::Manual { thumbs, index } => {
                *index = (*index + 1) % thumbs.len();
                self.view.borrow_mut().show(*index, &thumbs[*index]);
            }
        }
    }

    /// Go back one thumbnail.
    pub fn previous(&mut self) {
        match &mut self.mode {
            Mode::Looping(controller) => controller.previous(button_nav()),
            Mode::Manual { thumbs, index } => {
                *index = (*index + thumbs.len() - 1) % thumbs.len();
                self.view.borrow_mut().show(*index, &thumbs[*index]);
            }
        }
    }

    /// A thumbnail was clicked: mark it active and preview it. The loop does
    /// not move.
    pub fn select(&mut self, index: usize) {
        match &mut self.mode {
            Mode::Looping(controller) => {
                if let Some(thumb) = controller.item(index) {
                    self.view.borrow_mut().show(index, thumb);
                }
            }
            Mode::Manual {
                thumbs,
                index: current,
            } => {
                if let Some(thumb) = thumbs.get(index) {
                    *current = index;
                    self.view.borrow_mut().show(index, thumb);
                }
            }
        }
    }
}

impl<S: Stage> ProjectCarousel<S> {
    /// Snapshot of what the panel shows.
    #[must_use]
    pub fn view(&self) -> PanelView {
        self.view.borrow().clone()
    }

    /// Index carrying the active marker.
    #[must_use]
    pub fn active(&self) -> Option<usize> {
        self.view.borrow().active
    }

    /// Whether this panel runs an infinite loop.
    #[must_use]
    pub fn is_looping(&self) -> bool {
        matches!(self.mode, Mode::Looping(_))
    }

    /// Whether pointer events should be routed to
    /// [`handle_pointer`](Self::handle_pointer).
    #[must_use]
    pub fn pointer_bound(&self) -> bool {
        match &self.mode {
            Mode::Looping(controller) => controller.wants_pointer_input(),
            Mode::Manual { .. } => false,
        }
    }

    /// Forward a pointer event to the loop.
    pub fn handle_pointer(&mut self, event: &PointerEvent, now: Instant) -> bool {
        match &mut self.mode {
            Mode::Looping(controller) => controller.handle_pointer(event, now),
            Mode::Manual { .. } => false,
        }
    }

    /// Advance running transitions.
    pub fn frame(&mut self, now: Instant) {
        if let Mode::Looping(controller) = &mut self.mode {
            controller.frame(now);
        }
    }

    /// Advance running transitions by a fixed step.
    pub fn tick(&mut self, dt: Duration) {
        if let Mode::Looping(controller) = &mut self.mode {
            controller.tick(dt);
        }
    }

    /// Forward a viewport or content change.
    pub fn on_layout_change(&mut self) -> bool {
        match &mut self.mode {
            Mode::Looping(controller) => controller.on_layout_change(),
            Mode::Manual { .. } => false,
        }
    }

    /// The loop, when running one.
    #[must_use]
    pub fn controller(&self) -> Option<&LoopController<S>> {
        match &self.mode {
            Mode::Looping(controller) => Some(controller),
            Mode::Manual { .. } => None,
        }
    }

    /// Mutable access to the loop, when running one.
    pub fn controller_mut(&mut self) -> Option<&mut LoopController<S>> {
        match &mut self.mode {
            Mode::Looping(controller) => Some(controller),
            Mode::Manual { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Gallery
// ---------------------------------------------------------------------------

/// Project panels keyed by project id, each initialized on first open.
pub struct Gallery<S: Stage> {
    initialized: AHashSet<String>,
    carousels: AHashMap<String, ProjectCarousel<S>>,
}

impl<S: Stage> Default for Gallery<S> {
    fn default() -> Self {
        Self {
            initialized: AHashSet::new(),
            carousels: AHashMap::new(),
        }
    }
}

impl<S: Stage> std::fmt::Debug for Gallery<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gallery")
            .field("initialized", &self.initialized.len())
            .field("carousels", &self.carousels.len())
            .finish()
    }
}

impl<S> Gallery<S>
where
    S: Stage + 'static,
    S::Item: Thumbnail + 'static,
{
    /// Create an empty gallery.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open project `id`. The first open initializes its carousel; later
    /// opens return the existing one and ignore the arguments. A project
    /// without thumbnails is marked initialized but gets no carousel.
    pub fn open(
        &mut self,
        id: &str,
        stage: S,
        thumbs: Vec<S::Item>,
        capabilities: Capabilities,
    ) -> Result<Option<&mut ProjectCarousel<S>>> {
        if !self.initialized.insert(id.to_owned()) {
            return Ok(self.carousels.get_mut(id));
        }
        if thumbs.is_empty() {
            debug!(message = "gallery.open", project = id, empty = true);
            return Ok(None);
        }
        let carousel = ProjectCarousel::new(stage, thumbs, capabilities)?;
        debug!(
            message = "gallery.open",
            project = id,
            looping = carousel.is_looping()
        );
        Ok(Some(self.carousels.entry(id.to_owned()).or_insert(carousel)))
    }
}

impl<S: Stage> Gallery<S> {
    /// Whether `id` has been opened before.
    #[must_use]
    pub fn is_initialized(&self, id: &str) -> bool {
        self.initialized.contains(id)
    }

    /// Carousel of project `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ProjectCarousel<S>> {
        self.carousels.get(id)
    }

    /// Mutable carousel of project `id`.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut ProjectCarousel<S>> {
        self.carousels.get_mut(id)
    }

    /// Forward a viewport change to every carousel.
    pub fn on_layout_change(&mut self) {
        for carousel in self.carousels.values_mut() {
            carousel.on_layout_change();
        }
    }

    /// Advance every carousel.
    pub fn frame(&mut self, now: Instant) {
        for carousel in self.carousels.values_mut() {
            carousel.frame(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::{ContainerMetrics, ItemMetrics};

    /// Stage whose items are image paths laid out at 80px each.
    struct Thumbs {
        srcs: Vec<String>,
        offsets: Vec<f64>,
    }

    impl Thumbs {
        fn new(n: usize) -> (Self, Vec<String>) {
            let srcs: Vec<String> = (0..n).map(|i| format!("img/{i}.jpg")).collect();
            let stage = Self {
                srcs: srcs.clone(),
                offsets: vec![0.0; n],
            };
            (stage, srcs)
        }

        fn index(&self, src: &str) -> usize {
            self.srcs.iter().position(|s| s == src).unwrap_or(0)
        }
    }

    impl Stage for Thumbs {
        type Item = String;

        fn container(&self) -> ContainerMetrics {
            ContainerMetrics::new(0.0, 240.0)
        }

        fn measure(&self, item: &String) -> ItemMetrics {
            let i = self.index(item);
            let mut m = ItemMetrics::at(i as f64 * 80.0, 80.0);
            m.x_percent = self.offsets[i];
            m.bounds = m.bounds.translate(m.translation());
            m
        }

        fn reset_x(&mut self, _item: &String) {}

        fn set_x_percent(&mut self, item: &String, x_percent: f64) {
            let i = self.index(item);
            self.offsets[i] = x_percent;
        }
    }

    #[test]
    fn small_panel_cycles_manually() {
        let (stage, thumbs) = Thumbs::new(3);
        let mut carousel = ProjectCarousel::new(stage, thumbs, Capabilities::full()).unwrap();
        assert!(!carousel.is_looping());
        assert!(!carousel.pointer_bound());
        assert_eq!(carousel.active(), Some(0));
        assert_eq!(carousel.view().preview_src.as_deref(), Some("img/0.jpg"));
        carousel.previous();
        assert_eq!(carousel.active(), Some(2));
        carousel.next();
        carousel.next();
        assert_eq!(carousel.view().preview_src.as_deref(), Some("img/1.jpg"));
    }

    #[test]
    fn large_panel_loops_and_previews() {
        let (stage, thumbs) = Thumbs::new(8);
        let mut carousel = ProjectCarousel::new(stage, thumbs, Capabilities::full()).unwrap();
        assert!(carousel.is_looping());
        assert!(carousel.pointer_bound());
        assert_eq!(carousel.active(), Some(0));
        assert_eq!(carousel.view().preview_src.as_deref(), Some("img/0.jpg"));

        carousel.next();
        for _ in 0..30 {
            carousel.tick(Duration::from_millis(16));
        }
        assert_eq!(carousel.active(), Some(1));
        assert_eq!(carousel.view().preview_src.as_deref(), Some("img/1.jpg"));
    }

    #[test]
    fn click_selects_without_moving_loop() {
        let (stage, thumbs) = Thumbs::new(8);
        let mut carousel = ProjectCarousel::new(stage, thumbs, Capabilities::full()).unwrap();
        let before = carousel.controller().map(LoopController::time);
        carousel.select(5);
        assert_eq!(carousel.active(), Some(5));
        assert_eq!(carousel.controller().map(LoopController::time), before);
    }

    #[test]
    fn gallery_initializes_once() {
        let mut gallery = Gallery::new();
        let (stage, thumbs) = Thumbs::new(8);
        let opened = gallery
            .open("alpha", stage, thumbs, Capabilities::full())
            .unwrap();
        opened.expect("carousel").next();

        let (stage, thumbs) = Thumbs::new(2);
        let again = gallery
            .open("alpha", stage, thumbs, Capabilities::full())
            .unwrap()
            .expect("existing carousel");
        assert!(again.is_looping(), "second open keeps the first carousel");
    }

    #[test]
    fn gallery_skips_empty_panels_for_good() {
        let mut gallery: Gallery<Thumbs> = Gallery::new();
        let (stage, _) = Thumbs::new(0);
        assert!(gallery
            .open("empty", stage, Vec::new(), Capabilities::full())
            .unwrap()
            .is_none());
        assert!(gallery.is_initialized("empty"));

        let (stage, thumbs) = Thumbs::new(8);
        assert!(gallery
            .open("empty", stage, thumbs, Capabilities::full())
            .unwrap()
            .is_none());
    }

    #[test]
    fn no_drag_support_leaves_pointer_unbound() {
        let (stage, thumbs) = Thumbs::new(8);
        let carousel = ProjectCarousel::new(stage, thumbs, Capabilities::none()).unwrap();
        assert!(carousel.is_looping());
        assert!(!carousel.pointer_bound());
    }
}
