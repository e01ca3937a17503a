#![forbid(unsafe_code)]

//! Infinite-loop carousel controller.
//!
//! # Role in reel
//! `reel-carousel` turns a row of items into a seamless, endlessly looping
//! strip. It measures items through a host-provided [`Stage`], plays a
//! cyclic timeline built from `reel-core` primitives, supports index
//! navigation by the shortest path, drag and throw with snapping, and
//! reports the active item as it changes.
//!
//! # Quick start
//!
//! ```
//! use reel_carousel::{LoopConfig, LoopController, NavOptions, Strip};
//!
//! let strip = Strip::uniform(6, 120.0, 16.0, 480.0);
//! let items = strip.items();
//! let mut carousel = LoopController::builder(strip, items)
//!     .config(LoopConfig::default().with_paused(true))
//!     .build();
//!
//! carousel.next(NavOptions::instant());
//! assert_eq!(carousel.current(), 1);
//! ```
//!
//! # Module map
//! - [`controller`]: the loop controller and its builder.
//! - [`layout`]: width measurement, motion tracks and label times.
//! - [`drag`]: drag proxy and phases.
//! - [`host`]: per-project thumbnail panels.
//! - [`stage`]: host geometry trait and the in-memory [`Strip`].
//! - [`config`] / [`error`]: configuration and boundary validation.

pub mod config;
pub mod controller;
pub mod drag;
pub mod error;
pub mod host;
pub mod layout;
pub mod stage;

pub use config::{LoopConfig, NavOptions, SnapIncrement};
pub use controller::{ActiveChangeFn, Diagnostic, LoopController, LoopControllerBuilder};
pub use drag::{DragPhase, TAP_TOLERANCE};
pub use error::{ConfigError, Result};
pub use host::{Gallery, LOOP_THRESHOLD, PanelView, ProjectCarousel, Thumbnail};
pub use layout::LoopLayout;
pub use stage::{ContainerMetrics, ItemMetrics, Stage, Strip};
