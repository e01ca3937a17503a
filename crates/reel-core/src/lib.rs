#![forbid(unsafe_code)]

//! Core: frame timing, tweens, glide motion, geometry and pointer tracking.
//!
//! # Role in reel
//! `reel-core` holds the primitives that know nothing about carousels. The
//! loop controller (`reel-carousel`) drives a [`animation::LoopTimeline`]
//! through a [`animation::TweenScheduler`], feeds pointer input through a
//! [`gesture::PointerTracker`], and reads host capabilities from
//! [`capability::Capabilities`].
//!
//! # Primary responsibilities
//! - **Animation**: easing curves, tweens, exponential glide, a cyclic
//!   timeline with loop counts, and a handle-based tween scheduler.
//! - **Clock**: per-frame clock sources and a frame ticker producing deltas.
//! - **Geometry**: horizontal spans and cyclic wrap/snap helpers.
//! - **Gesture**: press → move → release tracking with throw velocity.

pub mod animation;
pub mod capability;
pub mod clock;
pub mod geometry;
pub mod gesture;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, error, info, info_span, trace, warn};
