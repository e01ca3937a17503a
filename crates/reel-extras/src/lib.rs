#![forbid(unsafe_code)]

//! Page decoration around the carousel.
//!
//! - [`decor`]: randomized floating shapes and particles with staggered
//!   animation timing.
//! - [`parallax`]: pointer-driven drift of the shapes.

pub mod decor;
pub mod parallax;

pub use decor::{
    DecorConfig, Decoration, DecorationGenerator, Particle, Placement, Shape, ShapeKind,
};
pub use parallax::{ParallaxConfig, PointerParallax};
