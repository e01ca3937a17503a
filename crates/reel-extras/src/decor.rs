#![forbid(unsafe_code)]

//! Randomized background decoration.
//!
//! A [`DecorationGenerator`] scatters floating geometric shapes and small
//! particles over a page. Positions are percentages of the background, so
//! the layout is resolution independent; timing staggers each element's
//! CSS animation via a delay and a duration.
//!
//! Generators seeded with [`DecorationGenerator::seeded`] are
//! deterministic.

use std::ops::Range;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[cfg(feature = "tracing")]
use reel_core::logging::debug;
#[cfg(not(feature = "tracing"))]
use reel_core::debug;

/// Shape delay range in seconds.
pub const SHAPE_DELAY: Range<f64> = 0.0..10.0;
/// Shape animation duration range in seconds.
pub const SHAPE_DURATION: Range<f64> = 10.0..20.0;
/// Particle delay range in seconds.
pub const PARTICLE_DELAY: Range<f64> = 0.0..8.0;
/// Particle animation duration range in seconds.
pub const PARTICLE_DURATION: Range<f64> = 4.0..8.0;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Geometric shape variety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShapeKind {
    Square,
    Circle,
    Triangle,
    Rectangle,
}

impl ShapeKind {
    /// Every kind, in class-name order.
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Square,
        ShapeKind::Circle,
        ShapeKind::Triangle,
        ShapeKind::Rectangle,
    ];

    /// CSS class for this kind.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Circle => "circle",
            Self::Triangle => "triangle",
            Self::Rectangle => "rectangle",
        }
    }
}

/// Where an element sits and how its animation is staggered.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    /// Left offset in percent of the background.
    pub left: f64,
    /// Top offset in percent of the background.
    pub top: f64,
    /// Animation delay in seconds.
    pub delay: f64,
    /// Animation duration in seconds.
    pub duration: f64,
}

impl Placement {
    /// Inline style for the element.
    #[must_use]
    pub fn style(&self) -> String {
        format!(
            "left: {}%; top: {}%; animation-delay: {}s; animation-duration: {}s",
            self.left, self.top, self.delay, self.duration
        )
    }
}

/// A floating background shape.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shape {
    pub kind: ShapeKind,
    pub placement: Placement,
}

impl Shape {
    /// Space-separated class list.
    #[must_use]
    pub fn class_list(&self) -> String {
        format!("shape {}", self.kind.class_name())
    }
}

/// A small drifting particle.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Particle {
    pub placement: Placement,
}

impl Particle {
    /// Class list.
    #[must_use]
    pub fn class_list(&self) -> &'static str {
        "particle"
    }
}

/// Generated decoration for one page.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decoration {
    pub shapes: Vec<Shape>,
    pub particles: Vec<Particle>,
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// How much decoration to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DecorConfig {
    /// Number of shapes (default: 40).
    pub shape_count: usize,
    /// Number of particles (default: 100).
    pub particle_count: usize,
}

impl Default for DecorConfig {
    fn default() -> Self {
        Self {
            shape_count: 40,
            particle_count: 100,
        }
    }
}

impl DecorConfig {
    /// Set the shape count.
    #[must_use]
    pub fn shape_count(mut self, count: usize) -> Self {
        self.shape_count = count;
        self
    }

    /// Set the particle count.
    #[must_use]
    pub fn particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// Random source for decoration layouts.
#[derive(Debug, Clone)]
pub struct DecorationGenerator {
    config: DecorConfig,
    rng: SmallRng,
}

impl DecorationGenerator {
    /// Generator seeded from the operating system.
    #[must_use]
    pub fn new(config: DecorConfig) -> Self {
        Self {
            config,
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Deterministic generator.
    #[must_use]
    pub fn seeded(config: DecorConfig, seed: u64) -> Self {
        Self {
            config,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &DecorConfig {
        &self.config
    }

    /// Lay out a fresh set of shapes and particles.
    pub fn generate(&mut self) -> Decoration {
        let shapes: Vec<Shape> = (0..self.config.shape_count)
            .map(|_| self.shape())
            .collect();
        let particles: Vec<Particle> = (0..self.config.particle_count)
            .map(|_| self.particle())
            .collect();
        debug!(
            message = "decor.generate",
            shapes = shapes.len(),
            particles = particles.len()
        );
        Decoration { shapes, particles }
    }

    fn shape(&mut self) -> Shape {
        let kind = ShapeKind::ALL[self.rng.random_range(0..ShapeKind::ALL.len())];
        Shape {
            kind,
            placement: self.placement(SHAPE_DELAY, SHAPE_DURATION),
        }
    }

    fn particle(&mut self) -> Particle {
        Particle {
            placement: self.placement(PARTICLE_DELAY, PARTICLE_DURATION),
        }
    }

    fn placement(&mut self, delay: Range<f64>, duration: Range<f64>) -> Placement {
        Placement {
            left: self.rng.random_range(0.0..100.0),
            top: self.rng.random_range(0.0..100.0),
            delay: self.rng.random_range(delay),
            duration: self.rng.random_range(duration),
        }
    }
}
