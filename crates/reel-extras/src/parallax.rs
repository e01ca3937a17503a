#![forbid(unsafe_code)]

//! Pointer-driven parallax for background shapes.
//!
//! Every pointer move nudges each shape by a small amount proportional to
//! how far the pointer sits from the viewport center. Nudges accumulate, so
//! shapes slowly drift toward the side the pointer lingers on.

use crate::decor::Shape;

/// Scale from pointer offset (viewport fractions) to percent moved per event.
pub const DEFAULT_SPEED: f64 = 0.05;

/// Parallax tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParallaxConfig {
    /// Scale applied to the pointer's offset from center (default: 0.05).
    pub speed: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
        }
    }
}

/// Applies pointer parallax to shapes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerParallax {
    config: ParallaxConfig,
}

impl PointerParallax {
    /// Create with the given tuning.
    #[must_use]
    pub fn new(config: ParallaxConfig) -> Self {
        Self { config }
    }

    /// Percent offset for a pointer at `(x, y)` in a `width` × `height`
    /// viewport. `None` for empty or non-finite viewports.
    #[must_use]
    pub fn nudge(&self, x: f64, y: f64, width: f64, height: f64) -> Option<(f64, f64)> {
        if !(width > 0.0 && height > 0.0) || !width.is_finite() || !height.is_finite() {
            return None;
        }
        let speed = self.config.speed;
        Some(((x / width - 0.5) * speed, (y / height - 0.5) * speed))
    }

    /// Move every shape for a pointer event. Returns `false` if the
    /// viewport was degenerate and nothing moved.
    pub fn apply(&self, shapes: &mut [Shape], x: f64, y: f64, width: f64, height: f64) -> bool {
        let Some((dx, dy)) = self.nudge(x, y, width, height) else {
            return false;
        };
        for shape in shapes {
            shape.placement.left += dx;
            shape.placement.top += dy;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decor::{Placement, ShapeKind};

    fn shape(left: f64, top: f64) -> Shape {
        Shape {
            kind: ShapeKind::Circle,
            placement: Placement {
                left,
                top,
                delay: 0.0,
                duration: 10.0,
            },
        }
    }

    #[test]
    fn center_pointer_does_not_move() {
        let p = PointerParallax::default();
        assert_eq!(p.nudge(400.0, 300.0, 800.0, 600.0), Some((0.0, 0.0)));
    }

    #[test]
    fn corner_pointer_moves_by_half_speed() {
        let p = PointerParallax::default();
        let mut shapes = vec![shape(10.0, 20.0), shape(50.0, 50.0)];
        assert!(p.apply(&mut shapes, 800.0, 0.0, 800.0, 600.0));
        assert!((shapes[0].placement.left - 10.025).abs() < 1e-12);
        assert!((shapes[0].placement.top - 19.975).abs() < 1e-12);
        assert!((shapes[1].placement.left - 50.025).abs() < 1e-12);
    }

    #[test]
    fn degenerate_viewport_is_ignored() {
        let p = PointerParallax::default();
        let mut shapes = vec![shape(10.0, 20.0)];
        assert!(!p.apply(&mut shapes, 5.0, 5.0, 0.0, 600.0));
        assert_eq!(shapes[0].placement.left, 10.0);
        assert_eq!(p.nudge(1.0, 1.0, f64::INFINITY, 1.0), None);
    }

    #[test]
    fn custom_speed_scales_nudge() {
        let p = PointerParallax::new(ParallaxConfig { speed: 1.0 });
        assert_eq!(p.nudge(0.0, 600.0, 800.0, 600.0), Some((-0.5, 0.5)));
    }
}
