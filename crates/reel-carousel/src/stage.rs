#![forbid(unsafe_code)]

//! The host side of the loop: geometry source and transform sink.
//!
//! A [`Stage`] answers layout questions about the container and the items
//! (the equivalents of `offsetLeft`, `offsetWidth`, computed width, scale
//! and client bounds) and receives each item's horizontal offset whenever
//! the timeline renders. [`Strip`] is an in-memory stage laying out
//! fixed-width items in a row, used headlessly and in tests.

use reel_core::geometry::Span;

/// Layout of the element the items scroll inside.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContainerMetrics {
    /// Client bounds.
    pub bounds: Span,
    /// Layout width (used for centering).
    pub width: f64,
}

impl ContainerMetrics {
    /// Container starting at `left` with the given width.
    #[must_use]
    pub fn new(left: f64, width: f64) -> Self {
        Self {
            bounds: Span::from_width(left, width),
            width,
        }
    }
}

/// Layout of one item as the host currently renders it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemMetrics {
    /// Natural left offset relative to the offset parent.
    pub offset_left: f64,
    /// Natural layout width.
    pub offset_width: f64,
    /// Computed width in px.
    pub width: f64,
    /// Horizontal scale factor.
    pub scale_x: f64,
    /// Pixel translation currently applied.
    pub x: f64,
    /// Translation currently applied, in percent of the item's width.
    pub x_percent: f64,
    /// Client bounds including any translation.
    pub bounds: Span,
}

impl ItemMetrics {
    /// Untransformed item at `offset_left` with the given width.
    #[must_use]
    pub fn at(offset_left: f64, width: f64) -> Self {
        Self {
            offset_left,
            offset_width: width,
            width,
            scale_x: 1.0,
            x: 0.0,
            x_percent: 0.0,
            bounds: Span::from_width(offset_left, width),
        }
    }

    /// Horizontal translation in px from both `x` and `x_percent`.
    #[must_use]
    pub fn translation(&self) -> f64 {
        self.x + self.x_percent / 100.0 * self.width
    }
}

/// Geometry source and transform sink for a loop.
pub trait Stage {
    /// Handle identifying an item.
    type Item;

    /// Current container layout.
    fn container(&self) -> ContainerMetrics;

    /// Current layout of `item`.
    fn measure(&self, item: &Self::Item) -> ItemMetrics;

    /// Clear any pixel translation on `item`.
    fn reset_x(&mut self, item: &Self::Item);

    /// Translate `item` by `x_percent` of its own width.
    fn set_x_percent(&mut self, item: &Self::Item, x_percent: f64);
}

/// In-memory row of items identified by index.
///
/// Items are laid out left to right starting at `leading` px into the
/// container, separated by `gap` px.
#[derive(Debug, Clone)]
pub struct Strip {
    container: ContainerMetrics,
    widths: Vec<f64>,
    gap: f64,
    leading: f64,
    x: Vec<f64>,
    x_percent: Vec<f64>,
}

impl Strip {
    /// Create a strip of items with the given widths.
    #[must_use]
    pub fn new(widths: Vec<f64>, gap: f64, container_width: f64) -> Self {
        let n = widths.len();
        Self {
            container: ContainerMetrics::new(0.0, container_width),
            widths,
            gap,
            leading: 0.0,
            x: vec![0.0; n],
            x_percent: vec![0.0; n],
        }
    }

    /// `count` items of equal width.
    #[must_use]
    pub fn uniform(count: usize, width: f64, gap: f64, container_width: f64) -> Self {
        Self::new(vec![width; count], gap, container_width)
    }

    /// Offset the first item from the container's leading edge (builder pattern).
    #[must_use]
    pub fn with_leading(mut self, leading: f64) -> Self {
        self.leading = leading;
        self
    }

    /// Pre-translate an item by `x` px (builder pattern).
    #[must_use]
    pub fn with_x(mut self, index: usize, x: f64) -> Self {
        if let Some(slot) = self.x.get_mut(index) {
            *slot = x;
        }
        self
    }

    /// Item handles `0..len`.
    #[must_use]
    pub fn items(&self) -> Vec<usize> {
        (0..self.widths.len()).collect()
    }

    /// Change the container width (a viewport resize).
    pub fn set_container_width(&mut self, width: f64) {
        self.container = ContainerMetrics::new(self.container.bounds.left, width);
    }

    /// Change one item's width (content reflow).
    pub fn set_width(&mut self, index: usize, width: f64) {
        if let Some(slot) = self.widths.get_mut(index) {
            *slot = width;
        }
    }

    /// Last x-percent written for `index`.
    #[must_use]
    pub fn x_percent(&self, index: usize) -> f64 {
        self.x_percent.get(index).copied().unwrap_or(0.0)
    }

    /// Last pixel translation for `index`.
    #[must_use]
    pub fn x(&self, index: usize) -> f64 {
        self.x.get(index).copied().unwrap_or(0.0)
    }

    fn natural_left(&self, index: usize) -> f64 {
        let before: f64 = self.widths[..index].iter().sum();
        self.leading + before + self.gap * index as f64
    }
}

impl Stage for Strip {
    type Item = usize;

    fn container(&self) -> ContainerMetrics {
        self.container
    }

    fn measure(&self, item: &usize) -> ItemMetrics {
        let index = (*item).min(self.widths.len().saturating_sub(1));
        let Some(&width) = self.widths.get(index) else {
            return ItemMetrics::at(0.0, 0.0);
        };
        let left = self.natural_left(index);
        let mut metrics = ItemMetrics::at(left, width);
        metrics.x = self.x[index];
        metrics.x_percent = self.x_percent[index];
        metrics.bounds = Span::from_width(self.container.bounds.left + left, width)
            .translate(metrics.translation());
        metrics
    }

    fn reset_x(&mut self, item: &usize) {
        if let Some(slot) = self.x.get_mut(*item) {
            *slot = 0.0;
        }
    }

    fn set_x_percent(&mut self, item: &usize, x_percent: f64) {
        if let Some(slot) = self.x_percent.get_mut(*item) {
            *slot = x_percent;
        }
    }
}
