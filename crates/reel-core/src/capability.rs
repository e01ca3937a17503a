#![forbid(unsafe_code)]

//! Host capability descriptor.
//!
//! Hosts state up front which optional input features they can deliver
//! instead of having components probe the environment. A host without
//! pointer-drag delivery passes [`Capabilities::none`]; a host that can drag
//! but cannot run momentum settling passes [`Capabilities::drag_only`].

/// Optional features the host environment supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Pointer press/move/release events can be delivered.
    pub drag_supported: bool,
    /// Momentum (throw) settling after release is available.
    pub inertia_supported: bool,
}

impl Capabilities {
    /// Drag and momentum both available.
    #[must_use]
    pub const fn full() -> Self {
        Self {
            drag_supported: true,
            inertia_supported: true,
        }
    }

    /// Drag available, momentum settling unavailable.
    #[must_use]
    pub const fn drag_only() -> Self {
        Self {
            drag_supported: true,
            inertia_supported: false,
        }
    }

    /// Neither drag nor momentum.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            drag_supported: false,
            inertia_supported: false,
        }
    }

    /// Momentum settling is usable (requires drag).
    #[inline]
    #[must_use]
    pub const fn can_throw(&self) -> bool {
        self.drag_supported && self.inertia_supported
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::full()
    }
}
