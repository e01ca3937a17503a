#![forbid(unsafe_code)]

//! reel public facade crate.
//!
//! Re-exports the loop controller, its host glue and the decoration helpers
//! under one roof, plus a prelude for day-to-day usage.

use std::fmt;

// --- Re-exports -----------------------------------------------------------

pub use reel_carousel::{
    ConfigError, ContainerMetrics, Diagnostic, DragPhase, Gallery, ItemMetrics, LoopConfig,
    LoopController, LoopControllerBuilder, NavOptions, PanelView, ProjectCarousel,
    SnapIncrement, Stage, Strip, Thumbnail,
};
pub use reel_core::animation::{LoopCount, ease_in_out, linear};
pub use reel_core::capability::Capabilities;
pub use reel_core::clock::{FrameClock, FrameTicker, SystemClock};
pub use reel_core::gesture::PointerEvent;

#[cfg(feature = "extras")]
pub use reel_extras::{DecorConfig, DecorationGenerator, PointerParallax};

#[cfg(feature = "tracing-json")]
pub use reel_core::logging::init_json_logging;

// --- Errors ---------------------------------------------------------------

/// Top-level error type.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A carousel rejected its configuration or items.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for reel APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Capabilities, Error, LoopConfig, LoopController, NavOptions, PointerEvent, Result, Stage,
        Strip,
    };

    pub use crate::{carousel, core};

    #[cfg(feature = "extras")]
    pub use crate::extras;
}

pub use reel_carousel as carousel;
pub use reel_core as core;
#[cfg(feature = "extras")]
pub use reel_extras as extras;

#[cfg(test)]
mod tests {
    use super::*;

    fn build_empty() -> Result<LoopController<Strip>> {
        let strip = Strip::uniform(0, 100.0, 0.0, 300.0);
        Ok(LoopController::builder(strip, Vec::new()).try_build()?)
    }

    #[test]
    fn config_errors_convert() {
        let err = build_empty().err();
        assert_eq!(err, Some(Error::Config(ConfigError::NoItems)));
        assert_eq!(
            err.map(|e| e.to_string()).as_deref(),
            Some("loop needs at least one item")
        );
    }

    #[test]
    fn prelude_builds_a_loop() {
        use crate::prelude::*;

        let strip = Strip::uniform(7, 90.0, 10.0, 400.0);
        let items = strip.items();
        let mut carousel = LoopController::builder(strip, items)
            .config(LoopConfig::default().with_paused(true))
            .capabilities(Capabilities::full())
            .build();
        carousel.previous(NavOptions::instant());
        assert_eq!(carousel.current(), 6);
    }
}
