use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Input rejected by boundary validation.
///
/// The controller itself never fails: [`LoopControllerBuilder::build`]
/// accepts degenerate input and behaves degenerately. Hosts that want to
/// refuse such input call [`LoopControllerBuilder::try_build`] or
/// [`LoopConfig::validate`] instead.
///
/// [`LoopControllerBuilder::build`]: crate::LoopControllerBuilder::build
/// [`LoopControllerBuilder::try_build`]: crate::LoopControllerBuilder::try_build
/// [`LoopConfig::validate`]: crate::LoopConfig::validate
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("loop needs at least one item")]
    NoItems,

    #[error("speed must be positive and finite, got {0}")]
    NonPositiveSpeed(f64),

    #[error("snap increment must be positive and finite, got {0}")]
    InvalidSnap(f64),

    #[error("item {index} has non-positive width {width}")]
    NonPositiveWidth { index: usize, width: f64 },
}
