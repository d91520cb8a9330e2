//! Error types for the accent-color public API.
//!
//! Configuration problems are always reported synchronously, before any
//! worker is started. Worker faults are reported once, through the same path
//! as the result.

use thiserror::Error;

/// Which border divisor a [`ConfigError::DivisorTooSmall`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderAxis {
    /// Divides the image width into the left/right border bands.
    Vertical,
    /// Divides the image height into the top/bottom border bands.
    Horizontal,
}

impl std::fmt::Display for BorderAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BorderAxis::Vertical => f.write_str("vertical"),
            BorderAxis::Horizontal => f.write_str("horizontal"),
        }
    }
}

/// A rejected configuration value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("accuracy must be > 0")]
    AccuracyNotPositive,

    #[error("accuracy {accuracy} exceeds image size {width}x{height}")]
    AccuracyExceedsImage {
        accuracy: u32,
        width: u32,
        height: u32,
    },

    #[error("{axis} border divisor must be > 1, got {value}")]
    DivisorTooSmall { axis: BorderAxis, value: u32 },

    #[error("merge distance must be a finite value >= 0, got {0}")]
    InvalidMergeDistance(f64),
}

/// Unified error type for color extraction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PickError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    #[error("worker {worker} failed: {reason}")]
    ExecutionFailure { worker: usize, reason: String },

    #[error("no pixels were sampled")]
    NoSamples,
}

impl PickError {
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, PickError::InvalidConfiguration(_))
    }
}
