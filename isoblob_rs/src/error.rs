//! Error types for isoblob_rs.
//!
//! All validation happens before a pass starts; once sampling begins an
//! extraction cannot fail.

use isoblob_core::IsoCoreError;
use thiserror::Error;

/// Errors that can occur when configuring or starting an extraction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IsoError {
    /// Grid step is zero, negative or not finite.
    #[error("grid step must be finite and positive, got {step}")]
    InvalidGridStep {
        /// The rejected step.
        step: f32,
    },

    /// Grid would exceed the supported number of points per axis.
    #[error("grid size {size} exceeds the maximum of {max} points per axis")]
    GridTooLarge {
        /// Requested points per axis.
        size: u32,
        /// Largest accepted value.
        max: u32,
    },

    /// A skeleton has an unusable scale.
    #[error("skeleton {index} has invalid scale {scale}")]
    InvalidSkeleton {
        /// Position of the skeleton in the input slice.
        index: usize,
        /// The rejected scale.
        scale: f32,
    },

    /// A parameter that must be finite is NaN or infinite.
    #[error("{name} must be finite")]
    NonFiniteParameter {
        /// Name of the offending parameter.
        name: &'static str,
    },

    /// Error raised by a core routine.
    #[error(transparent)]
    Core(#[from] IsoCoreError),
}

/// Result type alias for isoblob_rs operations.
pub type Result<T> = core::result::Result<T, IsoError>;
