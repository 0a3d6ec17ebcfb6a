//! Error types for isoblob_core operations.
//!
//! Provides a simple error enum with no external dependencies for no_std compatibility.

use core::fmt;

/// Error types that can occur during isoblob_core operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IsoCoreError {
    /// No radius was found at which the potential drops below the iso value.
    RadiusSearchUnbounded {
        /// Iso value the search was looking for.
        iso_value: f32,
        /// Iterations spent doubling the upper bound.
        iterations: u32,
    },
    /// Bisection on the radius did not converge within the iteration budget.
    RadiusSearchDiverged {
        /// Iso value the search was looking for.
        iso_value: f32,
        /// Iterations spent bisecting.
        iterations: u32,
    },
    /// A skeleton scale was zero, negative or not finite.
    InvalidScale {
        /// The rejected scale.
        scale: f32,
    },
}

impl fmt::Display for IsoCoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IsoCoreError::RadiusSearchUnbounded {
                iso_value,
                iterations,
            } => {
                write!(
                    f,
                    "no radius reaches iso value {} after {} expansions",
                    iso_value, iterations
                )
            }
            IsoCoreError::RadiusSearchDiverged {
                iso_value,
                iterations,
            } => {
                write!(
                    f,
                    "radius search for iso value {} did not converge in {} steps",
                    iso_value, iterations
                )
            }
            IsoCoreError::InvalidScale { scale } => {
                write!(f, "skeleton scale {} must be finite and positive", scale)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for IsoCoreError {}
