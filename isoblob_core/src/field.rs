//! Radial potential functions and the skeletons that carry them.
//!
//! A [`Skeleton`] is a point source whose contribution to the field depends
//! only on the scaled squared distance `r² = |(p - position) / scale|²`. The
//! falloff shape is chosen per skeleton through [`PotentialKind`]; both
//! shapes have finite support, so a skeleton contributes exactly zero beyond
//! its [`support_radius`](Skeleton::support_radius).
//!
//! # Example
//!
//! ```
//! use isoblob_core::{Point3, Skeleton, ScalarField};
//!
//! let blobs = [Skeleton::new(Point3::splat(0.0))];
//! // Potential peaks at 0.25 at the skeleton position.
//! assert!((blobs[..].evaluate(Point3::splat(0.0)) - 0.25).abs() < 1e-6);
//! ```

use crate::error::IsoCoreError;
use crate::types::Point3;

/// Upper bound on the iterations of the influence radius search, per phase.
pub const RADIUS_SEARCH_MAX_ITERATIONS: u32 = 1000;

/// Default potential tolerance for the influence radius search.
pub const RADIUS_SEARCH_EPSILON: f32 = 0.001;

/// Squared support radius of the quartic metaball.
const QUARTIC_SUPPORT_SQ: f32 = 0.49;

/// Falloff shape of a skeleton's contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PotentialKind {
    /// `r²(r² - 1) + 1/4` inside `r < 0.7`, peak 0.25.
    #[default]
    QuarticMetaball,
    /// Wyvill soft object `(1 - r²)³` inside `r < 1`, peak 1.
    SoftObject,
}

impl PotentialKind {
    /// Potential and radial derivative at scaled squared distance `r2`.
    ///
    /// Returns `(0, 0)` outside the support.
    #[inline]
    pub fn evaluate(self, r2: f32) -> (f32, f32) {
        match self {
            PotentialKind::QuarticMetaball => {
                if r2 > QUARTIC_SUPPORT_SQ {
                    return (0.0, 0.0);
                }
                let r = libm::sqrtf(r2);
                (r2 * (r2 - 1.0) + 0.25, r * (4.0 * r2 - 2.0))
            }
            PotentialKind::SoftObject => {
                if r2 >= 1.0 {
                    return (0.0, 0.0);
                }
                let r = libm::sqrtf(r2);
                let falloff = 1.0 - r2;
                (falloff * falloff * falloff, -6.0 * r * falloff * falloff)
            }
        }
    }

    /// Potential only.
    #[inline]
    pub fn potential(self, r2: f32) -> f32 {
        self.evaluate(r2).0
    }

    /// Unscaled radius beyond which the potential is exactly zero.
    #[inline]
    pub fn support_radius(self) -> f32 {
        match self {
            PotentialKind::QuarticMetaball => 0.7,
            PotentialKind::SoftObject => 1.0,
        }
    }

    /// Potential at the skeleton position.
    #[inline]
    pub fn peak(self) -> f32 {
        self.potential(0.0)
    }

    /// Unscaled radius where the potential falls to `iso_value`.
    ///
    /// Bisection on `r²`: the upper bound starts at 1 and doubles until the
    /// potential there is at most `iso_value`, then the bracket is halved
    /// until its potential span is below `eps`. Both phases share one
    /// iteration budget of [`RADIUS_SEARCH_MAX_ITERATIONS`].
    pub fn iso_radius(self, iso_value: f32, eps: f32) -> Result<f32, IsoCoreError> {
        let mut r2_min = 0.0f32;
        let mut r2_max = 1.0f32;
        let mut pot_min = self.potential(r2_min);
        let mut pot_max = self.potential(r2_max);
        let mut iterations = 0u32;

        while pot_max > iso_value {
            r2_max *= 2.0;
            pot_max = self.potential(r2_max);
            iterations += 1;
            if iterations > RADIUS_SEARCH_MAX_ITERATIONS {
                return Err(IsoCoreError::RadiusSearchUnbounded {
                    iso_value,
                    iterations,
                });
            }
        }

        while pot_min - pot_max > eps {
            let r2_mid = 0.5 * (r2_min + r2_max);
            let pot_mid = self.potential(r2_mid);
            if pot_mid < iso_value {
                r2_max = r2_mid;
                pot_max = pot_mid;
            } else {
                r2_min = r2_mid;
                pot_min = pot_mid;
            }
            iterations += 1;
            if iterations > RADIUS_SEARCH_MAX_ITERATIONS {
                return Err(IsoCoreError::RadiusSearchDiverged {
                    iso_value,
                    iterations,
                });
            }
        }

        Ok(libm::sqrtf(r2_min))
    }
}

/// A point source of potential.
///
/// Skeletons are plain data: their owner moves them between extraction
/// passes and lends them immutably for the duration of a pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Skeleton {
    /// World position.
    pub position: Point3,
    /// Radial scale; must be finite and positive.
    pub scale: f32,
    /// Threshold used by [`Skeleton::influence_radius`].
    pub iso_value: f32,
    /// Falloff shape.
    pub kind: PotentialKind,
}

impl Skeleton {
    /// Default iso value of a skeleton.
    pub const DEFAULT_ISO_VALUE: f32 = 0.1;

    /// Quartic metaball of scale 1 at `position`.
    #[inline]
    pub const fn new(position: Point3) -> Self {
        Self {
            position,
            scale: 1.0,
            iso_value: Self::DEFAULT_ISO_VALUE,
            kind: PotentialKind::QuarticMetaball,
        }
    }

    /// Set the scale.
    #[inline]
    pub const fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Set the iso value.
    #[inline]
    pub const fn with_iso_value(mut self, iso_value: f32) -> Self {
        self.iso_value = iso_value;
        self
    }

    /// Set the potential kind.
    #[inline]
    pub const fn with_kind(mut self, kind: PotentialKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check that the scale is usable as a divisor.
    pub fn validate(&self) -> Result<(), IsoCoreError> {
        if self.scale.is_finite() && self.scale > 0.0 {
            Ok(())
        } else {
            Err(IsoCoreError::InvalidScale { scale: self.scale })
        }
    }

    /// Scaled squared distance from the skeleton to `point`.
    #[inline]
    pub fn scaled_distance_squared(&self, point: Point3) -> f32 {
        ((point - self.position) / self.scale).length_squared()
    }

    /// Potential and radial derivative of this skeleton alone at `point`.
    #[inline]
    pub fn potential_and_gradient(&self, point: Point3) -> (f32, f32) {
        self.kind.evaluate(self.scaled_distance_squared(point))
    }

    /// Potential of this skeleton alone at `point`.
    #[inline]
    pub fn potential(&self, point: Point3) -> f32 {
        self.potential_and_gradient(point).0
    }

    /// World-space radius beyond which the skeleton contributes nothing.
    #[inline]
    pub fn support_radius(&self) -> f32 {
        self.kind.support_radius() * self.scale
    }

    /// World-space radius of the lone skeleton's iso-surface at its own
    /// `iso_value`.
    pub fn influence_radius(&self) -> Result<f32, IsoCoreError> {
        self.validate()?;
        let r = self.kind.iso_radius(self.iso_value, RADIUS_SEARCH_EPSILON)?;
        Ok(r * self.scale)
    }
}

impl Default for Skeleton {
    fn default() -> Self {
        Self::new(Point3::default())
    }
}
