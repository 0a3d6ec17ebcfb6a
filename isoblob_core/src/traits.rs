//! Field abstraction consumed by the grid sampler.
//!
//! The extractor only needs a way to turn a world position into a scalar.
//! Skeleton sets implement [`ScalarField`] as the additive sum of their
//! potentials; arbitrary closures can be plugged in through [`FnField`].

use crate::field::Skeleton;
use crate::types::Point3;

/// A scalar function over world space.
///
/// Implementations must be pure for the duration of an extraction pass: the
/// sampler evaluates each lattice point at most once and caches the result.
pub trait ScalarField {
    /// Field value at `point`.
    fn evaluate(&self, point: Point3) -> f32;
}

/// Sum of all skeleton potentials.
impl ScalarField for [Skeleton] {
    #[inline]
    fn evaluate(&self, point: Point3) -> f32 {
        self.iter().map(|skeleton| skeleton.potential(point)).sum()
    }
}

impl<const N: usize> ScalarField for [Skeleton; N] {
    #[inline]
    fn evaluate(&self, point: Point3) -> f32 {
        self[..].evaluate(point)
    }
}

impl ScalarField for Skeleton {
    #[inline]
    fn evaluate(&self, point: Point3) -> f32 {
        self.potential(point)
    }
}

impl<T: ScalarField + ?Sized> ScalarField for &T {
    #[inline]
    fn evaluate(&self, point: Point3) -> f32 {
        (**self).evaluate(point)
    }
}

/// Adapter turning any `Fn(Point3) -> f32` into a [`ScalarField`].
///
/// ```
/// use isoblob_core::{FnField, Point3, ScalarField};
///
/// let plane = FnField(|p: Point3| p.y);
/// assert_eq!(plane.evaluate(Point3::new(0.0, 2.0, 0.0)), 2.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnField<F>(pub F);

impl<F: Fn(Point3) -> f32> ScalarField for FnField<F> {
    #[inline]
    fn evaluate(&self, point: Point3) -> f32 {
        (self.0)(point)
    }
}
