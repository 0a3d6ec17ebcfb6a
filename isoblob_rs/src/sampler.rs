//! Memoized lattice sampling.
//!
//! Each interior lattice point is a corner of eight cubes. The sampler
//! evaluates the field once per point and serves later requests from two
//! dense `size³` arrays owned by the pass.

use isoblob_core::marching_cubes::CORNER_OFFSETS;
use isoblob_core::{GridCoord, GridFrame, ScalarField};

/// Pass-scoped cache of `field(point) - iso_level` over the lattice.
pub struct GridSampler<'f, F: ScalarField + ?Sized> {
    field: &'f F,
    frame: GridFrame,
    iso_level: f32,
    potentials: Vec<f32>,
    evaluated: Vec<bool>,
    evaluations: usize,
}

impl<'f, F: ScalarField + ?Sized> GridSampler<'f, F> {
    /// Allocate an empty cache for `frame`.
    pub fn new(field: &'f F, frame: GridFrame, iso_level: f32) -> Self {
        let n = frame.point_count();
        Self {
            field,
            frame,
            iso_level,
            potentials: vec![0.0; n],
            evaluated: vec![false; n],
            evaluations: 0,
        }
    }

    /// The lattice being sampled.
    #[inline]
    pub fn frame(&self) -> &GridFrame {
        &self.frame
    }

    /// The offset subtracted from every field value.
    #[inline]
    pub fn iso_level(&self) -> f32 {
        self.iso_level
    }

    /// Sample at a lattice point, evaluating the field on first request.
    ///
    /// # Panics
    /// If `coord` is not a lattice point of the grid.
    #[inline]
    pub fn sample(&mut self, coord: GridCoord) -> f32 {
        assert!(
            self.frame.contains_point(coord),
            "lattice point {:?} outside grid of size {}",
            coord,
            self.frame.size
        );
        self.sample_unchecked(coord)
    }

    /// Sample at `coord`, or `None` outside the grid.
    #[inline]
    pub fn try_sample(&mut self, coord: GridCoord) -> Option<f32> {
        self.frame
            .contains_point(coord)
            .then(|| self.sample_unchecked(coord))
    }

    /// Previously computed sample, without evaluating anything.
    #[inline]
    pub fn cached(&self, coord: GridCoord) -> Option<f32> {
        if !self.frame.contains_point(coord) {
            return None;
        }
        let index = self.frame.point_index(coord);
        self.evaluated[index].then(|| self.potentials[index])
    }

    /// Samples at the 8 corners of the cube based at `base`, in corner order.
    #[inline]
    pub fn cube_samples(&mut self, base: GridCoord) -> [f32; 8] {
        CORNER_OFFSETS.map(|offset| self.sample(base.offset(offset)))
    }

    /// Number of field evaluations performed so far.
    #[inline]
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    fn sample_unchecked(&mut self, coord: GridCoord) -> f32 {
        let index = self.frame.point_index(coord);
        if !self.evaluated[index] {
            let world = self.frame.to_world(coord);
            self.potentials[index] = self.field.evaluate(world) - self.iso_level;
            self.evaluated[index] = true;
            self.evaluations += 1;
        }
        self.potentials[index]
    }
}
