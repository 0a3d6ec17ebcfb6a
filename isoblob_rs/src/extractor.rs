//! Extraction entry points.

use std::time::Instant;

use isoblob_core::{ScalarField, Skeleton};

use crate::config::{ExtractionConfig, Traversal};
use crate::error::{IsoError, Result};
use crate::mesh::Mesh;
use crate::pass::{ExtractionPass, PassStats};
use crate::traversal::{self, SeedHint};

/// Validated extraction settings, reusable across passes.
///
/// ```
/// use isoblob_rs::prelude::*;
///
/// let extractor = Extractor::new(ExtractionConfig::default())?;
/// let mesh = extractor.extract(&[Skeleton::new(Point3::splat(0.0))])?;
/// assert!(mesh.is_closed());
/// # Ok::<(), isoblob_rs::IsoError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Extractor {
    config: ExtractionConfig,
}

impl Extractor {
    /// Validate `config` and build an extractor.
    pub fn new(config: ExtractionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use.
    #[inline]
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract the iso-surface of the summed skeleton potentials.
    pub fn extract(&self, skeletons: &[Skeleton]) -> Result<Mesh> {
        self.extract_with_stats(skeletons).map(|(mesh, _)| mesh)
    }

    /// Like [`extract`](Self::extract), also returning the pass counters.
    pub fn extract_with_stats(&self, skeletons: &[Skeleton]) -> Result<(Mesh, PassStats)> {
        validate_skeletons(skeletons)?;
        let hints: Vec<SeedHint> = skeletons.iter().map(SeedHint::from).collect();
        Ok(self.extract_field(skeletons, &hints))
    }

    /// Extract the zero set of `field - iso_level` for any scalar field.
    ///
    /// `hints` seed the flood fill and are ignored by the exhaustive
    /// traversal. A flood fill without hints yields an empty mesh.
    pub fn extract_field<F: ScalarField + ?Sized>(
        &self,
        field: &F,
        hints: &[SeedHint],
    ) -> (Mesh, PassStats) {
        let grid = &self.config.grid;
        if grid.size < 2 {
            log::warn!("grid of size {} has no cubes, mesh is empty", grid.size);
            return (Mesh::default(), PassStats::default());
        }

        let start = Instant::now();
        let mut pass = ExtractionPass::new(field, &self.config);
        match self.config.traversal {
            Traversal::Exhaustive => traversal::exhaustive(&mut pass),
            Traversal::FloodFill => {
                traversal::flood_fill(&mut pass, hints, self.config.seed_fallback)
            }
        }
        let (mesh, stats) = pass.finish();

        log::debug!(
            "{:?} pass: {} triangles, {} vertices, {} evaluations, {} cubes visited in {:?}",
            self.config.traversal,
            stats.triangles,
            stats.vertices,
            stats.evaluations,
            stats.cubes_visited,
            start.elapsed()
        );
        (mesh, stats)
    }
}

/// One-shot extraction with `config`.
pub fn extract(skeletons: &[Skeleton], config: &ExtractionConfig) -> Result<Mesh> {
    Extractor::new(*config)?.extract(skeletons)
}

/// Radius of each skeleton's lone iso-surface, in input order.
///
/// Fails on the first skeleton whose radius search does not converge.
pub fn influence_radii(skeletons: &[Skeleton]) -> Result<Vec<f32>> {
    let mut radii = Vec::with_capacity(skeletons.len());
    for skeleton in skeletons {
        radii.push(skeleton.influence_radius()?);
    }
    Ok(radii)
}

fn validate_skeletons(skeletons: &[Skeleton]) -> Result<()> {
    for (index, skeleton) in skeletons.iter().enumerate() {
        if skeleton.validate().is_err() {
            return Err(IsoError::InvalidSkeleton {
                index,
                scale: skeleton.scale,
            });
        }
        if !skeleton.position.is_finite() {
            return Err(IsoError::NonFiniteParameter { name: "position" });
        }
    }
    Ok(())
}
