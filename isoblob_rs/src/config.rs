//! Extraction configuration.
//!
//! [`GridConfig`] places the sampling lattice; [`ExtractionConfig`] adds the
//! iso level and the strategy choices. Both are plain `Copy` values with
//! fluent setters and an explicit [`validate`](ExtractionConfig::validate).

use isoblob_core::{GridFrame, Point3};

use crate::error::{IsoError, Result};

/// Largest accepted number of lattice points per axis.
pub const MAX_GRID_SIZE: u32 = 512;

/// Default iso level subtracted from the summed potential.
pub const DEFAULT_ISO_LEVEL: f32 = 0.1;

/// Placement and resolution of the sampling lattice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    /// Lattice points per axis. Fewer than 2 yields an empty mesh.
    pub size: u32,
    /// World units between neighbouring lattice points.
    pub step: f32,
    /// World position the lattice is centred on.
    pub center: Point3,
}

impl GridConfig {
    /// Create a new grid configuration.
    ///
    /// # Arguments
    /// * `size` - Lattice points per axis
    /// * `step` - World units per cube edge
    /// * `center` - World-space centre of the grid
    #[inline]
    pub const fn new(size: u32, step: f32, center: Point3) -> Self {
        Self { size, step, center }
    }

    /// World position of lattice point `(0, 0, 0)`.
    #[inline]
    pub fn base_point(&self) -> Point3 {
        self.frame().base_point
    }

    /// Coordinate frame of this grid.
    #[inline]
    pub fn frame(&self) -> GridFrame {
        GridFrame::centered(self.center, self.step, self.size)
    }

    /// Total number of cubes (`(size - 1)³`).
    #[inline]
    pub fn cube_count(&self) -> usize {
        let n = self.size.saturating_sub(1) as usize;
        n * n * n
    }

    /// World-space edge length of the whole lattice.
    #[inline]
    pub fn extent(&self) -> f32 {
        self.size.saturating_sub(1) as f32 * self.step
    }

    /// Check the step, the size limit and the centre.
    pub fn validate(&self) -> Result<()> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(IsoError::InvalidGridStep { step: self.step });
        }
        if self.size > MAX_GRID_SIZE {
            return Err(IsoError::GridTooLarge {
                size: self.size,
                max: MAX_GRID_SIZE,
            });
        }
        if !self.center.is_finite() {
            return Err(IsoError::NonFiniteParameter { name: "center" });
        }
        Ok(())
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new(16, 0.1, Point3::splat(0.0))
    }
}

/// Order in which cubes are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Traversal {
    /// Every cube of the grid, z-major.
    Exhaustive,
    /// Breadth-first walk from per-skeleton seeds through non-empty cubes.
    #[default]
    FloodFill,
}

/// How vertices on shared edges are found again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VertexDedup {
    /// Hash map from canonical edge key to vertex index.
    #[default]
    EdgeMap,
    /// Per-cube edge slots; probes the three other cubes sharing each edge.
    NeighborProbe,
}

/// What the flood fill does when the axis march finds no surface crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SeedFallback {
    /// March along `+x` only; fall back to the cube at the grid origin.
    Origin,
    /// March along all six axis directions; fall back to the origin cube.
    AxisSearch,
    /// March along all six axis directions, then scan every cube inside the
    /// skeleton's support box. Surface pieces the grid boundary cuts off are
    /// also seeded from the grid faces that cross the box.
    #[default]
    BoundingBox,
}

/// Full configuration of an extraction pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractionConfig {
    /// Sampling lattice.
    pub grid: GridConfig,
    /// Value subtracted from the field; the surface is its zero set.
    pub iso_level: f32,
    /// Cube visiting strategy.
    pub traversal: Traversal,
    /// Shared-vertex lookup strategy.
    pub dedup: VertexDedup,
    /// Seed search policy for [`Traversal::FloodFill`].
    pub seed_fallback: SeedFallback,
}

impl ExtractionConfig {
    /// Configuration with default strategies for the given grid.
    pub fn new(grid: GridConfig) -> Self {
        Self {
            grid,
            iso_level: DEFAULT_ISO_LEVEL,
            traversal: Traversal::default(),
            dedup: VertexDedup::default(),
            seed_fallback: SeedFallback::default(),
        }
    }

    /// Set the grid.
    pub fn with_grid(mut self, grid: GridConfig) -> Self {
        self.grid = grid;
        self
    }

    /// Set the iso level.
    pub fn with_iso_level(mut self, iso_level: f32) -> Self {
        self.iso_level = iso_level;
        self
    }

    /// Set the traversal strategy.
    pub fn with_traversal(mut self, traversal: Traversal) -> Self {
        self.traversal = traversal;
        self
    }

    /// Set the vertex deduplication strategy.
    pub fn with_dedup(mut self, dedup: VertexDedup) -> Self {
        self.dedup = dedup;
        self
    }

    /// Set the seed fallback policy.
    pub fn with_seed_fallback(mut self, seed_fallback: SeedFallback) -> Self {
        self.seed_fallback = seed_fallback;
        self
    }

    /// Validate the grid and the iso level.
    pub fn validate(&self) -> Result<()> {
        self.grid.validate()?;
        if !self.iso_level.is_finite() {
            return Err(IsoError::NonFiniteParameter { name: "iso_level" });
        }
        Ok(())
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_config_default() {
        let grid = GridConfig::default();
        assert_eq!(grid.size, 16);
        assert!((grid.step - 0.1).abs() < 1e-6);
        assert_eq!(grid.cube_count(), 15 * 15 * 15);
        assert!((grid.base_point().x + 0.8).abs() < 1e-6);
        assert!((grid.extent() - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_degenerate_grid_is_valid() {
        for size in 0..2 {
            let grid = GridConfig::new(size, 0.1, Point3::splat(0.0));
            assert!(grid.validate().is_ok());
            assert_eq!(grid.cube_count(), 0);
        }
    }

    #[test]
    fn test_grid_validation_errors() {
        let bad_step = GridConfig::new(8, 0.0, Point3::splat(0.0));
        assert_eq!(
            bad_step.validate(),
            Err(IsoError::InvalidGridStep { step: 0.0 })
        );

        let too_big = GridConfig::new(MAX_GRID_SIZE + 1, 0.1, Point3::splat(0.0));
        assert!(matches!(
            too_big.validate(),
            Err(IsoError::GridTooLarge { .. })
        ));

        let bad_center = GridConfig::new(8, 0.1, Point3::new(f32::NAN, 0.0, 0.0));
        assert_eq!(
            bad_center.validate(),
            Err(IsoError::NonFiniteParameter { name: "center" })
        );
    }

    #[test]
    fn test_extraction_config_builders() {
        let config = ExtractionConfig::default()
            .with_iso_level(0.2)
            .with_traversal(Traversal::Exhaustive)
            .with_dedup(VertexDedup::NeighborProbe)
            .with_seed_fallback(SeedFallback::Origin)
            .with_grid(GridConfig::new(32, 0.05, Point3::splat(1.0)));

        assert_eq!(config.iso_level, 0.2);
        assert_eq!(config.traversal, Traversal::Exhaustive);
        assert_eq!(config.dedup, VertexDedup::NeighborProbe);
        assert_eq!(config.seed_fallback, SeedFallback::Origin);
        assert_eq!(config.grid.size, 32);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_strategies() {
        let config = ExtractionConfig::default();
        assert_eq!(config.iso_level, DEFAULT_ISO_LEVEL);
        assert_eq!(config.traversal, Traversal::FloodFill);
        assert_eq!(config.dedup, VertexDedup::EdgeMap);
        assert_eq!(config.seed_fallback, SeedFallback::BoundingBox);

        let nan_iso = config.with_iso_level(f32::NAN);
        assert!(nan_iso.validate().is_err());
    }
}
