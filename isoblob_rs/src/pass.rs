//! Per-pass extraction state.
//!
//! An [`ExtractionPass`] owns everything one extraction needs (sample cache,
//! visited mask, vertex builder, index buffer) and is consumed into the
//! resulting [`Mesh`]. Nothing survives between passes.

use isoblob_core::marching_cubes::{case_index, case_triangles, is_empty_case};
use isoblob_core::{GridCoord, GridFrame, ScalarField};

use crate::config::ExtractionConfig;
use crate::mesh::Mesh;
use crate::sampler::GridSampler;
use crate::vertices::VertexBuilder;

/// Counters collected during a pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Cubes classified.
    pub cubes_visited: usize,
    /// Classified cubes that emitted triangles.
    pub non_empty_cubes: usize,
    /// Triangles emitted.
    pub triangles: usize,
    /// Distinct vertices emitted.
    pub vertices: usize,
    /// Field evaluations performed by the sampler.
    pub evaluations: usize,
    /// Edge lookups answered by an existing vertex.
    pub reused_vertices: usize,
    /// Seed cubes queued by the flood fill.
    pub seeds: usize,
    /// Seeds that came from a fallback rather than an axis march.
    pub fallback_seeds: usize,
}

/// Mutable state of a single extraction.
pub struct ExtractionPass<'f, F: ScalarField + ?Sized> {
    sampler: GridSampler<'f, F>,
    vertices: VertexBuilder,
    indices: Vec<u32>,
    visited: Vec<bool>,
    stats: PassStats,
}

impl<'f, F: ScalarField + ?Sized> ExtractionPass<'f, F> {
    /// Allocate the pass buffers for the grid of `config`.
    pub fn new(field: &'f F, config: &ExtractionConfig) -> Self {
        let frame = config.grid.frame();
        Self {
            sampler: GridSampler::new(field, frame, config.iso_level),
            vertices: VertexBuilder::new(config.dedup, &frame),
            indices: Vec::new(),
            visited: vec![false; frame.point_count()],
            stats: PassStats::default(),
        }
    }

    /// The lattice of this pass.
    #[inline]
    pub fn frame(&self) -> &GridFrame {
        self.sampler.frame()
    }

    /// Sample a lattice point, or `None` outside the grid.
    #[inline]
    pub fn try_sample(&mut self, coord: GridCoord) -> Option<f32> {
        self.sampler.try_sample(coord)
    }

    /// Case index of the cube based at `cube`.
    #[inline]
    pub fn classify(&mut self, cube: GridCoord) -> u8 {
        case_index(&self.sampler.cube_samples(cube))
    }

    /// True when `cube` has already been processed.
    #[inline]
    pub fn is_visited(&self, cube: GridCoord) -> bool {
        self.visited[self.frame().point_index(cube)]
    }

    /// Classify `cube`, emit its triangles and mark it visited.
    ///
    /// Returns `true` when the cube is crossed by the surface.
    pub fn process_cube(&mut self, cube: GridCoord) -> bool {
        let index = self.frame().point_index(cube);
        self.visited[index] = true;
        self.stats.cubes_visited += 1;

        let case = self.classify(cube);
        if is_empty_case(case) {
            return false;
        }
        self.stats.non_empty_cubes += 1;

        let Self {
            sampler,
            vertices,
            indices,
            ..
        } = self;
        for tri in case_triangles(case) {
            let corners = tri.map(|edge| vertices.vertex_for_edge(sampler, cube, edge));
            indices.extend_from_slice(&corners);
        }
        true
    }

    /// Count a queued seed.
    pub(crate) fn note_seed(&mut self, fallback: bool) {
        self.stats.seeds += 1;
        if fallback {
            self.stats.fallback_seeds += 1;
        }
    }

    /// Consume the pass into its mesh and counters.
    pub fn finish(self) -> (Mesh, PassStats) {
        let mut stats = self.stats;
        stats.triangles = self.indices.len() / 3;
        stats.vertices = self.vertices.len();
        stats.evaluations = self.sampler.evaluations();
        stats.reused_vertices = self.vertices.reused();
        (Mesh::new(self.vertices.into_vertices(), self.indices), stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridConfig;
    use isoblob_core::{FnField, Point3};

    fn config() -> ExtractionConfig {
        ExtractionConfig::new(GridConfig::new(6, 0.1, Point3::splat(0.0))).with_iso_level(0.0)
    }

    #[test]
    fn test_empty_cube_emits_nothing() {
        let field = FnField(|_: Point3| -1.0);
        let mut pass = ExtractionPass::new(&field, &config());
        let cube = GridCoord::new(1, 1, 1);

        assert!(!pass.process_cube(cube));
        assert!(pass.is_visited(cube));

        let (mesh, stats) = pass.finish();
        assert!(mesh.is_empty());
        assert_eq!(stats.cubes_visited, 1);
        assert_eq!(stats.non_empty_cubes, 0);
        assert_eq!(stats.evaluations, 8);
    }

    #[test]
    fn test_plane_crossing_cube() {
        // Base point is -0.3; the plane x = -0.15 crosses cube x = 1.
        let field = FnField(|p: Point3| -0.15 - p.x);
        let mut pass = ExtractionPass::new(&field, &config());
        let cube = GridCoord::new(1, 2, 2);

        // Corners 0, 3, 4, 7 sit on the positive side.
        assert_eq!(pass.classify(cube), 0b1001_1001);
        assert!(pass.process_cube(cube));

        let (mesh, stats) = pass.finish();
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(stats.triangles, 2);
        assert_eq!(stats.vertices, 4);
        assert_eq!(stats.reused_vertices, 2);
        for v in &mesh.vertices {
            assert!((v.x + 0.15).abs() < 1e-5);
        }
    }

    #[test]
    fn test_adjacent_cubes_share_vertices() {
        let field = FnField(|p: Point3| -0.15 - p.x);
        let mut pass = ExtractionPass::new(&field, &config());

        pass.process_cube(GridCoord::new(1, 2, 2));
        pass.process_cube(GridCoord::new(1, 3, 2));

        let (mesh, _) = pass.finish();
        assert_eq!(mesh.triangle_count(), 4);
        // Two of the second cube's four crossings are shared.
        assert_eq!(mesh.vertex_count(), 6);
    }

    #[test]
    fn test_seed_counters() {
        let field = FnField(|_: Point3| 0.0);
        let mut pass = ExtractionPass::new(&field, &config());
        pass.note_seed(false);
        pass.note_seed(true);
        let (_, stats) = pass.finish();
        assert_eq!(stats.seeds, 2);
        assert_eq!(stats.fallback_seeds, 1);
    }
}
