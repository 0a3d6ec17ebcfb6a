//! # isoblob_rs
//!
//! Marching cubes iso-surface extraction over metaball potential fields.
//!
//! This crate is the runtime side of isoblob: it owns the per-pass buffers
//! (sample cache, visited mask, vertex buffer) and turns a set of
//! [`Skeleton`]s into an indexed triangle [`Mesh`]. The math lives in
//! [`isoblob_core`].
//!
//! ## Quick Start
//!
//! ```
//! use isoblob_rs::prelude::*;
//!
//! let config = ExtractionConfig::new(GridConfig::new(32, 0.05, Point3::splat(0.0)));
//! let skeletons = [
//!     Skeleton::new(Point3::new(-0.2, 0.0, 0.0)),
//!     Skeleton::new(Point3::new(0.2, 0.0, 0.0)).with_scale(0.8),
//! ];
//!
//! let mesh = Extractor::new(config)?.extract(&skeletons)?;
//! assert!(mesh.is_closed());
//! println!("{} triangles", mesh.triangle_count());
//! # Ok::<(), IsoError>(())
//! ```
//!
//! ## Architecture
//!
//! One extraction is one [`ExtractionPass`]:
//!
//! - **Sampling**: the field minus the iso level, evaluated at most once per
//!   lattice point
//! - **Traversal**: either every cube ([`Traversal::Exhaustive`]) or a
//!   breadth-first flood fill from seeds near each skeleton
//!   ([`Traversal::FloodFill`])
//! - **Vertex sharing**: each crossed lattice edge yields exactly one vertex,
//!   found again through an edge map or a neighbour probe ([`VertexDedup`])
//!
//! The pass is consumed into the mesh, so nothing leaks from one extraction
//! into the next. Skeletons are borrowed for the whole pass.
//!
//! ## Feature Flags
//!
//! - `parallel` (default): [`extract_frames`] meshes independent skeleton
//!   sets on rayon's thread pool
//!
//! ## Logging
//!
//! Diagnostics go through the `log` facade: a `debug` summary per pass,
//! `trace` per seed and `warn` when a seed falls back to the grid origin.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod batch;
mod config;
mod error;
mod extractor;
mod mesh;
mod pass;
mod sampler;
mod traversal;
mod vertices;

pub use batch::extract_frames;
pub use config::{
    ExtractionConfig, GridConfig, SeedFallback, Traversal, VertexDedup, DEFAULT_ISO_LEVEL,
    MAX_GRID_SIZE,
};
pub use error::{IsoError, Result};
pub use extractor::{extract, influence_radii, Extractor};
pub use mesh::{Mesh, MeshStats, Triangle};
pub use pass::{ExtractionPass, PassStats};
pub use sampler::GridSampler;
pub use traversal::SeedHint;
pub use vertices::VertexBuilder;

// Re-export isoblob_core types for convenience
pub use isoblob_core::{
    EdgeKey, FnField, GridCoord, GridFrame, IsoCoreError, Point3, PotentialKind, ScalarField,
    Skeleton,
};

/// Prelude module for convenient imports.
///
/// ```
/// use isoblob_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{ExtractionConfig, GridConfig, SeedFallback, Traversal, VertexDedup};
    pub use crate::error::{IsoError, Result};
    pub use crate::extractor::{extract, Extractor};
    pub use crate::mesh::{Mesh, MeshStats};
    pub use crate::pass::PassStats;
    pub use crate::traversal::SeedHint;

    pub use isoblob_core::{FnField, Point3, PotentialKind, ScalarField, Skeleton};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_workflow() {
        let mesh = extract(&[Skeleton::default()], &ExtractionConfig::default()).unwrap();

        assert!(!mesh.is_empty());
        assert_eq!(mesh.indices.len() % 3, 0);
        assert!(mesh.is_closed());
        assert!(mesh.signed_volume() > 0.0);
    }

    #[test]
    fn test_soft_object_workflow() {
        let skeleton = Skeleton::new(Point3::splat(0.0))
            .with_kind(PotentialKind::SoftObject)
            .with_scale(0.6);
        let config = ExtractionConfig::default().with_iso_level(0.3);
        let mesh = extract(&[skeleton], &config).unwrap();

        assert!(mesh.is_closed());
        // (1 - r²)³ = 0.3 at r ≈ 0.574, scaled by 0.6.
        let expected = (1.0 - 0.3f32.cbrt()).sqrt() * 0.6;
        for v in &mesh.vertices {
            assert!((v.length() - expected).abs() < 0.02, "{:?}", v);
        }
    }

    #[test]
    fn test_stats_are_consistent() {
        let config = ExtractionConfig::default();
        let (mesh, stats) = Extractor::new(config)
            .unwrap()
            .extract_with_stats(&[Skeleton::default()])
            .unwrap();

        assert_eq!(stats.triangles, mesh.triangle_count());
        assert_eq!(stats.vertices, mesh.vertex_count());
        assert!(stats.non_empty_cubes <= stats.cubes_visited);
        assert!(stats.evaluations <= 16 * 16 * 16);
        assert_eq!(mesh.stats().triangle_count, stats.triangles);
    }
}
