//! # isoblob_core
//!
//! Pure algorithms for marching cubes iso-surface extraction over metaball
//! potential fields.
//!
//! This crate holds the math shared by the `isoblob_rs` runtime: it owns no
//! buffers and performs no allocation.
//!
//! ## Features
//!
//! - **no_std compatible**: Only `libm` is required for float math
//! - **Finite-support potentials**: Quartic metaball and soft object falloffs
//! - **Marching cubes**: Zero-runtime-cost lookup tables, including the
//!   per-edge neighbour tables used for probe-based vertex sharing
//! - **Canonical edge keys**: Unordered lattice edges with FNV-1a hashing
//!
//! ## Feature Flags
//!
//! - `std` (default): Implements `std::error::Error` for [`IsoCoreError`]
//!
//! ## Modules
//!
//! - [`types`]: Core data types (Point3, GridCoord, EdgeKey)
//! - [`field`]: Potential functions, skeletons and the influence radius search
//! - [`traits`]: The ScalarField abstraction
//! - [`coords`]: World/lattice conversion (GridFrame)
//! - [`hash`]: FNV-1a hashing for grid keys
//! - [`marching_cubes`]: Tables, case classification and edge interpolation
//! - [`error`]: Error types
//!
//! ## Usage
//!
//! ```
//! use isoblob_core::prelude::*;
//!
//! let frame = GridFrame::centered(Point3::splat(0.0), 0.1, 16);
//! let blobs = [Skeleton::new(Point3::splat(0.0))];
//!
//! // Sample the 8 corners of the cube at the grid centre, offset by the iso level.
//! let base = GridCoord::new(8, 8, 8);
//! let mut samples = [0.0f32; 8];
//! for (sample, &offset) in samples.iter_mut().zip(&CORNER_OFFSETS) {
//!     *sample = blobs.evaluate(frame.to_world(base.offset(offset))) - 0.1;
//! }
//! assert!(is_empty_case(case_index(&samples)));
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(clippy::all)]

#[cfg(feature = "std")]
extern crate std;

pub mod coords;
pub mod error;
pub mod field;
pub mod hash;
pub mod marching_cubes;
pub mod traits;
pub mod types;

/// Prelude module for convenient imports.
///
/// Provides the most commonly used types and functions.
pub mod prelude {
    pub use crate::coords::GridFrame;
    pub use crate::error::IsoCoreError;
    pub use crate::field::{PotentialKind, Skeleton};
    pub use crate::hash::{FnvBuildHasher, FnvHasher};
    pub use crate::marching_cubes::{
        case_index, case_triangles, interpolate_edge, interpolation_parameter, is_empty_case,
        CORNER_OFFSETS, EDGE_VERTICES,
    };
    pub use crate::traits::{FnField, ScalarField};
    pub use crate::types::{EdgeKey, GridCoord, Point3};
}

// Re-export everything at crate root for convenience
pub use coords::GridFrame;
pub use error::IsoCoreError;
pub use field::{PotentialKind, Skeleton, RADIUS_SEARCH_EPSILON, RADIUS_SEARCH_MAX_ITERATIONS};
pub use hash::{fnv1a_edge, fnv1a_grid, FnvBuildHasher, FnvHasher};
pub use traits::{FnField, ScalarField};
pub use types::{EdgeKey, GridCoord, Point3};
