//! Marching cubes building blocks.
//!
//! This module holds everything about a single cube that does not depend on
//! how the grid is stored or traversed:
//!
//! - Compile-time lookup tables (corner layout, edge layout, edge neighbours,
//!   edge flags and triangulations)
//! - Case classification from 8 corner samples
//! - Edge interpolation in grid space
//!
//! # Example
//!
//! ```
//! use isoblob_core::marching_cubes::{case_index, case_triangles};
//!
//! let mut samples = [-1.0f32; 8];
//! samples[0] = 1.0;
//! let tris: Vec<[usize; 3]> = case_triangles(case_index(&samples)).collect();
//! assert_eq!(tris, vec![[0, 8, 3]]);
//! ```

mod classify;
mod tables;

pub use classify::{
    case_index, case_triangle_count, case_triangles, edge_flags, interpolate_edge,
    interpolation_parameter, is_empty_case, CaseTriangles,
};
pub use tables::{
    CORNER_OFFSETS, EDGE_INDEX_IN_NEIGHBOUR, EDGE_NEIGHBOURS, EDGE_TABLE, EDGE_VERTICES, TRI_TABLE,
};
