//! Edge vertex construction and sharing.
//!
//! Every crossing edge gets exactly one vertex per pass. The position is
//! interpolated between the edge's canonical endpoints (`EdgeKey::lo` then
//! `EdgeKey::hi`), so it depends only on the edge and never on the cube that
//! happened to reach it first.
//!
//! Two lookup strategies find an already emitted vertex:
//!
//! - [`VertexDedup::EdgeMap`]: `HashMap<EdgeKey, u32>` with FNV-1a hashing.
//! - [`VertexDedup::NeighborProbe`]: every cube records the vertex index of
//!   each local edge it emitted. A lookup checks the cube's own slot, then
//!   the three other cubes sharing the edge.
//!
//! For a given cube visiting order both produce identical buffers.

use std::collections::HashMap;

use isoblob_core::marching_cubes::{
    interpolate_edge, CORNER_OFFSETS, EDGE_INDEX_IN_NEIGHBOUR, EDGE_NEIGHBOURS, EDGE_VERTICES,
};
use isoblob_core::{EdgeKey, FnvBuildHasher, GridCoord, GridFrame, Point3, ScalarField};

use crate::config::VertexDedup;
use crate::sampler::GridSampler;

/// Marker for an edge slot without a vertex.
const NO_VERTEX: u32 = u32::MAX;

enum Lookup {
    EdgeMap(HashMap<EdgeKey, u32, FnvBuildHasher>),
    NeighborProbe {
        frame: GridFrame,
        slots: Vec<[u32; 12]>,
    },
}

/// Append-only vertex buffer with shared-edge lookup.
pub struct VertexBuilder {
    lookup: Lookup,
    vertices: Vec<Point3>,
    reused: usize,
}

impl VertexBuilder {
    /// Create a builder for the lattice described by `frame`.
    ///
    /// The neighbour-probe strategy allocates 12 slots per lattice point.
    pub fn new(dedup: VertexDedup, frame: &GridFrame) -> Self {
        let lookup = match dedup {
            VertexDedup::EdgeMap => Lookup::EdgeMap(HashMap::default()),
            VertexDedup::NeighborProbe => Lookup::NeighborProbe {
                frame: *frame,
                slots: vec![[NO_VERTEX; 12]; frame.point_count()],
            },
        };
        Self {
            lookup,
            vertices: Vec::new(),
            reused: 0,
        }
    }

    /// Index of the vertex on local `edge` of the cube based at `cube`,
    /// creating it if no cube has emitted it yet.
    pub fn vertex_for_edge<F: ScalarField + ?Sized>(
        &mut self,
        sampler: &mut GridSampler<'_, F>,
        cube: GridCoord,
        edge: usize,
    ) -> u32 {
        let (a, b) = EDGE_VERTICES[edge];
        let key = EdgeKey::new(cube.offset(CORNER_OFFSETS[a]), cube.offset(CORNER_OFFSETS[b]));

        let Self {
            lookup,
            vertices,
            reused,
        } = self;

        match lookup {
            Lookup::EdgeMap(map) => {
                if let Some(&index) = map.get(&key) {
                    *reused += 1;
                    return index;
                }
                let index = push_vertex(vertices, sampler, key);
                map.insert(key, index);
                index
            }
            Lookup::NeighborProbe { frame, slots } => {
                let here = frame.point_index(cube);
                if slots[here][edge] != NO_VERTEX {
                    *reused += 1;
                    return slots[here][edge];
                }

                let shared = EDGE_NEIGHBOURS[edge]
                    .iter()
                    .zip(&EDGE_INDEX_IN_NEIGHBOUR[edge])
                    .map(|(&offset, &local)| (cube.offset(offset), local))
                    .filter(|&(neighbour, _)| frame.contains_cube(neighbour))
                    .map(|(neighbour, local)| slots[frame.point_index(neighbour)][local])
                    .find(|&index| index != NO_VERTEX);

                let index = match shared {
                    Some(index) => {
                        *reused += 1;
                        index
                    }
                    None => push_vertex(vertices, sampler, key),
                };
                slots[here][edge] = index;
                index
            }
        }
    }

    /// Vertices emitted so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// True when no vertex has been emitted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of lookups answered with an existing vertex.
    #[inline]
    pub fn reused(&self) -> usize {
        self.reused
    }

    /// Hand over the vertex buffer.
    pub fn into_vertices(self) -> Vec<Point3> {
        self.vertices
    }
}

fn push_vertex<F: ScalarField + ?Sized>(
    vertices: &mut Vec<Point3>,
    sampler: &mut GridSampler<'_, F>,
    key: EdgeKey,
) -> u32 {
    let lo = sampler.sample(key.lo);
    let hi = sampler.sample(key.hi);
    let grid = interpolate_edge(key.lo, key.hi, lo, hi);
    vertices.push(sampler.frame().grid_to_world(grid));
    (vertices.len() - 1) as u32
}
