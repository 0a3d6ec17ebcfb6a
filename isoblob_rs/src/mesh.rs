//! Indexed triangle meshes produced by an extraction pass.
//!
//! Besides holding the buffers, [`Mesh`] offers the checks consumers need to
//! trust a result (closedness, orientation, connected components) and the
//! conversions they need to use it (normals, OBJ text).

use std::collections::HashMap;
use std::fmt;

use isoblob_core::{FnvBuildHasher, Point3};

/// A triangle represented by three vertex indices.
pub type Triangle = [u32; 3];

/// Indexed triangle mesh.
///
/// `indices.len()` is a multiple of 3 and every index is valid for
/// `vertices`. Triangles wind counter-clockwise seen from the side where the
/// sampled field is non-positive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions in world space.
    pub vertices: Vec<Point3>,
    /// Flat triangle list, three indices per triangle.
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Build a mesh from raw buffers.
    pub fn new(vertices: Vec<Point3>, indices: Vec<u32>) -> Self {
        debug_assert_eq!(indices.len() % 3, 0);
        Self { vertices, indices }
    }

    /// True when the mesh has no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate over triangles as index triplets.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Iterate over triangles as position triplets.
    pub fn triangle_positions(&self) -> impl Iterator<Item = [Point3; 3]> + '_ {
        self.triangles()
            .map(move |[a, b, c]| [self.vertex(a), self.vertex(b), self.vertex(c)])
    }

    #[inline]
    fn vertex(&self, index: u32) -> Point3 {
        self.vertices[index as usize]
    }

    /// Area-weighted vertex normals, pointing to the non-positive side.
    ///
    /// Vertices not referenced by any triangle get a zero normal.
    pub fn vertex_normals(&self) -> Vec<Point3> {
        let mut normals = vec![Point3::default(); self.vertices.len()];
        for ([a, b, c], [p0, p1, p2]) in self.triangles().zip(self.triangle_positions()) {
            // Unnormalized cross product weights each face by twice its area.
            let face = (p1 - p0).cross(p2 - p0);
            for i in [a, b, c] {
                normals[i as usize] = normals[i as usize] + face;
            }
        }
        normals.into_iter().map(Point3::normalize).collect()
    }

    /// Signed enclosed volume (divergence theorem).
    ///
    /// Positive for closed, outward-facing shells.
    pub fn signed_volume(&self) -> f32 {
        self.triangle_positions()
            .map(|[a, b, c]| a.dot(b.cross(c)) / 6.0)
            .sum()
    }

    fn undirected_edge_uses(&self) -> HashMap<(u32, u32), u32, FnvBuildHasher> {
        let mut uses: HashMap<(u32, u32), u32, FnvBuildHasher> = HashMap::default();
        for [a, b, c] in self.triangles() {
            for (u, v) in [(a, b), (b, c), (c, a)] {
                *uses.entry((u.min(v), u.max(v))).or_insert(0) += 1;
            }
        }
        uses
    }

    /// Number of edges used by exactly one triangle.
    pub fn boundary_edge_count(&self) -> usize {
        self.undirected_edge_uses()
            .values()
            .filter(|&&n| n == 1)
            .count()
    }

    /// Number of edges used by more than two triangles.
    pub fn non_manifold_edge_count(&self) -> usize {
        self.undirected_edge_uses()
            .values()
            .filter(|&&n| n > 2)
            .count()
    }

    /// True when every edge is shared by exactly two triangles.
    pub fn is_closed(&self) -> bool {
        self.undirected_edge_uses().values().all(|&n| n == 2)
    }

    /// True when no directed edge appears twice, i.e. neighbouring triangles
    /// traverse their shared edge in opposite directions.
    pub fn is_consistently_oriented(&self) -> bool {
        let mut seen: HashMap<(u32, u32), (), FnvBuildHasher> = HashMap::default();
        self.triangles().all(|[a, b, c]| {
            [(a, b), (b, c), (c, a)]
                .into_iter()
                .all(|edge| seen.insert(edge, ()).is_none())
        })
    }

    /// Number of connected components of the triangle adjacency graph.
    pub fn connected_components(&self) -> usize {
        let mut parent: Vec<u32> = (0..self.vertices.len() as u32).collect();

        fn find(parent: &mut [u32], mut x: u32) -> u32 {
            while parent[x as usize] != x {
                let grand = parent[parent[x as usize] as usize];
                parent[x as usize] = grand;
                x = grand;
            }
            x
        }

        for [a, b, c] in self.triangles() {
            let ra = find(&mut parent, a);
            for other in [b, c] {
                let ro = find(&mut parent, other);
                if ro != ra {
                    parent[ro as usize] = ra;
                }
            }
        }

        let mut referenced = vec![false; self.vertices.len()];
        for &i in &self.indices {
            referenced[i as usize] = true;
        }
        (0..self.vertices.len() as u32)
            .filter(|&v| referenced[v as usize] && find(&mut parent, v) == v)
            .count()
    }

    /// Summary statistics.
    pub fn stats(&self) -> MeshStats {
        MeshStats::from_mesh(self)
    }

    /// Write the mesh as Wavefront OBJ text (1-based face indices).
    pub fn write_obj<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        writeln!(out, "# isoblob mesh")?;
        writeln!(
            out,
            "# {} vertices, {} triangles",
            self.vertex_count(),
            self.triangle_count()
        )?;
        for v in &self.vertices {
            writeln!(out, "v {} {} {}", v.x, v.y, v.z)?;
        }
        for [a, b, c] in self.triangles() {
            writeln!(out, "f {} {} {}", a + 1, b + 1, c + 1)?;
        }
        Ok(())
    }

    /// OBJ text of the mesh.
    pub fn to_obj(&self) -> String {
        let mut obj = String::new();
        self.write_obj(&mut obj)
            .expect("formatting into a String is infallible");
        obj
    }
}

/// Mesh statistics after extraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshStats {
    /// Total number of triangles.
    pub triangle_count: usize,
    /// Number of distinct vertices.
    pub vertex_count: usize,
    /// Sum of triangle areas.
    pub surface_area: f32,
    /// Bounding box minimum (zero for an empty mesh).
    pub bbox_min: Point3,
    /// Bounding box maximum (zero for an empty mesh).
    pub bbox_max: Point3,
}

impl MeshStats {
    /// Compute statistics from a mesh.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let mut surface_area = 0.0;
        for [a, b, c] in mesh.triangle_positions() {
            surface_area += (b - a).cross(c - a).length() * 0.5;
        }

        let (bbox_min, bbox_max) = match mesh.vertices.split_first() {
            Some((&first, rest)) => rest
                .iter()
                .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
            None => (Point3::default(), Point3::default()),
        };

        Self {
            triangle_count: mesh.triangle_count(),
            vertex_count: mesh.vertex_count(),
            surface_area,
            bbox_min,
            bbox_max,
        }
    }
}
