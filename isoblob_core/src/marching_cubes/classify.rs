//! Per-cube classification and edge interpolation.

use crate::types::{GridCoord, Point3};

use super::tables::{EDGE_TABLE, TRI_TABLE};

/// Compute the cube case from the 8 corner samples.
///
/// Bit `i` is set when corner `i` is strictly positive. The mask is assembled
/// from corner 7 down to corner 0, so corner 7 ends up in the high bit. A
/// sample of exactly `0.0` counts as non-positive.
#[inline]
pub fn case_index(samples: &[f32; 8]) -> u8 {
    let mut case = 0u8;
    for &sample in samples.iter().rev() {
        case = (case << 1) | u8::from(sample > 0.0);
    }
    case
}

/// Bitmask of the cube edges crossed by the surface.
#[inline]
pub fn edge_flags(case: u8) -> u16 {
    EDGE_TABLE[case as usize]
}

/// True when the case produces no triangles.
#[inline]
pub fn is_empty_case(case: u8) -> bool {
    TRI_TABLE[case as usize][0] == -1
}

/// Number of triangles emitted for a case (0 to 5).
#[inline]
pub fn case_triangle_count(case: u8) -> usize {
    case_triangles(case).count()
}

/// Iterate over the edge triplets of a case, in table row order.
#[inline]
pub fn case_triangles(case: u8) -> CaseTriangles {
    CaseTriangles {
        row: &TRI_TABLE[case as usize],
        pos: 0,
    }
}

/// Iterator returned by [`case_triangles`].
#[derive(Debug, Clone)]
pub struct CaseTriangles {
    row: &'static [i8; 16],
    pos: usize,
}

impl Iterator for CaseTriangles {
    type Item = [usize; 3];

    #[inline]
    fn next(&mut self) -> Option<[usize; 3]> {
        if self.pos + 2 >= self.row.len() || self.row[self.pos] == -1 {
            return None;
        }
        let mut tri = [0usize; 3];
        for (slot, &edge) in tri.iter_mut().zip(&self.row[self.pos..self.pos + 3]) {
            assert!(
                (0..12).contains(&edge),
                "corrupt triangle table entry {}",
                edge
            );
            *slot = edge as usize;
        }
        self.pos += 3;
        Some(tri)
    }
}

/// Position of the zero crossing along an edge, as a fraction from the
/// first endpoint.
///
/// `t = |v0 / (v0 - v1)|`, clamped to `[0, 1]`. Equal samples give the
/// midpoint.
#[inline]
pub fn interpolation_parameter(v0: f32, v1: f32) -> f32 {
    let denom = v0 - v1;
    if denom == 0.0 {
        return 0.5;
    }
    libm::fabsf(v0 / denom).clamp(0.0, 1.0)
}

/// Grid-space position of the zero crossing between two lattice points.
#[inline]
pub fn interpolate_edge(a: GridCoord, b: GridCoord, va: f32, vb: f32) -> Point3 {
    a.to_point()
        .lerp(b.to_point(), interpolation_parameter(va, vb))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_index_bit_order() {
        assert_eq!(case_index(&[-1.0; 8]), 0);
        assert_eq!(case_index(&[1.0; 8]), 255);

        let mut samples = [-1.0; 8];
        samples[0] = 1.0;
        assert_eq!(case_index(&samples), 0b0000_0001);

        samples[7] = 1.0;
        assert_eq!(case_index(&samples), 0b1000_0001);
    }

    #[test]
    fn test_zero_sample_counts_as_non_positive() {
        let mut samples = [0.0; 8];
        assert_eq!(case_index(&samples), 0);

        samples[3] = f32::MIN_POSITIVE;
        assert_eq!(case_index(&samples), 0b0000_1000);
    }

    #[test]
    fn test_uniform_cubes_emit_nothing() {
        for samples in [[1.0f32; 8], [-1.0f32; 8], [0.0f32; 8]] {
            let case = case_index(&samples);
            assert!(is_empty_case(case));
            assert_eq!(edge_flags(case), 0);
            assert_eq!(case_triangles(case).count(), 0);
        }
    }

    #[test]
    fn test_single_corner_case() {
        let tris: [[usize; 3]; 1] = [[0, 8, 3]];
        assert!(case_triangles(1).eq(tris.iter().copied()));
        assert_eq!(case_triangle_count(1), 1);
        assert_eq!(edge_flags(1), (1 << 0) | (1 << 3) | (1 << 8));
    }

    #[test]
    fn test_triangle_counts_bounded() {
        for case in 0..=255u8 {
            let n = case_triangle_count(case);
            assert!(n <= 5);
            assert_eq!(n == 0, is_empty_case(case));
        }
    }

    #[test]
    fn test_interpolation_parameter() {
        assert_eq!(interpolation_parameter(-1.0, 1.0), 0.5);
        assert_eq!(interpolation_parameter(0.25, -0.75), 0.25);
        assert_eq!(interpolation_parameter(0.0, -1.0), 0.0);
        assert_eq!(interpolation_parameter(1.0, 0.0), 1.0);
    }

    #[test]
    fn test_interpolation_degenerate_and_clamped() {
        assert_eq!(interpolation_parameter(0.3, 0.3), 0.5);
        assert_eq!(interpolation_parameter(0.0, 0.0), 0.5);
        // Same-sign samples would extrapolate; the result stays on the edge.
        assert_eq!(interpolation_parameter(2.0, 1.0), 1.0);
    }

    #[test]
    fn test_interpolate_edge_in_grid_space() {
        let p = interpolate_edge(GridCoord::new(2, 3, 4), GridCoord::new(2, 4, 4), 0.25, -0.75);
        assert_eq!(p, Point3::new(2.0, 3.25, 4.0));
    }
}
