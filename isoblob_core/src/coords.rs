//! Mapping between world space and the sampling lattice.
//!
//! The lattice has `size` points per axis. Point `c` sits at
//! `c * step + base_point`; the cube with base corner `c` spans the points
//! `c .. c + (1, 1, 1)`, so valid cube bases run over `[0, size - 2]` while
//! valid points run over `[0, size - 1]`.

use crate::types::{GridCoord, Point3};

/// Placement and resolution of a regular sampling lattice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridFrame {
    /// World position of lattice point `(0, 0, 0)`.
    pub base_point: Point3,
    /// World distance between neighbouring lattice points.
    pub step: f32,
    /// Lattice points per axis.
    pub size: u32,
}

impl GridFrame {
    /// Create a frame from an explicit base point.
    #[inline]
    pub const fn new(base_point: Point3, step: f32, size: u32) -> Self {
        Self {
            base_point,
            step,
            size,
        }
    }

    /// Create a frame whose lattice is centred on `center`.
    ///
    /// `base_point = center - (size / 2) * step` on every axis.
    ///
    /// ```
    /// use isoblob_core::{GridCoord, GridFrame, Point3};
    ///
    /// let frame = GridFrame::centered(Point3::splat(0.0), 0.1, 16);
    /// assert_eq!(frame.to_grid(Point3::splat(0.0)), GridCoord::new(8, 8, 8));
    /// ```
    #[inline]
    pub fn centered(center: Point3, step: f32, size: u32) -> Self {
        let half_extent = size as f32 / 2.0 * step;
        Self::new(center - Point3::splat(half_extent), step, size)
    }

    /// World position of a lattice point.
    #[inline]
    pub fn to_world(&self, coord: GridCoord) -> Point3 {
        self.grid_to_world(coord.to_point())
    }

    /// World position of a fractional grid-space position.
    #[inline]
    pub fn grid_to_world(&self, grid: Point3) -> Point3 {
        grid * self.step + self.base_point
    }

    /// Nearest lattice point to a world position. May lie outside the grid.
    #[inline]
    pub fn to_grid(&self, point: Point3) -> GridCoord {
        let g = (point - self.base_point) / self.step;
        GridCoord::new(
            libm::roundf(g.x) as i32,
            libm::roundf(g.y) as i32,
            libm::roundf(g.z) as i32,
        )
    }

    /// True when `coord` is a lattice point of this grid.
    #[inline]
    pub fn contains_point(&self, coord: GridCoord) -> bool {
        let max = self.size as i32 - 1;
        in_range(coord.x, max) && in_range(coord.y, max) && in_range(coord.z, max)
    }

    /// True when all 8 corners of the cube based at `coord` are lattice points.
    #[inline]
    pub fn contains_cube(&self, coord: GridCoord) -> bool {
        let max = self.size as i32 - 2;
        in_range(coord.x, max) && in_range(coord.y, max) && in_range(coord.z, max)
    }

    /// Number of lattice points (`size³`).
    #[inline]
    pub const fn point_count(&self) -> usize {
        let n = self.size as usize;
        n * n * n
    }

    /// Number of cubes along one axis.
    #[inline]
    pub const fn cubes_per_axis(&self) -> u32 {
        self.size.saturating_sub(1)
    }

    /// Flat row-major index of a lattice point: `x + y * size + z * size²`.
    ///
    /// Cube bases reuse the same indexing. The caller guarantees
    /// [`contains_point`](Self::contains_point).
    #[inline]
    pub fn point_index(&self, coord: GridCoord) -> usize {
        debug_assert!(self.contains_point(coord), "{:?} outside grid", coord);
        let n = self.size as usize;
        coord.x as usize + coord.y as usize * n + coord.z as usize * n * n
    }

    /// Clamp each component into the cube domain `[0, size - 2]`.
    ///
    /// Meaningless for grids with fewer than two points per axis.
    #[inline]
    pub fn clamp_cube(&self, coord: GridCoord) -> GridCoord {
        let max = (self.size as i32 - 2).max(0);
        GridCoord::new(
            coord.x.clamp(0, max),
            coord.y.clamp(0, max),
            coord.z.clamp(0, max),
        )
    }
}

#[inline]
fn in_range(v: i32, max: i32) -> bool {
    v >= 0 && v <= max
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_base_point() {
        let frame = GridFrame::centered(Point3::new(1.0, 2.0, 3.0), 0.5, 4);
        assert_eq!(frame.base_point, Point3::new(0.0, 1.0, 2.0));

        // Odd sizes use real division.
        let odd = GridFrame::centered(Point3::splat(0.0), 1.0, 5);
        assert_eq!(odd.base_point, Point3::splat(-2.5));
    }

    #[test]
    fn test_world_grid_roundtrip() {
        let frame = GridFrame::centered(Point3::splat(0.0), 0.1, 16);
        for &(x, y, z) in &[(0, 0, 0), (8, 8, 8), (15, 3, 9)] {
            let c = GridCoord::new(x, y, z);
            assert_eq!(frame.to_grid(frame.to_world(c)), c);
        }
        assert_eq!(
            frame.to_grid(Point3::new(0.04, -0.04, 0.06)),
            GridCoord::new(8, 8, 9)
        );
    }

    #[test]
    fn test_point_and_cube_domains_differ() {
        let frame = GridFrame::new(Point3::default(), 1.0, 4);

        let edge = GridCoord::new(3, 0, 0);
        assert!(frame.contains_point(edge));
        assert!(!frame.contains_cube(edge));

        let last_cube = GridCoord::new(2, 2, 2);
        assert!(frame.contains_cube(last_cube));
        assert!(!frame.contains_point(GridCoord::new(-1, 0, 0)));
        assert!(!frame.contains_cube(GridCoord::new(0, -1, 0)));
    }

    #[test]
    fn test_degenerate_grid_has_no_cubes() {
        for size in 0..2 {
            let frame = GridFrame::new(Point3::default(), 1.0, size);
            assert!(!frame.contains_cube(GridCoord::new(0, 0, 0)));
            assert_eq!(frame.cubes_per_axis(), 0);
        }
    }

    #[test]
    fn test_point_index_row_major() {
        let frame = GridFrame::new(Point3::default(), 1.0, 8);

        assert_eq!(frame.point_index(GridCoord::new(0, 0, 0)), 0);
        assert_eq!(frame.point_index(GridCoord::new(1, 0, 0)), 1);
        assert_eq!(frame.point_index(GridCoord::new(0, 1, 0)), 8);
        assert_eq!(frame.point_index(GridCoord::new(0, 0, 1)), 64);
        assert_eq!(frame.point_index(GridCoord::new(7, 7, 7)), frame.point_count() - 1);
    }

    #[test]
    fn test_clamp_cube() {
        let frame = GridFrame::new(Point3::default(), 1.0, 10);
        assert_eq!(
            frame.clamp_cube(GridCoord::new(-3, 4, 12)),
            GridCoord::new(0, 4, 8)
        );
    }
}
