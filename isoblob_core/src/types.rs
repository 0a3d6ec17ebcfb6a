//! Core value types shared by the field, the grid and the mesher.
//!
//! [`Point3`] is a world-space position or vector, [`GridCoord`] addresses a
//! lattice point of the sampling grid and [`EdgeKey`] names one grid edge
//! independently of the cube that reaches it.

use core::ops::{Add, Div, Mul, Neg, Sub};

/// A 3D point or vector in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3 {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
    /// Z coordinate.
    pub z: f32,
}

impl Point3 {
    /// Create a new Point3.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Create a Point3 with all components set to the same value.
    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v }
    }

    /// Convert to an array.
    #[inline]
    pub const fn as_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Linear interpolation towards `other`.
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }

    /// Dot product.
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product.
    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Squared length of the vector.
    #[inline]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Length of the vector.
    #[inline]
    pub fn length(self) -> f32 {
        libm::sqrtf(self.length_squared())
    }

    /// Unit vector in the same direction, or zero for a zero vector.
    #[inline]
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            Self::splat(0.0)
        } else {
            self / len
        }
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self {
            x: self.x.min(other.x),
            y: self.y.min(other.y),
            z: self.z.min(other.z),
        }
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
            z: self.z.max(other.z),
        }
    }

    /// True when every component is finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f32; 3]> for Point3 {
    #[inline]
    fn from(arr: [f32; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}

impl From<Point3> for [f32; 3] {
    #[inline]
    fn from(p: Point3) -> Self {
        p.as_array()
    }
}

impl From<(f32, f32, f32)> for Point3 {
    #[inline]
    fn from((x, y, z): (f32, f32, f32)) -> Self {
        Self { x, y, z }
    }
}

impl Add for Point3 {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Point3 {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f32> for Point3 {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl Mul<Point3> for f32 {
    type Output = Point3;

    #[inline]
    fn mul(self, point: Point3) -> Point3 {
        point * self
    }
}

impl Div<f32> for Point3 {
    type Output = Self;

    #[inline]
    fn div(self, scalar: f32) -> Self {
        Self::new(self.x / scalar, self.y / scalar, self.z / scalar)
    }
}

impl Neg for Point3 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// Integer lattice coordinate of a grid point (or of a cube's base corner).
///
/// Ordering is lexicographic on `(x, y, z)`; [`EdgeKey`] relies on it to
/// pick a canonical endpoint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct GridCoord {
    /// X index.
    pub x: i32,
    /// Y index.
    pub y: i32,
    /// Z index.
    pub z: i32,
}

impl GridCoord {
    /// Create a new GridCoord.
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Convert to an array.
    #[inline]
    pub const fn as_array(&self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }

    /// Coordinate shifted by an `(dx, dy, dz)` offset.
    #[inline]
    pub const fn offset(self, (dx, dy, dz): (i32, i32, i32)) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// The coordinate as a float vector, still in grid units.
    #[inline]
    pub fn to_point(self) -> Point3 {
        Point3::new(self.x as f32, self.y as f32, self.z as f32)
    }
}

impl Add for GridCoord {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl From<[i32; 3]> for GridCoord {
    #[inline]
    fn from(arr: [i32; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}

impl From<(i32, i32, i32)> for GridCoord {
    #[inline]
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

/// Unordered pair of lattice points identifying one grid edge.
///
/// `EdgeKey::new(a, b) == EdgeKey::new(b, a)`; the smaller coordinate is
/// always stored in `lo`. Two cubes sharing an edge build the same key and so
/// reuse the same interpolated vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey {
    /// Smaller endpoint.
    pub lo: GridCoord,
    /// Larger endpoint.
    pub hi: GridCoord,
}

impl EdgeKey {
    /// Build the canonical key for the edge between `a` and `b`.
    #[inline]
    pub fn new(a: GridCoord, b: GridCoord) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point3_arithmetic() {
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(4.0, 5.0, 6.0);

        assert_eq!(a + b, Point3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Point3::new(3.0, 3.0, 3.0));
        assert_eq!(a * 2.0, Point3::new(2.0, 4.0, 6.0));
        assert_eq!(2.0 * a, Point3::new(2.0, 4.0, 6.0));
        assert_eq!(b / 2.0, Point3::new(2.0, 2.5, 3.0));
        assert_eq!(-a, Point3::new(-1.0, -2.0, -3.0));
    }

    #[test]
    fn test_point3_dot_cross() {
        let x = Point3::new(1.0, 0.0, 0.0);
        let y = Point3::new(0.0, 1.0, 0.0);

        assert_eq!(x.dot(y), 0.0);
        assert_eq!(x.cross(y), Point3::new(0.0, 0.0, 1.0));
        assert_eq!(y.cross(x), Point3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_point3_length_and_normalize() {
        let p = Point3::new(3.0, 4.0, 0.0);
        assert_eq!(p.length(), 5.0);
        assert!((p.normalize().length() - 1.0).abs() < 1e-6);
        assert_eq!(Point3::splat(0.0).normalize(), Point3::splat(0.0));
    }

    #[test]
    fn test_point3_lerp_endpoints() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(10.0, 10.0, 10.0);

        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 0.5), Point3::splat(5.0));
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn test_grid_coord_ordering_is_lexicographic() {
        let a = GridCoord::new(0, 5, 5);
        let b = GridCoord::new(1, 0, 0);
        let c = GridCoord::new(1, 0, 1);

        assert!(a < b);
        assert!(b < c);
        assert_eq!(a + GridCoord::new(1, 1, 1), GridCoord::new(1, 6, 6));
        assert_eq!(a.offset((-1, 0, 2)), GridCoord::new(-1, 5, 7));
    }

    #[test]
    fn test_edge_key_is_unordered() {
        let a = GridCoord::new(3, 4, 5);
        let b = GridCoord::new(3, 5, 5);

        let k1 = EdgeKey::new(a, b);
        let k2 = EdgeKey::new(b, a);
        assert_eq!(k1, k2);
        assert_eq!(k1.lo, a);
        assert_eq!(k1.hi, b);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_edge_key_hash_matches_for_swapped_endpoints() {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{BuildHasher, BuildHasherDefault};

        let hasher = BuildHasherDefault::<DefaultHasher>::default();
        let a = GridCoord::new(1, 2, 3);
        let b = GridCoord::new(2, 2, 3);

        assert_eq!(
            hasher.hash_one(EdgeKey::new(a, b)),
            hasher.hash_one(EdgeKey::new(b, a))
        );
    }
}
