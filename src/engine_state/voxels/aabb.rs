//! Axis-aligned bounding boxes in world units.

use cgmath::Point3;

/// An axis-aligned box given by its minimum and maximum corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Corner with the smallest coordinate on every axis.
    pub min: Point3<f32>,
    /// Corner with the largest coordinate on every axis.
    pub max: Point3<f32>,
}

impl Aabb {
    /// Creates a box from its two corners.
    pub fn new(min: Point3<f32>, max: Point3<f32>) -> Self {
        Aabb { min, max }
    }

    /// The unit box occupied by a world block cell.
    pub fn from_block(cell: Point3<i32>) -> Self {
        let min = Point3::new(cell.x as f32, cell.y as f32, cell.z as f32);
        Aabb::new(min, Point3::new(min.x + 1.0, min.y + 1.0, min.z + 1.0))
    }

    /// Strict overlap test: boxes that only share a face do not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    /// Minimum corner on `axis` (0 = X, 1 = Y, 2 = Z).
    #[inline]
    pub fn min_on(&self, axis: usize) -> f32 {
        self.min[axis]
    }

    /// Maximum corner on `axis` (0 = X, 1 = Y, 2 = Z).
    #[inline]
    pub fn max_on(&self, axis: usize) -> f32 {
        self.max[axis]
    }
}
