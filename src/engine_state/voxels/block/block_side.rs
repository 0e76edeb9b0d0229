//! # Block Side Module
//!
//! This module defines the different faces/sides of a voxel block together with
//! the per-face geometry the mesher needs: neighbour offset, normal, the four
//! unit-cube corners in winding order, and the directional shade.

use cgmath::Vector3;

/// Represents the six possible faces of a voxel block.
///
/// Each variant corresponds to a specific face and is assigned a unique integer value
/// so it can index per-side tables such as the tile table.
///
/// The order is: [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The front face (facing positive Z)
    FRONT = 0,

    /// The back face (facing negative Z)
    BACK = 1,

    /// The bottom face (facing negative Y)
    BOTTOM = 2,

    /// The top face (facing positive Y)
    TOP = 3,

    /// The left face (facing negative X)
    LEFT = 4,

    /// The right face (facing positive X)
    RIGHT = 5,
}

/// Unit-cube corners of each face, indexed by `BlockSide as usize`.
///
/// Corners are wound so that triangles (0, 1, 2) and (0, 2, 3) face outward.
const FACE_CORNERS: [[[f32; 3]; 4]; 6] = [
    // FRONT (+Z)
    [
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 1.0],
        [1.0, 1.0, 1.0],
        [0.0, 1.0, 1.0],
    ],
    // BACK (-Z)
    [
        [1.0, 0.0, 0.0],
        [0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [1.0, 1.0, 0.0],
    ],
    // BOTTOM (-Y)
    [
        [0.0, 0.0, 1.0],
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 0.0, 1.0],
    ],
    // TOP (+Y)
    [
        [0.0, 1.0, 0.0],
        [0.0, 1.0, 1.0],
        [1.0, 1.0, 1.0],
        [1.0, 1.0, 0.0],
    ],
    // LEFT (-X)
    [
        [0.0, 0.0, 1.0],
        [0.0, 1.0, 1.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0],
    ],
    // RIGHT (+X)
    [
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [1.0, 1.0, 1.0],
        [1.0, 0.0, 1.0],
    ],
];

impl BlockSide {
    /// Returns an array containing all six block faces in a consistent order.
    ///
    /// The order is: [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT]
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::FRONT,
            BlockSide::BACK,
            BlockSide::BOTTOM,
            BlockSide::TOP,
            BlockSide::LEFT,
            BlockSide::RIGHT,
        ]
    }

    /// Returns the face perpendicular to `axis` (0 = X, 1 = Y, 2 = Z) pointing in
    /// the positive or negative direction along it.
    pub fn from_axis(axis: usize, positive: bool) -> BlockSide {
        match (axis, positive) {
            (0, true) => BlockSide::RIGHT,
            (0, false) => BlockSide::LEFT,
            (1, true) => BlockSide::TOP,
            (1, false) => BlockSide::BOTTOM,
            (_, true) => BlockSide::FRONT,
            (_, false) => BlockSide::BACK,
        }
    }

    /// The axis this face is perpendicular to (0 = X, 1 = Y, 2 = Z).
    pub fn axis(self) -> usize {
        match self {
            BlockSide::LEFT | BlockSide::RIGHT => 0,
            BlockSide::BOTTOM | BlockSide::TOP => 1,
            BlockSide::BACK | BlockSide::FRONT => 2,
        }
    }

    /// Whether the face normal points along the positive direction of its axis.
    pub fn is_positive(self) -> bool {
        matches!(self, BlockSide::RIGHT | BlockSide::TOP | BlockSide::FRONT)
    }

    /// Integer offset from a block to the neighbour this face looks at.
    pub fn normal(self) -> Vector3<i32> {
        let mut normal = Vector3::new(0, 0, 0);
        normal[self.axis()] = if self.is_positive() { 1 } else { -1 };
        normal
    }

    /// Directional light multiplier: tops brightest, bottoms darkest, sides in between.
    pub fn shade(self) -> f32 {
        match self {
            BlockSide::TOP => 1.0,
            BlockSide::BOTTOM => 0.6,
            _ => 0.85,
        }
    }

    /// The four unit-cube corners of this face in winding order.
    pub fn corners(self) -> &'static [[f32; 3]; 4] {
        &FACE_CORNERS[self as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_and_direction_round_trip() {
        for side in BlockSide::all() {
            assert_eq!(BlockSide::from_axis(side.axis(), side.is_positive()), side);
        }
    }

    #[test]
    fn corners_lie_on_the_face_plane() {
        for side in BlockSide::all() {
            let plane = if side.is_positive() { 1.0 } else { 0.0 };
            for corner in side.corners() {
                assert_eq!(corner[side.axis()], plane, "{side:?}");
            }
        }
    }

    #[test]
    fn winding_faces_outward() {
        for side in BlockSide::all() {
            let [a, b, c, _] = *side.corners();
            let ab = Vector3::new(b[0] - a[0], b[1] - a[1], b[2] - a[2]);
            let ac = Vector3::new(c[0] - a[0], c[1] - a[1], c[2] - a[2]);
            let n = side.normal().cast::<f32>().unwrap_or(Vector3::new(0.0, 0.0, 0.0));
            let cross = ab.cross(ac);
            assert!(cross.x * n.x + cross.y * n.y + cross.z * n.z > 0.0, "{side:?}");
        }
    }
}
