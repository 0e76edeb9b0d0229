use cgmath::Point3;

use crate::engine_state::voxels::block::{block_side::BlockSide, block_type::BlockType};

/// A rectangular run of visible block faces lying in one plane.
///
/// `origin` is the chunk-local cell of the run's lowest corner. The run spans
/// `width` cells along the first in-plane axis (`(axis + 1) % 3`) and `height`
/// cells along the second (`(axis + 2) % 3`), where `axis` is the axis the face
/// normal points along. A single block face has `width == height == 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    /// Lowest chunk-local cell covered by the face
    pub origin: Point3<i32>,
    /// Which side of the blocks this face represents
    pub block_side: BlockSide,
    /// Cells covered along the first in-plane axis
    pub width: i32,
    /// Cells covered along the second in-plane axis
    pub height: i32,
    /// The block type, used for texture and colour lookup
    pub block_type: BlockType,
}

impl Face {
    /// Creates a single-cell face of the block at chunk-local `(i, j, k)`.
    pub fn new(i: i32, j: i32, k: i32, block_type: BlockType, block_side: BlockSide) -> Self {
        Face {
            origin: Point3::new(i, j, k),
            block_side,
            width: 1,
            height: 1,
            block_type,
        }
    }

    /// The two in-plane axes `(u, v)` of a face perpendicular to `axis`.
    pub fn plane_axes(axis: usize) -> (usize, usize) {
        ((axis + 1) % 3, (axis + 2) % 3)
    }

    /// Number of cells along `axis` covered by this face (1 on the normal axis).
    pub fn extent_along(&self, axis: usize) -> i32 {
        let (u, v) = Self::plane_axes(self.block_side.axis());
        if axis == u {
            self.width
        } else if axis == v {
            self.height
        } else {
            1
        }
    }

    /// Number of unit block faces merged into this face.
    pub fn area(&self) -> i32 {
        self.width * self.height
    }

    /// Expands the face into the unit faces it covers, as `(cell, side)` pairs.
    pub fn unit_cells(&self) -> Vec<(Point3<i32>, BlockSide)> {
        let (u, v) = Self::plane_axes(self.block_side.axis());
        let mut cells = Vec::with_capacity(self.area().max(0) as usize);
        for du in 0..self.width {
            for dv in 0..self.height {
                let mut cell = self.origin;
                cell[u] += du;
                cell[v] += dv;
                cells.push((cell, self.block_side));
            }
        }
        cells
    }
}
