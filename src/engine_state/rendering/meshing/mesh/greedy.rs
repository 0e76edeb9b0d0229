//! Greedy meshing implementation for voxel rendering.
//!
//! This module implements the greedy meshing algorithm which combines adjacent coplanar
//! faces with the same block type and direction into larger rectangles, significantly
//! reducing the number of vertices needed to render a voxel world.
//!
//! # Algorithm
//! For each axis the chunk is swept one boundary plane at a time. Every plane gets a
//! 2D mask whose cells record which block face (if any) is visible across that
//! boundary. Rectangles are then grown from the first unconsumed mask cell: first
//! along the first in-plane axis, then along the second as long as every cell of the
//! next row matches. Consumed cells are cleared before the scan continues.

use cgmath::Point3;

use crate::engine_state::voxels::{
    block::{block_side::BlockSide, block_type::BlockType},
    chunk::{Chunk, CHUNK_DIMENSION},
    world::World,
};

use super::{face::Face, ChunkNeighborhood};

const MASK_DIMENSION: usize = CHUNK_DIMENSION as usize;

/// A visible face recorded in a slice mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MaskCell {
    block_type: BlockType,
    side: BlockSide,
}

/// Generates merged faces for every visible block side of a chunk.
///
/// # Arguments
/// * `world` - The world the chunk lives in, for lookups across chunk boundaries
/// * `chunk` - The chunk to mesh
///
/// # Returns
/// Faces in chunk-local coordinates, each a maximal run of identical block faces.
///
/// # Performance
/// Runs in O(n) time per axis, where n is the number of boundary cells, and emits far
/// fewer faces than per-face meshing on flat or uniform terrain.
pub fn greedy(world: &World, chunk: &Chunk) -> Vec<Face> {
    let neighborhood = ChunkNeighborhood::new(world, chunk);
    let mut faces = Vec::new();
    let mut mask: Vec<Option<MaskCell>> = vec![None; MASK_DIMENSION * MASK_DIMENSION];

    for axis in 0..3 {
        let (u, v) = Face::plane_axes(axis);

        // Plane `slice` separates cell `slice - 1` from cell `slice` along `axis`.
        for slice in 0..=CHUNK_DIMENSION {
            fill_mask(&neighborhood, &mut mask, axis, slice);

            for j in 0..MASK_DIMENSION {
                let mut i = 0;
                while i < MASK_DIMENSION {
                    let Some(cell) = mask[i + j * MASK_DIMENSION] else {
                        i += 1;
                        continue;
                    };

                    let mut width = 1;
                    while i + width < MASK_DIMENSION
                        && mask[i + width + j * MASK_DIMENSION] == Some(cell)
                    {
                        width += 1;
                    }

                    let mut height = 1;
                    'grow: while j + height < MASK_DIMENSION {
                        for k in 0..width {
                            if mask[i + k + (j + height) * MASK_DIMENSION] != Some(cell) {
                                break 'grow;
                            }
                        }
                        height += 1;
                    }

                    let mut origin = Point3::new(0, 0, 0);
                    origin[axis] = if cell.side.is_positive() { slice - 1 } else { slice };
                    origin[u] = i as i32;
                    origin[v] = j as i32;
                    faces.push(Face {
                        origin,
                        block_side: cell.side,
                        width: width as i32,
                        height: height as i32,
                        block_type: cell.block_type,
                    });

                    for dv in 0..height {
                        for du in 0..width {
                            mask[i + du + (j + dv) * MASK_DIMENSION] = None;
                        }
                    }
                    i += width;
                }
            }
        }
    }

    faces
}

/// Records the visible faces across one boundary plane into `mask`.
///
/// Only faces owned by blocks inside the chunk are recorded: the positive face of
/// the block behind the plane when that block is in the chunk, or the negative face
/// of the block in front of it when that block is in the chunk.
fn fill_mask(
    neighborhood: &ChunkNeighborhood<'_>,
    mask: &mut [Option<MaskCell>],
    axis: usize,
    slice: i32,
) {
    let (u, v) = Face::plane_axes(axis);
    for j in 0..MASK_DIMENSION {
        for i in 0..MASK_DIMENSION {
            let mut behind = Point3::new(0, 0, 0);
            behind[axis] = slice - 1;
            behind[u] = i as i32;
            behind[v] = j as i32;
            let mut ahead = behind;
            ahead[axis] = slice;

            let behind_block = neighborhood.block(behind);
            let ahead_block = neighborhood.block(ahead);

            mask[i + j * MASK_DIMENSION] = if behind_block.is_solid()
                && !ahead_block.is_solid()
                && slice > 0
            {
                Some(MaskCell {
                    block_type: behind_block,
                    side: BlockSide::from_axis(axis, true),
                })
            } else if ahead_block.is_solid() && !behind_block.is_solid() && slice < CHUNK_DIMENSION
            {
                Some(MaskCell {
                    block_type: ahead_block,
                    side: BlockSide::from_axis(axis, false),
                })
            } else {
                None
            };
        }
    }
}
