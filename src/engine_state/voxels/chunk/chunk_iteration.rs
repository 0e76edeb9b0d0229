//! # Chunk Iteration Module
//!
//! This module provides an iterator over all non-air blocks in a chunk together
//! with their local positions, walking the grid in packed index order.

use cgmath::Point3;

use crate::engine_state::voxels::block::block_type::BlockType;

use super::{VoxelChunk, CHUNK_DIMENSION, CHUNK_PLANE_SIZE, CHUNK_SIZE};

/// An iterator over all non-air blocks in a chunk.
///
/// Yields `(local_position, block_type)` pairs with X varying fastest, then Y,
/// then Z. Air blocks are skipped.
pub struct ChunkBlockIterator<'a> {
    /// Grid being iterated over
    voxels: &'a VoxelChunk,
    /// Next packed index to inspect
    current_offset: usize,
}

impl<'a> ChunkBlockIterator<'a> {
    /// Creates a new `ChunkBlockIterator` for the given grid.
    ///
    /// # Arguments
    /// * `voxels` - The block grid to iterate over
    ///
    /// # Returns
    /// A new `ChunkBlockIterator` positioned before the first block
    pub fn new(voxels: &'a VoxelChunk) -> Self {
        ChunkBlockIterator {
            voxels,
            current_offset: 0,
        }
    }
}

impl Iterator for ChunkBlockIterator<'_> {
    type Item = (Point3<i32>, BlockType);

    fn next(&mut self) -> Option<Self::Item> {
        let dimension = CHUNK_DIMENSION as usize;
        while self.current_offset < CHUNK_SIZE {
            let offset = self.current_offset;
            self.current_offset += 1;

            let block_type = BlockType::get_block_type_from_int(self.voxels.blocks[offset]);
            if !block_type.is_solid() {
                continue;
            }

            let position = Point3::new(
                (offset % dimension) as i32,
                ((offset / dimension) % dimension) as i32,
                (offset / CHUNK_PLANE_SIZE) as i32,
            );
            return Some((position, block_type));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yields_only_solid_blocks_with_positions() {
        let mut grid = VoxelChunk::default();
        grid.set(15, 0, 0, BlockType::DIRT);
        grid.set(2, 3, 4, BlockType::GRASS);
        grid.set(0, 15, 15, BlockType::STONE);

        let blocks: Vec<_> = ChunkBlockIterator::new(&grid).collect();
        assert_eq!(
            blocks,
            vec![
                (Point3::new(15, 0, 0), BlockType::DIRT),
                (Point3::new(2, 3, 4), BlockType::GRASS),
                (Point3::new(0, 15, 15), BlockType::STONE),
            ]
        );
    }

    #[test]
    fn empty_grid_yields_nothing() {
        assert_eq!(ChunkBlockIterator::new(&VoxelChunk::default()).count(), 0);
    }
}
