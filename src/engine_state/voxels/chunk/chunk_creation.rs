//! # Chunk Creation Module
//!
//! This module provides a builder that fills a chunk's block grid in storage
//! order, one block at a time.
//!
//! ## Fill Order
//!
//! Blocks are pushed with X varying fastest, then Y, then Z, which is exactly the
//! packed index order of `VoxelChunk`. A generator therefore never computes an
//! index itself; it walks its loops in the same order and pushes.

use cgmath::Point3;

use crate::engine_state::rendering::meshing::mesh::Mesh;
use crate::engine_state::voxels::block::{block_type::BlockType, BlockTypeSize};

use super::{Chunk, VoxelChunk, CHUNK_SIZE};

/// A builder for populating a chunk in storage order.
///
/// Any positions left unfilled when the chunk is returned are air.
pub struct ChunkCreationIterator {
    /// The chunk-space position of the chunk being created
    position: Point3<i32>,
    /// Encoded blocks pushed so far, in packed index order
    blocks: Vec<BlockTypeSize>,
}

impl ChunkCreationIterator {
    /// Creates a new `ChunkCreationIterator` for building a chunk at the given position.
    ///
    /// # Arguments
    /// * `position` - The chunk coordinates of the chunk to create
    ///
    /// # Returns
    /// A new `ChunkCreationIterator` positioned at local `(0, 0, 0)`
    pub fn new(position: Point3<i32>) -> Self {
        ChunkCreationIterator {
            position,
            blocks: Vec::with_capacity(CHUNK_SIZE),
        }
    }

    /// Finalizes the chunk creation and returns the constructed `Chunk`.
    ///
    /// # Returns
    /// The fully constructed, dirty `Chunk` with all added blocks
    pub fn return_chunk(mut self) -> Chunk {
        self.blocks.resize(CHUNK_SIZE, BlockType::AIR.as_int());
        Chunk {
            position: self.position,
            voxels: VoxelChunk::from_blocks(self.blocks),
            dirty: true,
            mesh: Mesh::default(),
        }
    }

    /// Adds a block at the current position and advances the position.
    ///
    /// Pushes past the end of the chunk are ignored.
    ///
    /// # Arguments
    /// * `block_type` - The type of block to add
    pub fn push_block_type(&mut self, block_type: BlockType) {
        if self.blocks.len() < CHUNK_SIZE {
            self.blocks.push(block_type.as_int());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pushes_follow_packed_index_order() {
        let mut cci = ChunkCreationIterator::new(Point3::new(2, 0, -1));
        cci.push_block_type(BlockType::AIR);
        cci.push_block_type(BlockType::STONE);
        let chunk = cci.return_chunk();
        assert_eq!(chunk.position, Point3::new(2, 0, -1));
        assert_eq!(chunk.voxels.get(1, 0, 0), BlockType::STONE);
        assert_eq!(chunk.voxels.solid_count(), 1);
    }

    #[test]
    fn overflowing_pushes_are_dropped() {
        let mut cci = ChunkCreationIterator::new(Point3::new(0, 0, 0));
        for _ in 0..CHUNK_SIZE + 10 {
            cci.push_block_type(BlockType::DIRT);
        }
        assert_eq!(cci.return_chunk().voxels.solid_count(), CHUNK_SIZE);
    }
}
