//! Mesh generation for voxel rendering.
//!
//! This module converts a chunk's voxels into renderable geometry. A face is
//! visible when the block on one side of it is solid and the block on the other
//! side is air; faces are never emitted between two solid blocks.
//!
//! # Architecture
//! - [`Face`]: A rectangle of visible block faces in chunk-local coordinates
//! - [`Mesh`]: The triangle list built from faces
//! - [`per_face`]: One face per visible block side
//! - [`greedy`]: Slice-by-slice mask merging into maximal rectangles
//!
//! Both meshers produce faces covering exactly the same unit block faces; the
//! greedy mesher just covers them with fewer rectangles.
//!
//! # Usage
//! ```no_run
//! use cgmath::Point3;
//! use voxel_world::{greedy, Mesh, World};
//!
//! let mut world = World::default();
//! world.get_or_create_chunk(Point3::new(0, 0, 0));
//! let chunk = world.get_chunk_at(Point3::new(0, 0, 0)).unwrap();
//! let faces = greedy(&world, chunk);
//! let mesh = Mesh::from_faces(chunk.origin(), &faces, false);
//! ```

use cgmath::Point3;

use crate::engine_state::voxels::{
    block::block_type::BlockType,
    chunk::{Chunk, VoxelChunk},
    world::World,
};

mod face;
mod greedy;
mod mesh;
mod naive;

pub use face::Face;
pub use greedy::greedy;
pub use mesh::*;
pub use naive::per_face;

/// Block lookups around one chunk.
///
/// Coordinates inside the chunk read its grid directly; coordinates outside it
/// fall through to the world, so faces on chunk boundaries are culled against the
/// neighbouring chunk (and treated as exposed when that chunk is not loaded).
pub(crate) struct ChunkNeighborhood<'a> {
    world: &'a World,
    chunk: &'a Chunk,
    origin: Point3<i32>,
}

impl<'a> ChunkNeighborhood<'a> {
    pub(crate) fn new(world: &'a World, chunk: &'a Chunk) -> Self {
        ChunkNeighborhood {
            world,
            chunk,
            origin: chunk.origin(),
        }
    }

    /// The block at a chunk-local coordinate that may lie outside the chunk.
    pub(crate) fn block(&self, local: Point3<i32>) -> BlockType {
        if VoxelChunk::in_bounds(local.x, local.y, local.z) {
            self.chunk.get_block_at(local)
        } else {
            self.world.get_block(
                self.origin.x + local.x,
                self.origin.y + local.y,
                self.origin.z + local.z,
            )
        }
    }
}
