//! Per-face meshing: one unit face for every exposed side of every solid block.

use crate::engine_state::voxels::{
    block::block_side::BlockSide,
    chunk::{chunk_iteration::ChunkBlockIterator, Chunk},
    world::World,
};

use super::{face::Face, ChunkNeighborhood};

/// Generates one face per visible block side of a chunk.
///
/// # Arguments
/// * `world` - The world the chunk lives in, for lookups across chunk boundaries
/// * `chunk` - The chunk to mesh
///
/// # Returns
/// Unit faces in chunk-local coordinates.
pub fn per_face(world: &World, chunk: &Chunk) -> Vec<Face> {
    let neighborhood = ChunkNeighborhood::new(world, chunk);
    let mut faces = Vec::new();

    for (position, block_type) in ChunkBlockIterator::new(&chunk.voxels) {
        for side in BlockSide::all() {
            if !neighborhood.block(position + side.normal()).is_solid() {
                faces.push(Face::new(
                    position.x, position.y, position.z, block_type, side,
                ));
            }
        }
    }

    faces
}
