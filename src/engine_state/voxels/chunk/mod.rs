//! # Chunk Module
//!
//! This module provides the `VoxelChunk` block grid and the `Chunk` that wraps it
//! with a world position, a dirty flag and the chunk's last built mesh.
//!
//! ## Storage
//!
//! A `VoxelChunk` is a dense, flat array of `CHUNK_SIZE` compact block ids
//! (`BlockTypeSize`, decoded on read) addressed by
//! `x + y * CHUNK_DIMENSION + z * CHUNK_PLANE_SIZE`. Local coordinates are always
//! in `[0, CHUNK_DIMENSION)`; the accessors do not bounds-check beyond a debug
//! assertion, so callers resolve out-of-chunk lookups through the `World`.
//!
//! ### Performance Characteristics
//! - **Block Lookup**: O(1)
//! - **Block Update**: O(1)
//! - **Memory Usage**: one byte per block, 4 KiB per chunk

use cgmath::Point3;
use chunk_creation::ChunkCreationIterator;

use super::aabb::Aabb;
use super::block::{block_type::BlockType, BlockTypeSize};
use super::coords::chunk_origin;
use crate::engine_state::rendering::meshing::mesh::Mesh;

mod chunk_creation;
pub mod chunk_iteration;

/// The dimension (width, height, depth) of a chunk in blocks.
pub const CHUNK_DIMENSION: i32 = 16;
/// The number of blocks in a single 2D plane of a chunk (CHUNK_DIMENSION²).
pub const CHUNK_PLANE_SIZE: usize = (CHUNK_DIMENSION * CHUNK_DIMENSION) as usize;
/// The total number of blocks in a chunk (CHUNK_DIMENSION³).
pub const CHUNK_SIZE: usize = CHUNK_PLANE_SIZE * CHUNK_DIMENSION as usize;
/// Edge length of one block in world units.
pub const BLOCK_SIZE: f32 = 1.0;

/// A fixed-size 16x16x16 grid of block ids.
///
/// Default-constructed grids are entirely `AIR`.
#[derive(Clone, PartialEq, Eq)]
pub struct VoxelChunk {
    blocks: Box<[BlockTypeSize]>,
}

impl Default for VoxelChunk {
    fn default() -> Self {
        VoxelChunk {
            blocks: vec![BlockType::AIR.as_int(); CHUNK_SIZE].into_boxed_slice(),
        }
    }
}

impl std::fmt::Debug for VoxelChunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoxelChunk")
            .field("solid_blocks", &self.solid_count())
            .finish()
    }
}

impl VoxelChunk {
    /// Packs local coordinates into the flat array index.
    ///
    /// Coordinates must be in `[0, CHUNK_DIMENSION)`.
    #[inline]
    pub fn index(x: i32, y: i32, z: i32) -> usize {
        debug_assert!(
            Self::in_bounds(x, y, z),
            "local coordinate ({x}, {y}, {z}) outside chunk"
        );
        x as usize + y as usize * CHUNK_DIMENSION as usize + z as usize * CHUNK_PLANE_SIZE
    }

    /// Whether a local coordinate addresses a block of this chunk.
    #[inline]
    pub fn in_bounds(x: i32, y: i32, z: i32) -> bool {
        (0..CHUNK_DIMENSION).contains(&x)
            && (0..CHUNK_DIMENSION).contains(&y)
            && (0..CHUNK_DIMENSION).contains(&z)
    }

    /// Gets the block at the given local coordinate.
    #[inline]
    pub fn get(&self, x: i32, y: i32, z: i32) -> BlockType {
        BlockType::get_block_type_from_int(self.blocks[Self::index(x, y, z)])
    }

    /// Sets the block at the given local coordinate.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, z: i32, block_type: BlockType) {
        self.blocks[Self::index(x, y, z)] = block_type.as_int();
    }

    /// Number of non-air blocks in the grid.
    pub fn solid_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|&&b| BlockType::get_block_type_from_int(b).is_solid())
            .count()
    }

    /// Whether every block in the grid is air.
    pub fn is_empty(&self) -> bool {
        self.solid_count() == 0
    }

    pub(super) fn from_blocks(blocks: Vec<BlockTypeSize>) -> Self {
        debug_assert_eq!(blocks.len(), CHUNK_SIZE);
        VoxelChunk {
            blocks: blocks.into_boxed_slice(),
        }
    }
}

/// Represents a 16x16x16 collection of voxel blocks in the world.
///
/// Chunks are the fundamental unit of world data. Each chunk knows its position
/// in chunk space, whether its geometry is stale, and the mesh built for it the
/// last time it was rebuilt.
#[derive(Debug)]
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    pub position: Point3<i32>,

    /// The block grid.
    pub voxels: VoxelChunk,

    /// Set whenever a block inside this chunk, or a block on the shared face of a
    /// neighbouring chunk, changes. Cleared by the mesh rebuild.
    pub dirty: bool,

    /// Geometry built from `voxels` on the last rebuild.
    pub mesh: Mesh,
}

impl Chunk {
    /// Creates a new, completely empty chunk (all blocks are air).
    ///
    /// # Arguments
    /// * `position` - The chunk coordinates of the new chunk
    ///
    /// # Returns
    /// A new, dirty `Chunk` filled with air blocks.
    pub fn empty(position: Point3<i32>) -> Self {
        Chunk {
            position,
            voxels: VoxelChunk::default(),
            dirty: true,
            mesh: Mesh::default(),
        }
    }

    /// Generates a chunk of flat terrain.
    ///
    /// World layers `0..ground_height` are filled: the topmost of them with grass,
    /// the rest with dirt. Everything else is air, so chunks above or below the
    /// ground layers come out empty.
    ///
    /// # Arguments
    /// * `position` - The chunk coordinates where the chunk will be placed
    /// * `ground_height` - Number of solid layers starting at world `y = 0`
    ///
    /// # Returns
    /// A new, dirty `Chunk` holding the generated terrain.
    pub fn flat(position: Point3<i32>, ground_height: i32) -> Self {
        let mut cci = ChunkCreationIterator::new(position);
        let base_y = position.y * CHUNK_DIMENSION;

        for _z in 0..CHUNK_DIMENSION {
            for y in 0..CHUNK_DIMENSION {
                let world_y = base_y + y;
                let block_type = if world_y < 0 || world_y >= ground_height {
                    BlockType::AIR
                } else if world_y == ground_height - 1 {
                    BlockType::GRASS
                } else {
                    BlockType::DIRT
                };
                for _x in 0..CHUNK_DIMENSION {
                    cci.push_block_type(block_type);
                }
            }
        }

        cci.return_chunk()
    }

    /// Gets the block at the specified chunk-relative coordinates.
    pub fn get_block_at(&self, local: Point3<i32>) -> BlockType {
        self.voxels.get(local.x, local.y, local.z)
    }

    /// Overwrites the block at the specified chunk-relative coordinates.
    ///
    /// # Returns
    /// `true` if the stored block changed. The chunk is marked dirty only then.
    pub fn set_block_at(&mut self, local: Point3<i32>, block_type: BlockType) -> bool {
        if self.voxels.get(local.x, local.y, local.z) == block_type {
            return false;
        }
        self.voxels.set(local.x, local.y, local.z, block_type);
        self.dirty = true;
        true
    }

    /// World block coordinate of this chunk's `(0, 0, 0)` corner.
    pub fn origin(&self) -> Point3<i32> {
        chunk_origin(self.position)
    }

    /// The chunk's bounding box in world units, for frustum culling.
    ///
    /// `min = position * CHUNK_DIMENSION * BLOCK_SIZE`, extent
    /// `CHUNK_DIMENSION * BLOCK_SIZE` on every axis.
    pub fn world_bounds(&self) -> Aabb {
        let origin = self.origin();
        let extent = CHUNK_DIMENSION as f32 * BLOCK_SIZE;
        let min = Point3::new(
            origin.x as f32 * BLOCK_SIZE,
            origin.y as f32 * BLOCK_SIZE,
            origin.z as f32 * BLOCK_SIZE,
        );
        Aabb::new(min, Point3::new(min.x + extent, min.y + extent, min.z + extent))
    }

    /// Number of vertices in the last built mesh.
    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_is_all_air() {
        let grid = VoxelChunk::default();
        assert!(grid.is_empty());
        assert_eq!(grid.get(0, 0, 0), BlockType::AIR);
        assert_eq!(grid.get(15, 15, 15), BlockType::AIR);
    }

    #[test]
    fn index_packs_x_then_y_then_z() {
        assert_eq!(VoxelChunk::index(0, 0, 0), 0);
        assert_eq!(VoxelChunk::index(1, 0, 0), 1);
        assert_eq!(VoxelChunk::index(0, 1, 0), 16);
        assert_eq!(VoxelChunk::index(0, 0, 1), 256);
        assert_eq!(VoxelChunk::index(15, 15, 15), CHUNK_SIZE - 1);
    }

    #[test]
    fn set_then_get() {
        let mut grid = VoxelChunk::default();
        grid.set(3, 4, 5, BlockType::STONE);
        assert_eq!(grid.get(3, 4, 5), BlockType::STONE);
        assert_eq!(grid.get(5, 4, 3), BlockType::AIR);
        assert_eq!(grid.solid_count(), 1);
    }

    #[test]
    fn grid_stores_one_byte_per_block() {
        let mut grid = VoxelChunk::default();
        grid.set(0, 0, 0, BlockType::GRASS);
        grid.set(15, 15, 15, BlockType::DIRT);
        assert_eq!(grid.blocks.len(), CHUNK_SIZE);
        assert_eq!(grid.blocks[0], BlockType::GRASS.as_int());
        assert_eq!(grid.blocks[CHUNK_SIZE - 1], BlockType::DIRT.as_int());
        assert_eq!(grid.get(15, 15, 15), BlockType::DIRT);
    }

    #[test]
    fn flat_chunk_has_grass_over_dirt() {
        let chunk = Chunk::flat(Point3::new(0, 0, 0), 2);
        for (x, z) in [(0, 0), (7, 9), (15, 15)] {
            assert_eq!(chunk.get_block_at(Point3::new(x, 0, z)), BlockType::DIRT);
            assert_eq!(chunk.get_block_at(Point3::new(x, 1, z)), BlockType::GRASS);
            assert_eq!(chunk.get_block_at(Point3::new(x, 2, z)), BlockType::AIR);
        }
        assert_eq!(chunk.voxels.solid_count(), 2 * CHUNK_PLANE_SIZE);
        assert!(chunk.dirty);
    }

    #[test]
    fn flat_chunk_outside_ground_layers_is_empty() {
        assert!(Chunk::flat(Point3::new(0, 1, 0), 2).voxels.is_empty());
        assert!(Chunk::flat(Point3::new(0, -1, 0), 2).voxels.is_empty());
    }

    #[test]
    fn set_block_at_reports_change_once() {
        let mut chunk = Chunk::empty(Point3::new(0, 0, 0));
        chunk.dirty = false;
        assert!(chunk.set_block_at(Point3::new(1, 1, 1), BlockType::DIRT));
        assert!(chunk.dirty);
        chunk.dirty = false;
        assert!(!chunk.set_block_at(Point3::new(1, 1, 1), BlockType::DIRT));
        assert!(!chunk.dirty);
    }

    #[test]
    fn world_bounds_scale_with_position() {
        let chunk = Chunk::empty(Point3::new(-1, 0, 2));
        let bounds = chunk.world_bounds();
        assert_eq!(bounds.min, Point3::new(-16.0, 0.0, 32.0));
        assert_eq!(bounds.max, Point3::new(0.0, 16.0, 48.0));
    }
}
