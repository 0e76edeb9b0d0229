//! # World Module
//!
//! This module provides the `World` struct which manages a collection of chunks in the voxel world.
//! It serves as the central coordinator for chunk loading, unloading, and access.
//!
//! ## Architecture
//!
//! The world uses a sparse storage approach where only chunks near the player are kept in
//! memory. A chunk exists in the map if and only if it is loaded; reads from unloaded space
//! return air and writes into unloaded space are dropped.
//!
//! ## Dirty Tracking
//!
//! Any change that can alter which faces of a chunk are visible marks that chunk dirty:
//! - editing a block marks its chunk, plus the neighbour across any chunk face the block touches
//! - creating or evicting a chunk marks all six face neighbours
//!
//! ## Performance Considerations
//!
//! - Chunk lookup is O(1) using a hash map keyed by chunk coordinate
//! - Streaming keeps the number of loaded chunks at `(2R + 1)² × layers`

use cgmath::Point3;
use log::{debug, trace};

use super::block::block_side::BlockSide;
use super::block::block_type::BlockType;
use super::chunk::{Chunk, CHUNK_DIMENSION};
use super::coords::{
    world_block_from_position, world_to_chunk_coord, world_to_local_coord, ChunkMap,
};
use crate::engine_state::config::WorldConfig;

/// Read-only solidity queries against world cells.
///
/// Raycasting and player collision only need this view of the world.
pub trait VoxelQuery {
    /// The block occupying a world cell.
    fn block_at(&self, cell: Point3<i32>) -> BlockType;

    /// Whether a world cell blocks movement and rays.
    fn is_solid(&self, cell: Point3<i32>) -> bool {
        self.block_at(cell).is_solid()
    }
}

/// Chunks created and evicted by one streaming pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StreamSummary {
    /// Chunks generated this pass.
    pub created: usize,
    /// Chunks evicted this pass.
    pub removed: usize,
}

/// Represents a voxel world composed of multiple chunks.
///
/// The world is stored as a sparse 3D grid of chunks, where each chunk is a 16x16x16
/// collection of blocks. Chunks are loaded on-demand as the player moves through the world.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_world::{BlockType, World};
///
/// let mut world = World::default();
/// world.get_or_create_chunk(Point3::new(0, 0, 0));
///
/// assert_eq!(world.get_block(8, 1, 8), BlockType::GRASS);
/// assert!(world.set_block(8, 1, 8, BlockType::AIR));
/// ```
#[derive(Debug, Default)]
pub struct World {
    /// A mapping from chunk coordinates to chunk data.
    chunks: ChunkMap<Chunk>,
    /// Streaming bounds and terrain parameters.
    config: WorldConfig,
}

impl World {
    /// Creates a new, empty world.
    ///
    /// # Arguments
    ///
    /// * `config` - Streaming radius, vertical layers and ground height
    ///
    /// # Returns
    ///
    /// A new `World` instance with no chunks loaded.
    pub fn new(config: WorldConfig) -> Self {
        World {
            chunks: ChunkMap::default(),
            config,
        }
    }

    /// The streaming and terrain parameters of this world.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Gets the block at a world block coordinate.
    ///
    /// # Returns
    ///
    /// The stored block, or `AIR` if the owning chunk is not loaded.
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> BlockType {
        let chunk_position = world_to_chunk_coord(x, y, z);
        match self.chunks.get(&chunk_position) {
            Some(chunk) => chunk.get_block_at(world_to_local_coord(x, y, z)),
            None => BlockType::AIR,
        }
    }

    /// Sets the block at a world block coordinate.
    ///
    /// Edits into unloaded chunks are dropped. On a change the owning chunk is marked
    /// dirty, and for every axis on which the block sits on the chunk's boundary the
    /// neighbour across that face is marked dirty too.
    ///
    /// # Returns
    ///
    /// `true` if the stored block changed; `false` if the chunk is not loaded or
    /// already holds `block_type`.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block_type: BlockType) -> bool {
        let chunk_position = world_to_chunk_coord(x, y, z);
        let local = world_to_local_coord(x, y, z);

        let changed = match self.chunks.get_mut(&chunk_position) {
            Some(chunk) => chunk.set_block_at(local, block_type),
            None => return false,
        };
        if !changed {
            return false;
        }
        trace!("Block ({x}, {y}, {z}) set to {block_type:?}");

        for axis in 0..3 {
            if local[axis] == 0 {
                self.mark_chunk_dirty(chunk_position + BlockSide::from_axis(axis, false).normal());
            } else if local[axis] == CHUNK_DIMENSION - 1 {
                self.mark_chunk_dirty(chunk_position + BlockSide::from_axis(axis, true).normal());
            }
        }
        true
    }

    /// Returns the chunk at the given chunk coordinate, generating it if needed.
    ///
    /// A newly generated chunk is dirty, and all six of its face neighbours are marked
    /// dirty since their boundary faces may now be hidden.
    pub fn get_or_create_chunk(&mut self, position: Point3<i32>) -> &mut Chunk {
        let ground_height = self.config.ground_height;
        if !self.chunks.contains_key(&position) {
            self.mark_neighbor_chunks_dirty(position);
        }
        self.chunks.entry(position).or_insert_with(|| {
            trace!("Created chunk {:?}", position);
            Chunk::flat(position, ground_height)
        })
    }

    /// Evicts the chunk at the given chunk coordinate.
    ///
    /// The six face neighbours are marked dirty first, since their boundary faces are
    /// now exposed. Removing an absent chunk does nothing.
    ///
    /// # Returns
    ///
    /// The evicted chunk, if one was loaded.
    pub fn remove_chunk(&mut self, position: Point3<i32>) -> Option<Chunk> {
        if !self.chunks.contains_key(&position) {
            return None;
        }
        self.mark_neighbor_chunks_dirty(position);
        trace!("Removed chunk {:?}", position);
        self.chunks.remove(&position)
    }

    /// Marks one chunk dirty if it is loaded.
    pub fn mark_chunk_dirty(&mut self, position: Point3<i32>) {
        if let Some(chunk) = self.chunks.get_mut(&position) {
            chunk.dirty = true;
        }
    }

    /// Marks every loaded face neighbour of a chunk dirty.
    pub fn mark_neighbor_chunks_dirty(&mut self, position: Point3<i32>) {
        for side in BlockSide::all() {
            self.mark_chunk_dirty(position + side.normal());
        }
    }

    /// Whether a chunk coordinate lies in the streaming box around `center`.
    pub fn is_in_stream_range(&self, center: Point3<i32>, position: Point3<i32>) -> bool {
        let radius = self.config.radius_chunks;
        (position.x - center.x).abs() <= radius
            && (position.z - center.z).abs() <= radius
            && (self.config.min_chunk_y..=self.config.max_chunk_y).contains(&position.y)
    }

    /// Loads every chunk within the streaming box around a position and evicts the rest.
    ///
    /// The box is centred on the chunk containing `position`, spans `radius_chunks` on
    /// each side along X and Z and covers the configured chunk layers along Y.
    ///
    /// # Returns
    ///
    /// How many chunks were created and evicted.
    pub fn stream_chunks(&mut self, position: Point3<f32>) -> StreamSummary {
        let cell = world_block_from_position(position);
        let center = world_to_chunk_coord(cell.x, cell.y, cell.z);
        let radius = self.config.radius_chunks;
        let mut summary = StreamSummary::default();

        for chunk_y in self.config.min_chunk_y..=self.config.max_chunk_y {
            for dz in -radius..=radius {
                for dx in -radius..=radius {
                    let chunk_position = Point3::new(center.x + dx, chunk_y, center.z + dz);
                    if !self.chunks.contains_key(&chunk_position) {
                        summary.created += 1;
                    }
                    self.get_or_create_chunk(chunk_position);
                }
            }
        }

        let out_of_range: Vec<Point3<i32>> = self
            .chunks
            .keys()
            .copied()
            .filter(|p| !self.is_in_stream_range(center, *p))
            .collect();
        for chunk_position in out_of_range {
            if self.remove_chunk(chunk_position).is_some() {
                summary.removed += 1;
            }
        }

        if summary.created > 0 || summary.removed > 0 {
            debug!(
                "Streamed around chunk {:?}: {} created, {} removed, {} loaded",
                center,
                summary.created,
                summary.removed,
                self.chunks.len()
            );
        }
        summary
    }

    /// Retrieves a reference to the chunk at the specified chunk coordinates.
    pub fn get_chunk_at(&self, position: Point3<i32>) -> Option<&Chunk> {
        self.chunks.get(&position)
    }

    /// Retrieves a mutable reference to the chunk at the specified chunk coordinates.
    pub fn get_chunk_at_mut(&mut self, position: Point3<i32>) -> Option<&mut Chunk> {
        self.chunks.get_mut(&position)
    }

    /// Whether a chunk is currently loaded.
    pub fn is_chunk_loaded(&self, position: Point3<i32>) -> bool {
        self.chunks.contains_key(&position)
    }

    /// Iterates over all loaded chunks in no particular order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// Coordinates of all loaded chunks in no particular order.
    pub fn chunk_positions(&self) -> impl Iterator<Item = Point3<i32>> + '_ {
        self.chunks.keys().copied()
    }

    /// Coordinates of all loaded chunks whose geometry is stale.
    pub fn dirty_chunk_positions(&self) -> Vec<Point3<i32>> {
        self.chunks
            .values()
            .filter(|chunk| chunk.dirty)
            .map(|chunk| chunk.position)
            .collect()
    }

    /// Number of loaded chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }
}

impl VoxelQuery for World {
    fn block_at(&self, cell: Point3<i32>) -> BlockType {
        self.get_block(cell.x, cell.y, cell.z)
    }
}
