//! Mesh generation and management for voxel rendering.
//!
//! This module keeps chunk geometry in step with chunk data. Chunks flagged dirty by
//! the world are remeshed in one pass per frame, after streaming and before raycasting,
//! and the pass reports which chunk meshes changed and which chunks disappeared so a
//! renderer can update or free the GPU buffers it keys by chunk coordinate.
//!
//! # Architecture
//! - `MeshManager`: Rebuilds dirty chunks and tracks which chunks have been meshed
//! - `MeshingStrategy`: Chooses between per-face and greedy meshing
//! - `mesh/`: Contains the core mesh generation algorithms

use std::collections::HashSet;
use std::hash::BuildHasherDefault;

use cgmath::Point3;
use log::debug;
use serde::{Deserialize, Serialize};
use web_time::Instant;

/// Core mesh generation algorithms and data structures.
pub mod mesh;

pub use mesh::*;

use crate::engine_state::{
    config::MeshingConfig,
    voxels::{chunk::Chunk, coords::SpatialHasher, world::World},
};

/// How chunk faces are turned into quads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeshingStrategy {
    /// One quad per visible block face.
    PerFace,
    /// Visible faces merged into maximal rectangles.
    #[default]
    Greedy,
}

impl MeshingStrategy {
    /// Generates the faces of one chunk with this strategy.
    pub fn build_faces(self, world: &World, chunk: &Chunk) -> Vec<Face> {
        match self {
            MeshingStrategy::PerFace => per_face(world, chunk),
            MeshingStrategy::Greedy => greedy(world, chunk),
        }
    }
}

/// Chunk meshes changed by one rebuild pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MeshUpdates {
    /// Chunks whose mesh was rebuilt. Their mesh may now be empty.
    pub rebuilt: Vec<Point3<i32>>,
    /// Previously meshed chunks that are no longer loaded.
    pub removed: Vec<Point3<i32>>,
}

impl MeshUpdates {
    /// Whether the pass changed nothing.
    pub fn is_empty(&self) -> bool {
        self.rebuilt.is_empty() && self.removed.is_empty()
    }
}

/// Central manager for voxel mesh generation.
///
/// The `MeshManager` is responsible for:
/// - Converting dirty chunk data into mesh geometry
/// - Clearing the dirty flag of every rebuilt chunk
/// - Reporting meshes that appeared, changed or went away since the last pass
#[derive(Debug)]
pub struct MeshManager {
    /// Meshing algorithm used for chunk rebuilds.
    strategy: MeshingStrategy,
    /// Whether faces carry their block's base colour.
    tint_faces: bool,
    /// Chunks meshed by an earlier pass and not yet reported as removed.
    meshed_chunks: HashSet<Point3<i32>, BuildHasherDefault<SpatialHasher>>,
}

impl MeshManager {
    /// Creates a mesh manager with the given meshing settings.
    pub fn new(config: &MeshingConfig) -> Self {
        MeshManager {
            strategy: config.strategy,
            tint_faces: config.tint_faces,
            meshed_chunks: HashSet::default(),
        }
    }

    /// The meshing algorithm in use.
    pub fn strategy(&self) -> MeshingStrategy {
        self.strategy
    }

    /// Builds the mesh of one chunk without touching its dirty flag.
    pub fn build_chunk_mesh(&self, world: &World, chunk: &Chunk) -> Mesh {
        let faces = self.strategy.build_faces(world, chunk);
        Mesh::from_faces(chunk.origin(), &faces, self.tint_faces)
    }

    /// Rebuilds the mesh of every dirty chunk and clears its dirty flag.
    ///
    /// Chunks with an empty mesh are rebuilt and cleaned like any other; they simply
    /// produce no draw call.
    ///
    /// # Returns
    /// The chunks rebuilt by this pass and the meshed chunks evicted since the last one.
    pub fn rebuild_dirty_meshes(&mut self, world: &mut World) -> MeshUpdates {
        let start = Instant::now();

        let built: Vec<(Point3<i32>, Mesh)> = world
            .dirty_chunk_positions()
            .into_iter()
            .filter_map(|position| {
                world
                    .get_chunk_at(position)
                    .map(|chunk| (position, self.build_chunk_mesh(world, chunk)))
            })
            .collect();

        let mut updates = MeshUpdates::default();
        let mut vertex_count = 0;
        for (position, mesh) in built {
            if let Some(chunk) = world.get_chunk_at_mut(position) {
                vertex_count += mesh.vertex_count();
                chunk.mesh = mesh;
                chunk.dirty = false;
                self.meshed_chunks.insert(position);
                updates.rebuilt.push(position);
            }
        }

        self.meshed_chunks.retain(|position| {
            let loaded = world.is_chunk_loaded(*position);
            if !loaded {
                updates.removed.push(*position);
            }
            loaded
        });

        if !updates.is_empty() {
            debug!(
                "Rebuilt {} chunk meshes ({} vertices), dropped {} in {:?}",
                updates.rebuilt.len(),
                vertex_count,
                updates.removed.len(),
                start.elapsed()
            );
        }
        updates
    }

    /// Loaded chunks that have geometry to draw.
    pub fn drawable_chunks<'w>(&self, world: &'w World) -> impl Iterator<Item = &'w Chunk> {
        world.chunks().filter(|chunk| !chunk.mesh.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::config::WorldConfig;
    use crate::engine_state::voxels::block::block_type::BlockType;

    fn manager(strategy: MeshingStrategy) -> MeshManager {
        MeshManager::new(&MeshingConfig {
            strategy,
            tint_faces: false,
        })
    }

    #[test]
    fn rebuild_clears_dirty_and_reports_chunks() {
        let mut world = World::new(WorldConfig::default());
        world.get_or_create_chunk(Point3::new(0, 0, 0));
        world.get_or_create_chunk(Point3::new(1, 0, 0));
        let mut meshes = manager(MeshingStrategy::Greedy);

        let updates = meshes.rebuild_dirty_meshes(&mut world);
        assert_eq!(updates.rebuilt.len(), 2);
        assert!(updates.removed.is_empty());
        assert!(world.dirty_chunk_positions().is_empty());
        assert!(world.chunks().all(|c| c.vertex_count() > 0));

        assert!(meshes.rebuild_dirty_meshes(&mut world).is_empty());
    }

    #[test]
    fn evicted_chunks_are_reported_once() {
        let mut world = World::new(WorldConfig::default());
        world.get_or_create_chunk(Point3::new(0, 0, 0));
        world.get_or_create_chunk(Point3::new(1, 0, 0));
        let mut meshes = manager(MeshingStrategy::PerFace);
        meshes.rebuild_dirty_meshes(&mut world);

        world.remove_chunk(Point3::new(1, 0, 0));
        let updates = meshes.rebuild_dirty_meshes(&mut world);
        assert_eq!(updates.removed, vec![Point3::new(1, 0, 0)]);
        assert_eq!(updates.rebuilt, vec![Point3::new(0, 0, 0)]);

        assert!(meshes.rebuild_dirty_meshes(&mut world).is_empty());
    }

    #[test]
    fn empty_chunks_clear_dirty_without_geometry() {
        let mut world = World::new(WorldConfig {
            ground_height: 0,
            ..WorldConfig::default()
        });
        world.get_or_create_chunk(Point3::new(0, 0, 0));
        let mut meshes = manager(MeshingStrategy::Greedy);

        let updates = meshes.rebuild_dirty_meshes(&mut world);
        assert_eq!(updates.rebuilt.len(), 1);
        assert!(world.dirty_chunk_positions().is_empty());
        assert_eq!(meshes.drawable_chunks(&world).count(), 0);
    }

    #[test]
    fn greedy_uses_fewer_vertices_on_flat_ground() {
        let mut world = World::new(WorldConfig::default());
        world.get_or_create_chunk(Point3::new(0, 0, 0));
        let chunk = world.get_chunk_at(Point3::new(0, 0, 0)).unwrap();

        let naive = manager(MeshingStrategy::PerFace).build_chunk_mesh(&world, chunk);
        let merged = manager(MeshingStrategy::Greedy).build_chunk_mesh(&world, chunk);
        assert!(merged.vertex_count() < naive.vertex_count());
    }

    #[test]
    fn edit_triggers_a_single_rebuild() {
        let mut world = World::new(WorldConfig::default());
        world.get_or_create_chunk(Point3::new(0, 0, 0));
        let mut meshes = manager(MeshingStrategy::Greedy);
        meshes.rebuild_dirty_meshes(&mut world);

        assert!(world.set_block(8, 1, 8, BlockType::AIR));
        let updates = meshes.rebuild_dirty_meshes(&mut world);
        assert_eq!(updates.rebuilt, vec![Point3::new(0, 0, 0)]);
    }

    #[test]
    fn strategy_names_deserialize() {
        let strategy: MeshingStrategy = serde_json::from_str("\"per_face\"").unwrap();
        assert_eq!(strategy, MeshingStrategy::PerFace);
    }
}
