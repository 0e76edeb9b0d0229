//! # Voxel Engine Core
//!
//! This module contains the core voxel engine functionality, providing the foundation
//! for representing, querying, and editing a voxel-based world.
//!
//! ## Architecture
//!
//! The voxel system is organized into several key components:
//!
//! * **Block**: Defines voxel types, faces, and the texture tile table
//! * **Coords**: Conversions between world, chunk, and chunk-local coordinates
//! * **Chunk**: Fixed-size 3D arrays of blocks with a dirty flag and a built mesh
//! * **World**: Coordinates chunks, streams them around the player, and tracks dirtiness
//! * **Raycast**: Walks rays through the grid to find the block under the crosshair
//!
//! ## Data Flow
//!
//! 1. World receives requests for block access or modification
//! 2. World delegates to the owning chunk, ignoring unloaded space
//! 3. Changes mark the chunk (and boundary neighbours) dirty
//! 4. The mesh manager rebuilds dirty chunks before the next frame

pub mod aabb;
pub mod block;
pub mod chunk;
pub mod coords;
pub mod raycast;
pub mod world;
