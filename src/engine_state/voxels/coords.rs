//! # Coordinate Module
//!
//! Pure conversions between the three coordinate spaces of the voxel world:
//!
//! * **World block space**: integer cell coordinates of single blocks
//! * **Chunk space**: integer coordinates of whole chunks (`block / CHUNK_DIMENSION`, floored)
//! * **Local space**: the position of a block inside its chunk, always in `[0, CHUNK_DIMENSION)`
//!
//! All divisions floor towards negative infinity so that block `-1` lives in chunk
//! `-1` at local `15`, never in chunk `0` at local `-1`.
//!
//! The module also provides the spatial hash used for chunk-keyed maps.

use std::collections::HashMap;
use std::hash::{BuildHasherDefault, Hasher};

use cgmath::{Point3, Vector3};

use super::chunk::CHUNK_DIMENSION;

/// Floor division: the largest integer `q` with `q * divisor <= value`.
///
/// `divisor` must be positive.
#[inline]
pub fn floor_div(value: i32, divisor: i32) -> i32 {
    value.div_euclid(divisor)
}

/// Euclidean modulo, always in `[0, divisor)` for a positive `divisor`.
///
/// Together with [`floor_div`]: `floor_div(v, d) * d + modulo(v, d) == v`.
#[inline]
pub fn modulo(value: i32, divisor: i32) -> i32 {
    value.rem_euclid(divisor)
}

/// Returns the coordinate of the chunk containing the given world block.
pub fn world_to_chunk_coord(x: i32, y: i32, z: i32) -> Point3<i32> {
    Point3::new(
        floor_div(x, CHUNK_DIMENSION),
        floor_div(y, CHUNK_DIMENSION),
        floor_div(z, CHUNK_DIMENSION),
    )
}

/// Returns the position of the given world block inside its chunk.
pub fn world_to_local_coord(x: i32, y: i32, z: i32) -> Point3<i32> {
    Point3::new(
        modulo(x, CHUNK_DIMENSION),
        modulo(y, CHUNK_DIMENSION),
        modulo(z, CHUNK_DIMENSION),
    )
}

/// Returns the world block cell that contains a continuous position.
pub fn world_block_from_position(position: Point3<f32>) -> Point3<i32> {
    Point3::new(
        position.x.floor() as i32,
        position.y.floor() as i32,
        position.z.floor() as i32,
    )
}

/// Returns the world block coordinate of a chunk's `(0, 0, 0)` corner.
pub fn chunk_origin(chunk_position: Point3<i32>) -> Point3<i32> {
    Point3::new(
        chunk_position.x * CHUNK_DIMENSION,
        chunk_position.y * CHUNK_DIMENSION,
        chunk_position.z * CHUNK_DIMENSION,
    )
}

/// Inverse of the chunk/local split: rebuilds the world block coordinate.
pub fn local_to_world_coord(chunk_position: Point3<i32>, local: Point3<i32>) -> Point3<i32> {
    chunk_origin(chunk_position) + Vector3::new(local.x, local.y, local.z)
}

/// Per-axis odd multipliers mixed into the spatial hash (X, Y, Z).
const AXIS_MULTIPLIERS: [u64; 3] = [73_856_093, 19_349_663, 83_492_791];

/// A `Hasher` for integer 3D coordinates.
///
/// Each axis is multiplied by a large odd constant and the results are XORed.
/// `Point3<i32>` hashes its components in X, Y, Z order through `write_i32`,
/// which is what the axis counter relies on.
#[derive(Default, Clone, Copy, Debug)]
pub struct SpatialHasher {
    hash: u64,
    axis: usize,
}

impl Hasher for SpatialHasher {
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        for chunk in bytes.chunks(4) {
            let mut word = [0u8; 4];
            word[..chunk.len()].copy_from_slice(chunk);
            self.write_i32(i32::from_le_bytes(word));
        }
    }

    fn write_i32(&mut self, value: i32) {
        let multiplier = AXIS_MULTIPLIERS[self.axis % AXIS_MULTIPLIERS.len()];
        self.hash ^= (value as i64 as u64).wrapping_mul(multiplier);
        self.axis += 1;
    }
}

/// A hash map keyed by chunk (or block) coordinate using [`SpatialHasher`].
pub type ChunkMap<V> = HashMap<Point3<i32>, V, BuildHasherDefault<SpatialHasher>>;
