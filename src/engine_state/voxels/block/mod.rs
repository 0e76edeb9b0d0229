//! # Block Module
//!
//! This module provides the core block-related functionality for the voxel engine.
//! It includes block type definitions, block face handling, and the texture-atlas
//! tile table that maps a (block, face) pair to an atlas tile.

use block_side::BlockSide;
use block_type::{BlockType, BLOCK_TYPE_COUNT};

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block types in memory.
pub type BlockTypeSize = u8;

/// Number of tiles along the X axis of the texture atlas.
pub const ATLAS_TILES_X: usize = 4;
/// Number of tiles along the Y axis of the texture atlas.
pub const ATLAS_TILES_Y: usize = 1;

/// Atlas tile for the top of a grass block.
pub const TILE_GRASS_TOP: usize = 0;
/// Atlas tile for the sides of a grass block.
pub const TILE_GRASS_SIDE: usize = 1;
/// Atlas tile for dirt (also the bottom of grass).
pub const TILE_DIRT: usize = 2;
/// Atlas tile for stone.
pub const TILE_STONE: usize = 3;

/// Maps each block type to its corresponding texture indices for each face.
///
/// The outer array is indexed by `BlockType` as a `usize`.
/// The inner array contains 6 texture indices, one for each face in the order:
/// [Front, Back, Bottom, Top, Left, Right]
pub static BLOCK_TYPE_TO_TEXTURE_INDICES: [[usize; 6]; BLOCK_TYPE_COUNT] = [
    [TILE_DIRT; 6], // AIR (never meshed, falls back to dirt)
    [
        TILE_GRASS_SIDE,
        TILE_GRASS_SIDE,
        TILE_DIRT,
        TILE_GRASS_TOP,
        TILE_GRASS_SIDE,
        TILE_GRASS_SIDE,
    ], // GRASS
    [TILE_DIRT; 6],  // DIRT
    [TILE_STONE; 6], // STONE
];

/// Gets the atlas tile used for one face of a block.
pub fn tile_index(block_type: BlockType, side: BlockSide) -> usize {
    BLOCK_TYPE_TO_TEXTURE_INDICES[block_type as usize][side as usize]
}

/// Returns the `(u0, v0, u1, v1)` rectangle a tile occupies in the atlas.
///
/// Mesh vertices carry tile-local UVs that may exceed 1.0 on merged quads; a
/// renderer maps `fract(uv)` into this rectangle.
pub fn atlas_uv_rect(tile: usize) -> [f32; 4] {
    let tile_w = 1.0 / ATLAS_TILES_X as f32;
    let tile_h = 1.0 / ATLAS_TILES_Y as f32;
    let tile_x = (tile % ATLAS_TILES_X) as f32;
    let tile_y = (tile / ATLAS_TILES_X) as f32;
    let u0 = tile_x * tile_w;
    let v0 = tile_y * tile_h;
    [u0, v0, u0 + tile_w, v0 + tile_h]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grass_uses_three_tiles() {
        assert_eq!(tile_index(BlockType::GRASS, BlockSide::TOP), TILE_GRASS_TOP);
        assert_eq!(tile_index(BlockType::GRASS, BlockSide::BOTTOM), TILE_DIRT);
        for side in [
            BlockSide::FRONT,
            BlockSide::BACK,
            BlockSide::LEFT,
            BlockSide::RIGHT,
        ] {
            assert_eq!(tile_index(BlockType::GRASS, side), TILE_GRASS_SIDE);
        }
    }

    #[test]
    fn uniform_blocks_use_one_tile() {
        for side in BlockSide::all() {
            assert_eq!(tile_index(BlockType::DIRT, side), TILE_DIRT);
            assert_eq!(tile_index(BlockType::STONE, side), TILE_STONE);
        }
    }

    #[test]
    fn atlas_rect_spans_one_quarter() {
        assert_eq!(atlas_uv_rect(TILE_STONE), [0.75, 0.0, 1.0, 1.0]);
        assert_eq!(atlas_uv_rect(TILE_GRASS_TOP), [0.0, 0.0, 0.25, 1.0]);
    }
}
