//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world.
//! It provides functionality for block type identification, conversion, and the
//! per-block colours used when faces are tinted instead of textured.

use num_derive::FromPrimitive;
use serde::{Deserialize, Serialize};

use super::{block_side::BlockSide, BlockTypeSize};

/// Enumerates all possible block types in the voxel world.
///
/// `AIR` is the universal "empty" sentinel: it is never solid and never produces
/// geometry. The discriminants are stable and match the compact `BlockTypeSize`
/// encoding, which is what the `FromPrimitive` derive converts from.
#[repr(u8)]
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, FromPrimitive, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    /// An air block, which is non-solid and transparent.
    #[default]
    AIR = 0,

    /// A grass block with different textures on top and sides.
    /// The top is green, sides have grass on dirt, and bottom is plain dirt.
    GRASS = 1,

    /// A basic dirt block, used as a common building material.
    DIRT = 2,

    /// A plain stone block.
    STONE = 3,
}

/// Number of block types, used to size the lookup tables indexed by block type.
pub const BLOCK_TYPE_COUNT: usize = 4;

impl BlockType {
    /// Converts a `BlockTypeSize` to a `BlockType`.
    ///
    /// Unknown encodings decode as `AIR` so that corrupt data never turns into
    /// phantom solid geometry.
    pub fn get_block_type_from_int(btype: BlockTypeSize) -> Self {
        num::FromPrimitive::from_u8(btype).unwrap_or(BlockType::AIR)
    }

    /// Returns the compact integer encoding of this block type.
    pub fn as_int(self) -> BlockTypeSize {
        self as BlockTypeSize
    }

    /// Whether this block occupies its cell for collision, raycasting and face culling.
    #[inline]
    pub fn is_solid(self) -> bool {
        self != BlockType::AIR
    }

    /// The untextured base colour (RGBA, 0.0-1.0) of one face of this block.
    ///
    /// Grass is green on top, a darker green on the sides and dirt-brown below.
    pub fn base_color(self, side: BlockSide) -> [f32; 4] {
        let rgb: [u8; 3] = match self {
            BlockType::GRASS => match side {
                BlockSide::TOP => [90, 170, 90],
                BlockSide::BOTTOM => [110, 85, 60],
                _ => [80, 150, 80],
            },
            BlockType::DIRT => [120, 90, 60],
            BlockType::STONE => [130, 130, 130],
            BlockType::AIR => return [0.0, 0.0, 0.0, 0.0],
        };
        [
            rgb[0] as f32 / 255.0,
            rgb[1] as f32 / 255.0,
            rgb[2] as f32 / 255.0,
            1.0,
        ]
    }
}
