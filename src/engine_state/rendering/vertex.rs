//! Vertex data structures and layouts for voxel rendering.
//!
//! This module defines the vertex format produced by the mesher. The layout is
//! plain old data so a renderer can upload a mesh's vertex list as raw bytes.

use cgmath::{Point3, Vector3};

/// A vertex of a chunk or selection mesh.
///
/// Texture coordinates are tile-local: they run from 0 to the quad's extent in
/// blocks, so a renderer samples the tile at `fract(tex_coords)` inside the atlas
/// rectangle of `texture_index` and the texture repeats once per block.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes)
/// - Normal: [f32; 3] (12 bytes)
/// - Color: [f32; 4] (16 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
/// - Texture Index: u32 (4 bytes)
///
/// Total size: 52 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in world space
    pub position: [f32; 3],
    /// Outward face normal
    pub normal: [f32; 3],
    /// RGBA colour, already multiplied by the face shade
    pub color: [f32; 4],
    /// Tile-local UV texture coordinates
    pub tex_coords: [f32; 2],
    /// Index of the atlas tile
    pub texture_index: u32,
}

impl Vertex {
    /// Creates a new vertex with the given parameters.
    ///
    /// # Arguments
    /// * `position` - The 3D position of the vertex in world space
    /// * `normal` - The outward normal of the face the vertex belongs to
    /// * `color` - RGBA colour
    /// * `tex_coords` - Tile-local texture coordinates
    /// * `texture_index` - Index of the atlas tile
    ///
    /// # Returns
    /// A new `Vertex` instance
    pub fn new(
        position: Point3<f32>,
        normal: Vector3<f32>,
        color: [f32; 4],
        tex_coords: [f32; 2],
        texture_index: usize,
    ) -> Self {
        Vertex {
            position: position.into(),
            normal: normal.into(),
            color,
            tex_coords,
            texture_index: texture_index as u32,
        }
    }
}
