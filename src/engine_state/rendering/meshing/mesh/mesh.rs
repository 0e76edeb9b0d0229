//! Mesh data structures and operations for voxel rendering.
//!
//! This module turns faces produced by the meshers into a flat triangle list.
//! Every face becomes two triangles (six vertices) with positions in world
//! space, a per-direction shade, tile-local UVs and an atlas tile index.

use cgmath::{Point3, Vector3};

use crate::engine_state::rendering::Vertex;
use crate::engine_state::voxels::block::{block_side::BlockSide, tile_index};

use super::face::Face;

/// Vertices emitted per face: two triangles, not indexed.
pub const VERTICES_PER_FACE: usize = 6;

/// Scale of the selection cube relative to one block.
pub const SELECTION_SCALE: f32 = 1.03;

/// RGB colour of the selection cube before shading.
pub const SELECTION_COLOR: [f32; 3] = [1.0, 1.0, 0.2];

/// Corner order of the two triangles of a face.
const FACE_TRIANGLE_ORDER: [usize; VERTICES_PER_FACE] = [0, 1, 2, 0, 2, 3];

/// Unit UVs of the four face corners, in corner winding order.
const CORNER_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// The geometry of one chunk (or the selection cube).
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Mesh {
    /// Triangle list, three vertices per triangle.
    pub vertices: Vec<Vertex>,
}

impl Mesh {
    /// Builds the triangle list for a set of faces.
    ///
    /// # Arguments
    /// * `chunk_origin` - World block coordinate of the chunk the faces belong to
    /// * `faces` - Faces in chunk-local coordinates
    /// * `tint_faces` - Colour faces with the block's base colour instead of white
    ///
    /// # Returns
    /// A `Mesh` with six vertices per face.
    pub fn from_faces(chunk_origin: Point3<i32>, faces: &[Face], tint_faces: bool) -> Self {
        let mut mesh = Mesh {
            vertices: Vec::with_capacity(faces.len() * VERTICES_PER_FACE),
        };
        for face in faces {
            mesh.add_face(chunk_origin, face, tint_faces);
        }
        mesh
    }

    /// Appends the two triangles of one face.
    pub fn add_face(&mut self, chunk_origin: Point3<i32>, face: &Face, tint_faces: bool) {
        let corners = Self::generate_face_vertices(chunk_origin, face, tint_faces);
        self.vertices
            .extend(FACE_TRIANGLE_ORDER.iter().map(|&corner| corners[corner]));
    }

    /// Generates the four corner vertices of a face in winding order.
    ///
    /// Corners are stretched by the face's extent on each in-plane axis, and the
    /// UVs are stretched by the same amounts so the tile repeats per block.
    pub fn generate_face_vertices(
        chunk_origin: Point3<i32>,
        face: &Face,
        tint_faces: bool,
    ) -> [Vertex; 4] {
        let side = face.block_side;
        let corners = side.corners();
        let extent = |axis: usize| face.extent_along(axis) as f32;
        let u_scale = extent(edge_axis(&corners[0], &corners[1]));
        let v_scale = extent(edge_axis(&corners[1], &corners[2]));

        let base = if tint_faces {
            face.block_type.base_color(side)
        } else {
            [1.0; 4]
        };
        let color = shaded(base, side);
        let normal = side_normal(side);
        let texture_index = tile_index(face.block_type, side);
        let origin = Point3::new(
            (chunk_origin.x + face.origin.x) as f32,
            (chunk_origin.y + face.origin.y) as f32,
            (chunk_origin.z + face.origin.z) as f32,
        );

        std::array::from_fn(|i| {
            let mut position = origin;
            for axis in 0..3 {
                position[axis] += corners[i][axis] * extent(axis);
            }
            let uv = CORNER_UVS[i];
            Vertex::new(
                position,
                normal,
                color,
                [uv[0] * u_scale, uv[1] * v_scale],
                texture_index,
            )
        })
    }

    /// Builds the highlight cube drawn around the selected block.
    ///
    /// The cube is `SELECTION_SCALE` times a block, centred on the block, coloured
    /// `SELECTION_COLOR` and shaded per face.
    pub fn selection_box(block: Point3<i32>) -> Self {
        let center = Point3::new(
            block.x as f32 + 0.5,
            block.y as f32 + 0.5,
            block.z as f32 + 0.5,
        );
        let mut mesh = Mesh {
            vertices: Vec::with_capacity(6 * VERTICES_PER_FACE),
        };
        for side in BlockSide::all() {
            let base = [SELECTION_COLOR[0], SELECTION_COLOR[1], SELECTION_COLOR[2], 1.0];
            let color = shaded(base, side);
            let corners = side.corners();
            let vertices: [Vertex; 4] = std::array::from_fn(|i| {
                let mut position = center;
                for axis in 0..3 {
                    position[axis] += (corners[i][axis] - 0.5) * SELECTION_SCALE;
                }
                Vertex::new(position, side_normal(side), color, CORNER_UVS[i], 0)
            });
            mesh.vertices
                .extend(FACE_TRIANGLE_ORDER.iter().map(|&corner| vertices[corner]));
        }
        mesh
    }

    /// Number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces (quads) in the mesh.
    pub fn face_count(&self) -> usize {
        self.vertices.len() / VERTICES_PER_FACE
    }

    /// Whether the mesh has no geometry and needs no draw call.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The vertex list as raw bytes, ready for a vertex buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Axis along which two corners of a face differ.
fn edge_axis(a: &[f32; 3], b: &[f32; 3]) -> usize {
    (0..3).find(|&axis| a[axis] != b[axis]).unwrap_or(0)
}

fn shaded(base: [f32; 4], side: BlockSide) -> [f32; 4] {
    let shade = side.shade();
    [base[0] * shade, base[1] * shade, base[2] * shade, base[3]]
}

fn side_normal(side: BlockSide) -> Vector3<f32> {
    let normal = side.normal();
    Vector3::new(normal.x as f32, normal.y as f32, normal.z as f32)
}
