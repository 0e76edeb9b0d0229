//! Rendering data for the voxel engine.
//!
//! This module turns chunk voxels into vertex lists a renderer can upload as-is.
//! It owns no GPU state: meshes are rebuilt on the CPU and handed out as
//! [`Vertex`] slices keyed by chunk coordinate.

pub use meshing::MeshManager;

pub mod meshing;
mod vertex;

// Re-export commonly used types
pub use vertex::Vertex;
