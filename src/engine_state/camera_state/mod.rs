//! # Camera State Management
//!
//! This module handles all camera-related functionality including:
//! - Camera position and orientation tracking
//! - Mouse look and free flight
//! - Chunk-based position tracking for world streaming
//!
//! ## Core Components
//! - `Camera`: Represents the camera's position and orientation in 3D space
//! - `CameraController`: Turns player actions into camera rotation and flight

use cgmath::Point3;

use super::{
    config::CameraConfig,
    voxels::coords::{world_block_from_position, world_to_chunk_coord},
    PlayerAction,
};

pub mod camera;

/// Manages the camera and its controller, and tracks which chunk it occupies.
#[derive(Debug, Clone)]
pub struct CameraState {
    /// The current camera position and orientation
    pub camera: camera::Camera,
    /// Handles player input and camera movement
    pub camera_controller: camera::CameraController,
    /// Chunk occupied at the last call to [`CameraState::update`]
    chunk_position: Option<Point3<i32>>,
}

/// Changes to the camera that affect world interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraUpdates {
    /// The chunk the camera moved into
    pub new_chunk_position: Point3<i32>,
}

impl CameraState {
    /// Creates a camera at `position` facing `+Z`.
    ///
    /// # Arguments
    /// * `config` - Look settings
    /// * `position` - Initial eye position
    /// * `fly_speed` - Free flight speed in units per second
    pub fn new(config: &CameraConfig, position: Point3<f32>, fly_speed: f32) -> Self {
        CameraState {
            camera: camera::Camera::new(position, cgmath::Rad(0.0), cgmath::Rad(0.0)),
            camera_controller: camera::CameraController::new(config, fly_speed),
            chunk_position: None,
        }
    }

    /// Applies the look delta of `actions` to the camera.
    pub fn intake_actions(&mut self, actions: &PlayerAction) {
        let (delta_x, delta_y) = actions.look_delta;
        self.camera_controller
            .apply_look(&mut self.camera, delta_x, delta_y);
    }

    /// Moves the camera freely according to `actions`.
    pub fn fly(&mut self, actions: &PlayerAction, dt: f32) {
        self.camera_controller.fly(&mut self.camera, actions, dt);
    }

    /// The chunk containing the camera.
    pub fn chunk_position(&self) -> Point3<i32> {
        let block = world_block_from_position(self.camera.position);
        world_to_chunk_coord(block.x, block.y, block.z)
    }

    /// Checks whether the camera entered a different chunk since the last call.
    ///
    /// # Returns
    /// - `Some(CameraUpdates)` on the first call and whenever the chunk changed
    /// - `None` otherwise
    pub fn update(&mut self) -> Option<CameraUpdates> {
        let new_chunk_position = self.chunk_position();
        if self.chunk_position == Some(new_chunk_position) {
            return None;
        }
        self.chunk_position = Some(new_chunk_position);
        Some(CameraUpdates { new_chunk_position })
    }
}
