//! # Camera Implementation
//!
//! This module contains the core camera implementation including:
//! - Camera representation and view transformation
//! - Camera controller for mouse look and free flight
//!
//! ## Key Components
//! - `Camera`: Represents the camera's position and orientation in 3D space
//! - `CameraController`: Applies look deltas and fly movement to a camera
//!
//! The world is left-handed: `+X` is right, `+Y` is up and `+Z` is forward at
//! zero yaw.

use cgmath::*;

use crate::engine_state::{config::CameraConfig, PlayerAction};

/// Squared length below which a direction is treated as zero.
const MIN_DIRECTION_LENGTH2: f32 = 0.0001;

/// Represents a first-person camera in 3D space.
///
/// # Fields
/// - `position`: The eye position in world space
/// - `yaw`: Horizontal rotation (around Y axis) in radians, zero facing `+Z`
/// - `pitch`: Vertical rotation in radians, positive looking up
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// The camera's position in world space
    pub position: Point3<f32>,
    /// Horizontal rotation (around Y axis) in radians
    pub yaw: Rad<f32>,
    /// Vertical rotation in radians
    pub pitch: Rad<f32>,
}

impl Camera {
    /// Creates a new camera with the specified position and orientation.
    ///
    /// # Arguments
    /// * `position` - Initial position of the camera in world space
    /// * `yaw` - Initial yaw (horizontal rotation around Y axis)
    /// * `pitch` - Initial pitch (vertical rotation)
    ///
    /// # Example
    /// ```rust
    /// use cgmath::{Deg, Point3};
    /// use voxel_world::Camera;
    ///
    /// let camera = Camera::new(Point3::new(0.0, 1.6, 0.0), Deg(0.0), Deg(0.0));
    /// assert!((camera.forward().z - 1.0).abs() < 1e-6);
    /// ```
    pub fn new<V: Into<Point3<f32>>, Y: Into<Rad<f32>>, P: Into<Rad<f32>>>(
        position: V,
        yaw: Y,
        pitch: P,
    ) -> Self {
        Self {
            position: position.into(),
            yaw: yaw.into(),
            pitch: pitch.into(),
        }
    }

    /// Unit vector the camera looks along.
    pub fn forward(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.0.sin_cos();
        Vector3::new(pitch_cos * yaw_sin, pitch_sin, pitch_cos * yaw_cos).normalize()
    }

    /// The forward direction projected onto the ground plane.
    ///
    /// Falls back to `+Z` when looking straight up or down.
    pub fn flat_forward(&self) -> Vector3<f32> {
        let forward = self.forward();
        let flat = Vector3::new(forward.x, 0.0, forward.z);
        if flat.magnitude2() > MIN_DIRECTION_LENGTH2 {
            flat.normalize()
        } else {
            Vector3::unit_z()
        }
    }

    /// Horizontal unit vector to the camera's right.
    pub fn right(&self) -> Vector3<f32> {
        Vector3::unit_y().cross(self.flat_forward()).normalize()
    }

    /// Calculates the view matrix for this camera.
    ///
    /// # Returns
    /// A 4x4 left-handed view matrix that can be used for rendering
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_to_lh(self.position, self.forward(), Vector3::unit_y())
    }
}

/// Handles camera rotation and free flight based on player actions.
#[derive(Debug, Clone)]
pub struct CameraController {
    sensitivity: f32,
    max_pitch: Rad<f32>,
    speed: f32,
    sprint_multiplier: f32,
}

impl CameraController {
    /// Creates a new camera controller.
    ///
    /// # Arguments
    /// * `config` - Look sensitivity, pitch limit and fly sprint factor
    /// * `speed` - Base fly speed in units per second
    pub fn new(config: &CameraConfig, speed: f32) -> Self {
        Self {
            sensitivity: config.mouse_sensitivity,
            max_pitch: Rad(config.max_pitch),
            speed,
            sprint_multiplier: config.fly_sprint_multiplier,
        }
    }

    /// Rotates the camera by a mouse delta in pixels.
    ///
    /// Moving the mouse right turns right and moving it down looks down. Pitch is
    /// clamped to the configured limit.
    pub fn apply_look(&self, camera: &mut Camera, delta_x: f32, delta_y: f32) {
        if delta_x == 0.0 && delta_y == 0.0 {
            return;
        }
        camera.yaw += Rad(delta_x * self.sensitivity);
        camera.pitch -= Rad(delta_y * self.sensitivity);

        if camera.pitch < -self.max_pitch {
            camera.pitch = -self.max_pitch;
        } else if camera.pitch > self.max_pitch {
            camera.pitch = self.max_pitch;
        }
    }

    /// Moves the camera freely along its forward, right and world-up axes.
    ///
    /// # Arguments
    /// * `camera` - The camera to move
    /// * `actions` - Movement axes and sprint state
    /// * `dt` - Seconds elapsed since the last update
    pub fn fly(&self, camera: &mut Camera, actions: &PlayerAction, dt: f32) {
        let mut direction = camera.forward() * actions.move_forward
            + camera.right() * actions.move_right
            + Vector3::unit_y() * actions.move_up;
        if direction.magnitude2() <= MIN_DIRECTION_LENGTH2 {
            return;
        }
        direction = direction.normalize();

        let speed = if actions.sprint {
            self.speed * self.sprint_multiplier
        } else {
            self.speed
        };
        camera.position += direction * speed * dt;
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    fn controller() -> CameraController {
        CameraController::new(&CameraConfig::default(), 6.0)
    }

    fn assert_close(a: Vector3<f32>, b: Vector3<f32>) {
        assert!((a - b).magnitude() < 1e-5, "{a:?} != {b:?}");
    }

    #[test]
    fn zero_yaw_faces_positive_z() {
        let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Rad(0.0), Rad(0.0));
        assert_close(camera.forward(), Vector3::unit_z());
        assert_close(camera.right(), Vector3::unit_x());
    }

    #[test]
    fn quarter_turn_faces_positive_x() {
        let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Rad(FRAC_PI_2), Rad(0.0));
        assert_close(camera.forward(), Vector3::unit_x());
        assert_close(camera.right(), -Vector3::unit_z());
    }

    #[test]
    fn flat_forward_ignores_pitch() {
        let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Rad(0.0), Rad(1.0));
        assert!(camera.forward().y > 0.5);
        assert_close(camera.flat_forward(), Vector3::unit_z());
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Rad(0.0), Rad(0.0));
        let controller = controller();
        controller.apply_look(&mut camera, 0.0, -100_000.0);
        assert!((camera.pitch.0 - (FRAC_PI_2 - 0.01)).abs() < 1e-6);
        controller.apply_look(&mut camera, 0.0, 100_000.0);
        assert!((camera.pitch.0 + (FRAC_PI_2 - 0.01)).abs() < 1e-6);
    }

    #[test]
    fn look_right_increases_yaw() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Rad(0.0), Rad(0.0));
        controller().apply_look(&mut camera, 100.0, 0.0);
        assert!((camera.yaw.0 - 0.2).abs() < 1e-6);
    }

    #[test]
    fn fly_moves_along_view_and_sprints() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Rad(0.0), Rad(0.0));
        let mut actions = PlayerAction {
            move_forward: 1.0,
            ..PlayerAction::default()
        };
        controller().fly(&mut camera, &actions, 0.5);
        assert!((camera.position.z - 3.0).abs() < 1e-5);

        actions.sprint = true;
        controller().fly(&mut camera, &actions, 0.5);
        assert!((camera.position.z - 12.0).abs() < 1e-4);
    }

    #[test]
    fn view_matrix_maps_forward_to_positive_depth() {
        let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Rad(0.0), Rad(0.0));
        let ahead = camera.calc_matrix() * Vector4::new(0.0, 0.0, 5.0, 1.0);
        assert!((ahead.z - 5.0).abs() < 1e-5);
    }
}
