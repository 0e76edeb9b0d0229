//! # Player Movement
//!
//! Walking physics for a first-person player: camera-relative acceleration,
//! gravity and jumping, crouching, and collision against solid voxels.
//!
//! ## Movement Order
//! Each update resolves crouch state, derives the wanted velocity, then moves the
//! collision box along X, then Z, then Y. When a horizontal move is blocked
//! while standing on the ground, the move is retried from one step height up and
//! kept if that clears the obstacle, which lets the player walk up ledges.

use cgmath::{InnerSpace, Point3, Vector3};

use crate::engine_state::{
    camera_state::camera::Camera,
    config::PlayerConfig,
    voxels::{aabb::Aabb, world::VoxelQuery},
    PlayerAction,
};

mod collision;

const X_AXIS: usize = 0;
const Y_AXIS: usize = 1;
const Z_AXIS: usize = 2;

/// Squared length below which the wanted direction is treated as zero.
const MIN_DIRECTION_LENGTH2: f32 = 0.0001;

/// Position and motion of the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerState {
    /// Centre of the feet, i.e. the bottom face of the collision box.
    pub position: Point3<f32>,
    /// Velocity in blocks per second.
    pub velocity: Vector3<f32>,
    /// Whether the last vertical move landed on something.
    pub on_ground: bool,
    /// Whether the shorter crouching box is in use.
    pub crouching: bool,
}

impl PlayerState {
    /// A standing, airborne player at rest at `position`.
    pub fn new(position: Point3<f32>) -> Self {
        PlayerState {
            position,
            velocity: Vector3::new(0.0, 0.0, 0.0),
            on_ground: false,
            crouching: false,
        }
    }
}

/// Applies movement and collision to a [`PlayerState`].
#[derive(Debug, Clone)]
pub struct PlayerController {
    config: PlayerConfig,
}

impl PlayerController {
    /// Creates a controller with the given body and movement settings.
    pub fn new(config: PlayerConfig) -> Self {
        PlayerController { config }
    }

    /// The body and movement settings.
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    fn height(&self, crouching: bool) -> f32 {
        if crouching {
            self.config.crouch_height
        } else {
            self.config.height
        }
    }

    fn aabb_with_height(&self, position: Point3<f32>, height: f32) -> Aabb {
        let radius = self.config.radius;
        Aabb::new(
            Point3::new(position.x - radius, position.y, position.z - radius),
            Point3::new(position.x + radius, position.y + height, position.z + radius),
        )
    }

    /// The collision box of the player in its current stance.
    pub fn aabb(&self, player: &PlayerState) -> Aabb {
        self.aabb_with_height(player.position, self.height(player.crouching))
    }

    /// Where the camera sits for the player's current stance.
    pub fn eye_position(&self, player: &PlayerState) -> Point3<f32> {
        let eye_height = if player.crouching {
            self.config.crouch_eye_height
        } else {
            self.config.eye_height
        };
        player.position + Vector3::new(0.0, eye_height, 0.0)
    }

    /// Whether a block placed at `cell` would overlap the player.
    pub fn would_intersect_block(&self, player: &PlayerState, cell: Point3<i32>) -> bool {
        self.aabb(player).intersects(&Aabb::from_block(cell))
    }

    /// Whether the standing box at the player's position is free of solid cells.
    pub fn can_stand_up<Q: VoxelQuery + ?Sized>(&self, player: &PlayerState, world: &Q) -> bool {
        let standing = self.aabb_with_height(player.position, self.config.height);
        collision::is_aabb_clear(world, &standing, self.config.collision_epsilon)
    }

    /// Moves the player by up to `delta` along `axis`, stopping short of solid cells.
    ///
    /// # Returns
    /// `true` if a solid cell limited or blocked the move.
    fn move_along<Q: VoxelQuery + ?Sized>(
        &self,
        player: &mut PlayerState,
        world: &Q,
        axis: usize,
        delta: f32,
    ) -> bool {
        let (moved, hit) = collision::sweep_axis(
            world,
            &self.aabb(player),
            axis,
            delta,
            self.config.collision_epsilon,
        );
        player.position[axis] += moved;
        hit
    }

    /// Horizontal velocity wanted by the movement axes of `actions`.
    fn wish_velocity(
        &self,
        player: &PlayerState,
        camera: &Camera,
        actions: &PlayerAction,
    ) -> Vector3<f32> {
        let mut wish =
            camera.flat_forward() * actions.move_forward + camera.right() * actions.move_right;
        if wish.magnitude2() > MIN_DIRECTION_LENGTH2 {
            wish = wish.normalize();
        } else {
            return Vector3::new(0.0, 0.0, 0.0);
        }

        let mut speed = self.config.move_speed;
        if actions.sprint {
            speed *= self.config.sprint_multiplier;
        }
        if player.crouching {
            speed *= self.config.crouch_multiplier;
        }
        wish * speed
    }

    /// Advances the player by `dt` seconds.
    ///
    /// # Arguments
    /// * `player` - The state to update
    /// * `world` - Solid cells to collide with
    /// * `camera` - Orientation that movement is relative to
    /// * `actions` - Movement axes, jump, sprint and crouch input
    /// * `dt` - Seconds elapsed since the last update
    pub fn update_player<Q: VoxelQuery + ?Sized>(
        &self,
        player: &mut PlayerState,
        world: &Q,
        camera: &Camera,
        actions: &PlayerAction,
        dt: f32,
    ) {
        if actions.crouch_held {
            player.crouching = true;
        } else if player.crouching && self.can_stand_up(player, world) {
            player.crouching = false;
        }

        let wish = self.wish_velocity(player, camera, actions);
        player.velocity.x = wish.x;
        player.velocity.z = wish.z;

        if player.on_ground && actions.jump_pressed {
            player.velocity.y = self.config.jump_speed;
            player.on_ground = false;
        }
        player.velocity.y += self.config.gravity * dt;

        let delta = player.velocity * dt;
        let pre_step = *player;
        let hit_x = self.move_along(player, world, X_AXIS, delta.x);
        let hit_z = self.move_along(player, world, Z_AXIS, delta.z);

        let mut stepped = false;
        if player.on_ground && (hit_x || hit_z) {
            let mut step = pre_step;
            if !self.move_along(&mut step, world, Y_AXIS, self.config.step_height) {
                let step_hit_x = self.move_along(&mut step, world, X_AXIS, delta.x);
                let step_hit_z = self.move_along(&mut step, world, Z_AXIS, delta.z);
                if !step_hit_x && !step_hit_z {
                    let drop = -(self.config.step_height + self.config.collision_epsilon);
                    self.move_along(&mut step, world, Y_AXIS, drop);
                    *player = step;
                    stepped = true;
                }
            }
        }

        if !stepped {
            if hit_x {
                player.velocity.x = 0.0;
            }
            if hit_z {
                player.velocity.z = 0.0;
            }
        }

        if self.move_along(player, world, Y_AXIS, delta.y) {
            if delta.y < 0.0 {
                player.on_ground = true;
            }
            player.velocity.y = 0.0;
        } else {
            player.on_ground = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Rad;

    use super::*;
    use crate::engine_state::{
        config::WorldConfig,
        voxels::{block::block_type::BlockType, world::World},
    };

    const DT: f32 = 1.0 / 60.0;

    fn flat_world() -> World {
        let mut world = World::new(WorldConfig::default());
        world.stream_chunks(Point3::new(8.0, 2.0, 8.0));
        world
    }

    fn facing_z() -> Camera {
        Camera::new(Point3::new(0.0, 0.0, 0.0), Rad(0.0), Rad(0.0))
    }

    fn run(
        controller: &PlayerController,
        player: &mut PlayerState,
        world: &World,
        actions: &PlayerAction,
        ticks: usize,
    ) {
        let camera = facing_z();
        for _ in 0..ticks {
            controller.update_player(player, world, &camera, actions, DT);
        }
    }

    fn walk_forward() -> PlayerAction {
        PlayerAction {
            move_forward: 1.0,
            ..PlayerAction::default()
        }
    }

    #[test]
    fn falls_and_lands_on_ground() {
        let world = flat_world();
        let controller = PlayerController::new(PlayerConfig::default());
        let mut player = PlayerState::new(Point3::new(8.5, 5.0, 8.5));

        run(&controller, &mut player, &world, &PlayerAction::default(), 120);
        assert!(player.on_ground);
        assert_eq!(player.velocity.y, 0.0);
        assert!((player.position.y - 2.001).abs() < 1e-3);
    }

    #[test]
    fn steps_onto_single_block_ledge() {
        let mut world = flat_world();
        for z in 10..20 {
            world.set_block(8, 2, z, BlockType::STONE);
        }
        let controller = PlayerController::new(PlayerConfig::default());
        let mut player = PlayerState::new(Point3::new(8.5, 2.001, 8.5));

        run(&controller, &mut player, &world, &PlayerAction::default(), 2);
        run(&controller, &mut player, &world, &walk_forward(), 60);
        assert!(player.position.z > 12.0);
        assert!((player.position.y - 3.001).abs() < 1e-2);
        assert!(player.on_ground);
    }

    #[test]
    fn two_block_wall_stops_the_player() {
        let mut world = flat_world();
        world.set_block(8, 2, 10, BlockType::STONE);
        world.set_block(8, 3, 10, BlockType::STONE);
        let controller = PlayerController::new(PlayerConfig::default());
        let mut player = PlayerState::new(Point3::new(8.5, 2.001, 8.5));

        run(&controller, &mut player, &world, &walk_forward(), 60);
        assert!((player.position.z - (10.0 - 0.3 - 0.001)).abs() < 1e-3);
        assert!((player.position.y - 2.001).abs() < 1e-2);
        assert_eq!(player.velocity.z, 0.0);
    }

    #[test]
    fn jump_only_from_the_ground() {
        let world = flat_world();
        let controller = PlayerController::new(PlayerConfig::default());
        let mut player = PlayerState::new(Point3::new(8.5, 2.001, 8.5));
        run(&controller, &mut player, &world, &PlayerAction::default(), 2);

        let jump = PlayerAction {
            jump_pressed: true,
            ..PlayerAction::default()
        };
        run(&controller, &mut player, &world, &jump, 1);
        assert!(!player.on_ground);
        assert!(player.velocity.y > 7.0);
        let height = player.position.y;

        run(&controller, &mut player, &world, &jump, 1);
        assert!(player.velocity.y < 7.6);
        assert!(player.position.y > height);
    }

    #[test]
    fn stays_crouched_under_a_ceiling() {
        let mut world = World::new(WorldConfig {
            ground_height: 0,
            ..WorldConfig::default()
        });
        world.stream_chunks(Point3::new(8.0, 2.0, 8.0));
        world.set_block(8, 3, 8, BlockType::STONE);
        let controller = PlayerController::new(PlayerConfig {
            gravity: 0.0,
            ..PlayerConfig::default()
        });
        let mut player = PlayerState::new(Point3::new(8.5, 1.5, 8.5));
        player.crouching = true;
        assert!(!controller.can_stand_up(&player, &world));

        run(&controller, &mut player, &world, &PlayerAction::default(), 1);
        assert!(player.crouching);

        world.set_block(8, 3, 8, BlockType::AIR);
        run(&controller, &mut player, &world, &PlayerAction::default(), 1);
        assert!(!player.crouching);
    }

    #[test]
    fn crouching_slows_movement() {
        let world = flat_world();
        let controller = PlayerController::new(PlayerConfig::default());
        let mut player = PlayerState::new(Point3::new(8.5, 2.001, 8.5));
        let crouch_walk = PlayerAction {
            crouch_held: true,
            ..walk_forward()
        };
        run(&controller, &mut player, &world, &crouch_walk, 1);
        assert!(player.crouching);
        assert!((player.velocity.z - 6.0 * 0.45).abs() < 1e-5);
    }

    #[test]
    fn eye_height_follows_stance() {
        let controller = PlayerController::new(PlayerConfig::default());
        let mut player = PlayerState::new(Point3::new(0.0, 2.0, 0.0));
        assert!((controller.eye_position(&player).y - 3.6).abs() < 1e-6);
        player.crouching = true;
        assert!((controller.eye_position(&player).y - 2.9).abs() < 1e-6);
    }

    #[test]
    fn block_overlap_with_player() {
        let controller = PlayerController::new(PlayerConfig::default());
        let player = PlayerState::new(Point3::new(8.5, 2.001, 8.5));
        assert!(controller.would_intersect_block(&player, Point3::new(8, 2, 8)));
        assert!(controller.would_intersect_block(&player, Point3::new(8, 3, 8)));
        assert!(!controller.would_intersect_block(&player, Point3::new(8, 1, 8)));
        assert!(!controller.would_intersect_block(&player, Point3::new(9, 2, 8)));
    }
}
