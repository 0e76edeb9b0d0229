//! # Engine State Module
//!
//! The core engine module that manages the state and functionality of the voxel engine.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container for the engine
//! * `camera_state` - Handles camera orientation, mouse look and free flight
//! * `config` - Tunable constants loaded from JSON
//! * `player` - Walking physics and collision
//! * `rendering` - Chunk meshing and vertex data
//! * `voxels` - Handles voxel data, chunks, streaming and raycasting
//!
//! ## Tick Order
//!
//! Every call to [`EngineState::tick`] runs to completion in a fixed order:
//!
//! 1. Apply mouse look
//! 2. Move the player (or the free camera in fly mode)
//! 3. Stream chunks around the camera when it changed chunk
//! 4. Rebuild dirty chunk meshes
//! 5. Raycast for the hovered block
//! 6. Break or place a block
//! 7. If a block changed, rebuild meshes and raycast again
//! 8. Update the selection box
//!
//! Nothing in a tick runs concurrently with anything else, so the world needs no
//! locking.

use cgmath::{Point3, Vector3};
use log::{debug, info};

use camera_state::{CameraState, CameraUpdates};
use config::EngineConfig;
use player::{PlayerController, PlayerState};
use rendering::meshing::{Mesh, MeshManager, MeshUpdates};
use voxels::{
    block::block_type::BlockType,
    raycast::{raycast_voxels, RayHit},
    world::{StreamSummary, World},
};

pub mod camera_state;
pub mod config;
pub mod player;
pub mod rendering;
pub mod voxels;

/// Seconds of frames averaged into one FPS sample.
const FPS_SAMPLE_PERIOD: f32 = 0.25;

/// Represents player actions derived from input
///
/// Movement axes are in `[-1, 1]`. Edge flags such as `jump_pressed` are only
/// set on the frame the key or button went down.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PlayerAction {
    /// Forward (positive) or backward (negative) movement.
    pub move_forward: f32,
    /// Right (positive) or left (negative) movement.
    pub move_right: f32,
    /// Upward (positive) or downward (negative) movement in fly mode.
    pub move_up: f32,
    /// Sprint modifier held.
    pub sprint: bool,
    /// Jump key went down this frame.
    pub jump_pressed: bool,
    /// Crouch key held.
    pub crouch_held: bool,
    /// Break the hovered block.
    pub break_block: bool,
    /// Place a block against the hovered face.
    pub place_block: bool,
    /// Switch between walking and free flight.
    pub toggle_fly: bool,
    /// Mouse motion in pixels since the last frame.
    pub look_delta: (f32, f32),
}

/// A block changed by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockEdit {
    /// The block at `cell` was removed.
    Broken {
        /// World cell that became air.
        cell: Point3<i32>,
        /// The block that was there.
        block: BlockType,
    },
    /// `block` was placed at `cell`.
    Placed {
        /// World cell that was filled.
        cell: Point3<i32>,
        /// The block placed.
        block: BlockType,
    },
}

/// Frame rate statistics.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FrameStats {
    /// Frames per second over the last complete sample.
    pub fps: f32,
    /// Average frame time in milliseconds over the last complete sample.
    pub frame_time_ms: f32,
    /// Ticks since the engine started.
    pub total_frames: u64,
    sample_time: f32,
    sample_frames: u32,
}

impl FrameStats {
    /// Accounts for one frame lasting `dt` seconds.
    pub fn record(&mut self, dt: f32) {
        self.total_frames += 1;
        self.sample_frames += 1;
        self.sample_time += dt;
        if self.sample_time >= FPS_SAMPLE_PERIOD {
            self.fps = self.sample_frames as f32 / self.sample_time;
            self.frame_time_ms = self.sample_time * 1000.0 / self.sample_frames as f32;
            self.sample_time = 0.0;
            self.sample_frames = 0;
        }
    }
}

/// What happened during one tick.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TickReport {
    /// Chunks created and evicted by streaming.
    pub streamed: StreamSummary,
    /// Chunk meshes rebuilt or dropped, across both rebuild passes.
    pub mesh_updates: MeshUpdates,
    /// The block edit performed, if any.
    pub edit: Option<BlockEdit>,
    /// The hovered block at the end of the tick.
    pub hover: Option<RayHit>,
}

/// The main state container for the voxel engine
///
/// This struct owns the world, the player and the camera, and advances them
/// together one tick at a time.
///
/// # Examples
///
/// ```
/// use voxel_world::{EngineConfig, EngineState, PlayerAction};
///
/// let mut engine = EngineState::new(EngineConfig::default());
/// for _ in 0..60 {
///     engine.tick(1.0 / 60.0, &PlayerAction::default());
/// }
/// assert!(engine.player().on_ground);
/// ```
#[derive(Debug)]
pub struct EngineState {
    config: EngineConfig,
    world: World,
    player: PlayerState,
    player_controller: PlayerController,
    camera_state: CameraState,
    mesh_manager: MeshManager,
    hover: Option<RayHit>,
    selection: Option<Mesh>,
    stats: FrameStats,
    fly_mode: bool,
}

impl EngineState {
    /// Creates a new engine state with the chunks around the spawn point loaded
    ///
    /// # Arguments
    ///
    /// * `config` - Engine configuration
    ///
    /// # Returns
    ///
    /// A fully initialized `EngineState` instance
    pub fn new(config: EngineConfig) -> Self {
        let [x, y, z] = config.player.spawn_position;
        let player = PlayerState::new(Point3::new(x, y, z));
        let player_controller = PlayerController::new(config.player.clone());
        let mut camera_state = CameraState::new(
            &config.camera,
            player_controller.eye_position(&player),
            config.player.move_speed,
        );

        let mut world = World::new(config.world.clone());
        if let Some(CameraUpdates { new_chunk_position }) = camera_state.update() {
            let summary = world.stream_chunks(camera_state.camera.position);
            info!(
                "Loaded {} chunks around spawn chunk {:?}",
                summary.created, new_chunk_position
            );
        }

        let mesh_manager = MeshManager::new(&config.meshing);

        Self {
            config,
            world,
            player,
            player_controller,
            camera_state,
            mesh_manager,
            hover: None,
            selection: None,
            stats: FrameStats::default(),
            fly_mode: false,
        }
    }

    /// Advances the engine by one frame.
    ///
    /// # Arguments
    ///
    /// * `dt` - Seconds since the last tick, clamped to the configured maximum
    /// * `actions` - The player's input for this frame
    ///
    /// # Returns
    ///
    /// What streaming, meshing and editing did during the tick
    pub fn tick(&mut self, dt: f32, actions: &PlayerAction) -> TickReport {
        let dt = if dt.is_finite() {
            dt.min(self.config.max_frame_delta).max(0.0)
        } else {
            0.0
        };
        let mut report = TickReport::default();

        if actions.toggle_fly {
            self.fly_mode = !self.fly_mode;
            info!("Fly mode {}", if self.fly_mode { "on" } else { "off" });
        }

        self.camera_state.intake_actions(actions);
        if self.fly_mode {
            self.camera_state.fly(actions, dt);
        } else {
            self.player_controller.update_player(
                &mut self.player,
                &self.world,
                &self.camera_state.camera,
                actions,
                dt,
            );
            self.camera_state.camera.position = self.player_controller.eye_position(&self.player);
        }

        if let Some(CameraUpdates { new_chunk_position }) = self.camera_state.update() {
            report.streamed = self.world.stream_chunks(self.camera_state.camera.position);
            debug!("Camera entered chunk {:?}", new_chunk_position);
        }

        report.mesh_updates = self.mesh_manager.rebuild_dirty_meshes(&mut self.world);
        self.hover = self.raycast();

        report.edit = self.handle_block_interaction(actions);
        if report.edit.is_some() {
            let updates = self.mesh_manager.rebuild_dirty_meshes(&mut self.world);
            report.mesh_updates.rebuilt.extend(updates.rebuilt);
            report.mesh_updates.removed.extend(updates.removed);
            self.hover = self.raycast();
        }

        self.selection = self.hover.map(|hit| Mesh::selection_box(hit.block));
        self.stats.record(dt);

        report.hover = self.hover;
        report
    }

    fn raycast(&self) -> Option<RayHit> {
        raycast_voxels(
            &self.world,
            self.camera_state.camera.position,
            self.view_direction(),
            self.config.interaction.raycast_distance,
        )
    }

    /// Breaks or places a block at the hovered position.
    ///
    /// Breaking takes priority when both are requested. A block is only placed
    /// into an air cell that does not overlap the player.
    ///
    /// # Returns
    ///
    /// The edit made, or `None` when nothing is hovered or nothing changed
    pub fn handle_block_interaction(&mut self, actions: &PlayerAction) -> Option<BlockEdit> {
        let hit = self.hover?;

        if actions.break_block {
            let cell = hit.block;
            let block = self.world.get_block(cell.x, cell.y, cell.z);
            if self.world.set_block(cell.x, cell.y, cell.z, BlockType::AIR) {
                info!("Broke {:?} at {:?}", block, cell);
                return Some(BlockEdit::Broken { cell, block });
            }
        }

        if actions.place_block {
            let cell = hit.previous;
            let block = self.config.interaction.place_block;
            let free = self.world.get_block(cell.x, cell.y, cell.z) == BlockType::AIR
                && !self.player_controller.would_intersect_block(&self.player, cell);
            if free && self.world.set_block(cell.x, cell.y, cell.z, block) {
                info!("Placed {:?} at {:?}", block, cell);
                return Some(BlockEdit::Placed { cell, block });
            }
        }

        None
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The voxel world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the voxel world, e.g. for scripted edits.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The player's body.
    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    /// The camera and its controller.
    pub fn camera_state(&self) -> &CameraState {
        &self.camera_state
    }

    /// The chunk mesh manager.
    pub fn mesh_manager(&self) -> &MeshManager {
        &self.mesh_manager
    }

    /// The block under the crosshair after the last tick.
    pub fn hover(&self) -> Option<RayHit> {
        self.hover
    }

    /// Outline geometry around the hovered block.
    pub fn selection(&self) -> Option<&Mesh> {
        self.selection.as_ref()
    }

    /// Frame rate statistics.
    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Whether the camera flies freely instead of following the player.
    pub fn fly_mode(&self) -> bool {
        self.fly_mode
    }

    /// The camera's view direction.
    pub fn view_direction(&self) -> Vector3<f32> {
        self.camera_state.camera.forward()
    }
}
