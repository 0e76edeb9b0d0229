//! # Engine Configuration
//!
//! Tunable constants of the engine grouped by subsystem. Every section is
//! `#[serde(default)]`, so a configuration file only needs to name the values it
//! overrides:
//!
//! ```json
//! { "world": { "radius_chunks": 5 }, "meshing": { "strategy": "per_face" } }
//! ```

use std::f32::consts::FRAC_PI_2;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};

use super::rendering::meshing::MeshingStrategy;
use super::voxels::block::block_type::BlockType;

/// Environment variable naming the JSON configuration file.
pub const CONFIG_PATH_ENV: &str = "VOXEL_WORLD_CONFIG";

/// Chunk streaming and terrain generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Chunks kept loaded on each side of the centre chunk along X and Z.
    pub radius_chunks: i32,
    /// Lowest chunk layer kept loaded.
    pub min_chunk_y: i32,
    /// Highest chunk layer kept loaded.
    pub max_chunk_y: i32,
    /// Number of solid layers of the flat generator, starting at world `y = 0`.
    pub ground_height: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            radius_chunks: 3,
            min_chunk_y: 0,
            max_chunk_y: 0,
            ground_height: 2,
        }
    }
}

/// Player body, movement and spawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Half the width of the collision box on X and Z.
    pub radius: f32,
    /// Standing collision box height.
    pub height: f32,
    /// Crouching collision box height.
    pub crouch_height: f32,
    /// Eye offset above the feet while standing.
    pub eye_height: f32,
    /// Eye offset above the feet while crouching.
    pub crouch_eye_height: f32,
    /// Vertical acceleration in blocks per second squared.
    pub gravity: f32,
    /// Initial upward speed of a jump.
    pub jump_speed: f32,
    /// Highest ledge climbed without jumping.
    pub step_height: f32,
    /// Gap kept between the collision box and solid cells.
    pub collision_epsilon: f32,
    /// Horizontal walking speed in blocks per second.
    pub move_speed: f32,
    /// Speed factor while sprinting.
    pub sprint_multiplier: f32,
    /// Speed factor while crouching.
    pub crouch_multiplier: f32,
    /// Feet position at spawn.
    pub spawn_position: [f32; 3],
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            radius: 0.3,
            height: 1.8,
            crouch_height: 1.1,
            eye_height: 1.6,
            crouch_eye_height: 0.9,
            gravity: -24.0,
            jump_speed: 8.0,
            step_height: 1.0,
            collision_epsilon: 0.001,
            move_speed: 6.0,
            sprint_multiplier: 1.7,
            crouch_multiplier: 0.45,
            spawn_position: [8.0, 4.0, -14.0],
        }
    }
}

/// Mouse look and fly camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Radians of rotation per pixel of mouse motion.
    pub mouse_sensitivity: f32,
    /// Largest absolute pitch in radians.
    pub max_pitch: f32,
    /// Fly camera speed factor while sprinting.
    pub fly_sprint_multiplier: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        CameraConfig {
            mouse_sensitivity: 0.002,
            max_pitch: FRAC_PI_2 - 0.01,
            fly_sprint_multiplier: 3.0,
        }
    }
}

/// Block breaking and placing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Reach of the block selection ray.
    pub raycast_distance: f32,
    /// Block placed on a secondary click.
    pub place_block: BlockType,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        InteractionConfig {
            raycast_distance: 8.0,
            place_block: BlockType::DIRT,
        }
    }
}

/// Chunk mesh generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshingConfig {
    /// Quad generation strategy.
    pub strategy: MeshingStrategy,
    /// Multiply the face shade by the block's base colour instead of white.
    pub tint_faces: bool,
}

impl Default for MeshingConfig {
    fn default() -> Self {
        MeshingConfig {
            strategy: MeshingStrategy::Greedy,
            tint_faces: false,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Chunk streaming and terrain.
    pub world: WorldConfig,
    /// Player body and movement.
    pub player: PlayerConfig,
    /// Camera look and fly mode.
    pub camera: CameraConfig,
    /// Block interaction.
    pub interaction: InteractionConfig,
    /// Mesh generation.
    pub meshing: MeshingConfig,
    /// Longest simulated frame in seconds; longer frames are clamped.
    pub max_frame_delta: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            world: WorldConfig::default(),
            player: PlayerConfig::default(),
            camera: CameraConfig::default(),
            interaction: InteractionConfig::default(),
            meshing: MeshingConfig::default(),
            max_frame_delta: 0.1,
        }
    }
}

impl EngineConfig {
    /// Reads a JSON configuration file.
    ///
    /// # Arguments
    /// * `path` - File to read
    ///
    /// # Returns
    /// The parsed configuration, with defaults for every omitted value.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_json(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Parses a configuration from JSON text.
    ///
    /// Rejects well-formed JSON whose values the engine cannot run with: a
    /// non-positive `max_frame_delta` or an inverted chunk layer range.
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if !(self.max_frame_delta > 0.0 && self.max_frame_delta.is_finite()) {
            return Err(anyhow!(
                "max_frame_delta must be a positive number of seconds, got {}",
                self.max_frame_delta
            ));
        }
        if self.world.min_chunk_y > self.world.max_chunk_y {
            return Err(anyhow!(
                "world.min_chunk_y ({}) is above world.max_chunk_y ({})",
                self.world.min_chunk_y,
                self.world.max_chunk_y
            ));
        }
        Ok(())
    }

    /// Loads the file named by `VOXEL_WORLD_CONFIG`, or the defaults when the
    /// variable is unset.
    pub fn from_env() -> anyhow::Result<Self> {
        match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
