#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! A block-based voxel world engine: chunked world storage with streaming around
//! the player, chunk meshing (per-face or greedy), voxel raycasting for block
//! selection, and first-person movement with swept-AABB collision.
//!
//! ## Key Modules
//!
//! * `application_state` - Input handling and the headless session driver
//! * `engine_state` - The engine itself: voxels, meshing, camera and player
//!
//! ## Architecture
//!
//! Everything is owned by one [`EngineState`] and advanced by
//! [`EngineState::tick`]. The engine has no window or GPU dependency; it
//! produces per-chunk vertex lists and a selection box that any renderer can
//! upload.
//!
//! ## Usage
//!
//! ```rust
//! use voxel_world::{EngineConfig, EngineState, PlayerAction};
//!
//! let mut engine = EngineState::new(EngineConfig::default());
//! let report = engine.tick(1.0 / 60.0, &PlayerAction::default());
//! assert!(!report.mesh_updates.rebuilt.is_empty());
//! ```

use application_state::{demo_script, ApplicationState};
use log::info;
use web_time::Instant;

pub mod application_state;
pub mod engine_state;

pub use engine_state::{
    camera_state::camera::{Camera, CameraController},
    config::EngineConfig,
    player::{PlayerController, PlayerState},
    rendering::{
        meshing::{greedy, per_face, Face, Mesh, MeshManager, MeshingStrategy},
        Vertex,
    },
    voxels::{
        aabb::Aabb,
        block::{block_side::BlockSide, block_type::BlockType},
        chunk::{Chunk, VoxelChunk, CHUNK_DIMENSION},
        raycast::{raycast_voxels, RayHit},
        world::{VoxelQuery, World},
    },
    BlockEdit, EngineState, PlayerAction, TickReport,
};

/// Runs the headless session.
///
/// Initialises logging from `RUST_LOG`, loads the configuration named by the
/// `VOXEL_WORLD_CONFIG` environment variable (or the defaults), and plays the
/// scripted demo session.
///
/// # Errors
///
/// Fails when the configuration file cannot be read or parsed.
pub fn run() -> anyhow::Result<()> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();
    info!("Logger initialized");

    let config = EngineConfig::from_env()?;
    let start = Instant::now();
    let mut state = ApplicationState::new(config);
    info!("Engine initialized in {:?}", start.elapsed());

    let summary = state.run_script(&demo_script());
    let stats = state.engine_state.stats();
    info!(
        "Simulated {} frames in {:?}: {} chunks loaded, {} meshes rebuilt, {} broken, {} placed, {:.0} fps simulated",
        summary.frames,
        start.elapsed(),
        state.engine_state.world().chunk_count(),
        summary.meshes_rebuilt,
        summary.blocks_broken,
        summary.blocks_placed,
        stats.fps
    );
    Ok(())
}
