//! # Voxel World Entry Point
//!
//! Runs the headless engine session. Set `RUST_LOG=info` (or `debug`) to see
//! its progress and `VOXEL_WORLD_CONFIG` to load a JSON configuration file.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release
//! ```

fn main() {
    if let Err(err) = voxel_world::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
