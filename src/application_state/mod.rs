//! # Application State Management
//!
//! This module drives the engine from input, including:
//! - Input handling through the [`InputManager`]
//! - Frame timing
//! - A scripted, headless session used by the binary
//!
//! Windowing and GPU presentation live outside this crate. A windowed
//! front-end feeds its key, button and mouse events into the input manager and
//! calls [`ApplicationState::run_frame`] once per redraw; the headless session
//! does the same from a fixed script.

pub mod input_manager;
pub mod input_state;

use input_manager::InputManager;
use input_state::{InputKey, MouseButton, INPUT_KEYS};
use log::{debug, info};

use crate::engine_state::{config::EngineConfig, BlockEdit, EngineState, TickReport};

/// Simulated frame length of the scripted session.
pub const SCRIPT_FRAME_TIME: f32 = 1.0 / 60.0;

/// One step of a scripted session: input held steady for a number of frames.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptStep {
    /// Name used in log output
    pub label: &'static str,
    /// Frames the step lasts
    pub frames: u32,
    /// Keys held down during the step; every other key is up
    pub keys: Vec<InputKey>,
    /// Mouse buttons held down during the step; every other button is up
    pub buttons: Vec<MouseButton>,
    /// Mouse motion added on every frame of the step
    pub mouse_delta: (f64, f64),
}

impl ScriptStep {
    /// A step holding nothing for `frames` frames.
    pub fn idle(label: &'static str, frames: u32) -> Self {
        ScriptStep {
            label,
            frames,
            keys: Vec::new(),
            buttons: Vec::new(),
            mouse_delta: (0.0, 0.0),
        }
    }

    /// Holds `keys` for the whole step.
    pub fn with_keys(mut self, keys: &[InputKey]) -> Self {
        self.keys = keys.to_vec();
        self
    }

    /// Holds `buttons` for the whole step.
    pub fn with_buttons(mut self, buttons: &[MouseButton]) -> Self {
        self.buttons = buttons.to_vec();
        self
    }

    /// Moves the mouse by `delta` on every frame.
    pub fn with_mouse_delta(mut self, delta: (f64, f64)) -> Self {
        self.mouse_delta = delta;
        self
    }
}

/// The session the binary plays: capture the mouse, land, walk, jump, then
/// look down to break the block underfoot and fill the hole back in.
pub fn demo_script() -> Vec<ScriptStep> {
    vec![
        ScriptStep::idle("capture mouse", 1).with_buttons(&[MouseButton::Left]),
        ScriptStep::idle("land", 60),
        ScriptStep::idle("walk", 60).with_keys(&[InputKey::Forward]),
        ScriptStep::idle("jump forward", 40).with_keys(&[InputKey::Forward, InputKey::Jump]),
        ScriptStep::idle("settle", 30),
        ScriptStep::idle("look down", 1).with_mouse_delta((0.0, 1000.0)),
        ScriptStep::idle("break", 1).with_buttons(&[MouseButton::Left]),
        ScriptStep::idle("pause", 1),
        ScriptStep::idle("place", 1).with_buttons(&[MouseButton::Right]),
    ]
}

/// Totals over a scripted session.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    /// Frames simulated
    pub frames: u64,
    /// Blocks broken
    pub blocks_broken: usize,
    /// Blocks placed
    pub blocks_placed: usize,
    /// Chunk meshes rebuilt
    pub meshes_rebuilt: usize,
    /// Chunks created by streaming after startup
    pub chunks_streamed_in: usize,
    /// Chunks evicted by streaming
    pub chunks_streamed_out: usize,
}

impl SessionSummary {
    fn add(&mut self, report: &TickReport) {
        self.frames += 1;
        self.meshes_rebuilt += report.mesh_updates.rebuilt.len();
        self.chunks_streamed_in += report.streamed.created;
        self.chunks_streamed_out += report.streamed.removed;
        match report.edit {
            Some(BlockEdit::Broken { .. }) => self.blocks_broken += 1,
            Some(BlockEdit::Placed { .. }) => self.blocks_placed += 1,
            None => {}
        }
    }
}

/// The engine together with the input feeding it.
#[derive(Debug)]
pub struct ApplicationState {
    /// The core engine state and logic
    pub engine_state: EngineState,

    /// Manages input state and event processing
    pub input_manager: InputManager,
}

impl ApplicationState {
    /// Creates the engine from `config` with the mouse released.
    pub fn new(config: EngineConfig) -> Self {
        ApplicationState {
            engine_state: EngineState::new(config),
            input_manager: InputManager::new(),
        }
    }

    /// Runs one frame with the input gathered since the previous one.
    pub fn run_frame(&mut self, dt: f32) -> TickReport {
        let actions = self.input_manager.player_action();
        self.engine_state.tick(dt, &actions)
    }

    fn apply_step_input(&mut self, step: &ScriptStep) {
        for key in INPUT_KEYS {
            self.input_manager.intake_key(key, step.keys.contains(&key));
        }
        for button in [MouseButton::Left, MouseButton::Right] {
            self.input_manager
                .intake_mouse_button(button, step.buttons.contains(&button));
        }
        self.input_manager.intake_mouse_motion(step.mouse_delta);
    }

    /// Plays `script` at a fixed frame time and logs progress after each step.
    pub fn run_script(&mut self, script: &[ScriptStep]) -> SessionSummary {
        let mut summary = SessionSummary::default();

        for step in script {
            for _ in 0..step.frames {
                self.apply_step_input(step);
                let report = self.run_frame(SCRIPT_FRAME_TIME);
                if let Some(edit) = report.edit {
                    debug!("{}: {:?}", step.label, edit);
                }
                summary.add(&report);
            }

            let player = self.engine_state.player();
            info!(
                "{:<14} feet {:?} on_ground {} hover {:?}",
                step.label,
                player.position,
                player.on_ground,
                self.engine_state.hover().map(|hit| hit.block)
            );
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_breaks_and_places_one_block() {
        let mut app = ApplicationState::new(EngineConfig::default());
        let summary = app.run_script(&demo_script());

        assert_eq!(summary.frames, 195);
        assert_eq!(summary.blocks_broken, 1);
        assert_eq!(summary.blocks_placed, 1);
        assert!(app.input_manager.is_mouse_captured());
        assert!(app.engine_state.player().on_ground);
    }

    #[test]
    fn clicks_before_capture_do_not_edit() {
        let mut app = ApplicationState::new(EngineConfig::default());
        let script = [
            ScriptStep::idle("land", 60).with_mouse_delta((0.0, 1000.0)),
            ScriptStep::idle("break", 1).with_buttons(&[MouseButton::Left]),
        ];
        let summary = app.run_script(&script);
        assert_eq!(summary.blocks_broken, 0);
        assert!(app.input_manager.is_mouse_captured());
    }
}
