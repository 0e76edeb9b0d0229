//! # Input State
//!
//! This module defines the input state types used by the input manager.
//! It provides enums and structs for representing the state of input devices.
//!
//! Keys are logical: a front-end maps its physical keys (for example `W` or
//! the space bar) onto [`InputKey`] before handing events to the manager.

use std::collections::HashMap;

/// Logical keys the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKey {
    /// Walk forward (`W`)
    Forward,
    /// Walk backward (`S`)
    Backward,
    /// Strafe left (`A`)
    Left,
    /// Strafe right (`D`)
    Right,
    /// Jump, or rise in fly mode (space)
    Jump,
    /// Crouch, or sink in fly mode (shift)
    Crouch,
    /// Move faster (control)
    Sprint,
    /// Switch between walking and flying (`F`)
    ToggleFly,
    /// Capture or release the mouse (escape)
    ToggleCapture,
}

/// Every key tracked by the input manager.
pub const INPUT_KEYS: [InputKey; 9] = [
    InputKey::Forward,
    InputKey::Backward,
    InputKey::Left,
    InputKey::Right,
    InputKey::Jump,
    InputKey::Crouch,
    InputKey::Sprint,
    InputKey::ToggleFly,
    InputKey::ToggleCapture,
];

/// Mouse buttons the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Break blocks, or capture the mouse while released
    Left,
    /// Place blocks
    Right,
}

/// Represents the state of a key or button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RawInputState {
    /// Key/button is not pressed
    #[default]
    NotPressed,
    /// Key/button was just pressed this frame
    Pressed,
    /// Key/button has been held down for multiple frames
    Held,
    /// Key/button was just released this frame
    Released,
}

impl RawInputState {
    /// Determines if the input is actively down (either pressed or held)
    pub fn is_active(&self) -> bool {
        matches!(self, RawInputState::Pressed | RawInputState::Held)
    }

    /// Determines if the input was just pressed this frame
    pub fn is_just_pressed(&self) -> bool {
        matches!(self, RawInputState::Pressed)
    }

    /// Determines if the input was just released this frame
    pub fn is_just_released(&self) -> bool {
        matches!(self, RawInputState::Released)
    }

    /// Derives the state from the previous and current down flags
    pub fn from_raw_states(previous: bool, current: bool) -> Self {
        match (previous, current) {
            (false, true) => RawInputState::Pressed,
            (true, true) => RawInputState::Held,
            (true, false) => RawInputState::Released,
            (false, false) => RawInputState::NotPressed,
        }
    }
}

/// A snapshot of the processed input states with state transitions.
#[derive(Debug, Default, Clone)]
pub struct ProcessedInputState {
    /// Current state of all tracked keys
    pub keyboard_states: HashMap<InputKey, RawInputState>,

    /// Current state of mouse buttons
    pub mouse_button_states: HashMap<MouseButton, RawInputState>,

    /// Mouse movement accumulated since the last frame (x, y)
    pub mouse_delta: (f64, f64),
}

impl ProcessedInputState {
    /// Gets the state of a key
    pub fn get_key_state(&self, key: InputKey) -> RawInputState {
        self.keyboard_states.get(&key).copied().unwrap_or_default()
    }

    /// Gets the state of a mouse button
    pub fn get_mouse_button_state(&self, button: MouseButton) -> RawInputState {
        self.mouse_button_states
            .get(&button)
            .copied()
            .unwrap_or_default()
    }

    /// `1.0` when only `positive` is down, `-1.0` when only `negative` is
    pub fn axis(&self, positive: InputKey, negative: InputKey) -> f32 {
        let mut value = 0.0;
        if self.get_key_state(positive).is_active() {
            value += 1.0;
        }
        if self.get_key_state(negative).is_active() {
            value -= 1.0;
        }
        value
    }
}
