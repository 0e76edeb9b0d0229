//! # Input Manager
//!
//! This module handles input processing for the application, including:
//! - Key and mouse button state tracking across frames
//! - Mouse motion accumulation
//! - Mouse capture
//! - Translation of input into engine [`PlayerAction`]s

use std::collections::HashMap;

use log::debug;

use super::input_state::{InputKey, MouseButton, ProcessedInputState, RawInputState, INPUT_KEYS};
use crate::engine_state::PlayerAction;

const MOUSE_BUTTONS: [MouseButton; 2] = [MouseButton::Left, MouseButton::Right];

/// Manages the state of all input devices and turns it into player actions.
///
/// Down flags are recorded as events arrive. Once per frame,
/// [`InputManager::player_action`] compares them with the previous frame's
/// flags to find presses and releases, then starts the next frame.
#[derive(Debug)]
pub struct InputManager {
    /// Previous state of all tracked keys
    pub keyboard_inputs_old: HashMap<InputKey, bool>,
    /// Current state of all tracked keys
    pub keyboard_inputs_new: HashMap<InputKey, bool>,
    /// Previous state of the mouse buttons
    pub mouse_button_inputs_old: HashMap<MouseButton, bool>,
    /// Current state of the mouse buttons
    pub mouse_button_inputs_new: HashMap<MouseButton, bool>,
    /// Mouse motion accumulated since the last frame
    pub mouse_delta: (f64, f64),
    mouse_captured: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    /// Creates a new InputManager with every key and button released and the
    /// mouse not captured.
    pub fn new() -> Self {
        let keyboard_inputs_old: HashMap<_, _> = INPUT_KEYS.iter().map(|&k| (k, false)).collect();
        let mouse_button_inputs_old: HashMap<_, _> =
            MOUSE_BUTTONS.iter().map(|&b| (b, false)).collect();

        Self {
            keyboard_inputs_new: keyboard_inputs_old.clone(),
            keyboard_inputs_old,
            mouse_button_inputs_new: mouse_button_inputs_old.clone(),
            mouse_button_inputs_old,
            mouse_delta: (0.0, 0.0),
            mouse_captured: false,
        }
    }

    /// Whether mouse motion and clicks drive the player.
    pub fn is_mouse_captured(&self) -> bool {
        self.mouse_captured
    }

    /// Captures or releases the mouse.
    pub fn set_mouse_captured(&mut self, captured: bool) {
        if self.mouse_captured != captured {
            debug!("Mouse {}", if captured { "captured" } else { "released" });
        }
        self.mouse_captured = captured;
    }

    /// Records a key going down or up.
    pub fn intake_key(&mut self, key: InputKey, down: bool) {
        if let Some(key_state) = self.keyboard_inputs_new.get_mut(&key) {
            *key_state = down;
        }
    }

    /// Records a mouse button going down or up.
    pub fn intake_mouse_button(&mut self, button: MouseButton, down: bool) {
        if let Some(button_state) = self.mouse_button_inputs_new.get_mut(&button) {
            *button_state = down;
        }
    }

    /// Adds mouse motion to this frame's delta.
    ///
    /// # Arguments
    /// * `delta` - The (x, y) delta of mouse movement since the last event
    pub fn intake_mouse_motion(&mut self, delta: (f64, f64)) {
        self.mouse_delta.0 += delta.0;
        self.mouse_delta.1 += delta.1;
    }

    /// Creates a processed input state from the current raw boolean states.
    ///
    /// # Returns
    /// A new `ProcessedInputState` with pressed/held/released transitions.
    pub fn create_processed_input_state(&self) -> ProcessedInputState {
        let keyboard_states = self
            .keyboard_inputs_new
            .iter()
            .map(|(key, &new_state)| {
                let old_state = self.keyboard_inputs_old.get(key).copied().unwrap_or(false);
                (*key, RawInputState::from_raw_states(old_state, new_state))
            })
            .collect();

        let mouse_button_states = self
            .mouse_button_inputs_new
            .iter()
            .map(|(button, &new_state)| {
                let old_state = self
                    .mouse_button_inputs_old
                    .get(button)
                    .copied()
                    .unwrap_or(false);
                (*button, RawInputState::from_raw_states(old_state, new_state))
            })
            .collect();

        ProcessedInputState {
            keyboard_states,
            mouse_button_states,
            mouse_delta: self.mouse_delta,
        }
    }

    /// Updates the old state with the current state and clears the mouse delta.
    pub fn move_old_states(&mut self) {
        self.keyboard_inputs_old = self.keyboard_inputs_new.clone();
        self.mouse_button_inputs_old = self.mouse_button_inputs_new.clone();
        self.mouse_delta = (0.0, 0.0);
    }

    /// Produces this frame's player actions and starts the next frame.
    ///
    /// The capture key toggles mouse capture. While the mouse is released, a
    /// left click captures it and is otherwise ignored, and no other input
    /// reaches the player.
    pub fn player_action(&mut self) -> PlayerAction {
        let input = self.create_processed_input_state();
        self.move_old_states();

        if input.get_key_state(InputKey::ToggleCapture).is_just_pressed() {
            self.set_mouse_captured(!self.mouse_captured);
            return PlayerAction::default();
        }
        if !self.mouse_captured {
            if input.get_mouse_button_state(MouseButton::Left).is_just_pressed() {
                self.set_mouse_captured(true);
            }
            return PlayerAction::default();
        }

        translate_processed_input(&input)
    }
}

/// Translates the processed input state into player actions.
///
/// # Arguments
/// * `input` - The processed input state to translate
fn translate_processed_input(input: &ProcessedInputState) -> PlayerAction {
    PlayerAction {
        move_forward: input.axis(InputKey::Forward, InputKey::Backward),
        move_right: input.axis(InputKey::Right, InputKey::Left),
        move_up: input.axis(InputKey::Jump, InputKey::Crouch),
        sprint: input.get_key_state(InputKey::Sprint).is_active(),
        jump_pressed: input.get_key_state(InputKey::Jump).is_just_pressed(),
        crouch_held: input.get_key_state(InputKey::Crouch).is_active(),
        break_block: input
            .get_mouse_button_state(MouseButton::Left)
            .is_just_pressed(),
        place_block: input
            .get_mouse_button_state(MouseButton::Right)
            .is_just_pressed(),
        toggle_fly: input.get_key_state(InputKey::ToggleFly).is_just_pressed(),
        look_delta: (input.mouse_delta.0 as f32, input.mouse_delta.1 as f32),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn captured() -> InputManager {
        let mut input = InputManager::new();
        input.set_mouse_captured(true);
        input
    }

    #[test]
    fn input_is_ignored_until_captured() {
        let mut input = InputManager::new();
        input.intake_key(InputKey::Forward, true);
        input.intake_mouse_motion((5.0, 0.0));
        assert_eq!(input.player_action(), PlayerAction::default());

        input.intake_mouse_button(MouseButton::Left, true);
        assert_eq!(input.player_action(), PlayerAction::default());
        assert!(input.is_mouse_captured());

        assert_eq!(input.player_action().move_forward, 1.0);
    }

    #[test]
    fn capture_key_toggles() {
        let mut input = captured();
        input.intake_key(InputKey::ToggleCapture, true);
        input.player_action();
        assert!(!input.is_mouse_captured());
        input.player_action();
        assert!(!input.is_mouse_captured());
    }

    #[test]
    fn jump_and_clicks_are_edges() {
        let mut input = captured();
        input.intake_key(InputKey::Jump, true);
        input.intake_mouse_button(MouseButton::Right, true);

        let first = input.player_action();
        assert!(first.jump_pressed);
        assert!(first.place_block);
        assert_eq!(first.move_up, 1.0);

        let second = input.player_action();
        assert!(!second.jump_pressed);
        assert!(!second.place_block);
        assert_eq!(second.move_up, 1.0);
    }

    #[test]
    fn mouse_motion_accumulates_per_frame() {
        let mut input = captured();
        input.intake_mouse_motion((2.0, 1.0));
        input.intake_mouse_motion((3.0, -4.0));
        assert_eq!(input.player_action().look_delta, (5.0, -3.0));
        assert_eq!(input.player_action().look_delta, (0.0, 0.0));
    }

    #[test]
    fn crouch_and_sprint_are_held() {
        let mut input = captured();
        input.intake_key(InputKey::Crouch, true);
        input.intake_key(InputKey::Sprint, true);
        input.intake_key(InputKey::Left, true);
        for _ in 0..2 {
            let action = input.player_action();
            assert!(action.crouch_held);
            assert!(action.sprint);
            assert_eq!(action.move_right, -1.0);
            assert_eq!(action.move_up, -1.0);
        }
    }
}
