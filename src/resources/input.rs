//! Per-frame keyboard input resource.
//!
//! Captures the keys that drive animation playback and exposes them to
//! systems via the [`InputState`] resource. Each [`BoolState`] pairs a
//! binding with its state this frame.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

#[derive(Debug, Clone, Copy)]
/// Boolean key state with an associated keyboard binding.
pub struct BoolState {
    /// Whether the key is currently held down.
    pub active: bool,
    /// Whether the key was just pressed this frame.
    pub just_pressed: bool,
    /// Whether the key was just released this frame.
    pub just_released: bool,

    /// The key bound to this action.
    pub key_binding: KeyboardKey,
}

impl Default for BoolState {
    fn default() -> Self {
        Self::bound(KeyboardKey::KEY_NULL)
    }
}

impl BoolState {
    pub fn bound(key_binding: KeyboardKey) -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: false,
            key_binding,
        }
    }

    /// Record this frame's readings for the bound key.
    pub fn record(&mut self, down: bool, pressed: bool, released: bool) {
        self.active = down;
        self.just_pressed = pressed;
        self.just_released = released;
    }
}

/// Resource capturing the playback keys.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    /// Pause, or resume (from the start if the cycle is over).
    pub toggle_play: BoolState,
    pub stop: BoolState,
    pub rewind: BoolState,
    pub toggle_reversed: BoolState,
    pub toggle_looped: BoolState,
    pub flip_x: BoolState,
    pub flip_y: BoolState,
    pub mode_debug: BoolState,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            toggle_play: BoolState::bound(KeyboardKey::KEY_SPACE),
            stop: BoolState::bound(KeyboardKey::KEY_ENTER),
            rewind: BoolState::bound(KeyboardKey::KEY_BACKSPACE),
            toggle_reversed: BoolState::bound(KeyboardKey::KEY_R),
            toggle_looped: BoolState::bound(KeyboardKey::KEY_L),
            flip_x: BoolState::bound(KeyboardKey::KEY_X),
            flip_y: BoolState::bound(KeyboardKey::KEY_Y),
            mode_debug: BoolState::bound(KeyboardKey::KEY_F11),
        }
    }
}
