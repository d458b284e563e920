//! Input system.
//!
//! [`update_input_state`] reads the keyboard from Raylib each frame, writes
//! the results into [`InputState`] and turns fresh key presses into
//! [`PlaybackEvent`]s (and [`SwitchDebugEvent`] for F11).
use bevy_ecs::prelude::*;
use raylib::ffi::KeyboardKey;

use crate::events::playback::{PlaybackAction, PlaybackEvent};
use crate::events::switchdebug::SwitchDebugEvent;
use crate::resources::input::{BoolState, InputState};

/// Poll Raylib for keyboard input and update the `InputState` resource.
pub fn update_input_state(
    mut input: ResMut<InputState>,
    rl: NonSendMut<raylib::RaylibHandle>,
    mut commands: Commands,
) {
    let poll = |state: &mut BoolState| {
        let key: KeyboardKey = state.key_binding;
        state.record(
            rl.is_key_down(key),
            rl.is_key_pressed(key),
            rl.is_key_released(key),
        );
        state.just_pressed
    };

    let input = &mut *input;
    let bindings = [
        (&mut input.toggle_play, PlaybackAction::TogglePlay),
        (&mut input.stop, PlaybackAction::Stop),
        (&mut input.rewind, PlaybackAction::Rewind),
        (&mut input.toggle_reversed, PlaybackAction::ToggleReversed),
        (&mut input.toggle_looped, PlaybackAction::ToggleLooped),
        (&mut input.flip_x, PlaybackAction::ToggleFlipX),
        (&mut input.flip_y, PlaybackAction::ToggleFlipY),
    ];
    for (state, action) in bindings {
        if poll(state) {
            commands.trigger(PlaybackEvent::all(action));
        }
    }

    if poll(&mut input.mode_debug) {
        commands.trigger(SwitchDebugEvent {});
    }
}
