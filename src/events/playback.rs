//! Playback control events.
//!
//! A [`PlaybackEvent`] asks one animation, or all of them, to change playback:
//! play, pause, stop, rewind or toggle one of the [`PlayState`] flags. The
//! input system emits these from key presses; anything else holding
//! [`Commands`] or the [`World`] can trigger them too.
//!
//! The animation system triggers an [`AnimationFinishedEvent`] when a
//! non-looped cycle ends.
//!
//! # Example
//!
//! ```ignore
//! world.add_observer(playback_observer::<Texture2D>);
//! world.trigger(PlaybackEvent::all(PlaybackAction::Play(PlayState::LOOPED)));
//! ```
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::animation::Animation;
use crate::components::playstate::PlayState;

/// What to do with the targeted animation(s).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackAction {
    /// Start playing with the given state.
    Play(PlayState),
    /// Pause a playing animation; resume a paused one with its current
    /// state, rewinding first if the cycle is over.
    TogglePlay,
    Pause,
    Stop,
    Rewind,
    ToggleReversed,
    ToggleLooped,
    ToggleFlipX,
    ToggleFlipY,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct PlaybackEvent {
    /// Animation to drive; `None` targets every animation.
    pub target: Option<Entity>,
    pub action: PlaybackAction,
}

impl PlaybackEvent {
    pub fn all(action: PlaybackAction) -> Self {
        Self {
            target: None,
            action,
        }
    }

    pub fn entity(entity: Entity, action: PlaybackAction) -> Self {
        Self {
            target: Some(entity),
            action,
        }
    }
}

/// Event fired when a non-looped animation reaches the end of its cycle.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationFinishedEvent {
    /// The entity whose animation stopped.
    pub entity: Entity,
}

/// Apply one playback action to an animation.
pub fn apply_playback_action<T>(anim: &mut Animation<T>, action: PlaybackAction) {
    let toggle = |anim: &mut Animation<T>, flag: PlayState| {
        let mut state = anim.state();
        state.toggle(flag);
        anim.set_state(state);
    };
    match action {
        PlaybackAction::Play(state) => anim.play(state),
        PlaybackAction::TogglePlay => {
            if anim.is_playing() {
                anim.pause();
            } else {
                if anim.has_finished() {
                    anim.rewind();
                }
                anim.play(anim.state());
            }
        }
        PlaybackAction::Pause => anim.pause(),
        PlaybackAction::Stop => anim.stop(),
        PlaybackAction::Rewind => anim.rewind(),
        PlaybackAction::ToggleReversed => toggle(anim, PlayState::REVERSED),
        PlaybackAction::ToggleLooped => toggle(anim, PlayState::LOOPED),
        PlaybackAction::ToggleFlipX => toggle(anim, PlayState::FLIP_X),
        PlaybackAction::ToggleFlipY => toggle(anim, PlayState::FLIP_Y),
    }
}

/// Observer applying [`PlaybackEvent`]s to `Animation<T>` components.
///
/// Register it once per texture type in use, e.g.
/// `playback_observer::<Texture2D>`.
pub fn playback_observer<T: Send + Sync + 'static>(
    trigger: On<PlaybackEvent>,
    mut query: Query<(Entity, &mut Animation<T>)>,
) {
    let event = *trigger.event();
    debug!("PlaybackEvent {:?} -> {:?}", event.action, event.target);
    match event.target {
        Some(entity) => {
            if let Ok((_, mut anim)) = query.get_mut(entity) {
                apply_playback_action(&mut *anim, event.action);
            }
        }
        None => {
            for (_, mut anim) in query.iter_mut() {
                apply_playback_action(&mut *anim, event.action);
            }
        }
    }
}
