//! Demo scene.
//!
//! [`setup`] spawns the animation described by the `[animation]` section of
//! [`GameConfig`]. With the stock configuration that is a three frame,
//! 256x256 horizontal strip played once at one frame per second, centered
//! at (128, 128). Enter stops it.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{error, info};

use crate::components::animation::Animation;
use crate::error::AnimationError;
use crate::events::playback::AnimationFinishedEvent;
use crate::resources::gameconfig::{AnimationSettings, GameConfig};
use crate::resources::sheetloader::{RaylibSheetLoader, SpriteSheetLoader};

/// Build a playing animation from `settings`, loading its sprite sheet with
/// `loader`.
///
/// A sheet that fails to load is logged and the animation is returned
/// without a texture: it keeps its clock running but draws nothing.
/// Invalid frame or timing settings are returned as errors.
pub fn load_animation<L>(
    settings: &AnimationSettings,
    loader: &mut L,
) -> Result<Animation<L::Texture>, AnimationError>
where
    L: SpriteSheetLoader,
{
    let mut anim = settings.build_animation()?;
    let layout = settings.sheet_layout()?;
    if let Err(e) = anim.set_sprite_sheet(loader, &settings.sheet, layout, Some(settings.offset)) {
        error!("{}", e);
    }
    anim.play(settings.state);
    Ok(anim)
}

pub fn setup(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut rl: NonSendMut<raylib::RaylibHandle>,
    th: NonSend<raylib::RaylibThread>,
) {
    let mut loader = RaylibSheetLoader::new(&mut rl, &th);
    match load_animation(&config.animation, &mut loader) {
        Ok(anim) => {
            let entity = commands.spawn(anim).id();
            info!("Spawned animation {:?} from '{}'", entity, config.animation.sheet);
        }
        Err(e) => error!("Invalid [animation] settings: {}", e),
    }
}

/// Observer logging the end of non-looped cycles.
pub fn log_finished_observer(trigger: On<AnimationFinishedEvent>) {
    info!("Animation {:?} finished", trigger.event().entity);
}
