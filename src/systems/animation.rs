//! Animation system.
//!
//! [`animation`] advances every [`Animation`] by the tick delta from
//! [`WorldTime`] and reports cycle ends.
//!
//! # Animation Flow
//!
//! 1. [`update_world_time`](crate::systems::time::update_world_time) stores the scaled delta
//! 2. `animation` calls [`Animation::update`] with that delta
//! 3. A non-looped cycle that ends triggers an
//!    [`AnimationFinishedEvent`] for the entity
//!
//! The system is generic over the texture handle; the engine schedules
//! `animation::<Texture2D>`.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::animation::{Animation, Tick};
use crate::events::playback::AnimationFinishedEvent;
use crate::resources::worldtime::WorldTime;

/// Advance animation playback and update the displayed frame.
///
/// Contract
/// - Reads [`WorldTime::delta`] (already scaled).
/// - Mutates the [`Animation`] clock, frame and view.
/// - Triggers [`AnimationFinishedEvent`] on [`Tick::Finished`].
pub fn animation<T: Send + Sync + 'static>(
    mut query: Query<(Entity, &mut Animation<T>)>,
    time: Res<WorldTime>,
    mut commands: Commands,
) {
    for (entity, mut anim) in query.iter_mut() {
        match anim.update(time.delta) {
            Tick::Finished => {
                debug!(
                    "Animation on {:?} finished on frame {}",
                    entity,
                    anim.current_frame()
                );
                commands.trigger(AnimationFinishedEvent { entity });
            }
            Tick::Wrapped => {
                debug!("Animation on {:?} wrapped", entity);
            }
            Tick::Idle | Tick::Advanced => {}
        }
    }
}
