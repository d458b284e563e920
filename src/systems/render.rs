use bevy_ecs::prelude::*;
use log::warn;
use raylib::prelude::*;

use crate::components::animation::{Animation, SheetAnimation};
use crate::resources::debugmode::DebugMode;
use crate::resources::worldtime::WorldTime;

/// Exclusive render system.
///
/// Raylib's draw handle borrows the `RaylibHandle` mutably for the whole
/// frame, so the handle is taken out of the world while drawing and put back
/// afterwards.
pub fn render_system(world: &mut World) {
    let Some(mut rl) = world.remove_non_send_resource::<RaylibHandle>() else {
        warn!("render_system: no RaylibHandle in the world");
        return;
    };
    let Some(thread) = world.remove_non_send_resource::<RaylibThread>() else {
        world.insert_non_send_resource(rl);
        warn!("render_system: no RaylibThread in the world");
        return;
    };
    {
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        render_pass(world, &mut d);
        render_debug_ui(world, &mut d);
    }
    world.insert_non_send_resource(thread);
    world.insert_non_send_resource(rl);
}

/// Draw every animation's current frame, in spawn order.
pub fn render_pass<D: RaylibDraw>(world: &mut World, d: &mut D) {
    let mut q = world.query::<&SheetAnimation>();
    for anim in q.iter(world) {
        anim.draw(d);
    }
}

/// One line of playback info for the debug overlay.
pub fn playback_summary<T>(anim: &Animation<T>) -> String {
    let flags = anim.state();
    format!(
        "frame {}/{} clock {:.2}/{:.2}s {}{}{}",
        anim.current_frame() + 1,
        anim.frames_nb(),
        anim.clock(),
        anim.duration(),
        if anim.is_playing() { "playing" } else { "paused" },
        if flags.is_looped() { " loop" } else { "" },
        if flags.is_reversed() { " rev" } else { "" },
    )
}

pub fn render_debug_ui(world: &mut World, d: &mut RaylibDrawHandle) {
    if !world.contains_resource::<DebugMode>() {
        return;
    }
    let time = *world.resource::<WorldTime>();

    let fps = d.get_fps();
    let text = format!("DEBUG MODE (press F11 to toggle) | FPS: {}", fps);
    d.draw_text(&text, 10, 10, 10, Color::YELLOW);
    let text = format!(
        "Ticks: {} Elapsed: {:.2}s Scale: {:.2}",
        time.frame_count, time.elapsed, time.time_scale
    );
    d.draw_text(&text, 10, 24, 10, Color::YELLOW);

    let mut q = world.query::<&SheetAnimation>();
    for anim in q.iter(world) {
        let bounds = anim.global_bounds();
        d.draw_rectangle_lines_ex(bounds, 1.0, Color::RED);
        let pos = anim.position();
        d.draw_circle_v(pos, 2.0, Color::RED);
        d.draw_text(
            &playback_summary(anim),
            bounds.x as i32,
            (bounds.y + bounds.height) as i32 + 4,
            10,
            Color::YELLOW,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::playstate::PlayState;
    use crate::components::spritesheet::FrameSize;
    use crate::resources::sheetloader::SheetTexture;

    #[test]
    fn test_playback_summary() {
        let mut anim: Animation<SheetTexture> =
            Animation::new(FrameSize::new(8, 8), 4).unwrap();
        assert_eq!(playback_summary(&anim), "frame 1/4 clock 0.00/1.00s paused");
        anim.play(PlayState::LOOPED);
        anim.update(0.5);
        assert_eq!(
            playback_summary(&anim),
            "frame 3/4 clock 0.50/1.00s playing loop"
        );
    }
}
