//! Playback and mapping properties of the animation component, driven
//! through the public API with the in-memory sheet loader.

use raylib::prelude::Vector2;

use sheetanim::components::animation::{Animation, Tick};
use sheetanim::components::playstate::PlayState;
use sheetanim::components::spritesheet::{
    BlockGrid, FrameRect, FrameSize, SheetLayout, frame_rect,
};
use sheetanim::resources::sheetloader::{InMemorySheetLoader, SheetTexture};

const EPSILON: f32 = 1e-5;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn horizontal(frames: u8, duration: f32) -> Animation<SheetTexture> {
    let mut loader =
        InMemorySheetLoader::new().with_image("strip.png", 64 * u32::from(frames), 64);
    let mut anim = Animation::new(FrameSize::new(64, 64), frames).unwrap();
    anim.set_sprite_sheet(&mut loader, "strip.png", SheetLayout::Horizontal, None)
        .unwrap();
    anim.set_duration(duration).unwrap();
    anim
}

#[test]
fn test_cumulative_duration_stops_on_last_frame() {
    for frames in [1u8, 2, 3, 5, 8, 255] {
        for (duration, steps) in [(1.0f32, 4u32), (0.5, 8), (2.0, 16), (3.0, 1)] {
            let mut anim = horizontal(frames, duration);
            anim.rewind();
            anim.play(PlayState::DEFAULT);
            let dt = duration / steps as f32;
            let mut elapsed = 0.0f32;
            for _ in 0..steps - 1 {
                anim.update(dt);
                elapsed += dt;
            }
            anim.update(duration - elapsed);
            assert_eq!(
                anim.current_frame(),
                frames - 1,
                "frames={frames} duration={duration}"
            );
            assert!(!anim.is_playing(), "frames={frames} duration={duration}");
        }
    }
}

#[test]
fn test_looped_forward_is_periodic() {
    let mut a = horizontal(3, 1.5);
    let mut b = horizontal(3, 1.5);
    a.play(PlayState::LOOPED);
    b.play(PlayState::LOOPED);
    // b runs one full cycle ahead, ending exactly on the wrap.
    for _ in 0..12 {
        b.update(0.125);
    }
    assert_eq!(b.current_frame(), 0);
    for _ in 0..20 {
        a.update(0.125);
        b.update(0.125);
        assert_eq!(a.current_frame(), b.current_frame());
    }
}

#[test]
fn test_stop_then_play_reproduces_fresh_state() {
    let fresh = horizontal(5, 1.0);
    let mut anim = horizontal(5, 1.0);
    anim.play(PlayState::LOOPED | PlayState::FLIP_X);
    for _ in 0..7 {
        anim.update(0.09);
    }
    anim.stop();
    anim.play(PlayState::DEFAULT);
    assert_eq!(anim.current_frame(), fresh.current_frame());
    assert!(approx_eq(anim.clock(), fresh.clock()));
    assert_eq!(anim.texture_rect(), fresh.texture_rect());
}

#[test]
fn test_reverse_is_time_reverse_of_forward() {
    let mut reversed = horizontal(3, 1.0);
    reversed.play(PlayState::REVERSED | PlayState::LOOPED);
    for step in 1..8 {
        reversed.update(0.125);
        let t = step as f32 * 0.125;

        let mut forward = horizontal(3, 1.0);
        forward.play(PlayState::LOOPED);
        let mut elapsed = 0.0;
        while elapsed < 1.0 - t {
            forward.update(0.125);
            elapsed += 0.125;
        }
        assert_eq!(reversed.current_frame(), forward.current_frame(), "t={t}");
    }
}

#[test]
fn test_horizontal_mapper() {
    let size = FrameSize::new(256, 256);
    assert_eq!(
        frame_rect(SheetLayout::Horizontal, size, 1),
        FrameRect::new(256, 0, 256, 256)
    );
    assert_eq!(
        frame_rect(SheetLayout::Horizontal, size, 2),
        FrameRect::new(512, 0, 256, 256)
    );
}

#[test]
fn test_block_mapper_rows() {
    let size = FrameSize::new(96, 125);
    let layout = SheetLayout::Block(BlockGrid::new(4, 2));
    let rect = frame_rect(layout, size, 4);
    assert_eq!(rect.x, 0);
    assert_eq!(rect.y, 125);
    for frame in 0..4 {
        assert_eq!(frame_rect(layout, size, frame).y, 0);
    }
    for frame in 4..8 {
        assert_eq!(frame_rect(layout, size, frame).y, 125);
    }
}

#[test]
fn test_flip_bits_drive_scale_signs() {
    let mut anim = horizontal(3, 1.0);
    anim.set_state(PlayState::FLIP_X | PlayState::FLIP_Y);
    assert_eq!(anim.update(0.1), Tick::Idle);
    assert!(anim.scale().x < 0.0 && anim.scale().y < 0.0);

    anim.set_state(PlayState::FLIP_X);
    anim.update(0.1);
    assert!(anim.scale().x < 0.0 && anim.scale().y > 0.0);

    anim.set_state(PlayState::DEFAULT);
    anim.update(0.1);
    assert!(anim.scale().x > 0.0 && anim.scale().y > 0.0);
}

#[test]
fn test_copy_has_independent_position() {
    let mut loader = InMemorySheetLoader::new().with_image("strip.png", 192, 64);
    let mut anim = Animation::new(FrameSize::new(64, 64), 3).unwrap();
    anim.set_sprite_sheet(&mut loader, "strip.png", SheetLayout::Horizontal, None)
        .unwrap();
    let mut copy = anim.try_clone_with(&mut loader).unwrap();
    copy.set_position(Vector2 { x: 400.0, y: 300.0 });
    assert!(approx_eq(anim.position().x, 0.0));
    assert!(approx_eq(anim.position().y, 0.0));
    assert!(approx_eq(copy.position().x, 400.0));
}

#[test]
fn test_many_animations_update_independently() {
    let mut fast = horizontal(4, 0.5);
    let mut slow = horizontal(4, 2.0);
    fast.play(PlayState::DEFAULT);
    slow.play(PlayState::LOOPED);
    for _ in 0..4 {
        fast.update(0.125);
        slow.update(0.125);
    }
    assert!(!fast.is_playing());
    assert_eq!(fast.current_frame(), 3);
    assert!(slow.is_playing());
    assert_eq!(slow.current_frame(), 1);
}
