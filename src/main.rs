//! Sprite-sheet animation demo.
//!
//! Opens a window and plays the animation described by `config.ini`:
//! - **raylib** for windowing, texture loading and drawing
//! - **bevy_ecs** for the entity-component-system plumbing
//!
//! # Main Loop
//!
//! 1. Load [`GameConfig`] and open the raylib window
//! 2. Insert resources, register observers, run [`game::setup`] once
//! 3. Each frame:
//!    - Skip the update when the frame delta reaches `[loop] max_delta`
//!    - Otherwise update [`WorldTime`], read input and advance animations
//!    - Draw every animation, plus the overlay in debug mode (F11)
//!
//! # Keys
//!
//! Space play/pause, Enter stop, Backspace rewind, R reverse, L loop,
//! X/Y flip, F11 debug overlay.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --config config.ini
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use bevy_ecs::prelude::*;
use clap::Parser;
use log::{info, warn};
use raylib::prelude::Texture2D;
use std::path::PathBuf;

use sheetanim::events::playback::playback_observer;
use sheetanim::events::switchdebug::switch_debug_observer;
use sheetanim::game;
use sheetanim::resources::gameconfig::GameConfig;
use sheetanim::resources::input::InputState;
use sheetanim::resources::worldtime::WorldTime;
use sheetanim::systems::animation::animation;
use sheetanim::systems::input::update_input_state;
use sheetanim::systems::render::render_system;
use sheetanim::systems::time::update_world_time;

/// Sprite-sheet animation player
#[derive(Parser)]
#[command(version, about = "Plays a sprite-sheet animation described by an INI file.")]
struct Cli {
    /// Configuration file (default: ./config.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Sprite sheet image, overriding `[animation] sheet`.
    #[arg(long, value_name = "PATH")]
    sheet: Option<String>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // --------------- Configuration ---------------
    let mut config = match cli.config {
        Some(path) => GameConfig::with_path(path),
        None => GameConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }
    if let Some(sheet) = cli.sheet {
        config.animation.sheet = sheet;
    }
    let max_delta = config.max_delta;

    // --------------- Raylib window ---------------
    let (mut rl, thread) = raylib::init()
        .size(config.window_width as i32, config.window_height as i32)
        .resizable()
        .title(&config.title)
        .build();
    rl.set_target_fps(config.target_fps);

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(1.0));
    world.insert_resource(InputState::default());
    world.insert_resource(config);
    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    world.add_observer(playback_observer::<Texture2D>);
    world.add_observer(switch_debug_observer);
    world.add_observer(game::log_finished_observer);
    world.flush();

    let setup_system_id = world.register_system(game::setup);
    if let Err(e) = world.run_system(setup_system_id) {
        warn!("Setup failed: {}", e);
    }

    let mut update = Schedule::default();
    update.add_systems(update_input_state);
    update.add_systems(animation::<Texture2D>.after(update_input_state));

    let mut draw = Schedule::default();
    draw.add_systems(render_system);

    info!("Entering main loop");
    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();

        // Frames at or above max_delta are drawn but not simulated.
        if dt < max_delta {
            update_world_time(&mut world, dt);
            update.run(&mut world);
        }

        draw.run(&mut world);

        world.clear_trackers();
    }
}
