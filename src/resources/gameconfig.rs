//! Game configuration resource.
//!
//! Manages window settings and the demo animation setup, loaded from an INI
//! configuration file. Defaults reproduce the stock demo: a three frame,
//! 256x256 horizontal strip played once at one frame per second.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 1280
//! height = 720
//! target_fps = 120
//! title = Animation
//!
//! [loop]
//! max_delta = 1.0
//!
//! [animation]
//! sheet = assets/images/test.png
//! layout = horizontal
//! frame_width = 256
//! frame_height = 256
//! frames = 3
//! framerate = 1.0
//! offset_x = 0
//! offset_y = 0
//! columns = 1
//! rows = 1
//! looped = false
//! reversed = false
//! flip_x = false
//! flip_y = false
//! position_x = 128
//! position_y = 128
//! ```
//!
//! `layout` is one of `horizontal`, `vertical` or `block`; `columns` and
//! `rows` only matter for `block`. `duration = 3.0` may replace `framerate`
//! and wins when both are present.

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use raylib::prelude::Vector2;
use std::path::PathBuf;

use crate::components::animation::Animation;
use crate::components::playstate::PlayState;
use crate::components::spritesheet::{BlockGrid, FrameSize, LayoutKind, SheetLayout, SheetOffset};
use crate::error::AnimationError;

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 120;
const DEFAULT_TITLE: &str = "Animation";
const DEFAULT_MAX_DELTA: f32 = 1.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

const DEFAULT_SHEET: &str = "assets/images/test.png";
const DEFAULT_FRAME_SIZE: u32 = 256;
const DEFAULT_FRAMES: u8 = 3;
const DEFAULT_FRAMERATE: f32 = 1.0;

/// How the animation cycle length is given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Timing {
    /// Frames per second; duration is `frames / framerate`.
    Framerate(f32),
    /// Seconds per cycle.
    Duration(f32),
}

/// The `[animation]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSettings {
    pub sheet: String,
    pub layout: LayoutKind,
    pub frame_size: FrameSize,
    pub frames: u8,
    pub timing: Timing,
    pub offset: SheetOffset,
    pub grid: BlockGrid,
    pub state: PlayState,
    pub position: (f32, f32),
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            sheet: DEFAULT_SHEET.to_string(),
            layout: LayoutKind::Horizontal,
            frame_size: FrameSize::new(DEFAULT_FRAME_SIZE, DEFAULT_FRAME_SIZE),
            frames: DEFAULT_FRAMES,
            timing: Timing::Framerate(DEFAULT_FRAMERATE),
            offset: SheetOffset::default(),
            grid: BlockGrid::default(),
            state: PlayState::DEFAULT,
            position: (
                DEFAULT_FRAME_SIZE as f32 / 2.0,
                DEFAULT_FRAME_SIZE as f32 / 2.0,
            ),
        }
    }
}

impl AnimationSettings {
    pub fn sheet_layout(&self) -> Result<SheetLayout, AnimationError> {
        SheetLayout::from_kind(self.layout, self.grid)
    }

    /// Create a stopped animation with these frame, timing and placement
    /// settings. The sprite sheet is loaded separately.
    pub fn build_animation<T>(&self) -> Result<Animation<T>, AnimationError> {
        self.sheet_layout()?;
        let mut anim = Animation::new(self.frame_size, self.frames)?;
        match self.timing {
            Timing::Framerate(rate) => anim.set_framerate(rate)?,
            Timing::Duration(duration) => anim.set_duration(duration)?,
        }
        anim.set_state(self.state);
        anim.move_by(Vector2 {
            x: self.position.0,
            y: self.position.1,
        });
        Ok(anim)
    }
}

/// Game configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    pub title: String,
    /// Ticks with a delta at or above this many seconds are skipped.
    pub max_delta: f32,
    pub animation: AnimationSettings,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            title: DEFAULT_TITLE.to_string(),
            max_delta: DEFAULT_MAX_DELTA,
            animation: AnimationSettings::default(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or a value is invalid;
    /// nothing is changed in that case.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config)?;
        info!("Loaded config from {:?}", self.config_path);
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config)
    }

    fn apply(&mut self, config: &Ini) -> Result<(), String> {
        let mut next = self.clone();
        next.apply_values(config)?;
        *self = next;

        info!(
            "Config: {}x{} window, fps={}, sheet='{}' ({}, {} frames of {}x{})",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.animation.sheet,
            self.animation.layout,
            self.animation.frames,
            self.animation.frame_size.width,
            self.animation.frame_size.height
        );
        Ok(())
    }

    fn apply_values(&mut self, config: &Ini) -> Result<(), String> {
        let uint = |section: &str, key: &str| -> Result<Option<u32>, String> {
            match config.getuint(section, key).ok().flatten() {
                Some(value) => u32::try_from(value)
                    .map(Some)
                    .map_err(|_| format!("[{}] {} is too large: {}", section, key, value)),
                None => Ok(None),
            }
        };

        // [window] section
        if let Some(width) = uint("window", "width")? {
            self.window_width = width;
        }
        if let Some(height) = uint("window", "height")? {
            self.window_height = height;
        }
        if let Some(fps) = uint("window", "target_fps")? {
            self.target_fps = fps;
        }
        if let Some(title) = config.get("window", "title") {
            self.title = title;
        }

        // [loop] section
        if let Some(max_delta) = config.getfloat("loop", "max_delta").ok().flatten() {
            self.max_delta = max_delta as f32;
        }

        // [animation] section
        let anim = &mut self.animation;
        if let Some(sheet) = config.get("animation", "sheet") {
            anim.sheet = sheet;
        }
        if let Some(layout) = config.get("animation", "layout") {
            anim.layout = layout.parse::<LayoutKind>().map_err(|e: AnimationError| e.to_string())?;
        }
        if let Some(width) = uint("animation", "frame_width")? {
            anim.frame_size.width = width;
        }
        if let Some(height) = uint("animation", "frame_height")? {
            anim.frame_size.height = height;
        }
        if let Some(frames) = config.getuint("animation", "frames").ok().flatten() {
            anim.frames = u8::try_from(frames)
                .map_err(|_| format!("frames must be between 1 and 255, got {}", frames))?;
        }
        // duration wins when both are given
        if let Some(rate) = config.getfloat("animation", "framerate").ok().flatten() {
            anim.timing = Timing::Framerate(rate as f32);
        }
        if let Some(duration) = config.getfloat("animation", "duration").ok().flatten() {
            anim.timing = Timing::Duration(duration as f32);
        }
        if let Some(x) = uint("animation", "offset_x")? {
            anim.offset.x = x;
        }
        if let Some(y) = uint("animation", "offset_y")? {
            anim.offset.y = y;
        }
        if let Some(columns) = uint("animation", "columns")? {
            anim.grid.columns = columns;
        }
        if let Some(rows) = uint("animation", "rows")? {
            anim.grid.rows = rows;
        }
        let switch = |key: &str, current: bool| {
            config
                .getbool("animation", key)
                .ok()
                .flatten()
                .unwrap_or(current)
        };
        anim.state = PlayState::from_switches(
            switch("looped", anim.state.is_looped()),
            switch("reversed", anim.state.is_reversed()),
            switch("flip_x", anim.state.contains(PlayState::FLIP_X)),
            switch("flip_y", anim.state.contains(PlayState::FLIP_Y)),
        );
        if let Some(x) = config.getfloat("animation", "position_x").ok().flatten() {
            anim.position.0 = x as f32;
        }
        if let Some(y) = config.getfloat("animation", "position_y").ok().flatten() {
            anim.position.1 = y as f32;
        }
        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [window] section
        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));
        config.set("window", "title", Some(self.title.clone()));

        // [loop] section
        config.set("loop", "max_delta", Some(self.max_delta.to_string()));

        // [animation] section
        let anim = &self.animation;
        config.set("animation", "sheet", Some(anim.sheet.clone()));
        config.set("animation", "layout", Some(anim.layout.to_string()));
        config.set("animation", "frame_width", Some(anim.frame_size.width.to_string()));
        config.set("animation", "frame_height", Some(anim.frame_size.height.to_string()));
        config.set("animation", "frames", Some(anim.frames.to_string()));
        match anim.timing {
            Timing::Framerate(rate) => config.set("animation", "framerate", Some(rate.to_string())),
            Timing::Duration(d) => config.set("animation", "duration", Some(d.to_string())),
        };
        config.set("animation", "offset_x", Some(anim.offset.x.to_string()));
        config.set("animation", "offset_y", Some(anim.offset.y.to_string()));
        config.set("animation", "columns", Some(anim.grid.columns.to_string()));
        config.set("animation", "rows", Some(anim.grid.rows.to_string()));
        config.set("animation", "looped", Some(anim.state.is_looped().to_string()));
        config.set("animation", "reversed", Some(anim.state.is_reversed().to_string()));
        config.set(
            "animation",
            "flip_x",
            Some(anim.state.contains(PlayState::FLIP_X).to_string()),
        );
        config.set(
            "animation",
            "flip_y",
            Some(anim.state.contains(PlayState::FLIP_Y).to_string()),
        );
        config.set("animation", "position_x", Some(anim.position.0.to_string()));
        config.set("animation", "position_y", Some(anim.position.1.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::sheetloader::SheetTexture;

    #[test]
    fn test_defaults_match_stock_demo() {
        let config = GameConfig::new();
        assert_eq!(config.window_size(), (1280, 720));
        assert_eq!(config.animation.frames, 3);
        assert_eq!(config.animation.layout, LayoutKind::Horizontal);
        assert_eq!(config.animation.timing, Timing::Framerate(1.0));
        assert_eq!(config.max_delta, 1.0);
    }

    #[test]
    fn test_load_block_section() {
        let mut config = GameConfig::new();
        config
            .load_from_str(
                "[window]\nwidth = 640\nheight = 360\n\
                 [animation]\nsheet = hero.png\nlayout = block\nframe_width = 96\n\
                 frame_height = 125\nframes = 8\nduration = 0.8\ncolumns = 4\nrows = 2\n\
                 looped = true\nflip_x = true\n",
            )
            .unwrap();
        assert_eq!(config.window_size(), (640, 360));
        let anim = &config.animation;
        assert_eq!(anim.sheet, "hero.png");
        assert_eq!(anim.sheet_layout().unwrap(), SheetLayout::Block(BlockGrid::new(4, 2)));
        assert_eq!(anim.frame_size, FrameSize::new(96, 125));
        assert_eq!(anim.timing, Timing::Duration(0.8));
        assert!(anim.state.is_looped());
        assert!(anim.state.contains(PlayState::FLIP_X));
        assert!(!anim.state.is_reversed());
    }

    #[test]
    fn test_unknown_layout_is_rejected() {
        let mut config = GameConfig::new();
        let err = config
            .load_from_str("[animation]\nlayout = diagonal\n")
            .unwrap_err();
        assert!(err.contains("diagonal"));
    }

    #[test]
    fn test_too_many_frames_is_rejected() {
        let mut config = GameConfig::new();
        assert!(config.load_from_str("[animation]\nframes = 300\n").is_err());
        assert!(config
            .load_from_str("[animation]\nframe_width = 5000000000\n")
            .is_err());
    }

    #[test]
    fn test_rejected_config_changes_nothing() {
        let mut config = GameConfig::new();
        let err = config.load_from_str(
            "[window]\nwidth = 640\ntitle = other\n\
             [animation]\nsheet = hero.png\nlayout = diagonal\n",
        );
        assert!(err.is_err());
        assert_eq!(config.window_size(), (1280, 720));
        assert_eq!(config.title, "Animation");
        assert_eq!(config.animation, AnimationSettings::default());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "sheetanim_config_{}.ini",
            std::process::id()
        ));
        let mut saved = GameConfig::with_path(&path);
        saved.window_width = 640;
        saved.window_height = 480;
        saved.target_fps = 60;
        saved.title = "demo".to_string();
        saved.max_delta = 0.25;
        saved.animation = AnimationSettings {
            sheet: "hero.png".to_string(),
            layout: LayoutKind::Block,
            frame_size: FrameSize::new(96, 125),
            frames: 8,
            timing: Timing::Duration(0.8),
            offset: SheetOffset::new(4, 12),
            grid: BlockGrid::new(4, 2),
            state: PlayState::from_switches(true, false, false, true),
            position: (300.0, 200.5),
        };
        saved.save_to_file().unwrap();

        let mut loaded = GameConfig::with_path(&path);
        let result = loaded.load_from_file();
        let _ = std::fs::remove_file(&path);
        result.unwrap();

        assert_eq!(loaded.window_size(), (640, 480));
        assert_eq!(loaded.target_fps, 60);
        assert_eq!(loaded.title, "demo");
        assert!((loaded.max_delta - 0.25).abs() < 1e-6);
        assert_eq!(loaded.animation, saved.animation);
    }

    #[test]
    fn test_build_animation_applies_timing_and_position() {
        let settings = AnimationSettings::default();
        let anim: Animation<SheetTexture> = settings.build_animation().unwrap();
        assert_eq!(anim.frames_nb(), 3);
        assert!((anim.duration() - 3.0).abs() < 1e-6);
        assert!((anim.position().x - 128.0).abs() < 1e-6);
        assert!(!anim.is_playing());
    }

    #[test]
    fn test_build_animation_rejects_zero_framerate() {
        let settings = AnimationSettings {
            timing: Timing::Framerate(0.0),
            ..AnimationSettings::default()
        };
        let err = settings.build_animation::<SheetTexture>().err().unwrap();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_build_animation_rejects_empty_block_grid() {
        let settings = AnimationSettings {
            layout: LayoutKind::Block,
            grid: BlockGrid::new(0, 2),
            ..AnimationSettings::default()
        };
        assert_eq!(
            settings.build_animation::<SheetTexture>().err(),
            Some(AnimationError::EmptyBlockGrid { columns: 0, rows: 2 })
        );
    }
}
