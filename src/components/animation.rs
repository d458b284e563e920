//! Sprite-sheet animation component.
//!
//! [`Animation`] combines a playback clock with a frame-to-rectangle mapper.
//! Once per tick the caller hands it the elapsed time through
//! [`Animation::update`]; the animation advances its clock, derives the
//! current frame index and points its [`SpriteView`] at the matching
//! sub-rectangle of the sprite sheet.
//!
//! # Playback
//!
//! - Forward: the clock grows by `dt`, and the frame is
//!   `floor(clock / duration * frames)`. Once the clock reaches the end of the
//!   cycle the animation either wraps to frame 0 ([`PlayState::LOOPED`]) or
//!   stops on the last frame.
//! - Reverse ([`PlayState::REVERSED`]): the clock shrinks by `dt`. Once it
//!   drops below zero the animation wraps to the last frame or stops on
//!   frame 0.
//! - The frame index is clamped to `[0, frames - 1]` after every computation.
//! - Flip flags are folded into the applied scale on every tick, playing or not.
//!
//! The component is generic over the texture handle so the clock and mapper
//! run without a GPU; the engine uses [`SheetAnimation`].

use bevy_ecs::prelude::Component;
use log::debug;
use raylib::prelude::{Color, RaylibDraw, Rectangle, Texture2D, Vector2};

use crate::components::playstate::PlayState;
use crate::components::spritesheet::{
    FrameRect, FrameSize, SheetLayout, SheetOffset, frame_rect, sheet_region,
};
use crate::components::spriteview::{SpriteView, Transform2D};
use crate::error::AnimationError;
use crate::resources::sheetloader::SpriteSheetLoader;

/// Animation drawn from a GPU texture.
pub type SheetAnimation = Animation<Texture2D>;

const DEFAULT_DURATION: f32 = 1.0;

/// What a call to [`Animation::update`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Not playing; only orientation was refreshed.
    Idle,
    /// The clock moved and the frame was recomputed.
    Advanced,
    /// A looped cycle ended and playback restarted.
    Wrapped,
    /// A non-looped cycle ended and playback stopped.
    Finished,
}

#[derive(Component)]
pub struct Animation<T> {
    frame_size: FrameSize,
    frames_nb: u8,
    current_frame: u8,
    clock: f32,
    duration: f32,
    playing: bool,
    state: PlayState,
    layout: SheetLayout,
    offset: SheetOffset,
    texture: Option<T>,
    view: SpriteView,
    /// Scale set by the caller; flips are applied on top of it each tick.
    scale: Vector2,
}

impl<T> Animation<T> {
    /// New stopped animation with a one second cycle and no sprite sheet.
    ///
    /// The view origin is placed at the frame center.
    pub fn new(frame_size: FrameSize, frames_nb: u8) -> Result<Self, AnimationError> {
        let frame_size = frame_size.validate()?;
        if frames_nb == 0 {
            return Err(AnimationError::ZeroFrameCount);
        }
        let frame_size = frame_size.check_frames(frames_nb)?;
        let mut view = SpriteView::default();
        view.set_origin(Vector2 {
            x: frame_size.width as f32 / 2.0,
            y: frame_size.height as f32 / 2.0,
        });
        let mut anim = Self {
            frame_size,
            frames_nb,
            current_frame: 0,
            clock: 0.0,
            duration: DEFAULT_DURATION,
            playing: false,
            state: PlayState::DEFAULT,
            layout: SheetLayout::default(),
            offset: SheetOffset::default(),
            texture: None,
            view,
            scale: Vector2 { x: 1.0, y: 1.0 },
        };
        anim.refresh_rect();
        Ok(anim)
    }

    /// Load the sprite sheet and bind the view to its first frame.
    ///
    /// On failure the previous texture, layout and offset are kept.
    pub fn set_sprite_sheet<L>(
        &mut self,
        loader: &mut L,
        path: &str,
        layout: SheetLayout,
        offset: Option<SheetOffset>,
    ) -> Result<(), AnimationError>
    where
        L: SpriteSheetLoader<Texture = T>,
    {
        let offset = offset.unwrap_or_default();
        let region = sheet_region(layout, self.frame_size, self.frames_nb, offset)?;
        let texture = loader.load_region(path, region)?;

        self.texture = Some(texture);
        self.layout = layout;
        self.offset = offset;
        self.view
            .set_texture_rect(frame_rect(layout, self.frame_size, 0));
        debug!(
            "Sprite sheet '{}' bound as {} ({} frames of {}x{})",
            path,
            layout.kind(),
            self.frames_nb,
            self.frame_size.width,
            self.frame_size.height
        );
        Ok(())
    }

    /// Advance playback by `dt` seconds.
    pub fn update(&mut self, dt: f32) -> Tick {
        let (sx, sy) = self.state.flip_signs();
        self.view.set_scale(Vector2 {
            x: self.scale.x * sx,
            y: self.scale.y * sy,
        });

        if !self.playing {
            return Tick::Idle;
        }

        let tick = if self.state.is_reversed() {
            self.step_backward(dt)
        } else {
            self.step_forward(dt)
        };
        self.refresh_rect();
        tick
    }

    fn step_forward(&mut self, dt: f32) -> Tick {
        self.clock += dt;
        let next = self.frame_at(self.clock);
        if self.clock >= self.duration && next > self.last_frame_index() {
            if self.state.is_looped() {
                self.clock = 0.0;
                self.current_frame = 0;
                Tick::Wrapped
            } else {
                self.playing = false;
                self.current_frame = self.frames_nb - 1;
                Tick::Finished
            }
        } else {
            self.current_frame = self.clamp_frame(next);
            Tick::Advanced
        }
    }

    fn step_backward(&mut self, dt: f32) -> Tick {
        self.clock -= dt;
        let next = self.frame_at(self.clock);
        if self.clock < 0.0 && next < 0 {
            if self.state.is_looped() {
                self.clock = self.duration;
                self.current_frame = self.frames_nb - 1;
                Tick::Wrapped
            } else {
                self.playing = false;
                self.current_frame = 0;
                Tick::Finished
            }
        } else {
            self.current_frame = self.clamp_frame(next);
            Tick::Advanced
        }
    }

    fn frame_at(&self, clock: f32) -> i64 {
        let progress = f64::from(clock) / f64::from(self.duration);
        (progress * f64::from(self.frames_nb)).floor() as i64
    }

    fn last_frame_index(&self) -> i64 {
        i64::from(self.frames_nb) - 1
    }

    fn clamp_frame(&self, frame: i64) -> u8 {
        frame.clamp(0, self.last_frame_index()) as u8
    }

    fn refresh_rect(&mut self) {
        self.view
            .set_texture_rect(frame_rect(self.layout, self.frame_size, self.current_frame));
    }

    /// Start playing with `state`.
    ///
    /// A reversed play that starts from the beginning of the cycle is seeded
    /// at the end of the cycle, on the last frame.
    pub fn play(&mut self, state: PlayState) {
        self.playing = true;
        self.state = state;
        if state.is_reversed() && self.clock <= 0.0 {
            self.clock = self.duration;
            self.current_frame = self.frames_nb - 1;
            self.refresh_rect();
        }
        debug!("Animation playing with state {:?}", state);
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Back to the start of the cycle for the current direction.
    pub fn rewind(&mut self) {
        if self.state.is_reversed() {
            self.clock = self.duration;
            self.current_frame = self.frames_nb - 1;
        } else {
            self.clock = 0.0;
            self.current_frame = 0;
        }
        self.refresh_rect();
    }

    /// Pause and rewind.
    pub fn stop(&mut self) {
        self.pause();
        self.rewind();
        debug!("Animation stopped");
    }

    /// Whether the clock sits past the end of the cycle for the current direction.
    pub fn has_finished(&self) -> bool {
        if self.state.is_reversed() {
            self.clock < 0.0
        } else {
            self.clock >= self.duration
        }
    }

    /// Deep copy: the texture is duplicated through `loader`, the view is cloned.
    pub fn try_clone_with<L>(&self, loader: &mut L) -> Result<Self, AnimationError>
    where
        L: SpriteSheetLoader<Texture = T>,
    {
        let texture = match &self.texture {
            Some(texture) => Some(loader.duplicate(texture)?),
            None => None,
        };
        Ok(Self {
            frame_size: self.frame_size,
            frames_nb: self.frames_nb,
            current_frame: self.current_frame,
            clock: self.clock,
            duration: self.duration,
            playing: self.playing,
            state: self.state,
            layout: self.layout,
            offset: self.offset,
            texture,
            view: self.view.clone(),
            scale: self.scale,
        })
    }

    // Getters

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Frames per second, `frames / duration`.
    pub fn framerate(&self) -> f32 {
        f32::from(self.frames_nb) / self.duration
    }

    pub fn current_frame(&self) -> u8 {
        self.current_frame
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn frame_size(&self) -> FrameSize {
        self.frame_size
    }

    pub fn frames_nb(&self) -> u8 {
        self.frames_nb
    }

    pub fn layout(&self) -> SheetLayout {
        self.layout
    }

    pub fn sheet_offset(&self) -> SheetOffset {
        self.offset
    }

    /// The loaded sprite sheet, if any.
    pub fn texture(&self) -> Option<&T> {
        self.texture.as_ref()
    }

    /// Source rectangle of the displayed frame.
    pub fn texture_rect(&self) -> FrameRect {
        self.view.texture_rect()
    }

    // Setters

    pub fn set_duration(&mut self, duration: f32) -> Result<(), AnimationError> {
        if !(duration.is_finite() && duration > 0.0) {
            return Err(AnimationError::InvalidDuration(duration));
        }
        self.duration = duration;
        Ok(())
    }

    /// Set the duration from a frame rate: `duration = frames / framerate`.
    pub fn set_framerate(&mut self, framerate: f32) -> Result<(), AnimationError> {
        if !(framerate.is_finite() && framerate > 0.0) {
            return Err(AnimationError::InvalidFrameRate(framerate));
        }
        self.set_duration(f32::from(self.frames_nb) / framerate)
    }

    pub fn set_state(&mut self, state: PlayState) {
        self.state = state;
    }

    pub fn set_frame_size(&mut self, frame_size: FrameSize) -> Result<(), AnimationError> {
        self.frame_size = frame_size.validate()?.check_frames(self.frames_nb)?;
        self.refresh_rect();
        Ok(())
    }

    pub fn set_frames_nb(&mut self, frames_nb: u8) -> Result<(), AnimationError> {
        if frames_nb == 0 {
            return Err(AnimationError::ZeroFrameCount);
        }
        self.frame_size.check_frames(frames_nb)?;
        self.frames_nb = frames_nb;
        self.current_frame = self.current_frame.min(frames_nb - 1);
        self.refresh_rect();
        Ok(())
    }

    // Transform pass-through

    pub fn position(&self) -> Vector2 {
        self.view.position()
    }

    pub fn set_position(&mut self, position: Vector2) {
        self.view.set_position(position);
    }

    pub fn move_by(&mut self, offset: Vector2) {
        self.view.move_by(offset);
    }

    pub fn rotation(&self) -> f32 {
        self.view.rotation()
    }

    pub fn set_rotation(&mut self, degrees: f32) {
        self.view.set_rotation(degrees);
    }

    pub fn rotate_by(&mut self, degrees: f32) {
        self.view.rotate_by(degrees);
    }

    /// Applied scale, flips included.
    pub fn scale(&self) -> Vector2 {
        self.view.scale()
    }

    pub fn set_scale(&mut self, scale: Vector2) {
        self.scale = scale;
        self.view.set_scale(scale);
    }

    pub fn scale_by(&mut self, factors: Vector2) {
        self.scale.x *= factors.x;
        self.scale.y *= factors.y;
        let applied = self.view.scale();
        self.view.set_scale(Vector2 {
            x: applied.x * factors.x,
            y: applied.y * factors.y,
        });
    }

    pub fn origin(&self) -> Vector2 {
        self.view.origin()
    }

    pub fn set_origin(&mut self, origin: Vector2) {
        self.view.set_origin(origin);
    }

    pub fn transform(&self) -> Transform2D {
        self.view.transform()
    }

    pub fn inverse_transform(&self) -> Transform2D {
        self.view.inverse_transform()
    }

    pub fn color(&self) -> Color {
        self.view.color()
    }

    pub fn set_color(&mut self, color: Color) {
        self.view.set_color(color);
    }

    pub fn local_bounds(&self) -> Rectangle {
        self.view.local_bounds()
    }

    pub fn global_bounds(&self) -> Rectangle {
        self.view.global_bounds()
    }
}

impl Animation<Texture2D> {
    /// Paint the current frame. Does nothing until a sprite sheet is loaded.
    ///
    /// Negative scale axes are drawn by mirroring the source rectangle, with
    /// the pivot mirrored accordingly.
    pub fn draw<D: RaylibDraw>(&self, d: &mut D) {
        let Some(texture) = self.texture.as_ref() else {
            return;
        };
        let rect = self.view.texture_rect();
        let scale = self.view.scale();
        let origin = self.view.origin();
        let position = self.view.position();
        let (w, h) = (rect.width as f32, rect.height as f32);
        let (sx, sy) = (scale.x.abs(), scale.y.abs());

        let mut src = Rectangle {
            x: rect.x as f32,
            y: rect.y as f32,
            width: w,
            height: h,
        };
        let mut pivot = origin;
        if scale.x < 0.0 {
            src.width = -src.width;
            pivot.x = w - origin.x;
        }
        if scale.y < 0.0 {
            src.height = -src.height;
            pivot.y = h - origin.y;
        }

        let dest = Rectangle {
            x: position.x,
            y: position.y,
            width: w * sx,
            height: h * sy,
        };
        let pivot = Vector2 {
            x: pivot.x * sx,
            y: pivot.y * sy,
        };
        d.draw_texture_pro(
            texture,
            src,
            dest,
            pivot,
            self.view.rotation(),
            self.view.color(),
        );
    }
}
