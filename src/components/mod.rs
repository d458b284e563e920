//! ECS components and the types they are built from.
//!
//! Submodules overview:
//! - [`animation`] – sprite-sheet animation: playback clock, frame mapping, drawing
//! - [`playstate`] – play-state flags (loop, reverse, flips)
//! - [`spritesheet`] – sheet layouts and frame/region rectangles
//! - [`spriteview`] – drawable placement (position, rotation, scale, origin, tint)

pub mod animation;
pub mod playstate;
pub mod spritesheet;
pub mod spriteview;
