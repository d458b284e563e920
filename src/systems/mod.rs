//! Engine systems.
//!
//! Submodules overview
//! - [`animation`] – advance animations by the tick delta and report finished cycles
//! - [`input`] – read hardware input and turn key presses into playback events
//! - [`render`] – draw animations and the debug overlay using Raylib
//! - [`time`] – update simulation time and delta

pub mod animation;
pub mod input;
pub mod render;
pub mod time;
