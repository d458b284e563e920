//! Event types and observers.
//!
//! Events let systems and the outside world steer animations without direct
//! dependencies.
//!
//! Submodules:
//! - [`playback`] – play/pause/stop/flag toggles and the cycle-finished notification
//! - [`switchdebug`] – toggle the debug overlay on/off
pub mod playback;
pub mod switchdebug;
