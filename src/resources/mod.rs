//! ECS resources made available to systems.
//!
//! Overview
//! - `debugmode` – presence toggles the debug overlay
//! - `gameconfig` – window and demo animation settings from `config.ini`
//! - `input` – per-frame state of the playback keys
//! - `sheetloader` – sprite-sheet loaders (raylib and in-memory)
//! - `worldtime` – simulation time and delta
pub mod debugmode;
pub mod gameconfig;
pub mod input;
pub mod sheetloader;
pub mod worldtime;
