//! Sprite-sheet animation engine.
//!
//! This module exposes the animation component, its sprite-sheet geometry,
//! and the ECS resources, systems and events that drive it, for use in
//! integration tests and as a reusable library.

pub mod components;
pub mod error;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
