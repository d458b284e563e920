//! Debug toggle resource.
//!
//! When present, the render pass outlines every animation's global bounds
//! and prints its playback state.

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, systems may draw overlays or print extra logs.
#[derive(Resource, Clone, Copy, Debug)]
pub struct DebugMode {}
