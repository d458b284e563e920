//! Error type shared by the animation core and its collaborators.
//!
//! Errors fall in three categories:
//! - configuration errors, rejected at the boundary before any state changes,
//! - asset load errors, raised by a [`SpriteSheetLoader`](crate::resources::sheetloader::SpriteSheetLoader),
//! - allocation errors, raised when a texture cannot be created or duplicated.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnimationError {
    #[error("an animation needs at least one frame")]
    ZeroFrameCount,

    #[error("frame size must be non-zero, got {width}x{height}")]
    ZeroFrameSize { width: u32, height: u32 },

    #[error("duration must be a positive number of seconds, got {0}")]
    InvalidDuration(f32),

    #[error("frame rate must be a positive number of frames per second, got {0}")]
    InvalidFrameRate(f32),

    #[error("block grid needs at least one column and one row, got {columns}x{rows}")]
    EmptyBlockGrid { columns: u32, rows: u32 },

    #[error("sprite sheet of {frames} frames of {width}x{height} exceeds the addressable texture size")]
    RegionTooLarge { width: u32, height: u32, frames: u8 },

    #[error("unknown sprite sheet layout '{0}' (expected horizontal, vertical or block)")]
    UnknownLayout(String),

    #[error("failed to load sprite sheet '{path}': {reason}")]
    AssetLoad { path: String, reason: String },

    #[error(
        "sprite sheet region {width}x{height} at ({x}, {y}) does not fit in '{path}' ({image_width}x{image_height})"
    )]
    RegionOutOfBounds {
        path: String,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },

    #[error("failed to allocate {what}: {reason}")]
    Allocation { what: &'static str, reason: String },
}

impl AnimationError {
    /// Invalid values handed to a constructor or setter.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            AnimationError::ZeroFrameCount
                | AnimationError::ZeroFrameSize { .. }
                | AnimationError::InvalidDuration(_)
                | AnimationError::InvalidFrameRate(_)
                | AnimationError::EmptyBlockGrid { .. }
                | AnimationError::RegionTooLarge { .. }
                | AnimationError::UnknownLayout(_)
        )
    }

    pub fn is_asset_load(&self) -> bool {
        matches!(
            self,
            AnimationError::AssetLoad { .. } | AnimationError::RegionOutOfBounds { .. }
        )
    }

    pub fn is_allocation(&self) -> bool {
        matches!(self, AnimationError::Allocation { .. })
    }
}
