//! Sprite-sheet geometry.
//!
//! A sprite sheet is one image holding every frame of an animation. The
//! [`SheetLayout`] tells how frames are arranged, and two pure functions turn
//! that arrangement into rectangles:
//!
//! - [`frame_rect`] maps a frame index to the sub-rectangle to display,
//! - [`sheet_region`] computes the region of the source image to load.
//!
//! All coordinates are in source-texture pixels, relative to the loaded region
//! (the sheet offset only matters when loading).

use std::fmt;
use std::str::FromStr;

use crate::error::AnimationError;

/// Size of one frame in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn validate(self) -> Result<Self, AnimationError> {
        if self.width == 0 || self.height == 0 {
            return Err(AnimationError::ZeroFrameSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }

    /// Check that `frames` frames laid out in a single row or column stay
    /// addressable with `u32` pixel coordinates.
    pub fn check_frames(self, frames: u8) -> Result<Self, AnimationError> {
        let count = u32::from(frames);
        if self.width.checked_mul(count).is_none() || self.height.checked_mul(count).is_none() {
            return Err(AnimationError::RegionTooLarge {
                width: self.width,
                height: self.height,
                frames,
            });
        }
        Ok(self)
    }
}

/// Top-left corner of the sprite sheet inside its source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SheetOffset {
    pub x: u32,
    pub y: u32,
}

impl SheetOffset {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Grid dimensions, in frames, of a block sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockGrid {
    pub columns: u32,
    pub rows: u32,
}

impl BlockGrid {
    pub fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    pub fn validate(self) -> Result<Self, AnimationError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(AnimationError::EmptyBlockGrid {
                columns: self.columns,
                rows: self.rows,
            });
        }
        Ok(self)
    }
}

impl Default for BlockGrid {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// Frame arrangement inside a sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SheetLayout {
    /// Frames side by side, left to right.
    #[default]
    Horizontal,
    /// Frames stacked, top to bottom.
    Vertical,
    /// Frames in rows of `columns`, left to right then top to bottom.
    Block(BlockGrid),
}

impl SheetLayout {
    /// Layout of the given kind, attaching `grid` when the kind is `Block`.
    pub fn from_kind(kind: LayoutKind, grid: BlockGrid) -> Result<Self, AnimationError> {
        match kind {
            LayoutKind::Horizontal => Ok(SheetLayout::Horizontal),
            LayoutKind::Vertical => Ok(SheetLayout::Vertical),
            LayoutKind::Block => Ok(SheetLayout::Block(grid.validate()?)),
        }
    }

    pub fn kind(&self) -> LayoutKind {
        match self {
            SheetLayout::Horizontal => LayoutKind::Horizontal,
            SheetLayout::Vertical => LayoutKind::Vertical,
            SheetLayout::Block(_) => LayoutKind::Block,
        }
    }
}

/// Layout name without its grid, as written in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    Horizontal,
    Vertical,
    Block,
}

impl FromStr for LayoutKind {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" => Ok(LayoutKind::Horizontal),
            "vertical" => Ok(LayoutKind::Vertical),
            "block" => Ok(LayoutKind::Block),
            _ => Err(AnimationError::UnknownLayout(s.to_string())),
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LayoutKind::Horizontal => "horizontal",
            LayoutKind::Vertical => "vertical",
            LayoutKind::Block => "block",
        };
        f.write_str(name)
    }
}

/// Integer rectangle in texture pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl FrameRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether the rectangle lies fully inside an image of the given size.
    pub fn fits_in(&self, image_width: u32, image_height: u32) -> bool {
        u64::from(self.x) + u64::from(self.width) <= u64::from(image_width)
            && u64::from(self.y) + u64::from(self.height) <= u64::from(image_height)
    }
}

/// Sub-rectangle of the loaded sheet showing `frame`.
///
/// Block rows are taken with integer division, so frames `0..columns` sit on
/// row 0, `columns..2*columns` on row 1, and so on.
///
/// Coordinates saturate at `u32::MAX`; sizes accepted by
/// [`FrameSize::check_frames`] never reach it.
pub fn frame_rect(layout: SheetLayout, frame_size: FrameSize, frame: u8) -> FrameRect {
    let frame = u32::from(frame);
    let FrameSize { width, height } = frame_size;
    match layout {
        SheetLayout::Horizontal => FrameRect::new(frame.saturating_mul(width), 0, width, height),
        SheetLayout::Vertical => FrameRect::new(0, frame.saturating_mul(height), width, height),
        SheetLayout::Block(grid) => {
            let columns = grid.columns.max(1);
            let block_pixel_width = columns.saturating_mul(width);
            let x = frame
                .saturating_mul(width)
                .checked_rem(block_pixel_width)
                .unwrap_or(0);
            let y = (frame / columns).saturating_mul(height);
            FrameRect::new(x, y, width, height)
        }
    }
}

/// Region of the source image holding the whole sheet.
pub fn sheet_region(
    layout: SheetLayout,
    frame_size: FrameSize,
    frames_nb: u8,
    offset: SheetOffset,
) -> Result<FrameRect, AnimationError> {
    let frame_size = frame_size.validate()?;
    if frames_nb == 0 {
        return Err(AnimationError::ZeroFrameCount);
    }
    let frames = u32::from(frames_nb);
    let too_large = || AnimationError::RegionTooLarge {
        width: frame_size.width,
        height: frame_size.height,
        frames: frames_nb,
    };
    let (width, height) = match layout {
        SheetLayout::Horizontal => (frame_size.width.checked_mul(frames), Some(frame_size.height)),
        SheetLayout::Vertical => (Some(frame_size.width), frame_size.height.checked_mul(frames)),
        SheetLayout::Block(grid) => {
            let grid = grid.validate()?;
            (
                grid.columns.checked_mul(frame_size.width),
                grid.rows.checked_mul(frame_size.height),
            )
        }
    };
    let (Some(width), Some(height)) = (width, height) else {
        return Err(too_large());
    };
    Ok(FrameRect::new(offset.x, offset.y, width, height))
}
