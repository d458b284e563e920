//! Sprite-sheet asset loading.
//!
//! The animation core never touches files itself. It computes the region of
//! the source image it needs and asks a [`SpriteSheetLoader`] for an owned
//! texture covering exactly that region. Two loaders are provided:
//!
//! - [`RaylibSheetLoader`] decodes the image with raylib, crops it and uploads
//!   the result to the GPU. It needs the raylib handle, so it only lives for
//!   the duration of a setup system.
//! - [`InMemorySheetLoader`] keeps only image sizes and hands out lightweight
//!   [`SheetTexture`] descriptors. It is used for headless runs and tests.

use std::collections::HashMap;

use log::{debug, info};
use raylib::prelude::*;

use crate::components::spritesheet::FrameRect;
use crate::error::AnimationError;

/// Produces owned textures for sprite-sheet regions.
pub trait SpriteSheetLoader {
    type Texture;

    /// Decode `path` and return a texture holding only `region`.
    fn load_region(&mut self, path: &str, region: FrameRect)
    -> Result<Self::Texture, AnimationError>;

    /// Deep copy of a texture previously returned by this loader.
    fn duplicate(&mut self, texture: &Self::Texture) -> Result<Self::Texture, AnimationError>;
}

fn check_region(
    path: &str,
    region: FrameRect,
    image_width: u32,
    image_height: u32,
) -> Result<(), AnimationError> {
    if region.is_empty() || !region.fits_in(image_width, image_height) {
        return Err(AnimationError::RegionOutOfBounds {
            path: path.to_string(),
            x: region.x,
            y: region.y,
            width: region.width,
            height: region.height,
            image_width,
            image_height,
        });
    }
    Ok(())
}

/// Loader backed by raylib images and GPU textures.
pub struct RaylibSheetLoader<'a> {
    rl: &'a mut RaylibHandle,
    thread: &'a RaylibThread,
}

impl<'a> RaylibSheetLoader<'a> {
    pub fn new(rl: &'a mut RaylibHandle, thread: &'a RaylibThread) -> Self {
        Self { rl, thread }
    }
}

impl SpriteSheetLoader for RaylibSheetLoader<'_> {
    type Texture = Texture2D;

    fn load_region(
        &mut self,
        path: &str,
        region: FrameRect,
    ) -> Result<Texture2D, AnimationError> {
        let mut image = Image::load_image(path).map_err(|e| AnimationError::AssetLoad {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        let image_width = image.width.max(0) as u32;
        let image_height = image.height.max(0) as u32;
        check_region(path, region, image_width, image_height)?;

        image.crop(Rectangle {
            x: region.x as f32,
            y: region.y as f32,
            width: region.width as f32,
            height: region.height as f32,
        });

        let texture = self
            .rl
            .load_texture_from_image(self.thread, &image)
            .map_err(|e| AnimationError::Allocation {
                what: "sprite sheet texture",
                reason: e.to_string(),
            })?;
        info!(
            "Loaded sprite sheet '{}' region {}x{} at ({}, {})",
            path, region.width, region.height, region.x, region.y
        );
        Ok(texture)
    }

    fn duplicate(&mut self, texture: &Texture2D) -> Result<Texture2D, AnimationError> {
        let image = texture
            .load_image()
            .map_err(|e| AnimationError::Allocation {
                what: "sprite sheet image copy",
                reason: e.to_string(),
            })?;
        self.rl
            .load_texture_from_image(self.thread, &image)
            .map_err(|e| AnimationError::Allocation {
                what: "sprite sheet texture copy",
                reason: e.to_string(),
            })
    }
}

/// Texture descriptor handed out by [`InMemorySheetLoader`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetTexture {
    pub path: String,
    pub region: FrameRect,
    /// Distinct for every texture created, copies included.
    pub id: u32,
}

/// Loader that only knows image sizes, registered up front.
#[derive(Debug, Default)]
pub struct InMemorySheetLoader {
    images: HashMap<String, (u32, u32)>,
    next_id: u32,
    /// Remaining textures that may be created; `None` means unlimited.
    budget: Option<u32>,
}

impl InMemorySheetLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, path: impl Into<String>, width: u32, height: u32) -> Self {
        self.insert_image(path, width, height);
        self
    }

    pub fn insert_image(&mut self, path: impl Into<String>, width: u32, height: u32) {
        self.images.insert(path.into(), (width, height));
    }

    /// Limit how many more textures can be created before allocation fails.
    pub fn with_texture_budget(mut self, budget: u32) -> Self {
        self.budget = Some(budget);
        self
    }

    fn allocate(&mut self, what: &'static str) -> Result<u32, AnimationError> {
        if let Some(budget) = self.budget.as_mut() {
            if *budget == 0 {
                return Err(AnimationError::Allocation {
                    what,
                    reason: "texture budget exhausted".to_string(),
                });
            }
            *budget -= 1;
        }
        let id = self.next_id;
        self.next_id += 1;
        Ok(id)
    }
}

impl SpriteSheetLoader for InMemorySheetLoader {
    type Texture = SheetTexture;

    fn load_region(
        &mut self,
        path: &str,
        region: FrameRect,
    ) -> Result<SheetTexture, AnimationError> {
        let Some(&(width, height)) = self.images.get(path) else {
            return Err(AnimationError::AssetLoad {
                path: path.to_string(),
                reason: "no such image".to_string(),
            });
        };
        check_region(path, region, width, height)?;
        let id = self.allocate("sprite sheet texture")?;
        debug!("In-memory sheet '{}' -> texture #{}", path, id);
        Ok(SheetTexture {
            path: path.to_string(),
            region,
            id,
        })
    }

    fn duplicate(&mut self, texture: &SheetTexture) -> Result<SheetTexture, AnimationError> {
        let id = self.allocate("sprite sheet texture copy")?;
        Ok(SheetTexture {
            id,
            ..texture.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_load_checks_bounds() {
        let mut loader = InMemorySheetLoader::new().with_image("sheet.png", 768, 256);
        let ok = loader.load_region("sheet.png", FrameRect::new(0, 0, 768, 256));
        assert!(ok.is_ok());

        let too_wide = loader.load_region("sheet.png", FrameRect::new(10, 0, 768, 256));
        assert!(matches!(
            too_wide,
            Err(AnimationError::RegionOutOfBounds { image_width: 768, .. })
        ));

        let missing = loader.load_region("other.png", FrameRect::new(0, 0, 1, 1));
        assert!(matches!(missing, Err(AnimationError::AssetLoad { .. })));
    }

    #[test]
    fn test_in_memory_duplicate_gets_new_id() {
        let mut loader = InMemorySheetLoader::new().with_image("sheet.png", 64, 64);
        let tex = loader
            .load_region("sheet.png", FrameRect::new(0, 0, 32, 32))
            .unwrap();
        let copy = loader.duplicate(&tex).unwrap();
        assert_ne!(tex.id, copy.id);
        assert_eq!(tex.region, copy.region);
    }

    #[test]
    fn test_budget_exhaustion_is_allocation_error() {
        let mut loader = InMemorySheetLoader::new()
            .with_image("sheet.png", 64, 64)
            .with_texture_budget(1);
        let tex = loader
            .load_region("sheet.png", FrameRect::new(0, 0, 32, 32))
            .unwrap();
        let err = loader.duplicate(&tex).unwrap_err();
        assert!(err.is_allocation());
    }
}
