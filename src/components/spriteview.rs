//! Drawable view over a sprite-sheet texture.
//!
//! A [`SpriteView`] holds everything the renderer needs besides the texture
//! itself: the sub-rectangle to sample, the placement (position, origin,
//! rotation, scale) and a color tint. The owning
//! [`Animation`](crate::components::animation::Animation) drives the
//! sub-rectangle and the applied scale; everything else is set by callers.

use raylib::prelude::{Color, Rectangle, Vector2};

use crate::components::spritesheet::FrameRect;

/// 2D affine transform.
///
/// Maps `(x, y)` to `(a*x + b*y + tx, c*x + d*y + ty)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform2D {
    pub const IDENTITY: Transform2D = Transform2D {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    /// Translation, rotation (degrees, clockwise on screen) and scale around `origin`.
    pub fn from_parts(position: Vector2, origin: Vector2, rotation: f32, scale: Vector2) -> Self {
        let angle = -rotation.to_radians();
        let (sine, cosine) = angle.sin_cos();
        let sxc = scale.x * cosine;
        let syc = scale.y * cosine;
        let sxs = scale.x * sine;
        let sys = scale.y * sine;
        Self {
            a: sxc,
            b: sys,
            c: -sxs,
            d: syc,
            tx: -origin.x * sxc - origin.y * sys + position.x,
            ty: origin.x * sxs - origin.y * syc + position.y,
        }
    }

    pub fn transform_point(&self, p: Vector2) -> Vector2 {
        Vector2 {
            x: self.a * p.x + self.b * p.y + self.tx,
            y: self.c * p.x + self.d * p.y + self.ty,
        }
    }

    /// Inverse transform; a singular transform (zero scale) yields the identity.
    pub fn inverse(&self) -> Self {
        let det = self.a * self.d - self.b * self.c;
        if det == 0.0 {
            return Self::IDENTITY;
        }
        let inv = 1.0 / det;
        Self {
            a: self.d * inv,
            b: -self.b * inv,
            c: -self.c * inv,
            d: self.a * inv,
            tx: (self.b * self.ty - self.d * self.tx) * inv,
            ty: (self.c * self.tx - self.a * self.ty) * inv,
        }
    }

    /// Axis-aligned bounding box of a transformed rectangle.
    pub fn transform_rect(&self, rect: Rectangle) -> Rectangle {
        let corners = [
            self.transform_point(Vector2 { x: rect.x, y: rect.y }),
            self.transform_point(Vector2 {
                x: rect.x,
                y: rect.y + rect.height,
            }),
            self.transform_point(Vector2 {
                x: rect.x + rect.width,
                y: rect.y,
            }),
            self.transform_point(Vector2 {
                x: rect.x + rect.width,
                y: rect.y + rect.height,
            }),
        ];
        let (mut min_x, mut min_y) = (corners[0].x, corners[0].y);
        let (mut max_x, mut max_y) = (min_x, min_y);
        for p in &corners[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Rectangle {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }
}

/// Textured quad placement and sampling state.
#[derive(Debug, Clone)]
pub struct SpriteView {
    position: Vector2,
    origin: Vector2,
    rotation: f32,
    scale: Vector2,
    color: Color,
    texture_rect: FrameRect,
}

impl Default for SpriteView {
    fn default() -> Self {
        Self {
            position: Vector2 { x: 0.0, y: 0.0 },
            origin: Vector2 { x: 0.0, y: 0.0 },
            rotation: 0.0,
            scale: Vector2 { x: 1.0, y: 1.0 },
            color: Color::WHITE,
            texture_rect: FrameRect::default(),
        }
    }
}

impl SpriteView {
    pub fn position(&self) -> Vector2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vector2) {
        self.position = position;
    }

    pub fn move_by(&mut self, offset: Vector2) {
        self.position.x += offset.x;
        self.position.y += offset.y;
    }

    /// Rotation in degrees, always in `[0, 360)`.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees.rem_euclid(360.0);
    }

    pub fn rotate_by(&mut self, degrees: f32) {
        self.set_rotation(self.rotation + degrees);
    }

    pub fn scale(&self) -> Vector2 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vector2) {
        self.scale = scale;
    }

    pub fn origin(&self) -> Vector2 {
        self.origin
    }

    pub fn set_origin(&mut self, origin: Vector2) {
        self.origin = origin;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn texture_rect(&self) -> FrameRect {
        self.texture_rect
    }

    pub fn set_texture_rect(&mut self, rect: FrameRect) {
        self.texture_rect = rect;
    }

    pub fn transform(&self) -> Transform2D {
        Transform2D::from_parts(self.position, self.origin, self.rotation, self.scale)
    }

    pub fn inverse_transform(&self) -> Transform2D {
        self.transform().inverse()
    }

    /// Bounds in the view's own coordinates, ignoring placement.
    pub fn local_bounds(&self) -> Rectangle {
        Rectangle {
            x: 0.0,
            y: 0.0,
            width: self.texture_rect.width as f32,
            height: self.texture_rect.height as f32,
        }
    }

    /// Bounds in world coordinates, placement included.
    pub fn global_bounds(&self) -> Rectangle {
        self.transform().transform_rect(self.local_bounds())
    }
}
