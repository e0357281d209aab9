//! Drawables: vector graphics and textured sprites

use glam::{Affine2, Vec2};
use serde::{Deserialize, Serialize};

use super::vertex::{colors, hex_to_rgba};
use crate::engine::TextureHandle;

/// How a drawable combines with what is below it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BlendMode {
    #[default]
    Normal,
    Add,
    Multiply,
    Screen,
}

/// Solid fill
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fill {
    /// 0xRRGGBB
    pub color: u32,
    pub alpha: f32,
}

impl Fill {
    pub const fn new(color: u32, alpha: f32) -> Self {
        Self { color, alpha }
    }

    pub const fn solid(color: u32) -> Self {
        Self { color, alpha: 1.0 }
    }

    pub fn rgba(&self) -> [f32; 4] {
        hex_to_rgba(self.color, self.alpha)
    }
}

impl Default for Fill {
    fn default() -> Self {
        Self::solid(colors::WHITE)
    }
}

/// Position, rotation (radians) and scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    pub position: Vec2,
    pub rotation: f32,
    pub scale: Vec2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
        }
    }
}

impl Transform2D {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn affine(&self) -> Affine2 {
        Affine2::from_scale_angle_translation(self.scale, self.rotation, self.position)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GraphicsShape {
    Circle { radius: f32, segments: u32 },
    /// Closed outline
    Polygon,
    /// Closed band, see `shapes::band`
    Band,
}

/// Vector shape with a solid fill
#[derive(Debug, Clone, PartialEq)]
pub struct Graphics {
    shape: GraphicsShape,
    points: Vec<Vec2>,
    pub fill: Fill,
    pub transform: Transform2D,
    pub visible: bool,
}

impl Graphics {
    fn with_shape(shape: GraphicsShape, points: Vec<Vec2>, fill: Fill) -> Self {
        Self {
            shape,
            points,
            fill,
            transform: Transform2D::default(),
            visible: true,
        }
    }

    /// Circle around the local origin
    pub fn circle(radius: f32, fill: Fill) -> Self {
        let segments = (radius * 4.0).clamp(16.0, 96.0) as u32;
        Self::with_shape(GraphicsShape::Circle { radius, segments }, Vec::new(), fill)
    }

    pub fn polygon(points: &[Vec2], fill: Fill) -> Self {
        Self::with_shape(GraphicsShape::Polygon, points.to_vec(), fill)
    }

    pub fn band(points: &[Vec2], fill: Fill) -> Self {
        Self::with_shape(GraphicsShape::Band, points.to_vec(), fill)
    }

    pub fn shape(&self) -> GraphicsShape {
        self.shape
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Replace the outline, keeping the allocation
    pub fn set_points(&mut self, points: &[Vec2]) {
        self.points.clear();
        self.points.extend_from_slice(points);
    }
}

/// Textured rectangle
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub texture: TextureHandle,
    /// Size at unit scale
    pub size: Vec2,
    /// Point of the sprite (0..1) placed at the position
    pub anchor: Vec2,
    pub transform: Transform2D,
    pub tint: u32,
    pub alpha: f32,
    pub blend: BlendMode,
    pub visible: bool,
}

impl Sprite {
    pub fn new(texture: TextureHandle, size: Vec2) -> Self {
        Self {
            texture,
            size,
            anchor: Vec2::ZERO,
            transform: Transform2D::default(),
            tint: colors::WHITE,
            alpha: 1.0,
            blend: BlendMode::Normal,
            visible: true,
        }
    }

    /// Displayed size (size times scale)
    pub fn display_size(&self) -> Vec2 {
        self.size * self.transform.scale.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_points_reuses_buffer() {
        let mut graphics = Graphics::band(&[Vec2::ZERO; 64], Fill::new(0, 0.65));
        let capacity = graphics.points.capacity();
        graphics.set_points(&[Vec2::ONE; 32]);
        assert_eq!(graphics.points().len(), 32);
        assert_eq!(graphics.points.capacity(), capacity);
        assert_eq!(graphics.shape(), GraphicsShape::Band);
    }

    #[test]
    fn test_transform_affine() {
        let transform = Transform2D {
            position: Vec2::new(1.0, 2.0),
            rotation: std::f32::consts::FRAC_PI_2,
            scale: Vec2::new(2.0, 1.0),
        };
        let p = transform.affine().transform_point2(Vec2::X);
        assert!((p - Vec2::new(1.0, 4.0)).length() < 1e-5);
    }

    #[test]
    fn test_sprite_display_size() {
        let mut sprite = Sprite::new(TextureHandle::WHITE, Vec2::new(10.0, 5.0));
        sprite.transform.scale = Vec2::new(2.0, -1.0);
        assert_eq!(sprite.display_size(), Vec2::new(20.0, 5.0));
    }
}
