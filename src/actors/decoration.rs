//! Static decorative sprites

use glam::Vec2;
use rand::Rng;

use crate::DEG_TO_RAD;
use crate::engine::{Actor, ActorId, RenderContext, TextureHandle};
use crate::renderer::{BlendMode, DrawableId, Layer, Sprite, Transform2D};

/// Requested display size
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecorationSize {
    /// Square
    Uniform(f32),
    /// Height follows the texture aspect ratio
    Width(f32),
    /// Width follows the texture aspect ratio
    Height(f32),
    Both(Vec2),
}

impl DecorationSize {
    /// Display size for a texture of `texture_size` pixels
    pub fn resolve(&self, texture_size: Vec2) -> Vec2 {
        match *self {
            DecorationSize::Uniform(size) => Vec2::splat(size),
            DecorationSize::Width(width) if texture_size.x > 0.0 => {
                Vec2::new(width, texture_size.y / texture_size.x * width)
            }
            DecorationSize::Height(height) if texture_size.y > 0.0 => {
                Vec2::new(texture_size.x / texture_size.y * height, height)
            }
            DecorationSize::Width(width) => Vec2::new(width, texture_size.y),
            DecorationSize::Height(height) => Vec2::new(texture_size.x, height),
            DecorationSize::Both(size) => size,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DecorationOptions {
    pub texture: TextureHandle,
    /// Pixel size of the texture
    pub texture_size: Vec2,
    pub anchor: Vec2,
    pub position: Vec2,
    pub size: Option<DecorationSize>,
    /// Multiplies the texture size, replacing `size`
    pub scale: Option<Vec2>,
    /// Degrees
    pub angle: Option<f32>,
    /// Radians, wins over `angle`
    pub rotation: Option<f32>,
    pub opacity: f32,
    pub blend: BlendMode,
}

impl Default for DecorationOptions {
    fn default() -> Self {
        Self {
            texture: TextureHandle::WHITE,
            texture_size: Vec2::ONE,
            anchor: Vec2::ZERO,
            position: Vec2::ZERO,
            size: None,
            scale: None,
            angle: None,
            rotation: None,
            opacity: 1.0,
            blend: BlendMode::Normal,
        }
    }
}

#[derive(Debug)]
pub struct Decoration {
    id: ActorId,
    sprite: Sprite,
    attached: Option<DrawableId>,
}

impl Decoration {
    pub fn new<R: Rng>(rng: &mut R, options: DecorationOptions, now: f32) -> Self {
        let (size, scale) = match options.scale {
            Some(scale) => (options.texture_size, scale),
            None => (
                options
                    .size
                    .map_or(options.texture_size, |s| s.resolve(options.texture_size)),
                Vec2::ONE,
            ),
        };
        let rotation = options
            .rotation
            .or(options.angle.map(|deg| deg * DEG_TO_RAD))
            .unwrap_or(0.0);

        let mut sprite = Sprite::new(options.texture, size);
        sprite.anchor = options.anchor;
        sprite.transform = Transform2D {
            position: options.position,
            rotation,
            scale,
        };
        sprite.alpha = options.opacity;
        sprite.blend = options.blend;

        Self {
            id: ActorId::new(rng, now),
            sprite,
            attached: None,
        }
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }
}

impl Actor for Decoration {
    fn id(&self) -> &ActorId {
        &self.id
    }

    fn render(&mut self, layer: &mut Layer, _ctx: &RenderContext<'_>) {
        if self.attached.is_none() {
            self.attached = Some(layer.add(self.sprite.clone()));
        }
    }
}
