//! Spinning background sprite

use glam::Vec2;
use rand::Rng;

use crate::engine::{Actor, ActorId, RenderContext, TextureHandle};
use crate::renderer::{BlendMode, DrawableId, Layer, Sprite, Transform2D};

#[derive(Debug, Clone, Copy)]
pub struct WheelOptions {
    pub texture: TextureHandle,
    /// Displayed width and height
    pub size: f32,
    /// Revolutions per second
    pub speed: f32,
    pub position: Vec2,
    pub opacity: f32,
    pub blend: BlendMode,
}

impl Default for WheelOptions {
    fn default() -> Self {
        Self {
            texture: TextureHandle::WHITE,
            size: 20.0,
            speed: 1.0,
            position: Vec2::ZERO,
            opacity: 1.0,
            blend: BlendMode::Normal,
        }
    }
}

#[derive(Debug)]
pub struct Wheel {
    id: ActorId,
    options: WheelOptions,
    sprite: Option<DrawableId>,
}

impl Wheel {
    pub fn new<R: Rng>(rng: &mut R, options: WheelOptions, now: f32) -> Self {
        Self {
            id: ActorId::new(rng, now),
            options,
            sprite: None,
        }
    }

    /// Rotation (radians) at engine time `now`
    pub fn rotation(&self, now: f32) -> f32 {
        std::f32::consts::TAU * self.options.speed * self.id.lifetime(now) + self.id.phase_offset()
    }
}

impl Actor for Wheel {
    fn id(&self) -> &ActorId {
        &self.id
    }

    fn render(&mut self, layer: &mut Layer, ctx: &RenderContext<'_>) {
        let id = match self.sprite {
            Some(id) => id,
            None => {
                let mut sprite = Sprite::new(self.options.texture, Vec2::splat(self.options.size));
                sprite.anchor = Vec2::splat(0.5);
                sprite.transform = Transform2D::at(self.options.position);
                sprite.alpha = self.options.opacity;
                sprite.blend = self.options.blend;
                let id = layer.add(sprite);
                self.sprite = Some(id);
                id
            }
        };
        let rotation = self.rotation(ctx.time);
        if let Some(sprite) = layer.sprite_mut(id) {
            sprite.transform.rotation = rotation;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::World;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_rotation_rate() {
        let wheel = Wheel::new(
            &mut Pcg32::seed_from_u64(5),
            WheelOptions {
                speed: 0.25,
                ..Default::default()
            },
            1.0,
        );
        let quarter = wheel.rotation(2.0) - wheel.rotation(1.0);
        assert!((quarter - std::f32::consts::FRAC_PI_2).abs() < 1e-4);
        assert!((wheel.rotation(1.0) - wheel.id().phase_offset()).abs() < 1e-6);
    }

    #[test]
    fn test_render_sets_rotation() {
        let world = World::new(Vec2::ZERO);
        let mut wheel = Wheel::new(
            &mut Pcg32::seed_from_u64(5),
            WheelOptions {
                blend: BlendMode::Add,
                opacity: 0.4,
                ..Default::default()
            },
            0.0,
        );
        let mut layer = Layer::new();
        wheel.render(&mut layer, &RenderContext { world: &world, time: 0.5 });
        wheel.render(&mut layer, &RenderContext { world: &world, time: 1.0 });
        assert_eq!(layer.len(), 1);
        let id = wheel.sprite.unwrap();
        let sprite = layer.sprite_mut(id).unwrap();
        assert_eq!(sprite.blend, BlendMode::Add);
        assert_eq!(sprite.alpha, 0.4);
        assert_eq!(sprite.anchor, Vec2::splat(0.5));
        assert!((sprite.transform.rotation - wheel.rotation(1.0)).abs() < 1e-6);
    }
}
