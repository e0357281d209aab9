//! Goo balls: small rolling circles that squash when they move fast

use glam::Vec2;
use rand::Rng;

use crate::consts::{GOO_ROLL_FREQUENCY, GOO_ROLL_STRENGTH, GOO_STRETCH_VELOCITY};
use crate::engine::{Actor, ActorId, RenderContext, UpdateContext};
use crate::renderer::{DrawableId, Fill, Graphics, Layer, colors};
use crate::sim::{BodyId, BodyOptions, CollisionFilter, Shape, World, categories};

#[derive(Debug, Clone, Copy)]
pub struct GooOptions {
    /// Radius
    pub size: f32,
    pub density: f32,
    pub position: Vec2,
    /// Radians, random in [0, π) when unset
    pub angle: Option<f32>,
    /// Contact friction, 0-1
    pub stickiness: f32,
    /// Restitution, 0-1
    pub bounciness: f32,
}

impl Default for GooOptions {
    fn default() -> Self {
        Self {
            size: 1.0,
            density: 1.0,
            position: Vec2::ZERO,
            angle: None,
            stickiness: 0.1,
            bounciness: 0.5,
        }
    }
}

#[derive(Debug)]
pub struct GooBall {
    id: ActorId,
    size: f32,
    body: BodyId,
    graphics: Option<DrawableId>,
}

impl GooBall {
    pub fn new<R: Rng>(world: &mut World, rng: &mut R, options: GooOptions, now: f32) -> Self {
        let angle = options
            .angle
            .unwrap_or_else(|| rng.random::<f32>() * std::f32::consts::PI);
        let body = world.add_body(BodyOptions {
            label: "goo",
            position: options.position,
            angle,
            shape: Shape::Circle {
                radius: options.size,
            },
            density: options.density,
            friction: options.stickiness,
            friction_air: 0.005,
            restitution: options.bounciness,
            // Collide with all physics and allow mouse control
            filter: CollisionFilter::new(
                categories::DYNAMIC,
                categories::PHYSICS | categories::MOUSE,
            ),
            ..Default::default()
        });

        Self {
            id: ActorId::new(rng, now),
            size: options.size,
            body,
            graphics: None,
        }
    }

    pub fn body(&self) -> BodyId {
        self.body
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// Roll torque at engine time `now`
    pub fn roll_torque(&self, now: f32) -> f32 {
        let lifetime = self.id.lifetime(now);
        (lifetime * GOO_ROLL_FREQUENCY + self.id.phase_offset()).sin() * GOO_ROLL_STRENGTH
    }
}

/// Length multiplier along the direction of travel
pub fn stretch_factor(velocity: Vec2) -> f32 {
    (velocity.length().sqrt() / GOO_STRETCH_VELOCITY).clamp(0.95, 1.5)
}

impl Actor for GooBall {
    fn id(&self) -> &ActorId {
        &self.id
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        let torque = self.roll_torque(ctx.time);
        if let Some(body) = ctx.world.body_mut(self.body) {
            body.torque = torque;
        }
    }

    fn render(&mut self, layer: &mut Layer, ctx: &RenderContext<'_>) {
        let Some(body) = ctx.world.body(self.body) else {
            return;
        };
        let id = match self.graphics {
            Some(id) => id,
            None => {
                let id = layer.add(Graphics::circle(self.size, Fill::solid(colors::GOO)));
                self.graphics = Some(id);
                id
            }
        };
        let Some(graphics) = layer.graphics_mut(id) else {
            return;
        };

        // Face the direction of travel, squeeze across it
        let velocity = body.velocity();
        let stretch = stretch_factor(velocity);
        graphics.transform.position = body.position;
        graphics.transform.rotation = velocity.y.atan2(velocity.x) + std::f32::consts::FRAC_PI_2;
        graphics.transform.scale = Vec2::new(1.0 / stretch, stretch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::PointerState;
    use crate::renderer::Drawable;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_stretch_range() {
        assert_eq!(stretch_factor(Vec2::ZERO), 0.95);
        assert_eq!(stretch_factor(Vec2::new(100.0, 0.0)), 1.5);
        let v = Vec2::new(0.0, 0.49 * 1.21);
        assert!((stretch_factor(v) - 1.1).abs() < 1e-5);
    }

    #[test]
    fn test_roll_torque_bounded_and_applied() {
        let mut world = World::new(Vec2::ZERO);
        let mut goo = GooBall::new(
            &mut world,
            &mut Pcg32::seed_from_u64(3),
            GooOptions::default(),
            0.0,
        );
        for t in [0.0, 1.0, 7.5] {
            assert!(goo.roll_torque(t).abs() <= GOO_ROLL_STRENGTH);
        }
        let pointer = PointerState::default();
        let mut ctx = UpdateContext {
            world: &mut world,
            pointer: &pointer,
            dt: 1.0 / 30.0,
            time: 2.0,
        };
        goo.update(&mut ctx);
        assert_eq!(world.body(goo.body()).unwrap().torque, goo.roll_torque(2.0));
    }

    #[test]
    fn test_body_options() {
        let mut world = World::new(Vec2::ZERO);
        let goo = GooBall::new(
            &mut world,
            &mut Pcg32::seed_from_u64(3),
            GooOptions {
                size: 2.0,
                angle: Some(0.25),
                ..Default::default()
            },
            0.0,
        );
        let body = world.body(goo.body()).unwrap();
        assert_eq!(body.angle, 0.25);
        assert_eq!(body.restitution, 0.5);
        assert_eq!(body.filter.category, categories::DYNAMIC);
        assert!((body.mass - std::f32::consts::PI * 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_render_follows_body() {
        let mut world = World::new(Vec2::ZERO);
        let mut goo = GooBall::new(
            &mut world,
            &mut Pcg32::seed_from_u64(3),
            GooOptions {
                position: Vec2::new(3.0, 4.0),
                ..Default::default()
            },
            0.0,
        );
        world.body_mut(goo.body()).unwrap().set_velocity(Vec2::new(1.0, 0.0));
        let mut layer = Layer::new();
        goo.render(
            &mut layer,
            &RenderContext {
                world: &world,
                time: 0.0,
            },
        );
        let Some(Drawable::Graphics(graphics)) = layer.iter().next() else {
            panic!("goo graphics missing");
        };
        assert_eq!(graphics.transform.position, Vec2::new(3.0, 4.0));
        assert!((graphics.transform.rotation - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert!(graphics.transform.scale.y > 1.0);
    }
}
