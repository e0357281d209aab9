//! A static planet that pulls everything toward it

use glam::Vec2;
use rand::Rng;

use crate::engine::{Actor, ActorId, RenderContext};
use crate::renderer::{DrawableId, Fill, Graphics, Layer, Transform2D, colors};
use crate::sim::{BodyId, BodyOptions, PointAttractor, Shape, World};

#[derive(Debug, Clone, Copy)]
pub struct PlanetOptions {
    /// Radius
    pub size: f32,
    pub position: Vec2,
}

impl Default for PlanetOptions {
    fn default() -> Self {
        Self {
            size: 50.0,
            position: Vec2::ZERO,
        }
    }
}

#[derive(Debug)]
pub struct Planet {
    id: ActorId,
    size: f32,
    position: Vec2,
    body: BodyId,
    graphics: Option<DrawableId>,
}

impl Planet {
    pub fn new<R: Rng>(world: &mut World, rng: &mut R, options: PlanetOptions, now: f32) -> Self {
        let body = world.add_body(BodyOptions {
            label: "planet",
            position: options.position,
            shape: Shape::Circle {
                radius: options.size,
            },
            is_static: true,
            // Nothing slides on a planet
            friction: 1.0,
            ..Default::default()
        });
        world.add_attractor(body, Box::new(PointAttractor::default()));

        Self {
            id: ActorId::new(rng, now),
            size: options.size,
            position: options.position,
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

    pub fn position(&self) -> Vec2 {
        self.position
    }
}

impl Actor for Planet {
    fn id(&self) -> &ActorId {
        &self.id
    }

    fn render(&mut self, layer: &mut Layer, _ctx: &RenderContext<'_>) {
        if self.graphics.is_none() {
            let mut graphics = Graphics::circle(self.size, Fill::solid(colors::PLANET));
            graphics.transform = Transform2D::at(self.position);
            self.graphics = Some(layer.add(graphics));
        }
    }
}
