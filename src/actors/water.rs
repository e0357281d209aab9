//! Planetary water: a wave shell around a planet
//!
//! The shell is a static sensor sector. Bodies crossing into or out of it
//! kick the nearest wave sample; bodies inside it are pushed back out by
//! buoyancy. Every render the band polygon is rebuilt from the wave heights.

use glam::Vec2;
use rand::Rng;

use crate::consts::WAVE_MIN_STEP_LENGTH;
use crate::engine::{Actor, ActorId, RenderContext, UpdateContext};
use crate::error::ConfigError;
use crate::renderer::{DrawableId, Fill, Graphics, Layer, colors};
use crate::sim::{
    ArcSpan, BackgroundOverlay, BodyId, BodyOptions, Buoyancy, CollisionFilter, RadialMesh, Shape,
    WaveField, WaveParams, World, build_polygon, categories,
};

/// Shape and tuning of a water shell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterConfig {
    pub arc: ArcSpan,
    pub center: Vec2,
    pub radial_offset: f32,
    pub height: f32,
    pub wave: WaveParams,
    pub min_step_length: f32,
}

impl WaterConfig {
    /// Shell over `start..end` degrees with default wave tuning
    pub fn new(
        start_angle: f32,
        end_angle: f32,
        center: Vec2,
        radial_offset: f32,
        height: f32,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            arc: ArcSpan::new(start_angle, end_angle)?,
            center,
            radial_offset,
            height,
            wave: WaveParams::for_height(height),
            min_step_length: WAVE_MIN_STEP_LENGTH,
        })
    }

    pub fn with_wave(mut self, wave: WaveParams) -> Self {
        self.wave = wave;
        self
    }

    pub fn with_wave_height(mut self, wave_height: f32) -> Self {
        self.wave.wave_height = wave_height;
        self
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.wave.damping = damping;
        self
    }

    pub fn with_min_step_length(mut self, min_step_length: f32) -> Self {
        self.min_step_length = min_step_length;
        self
    }
}

#[derive(Debug)]
pub struct PlanetWater {
    id: ActorId,
    mesh: RadialMesh,
    field: WaveField,
    overlay: BackgroundOverlay,
    body: BodyId,
    graphics: Option<DrawableId>,
    polygon: Vec<Vec2>,
    impacts: u64,
}

impl PlanetWater {
    pub fn new<R: Rng>(
        world: &mut World,
        rng: &mut R,
        config: WaterConfig,
        now: f32,
    ) -> Result<Self, ConfigError> {
        let mesh = RadialMesh::new(
            config.arc,
            config.center,
            config.radial_offset,
            config.height,
            config.min_step_length,
        )?;
        let field = WaveField::new(&mesh, config.wave)?;
        let overlay = BackgroundOverlay::random(rng, config.wave.wave_height);

        let body = world.add_body(BodyOptions {
            label: "water",
            position: config.center,
            shape: Shape::Sector {
                radius: mesh.outer_radius(),
                arc: config.arc,
            },
            is_static: true,
            is_sensor: true,
            // Only goo makes waves
            filter: CollisionFilter::new(categories::RIGID, categories::DYNAMIC),
            ..Default::default()
        });
        world.add_attractor(
            body,
            Box::new(Buoyancy::new(
                config.center,
                config.radial_offset,
                config.height,
            )),
        );

        log::debug!(
            "water shell {:.0}..{:.0} with {} samples",
            config.arc.start,
            config.arc.end,
            mesh.sample_count()
        );

        Ok(Self {
            id: ActorId::new(rng, now),
            mesh,
            field,
            overlay,
            body,
            graphics: None,
            polygon: Vec::new(),
            impacts: 0,
        })
    }

    pub fn body(&self) -> BodyId {
        self.body
    }

    pub fn mesh(&self) -> &RadialMesh {
        &self.mesh
    }

    pub fn field(&self) -> &WaveField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut WaveField {
        &mut self.field
    }

    pub fn overlay(&self) -> &BackgroundOverlay {
        &self.overlay
    }

    /// Polygon from the last render
    pub fn polygon(&self) -> &[Vec2] {
        &self.polygon
    }

    /// Impacts applied so far
    pub fn impacts(&self) -> u64 {
        self.impacts
    }

    /// Turn this step's contact starts and ends into wave impacts
    pub fn handle_collisions(&mut self, world: &World) -> usize {
        let mut count = 0;
        for event in world.collision_events() {
            let Some(collider) = event.other(self.body).and_then(|id| world.body(id)) else {
                continue;
            };
            let displacement = collider.position - self.mesh.center();
            self.field
                .apply_impact(&self.mesh, displacement, collider.velocity(), collider.mass);
            count += 1;
        }
        self.impacts += count as u64;
        count
    }
}

impl Actor for PlanetWater {
    fn id(&self) -> &ActorId {
        &self.id
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        self.handle_collisions(ctx.world);
        self.field.advance(ctx.dt);
    }

    fn render(&mut self, layer: &mut Layer, ctx: &RenderContext<'_>) {
        let elapsed = self.id.lifetime(ctx.time);
        build_polygon(
            &self.mesh,
            &self.field,
            &self.overlay,
            elapsed,
            &mut self.polygon,
        );

        if let Some(graphics) = self.graphics.and_then(|id| layer.graphics_mut(id)) {
            graphics.set_points(&self.polygon);
            return;
        }
        let fill = Fill::new(colors::WATER, colors::WATER_ALPHA);
        self.graphics = Some(layer.add(Graphics::band(&self.polygon, fill)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::PointerState;
    use crate::renderer::{Drawable, GraphicsShape};
    use crate::sim::CollisionPhase;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn water(world: &mut World) -> PlanetWater {
        let config = WaterConfig::new(0.0, 360.0, Vec2::ZERO, 20.0, 10.0)
            .unwrap()
            .with_min_step_length(2.0);
        PlanetWater::new(world, &mut Pcg32::seed_from_u64(9), config, 0.0).unwrap()
    }

    #[test]
    fn test_config_errors() {
        assert!(matches!(
            WaterConfig::new(90.0, 90.0, Vec2::ZERO, 20.0, 10.0),
            Err(ConfigError::InvalidAngleRange { .. })
        ));
        let bad = WaterConfig::new(0.0, 90.0, Vec2::ZERO, 20.0, 10.0)
            .unwrap()
            .with_damping(2.0);
        let mut world = World::new(Vec2::ZERO);
        assert!(PlanetWater::new(&mut world, &mut Pcg32::seed_from_u64(1), bad, 0.0).is_err());
        assert!(world.bodies().is_empty());
    }

    #[test]
    fn test_sensor_body() {
        let mut world = World::new(Vec2::ZERO);
        let water = water(&mut world);
        assert_eq!(water.mesh().steps(), 94);
        let body = world.body(water.body()).unwrap();
        assert!(body.is_sensor && body.is_static);
        assert_eq!(body.shape.radius(), 30.0);
        assert_eq!(body.filter.mask, categories::DYNAMIC);
        assert_eq!(body.attractors.len(), 1);
    }

    #[test]
    fn test_goo_entering_makes_a_wave() {
        let mut world = World::new(Vec2::ZERO);
        let mut water = water(&mut world);
        let goo = world.add_body(BodyOptions {
            position: Vec2::new(31.5, 0.0),
            filter: CollisionFilter::new(categories::DYNAMIC, categories::PHYSICS),
            friction_air: 0.0,
            ..Default::default()
        });
        // Heading straight for the center from the right
        world.body_mut(goo).unwrap().set_velocity(Vec2::new(-1.0, 0.0));
        let index = WaveField::impact_index(water.mesh(), Vec2::new(30.5, 0.0));

        let pointer = PointerState::default();
        let mut entered = false;
        for _ in 0..5 {
            world.step(1000.0 / 30.0, 1.0);
            entered |= world
                .collision_events()
                .iter()
                .any(|e| e.phase == CollisionPhase::Start && e.other(water.body()) == Some(goo));
            let mut ctx = UpdateContext {
                world: &mut world,
                pointer: &pointer,
                dt: 1.0 / 30.0,
                time: 0.0,
            };
            water.update(&mut ctx);
        }
        assert!(entered);
        assert_eq!(water.impacts(), 1);
        // Moving inward pushes the surface down
        assert!(water.field().heights()[index] < 10.0);
        // Buoyancy slowed it down
        assert!(world.body(goo).unwrap().velocity().x > -1.0);
    }

    #[test]
    fn test_render_updates_band_in_place() {
        let mut world = World::new(Vec2::ZERO);
        let mut water = water(&mut world);
        let mut layer = Layer::new();
        for time in [0.0, 0.5] {
            water.render(&mut layer, &RenderContext { world: &world, time });
        }
        assert_eq!(layer.len(), 1);
        assert_eq!(water.polygon().len(), 2 * 95);
        match layer.iter().next() {
            Some(Drawable::Graphics(g)) => {
                assert_eq!(g.shape(), GraphicsShape::Band);
                assert_eq!(g.points(), water.polygon());
            }
            other => panic!("unexpected drawable {other:?}"),
        }
    }
}
