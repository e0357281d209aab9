//! The fixed demo scene
//!
//! One planet wrapped in a full ring of water, a swarm of goo dropped around
//! it, two slow wheels behind and a few islands floating on the surface.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::actors::{
    CursorOptions, Decoration, DecorationOptions, DecorationSize, GooBall, GooOptions, Planet,
    PlanetOptions, PlanetWater, UserMouse, WaterConfig, Wheel, WheelOptions,
};
use crate::engine::{Actor, GameEngine, RenderContext, Scene, UpdateContext};
use crate::error::ConfigError;
use crate::polar_to_cartesian;
use crate::renderer::{BlendMode, RenderLayer, Renderer};
use crate::settings::Settings;

/// A texture the scene needs, with its pixel size
#[derive(Debug, Clone, Copy)]
pub struct Asset {
    pub name: &'static str,
    pub url: &'static str,
    pub width: f32,
    pub height: f32,
}

impl Asset {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

pub const WHEEL: Asset = Asset {
    name: "wheel",
    url: "assets/wheel.png",
    width: 512.0,
    height: 512.0,
};

pub const ISLAND: Asset = Asset {
    name: "island",
    url: "assets/island.png",
    width: 640.0,
    height: 320.0,
};

pub const ASSETS: [Asset; 2] = [WHEEL, ISLAND];

/// Island angles (degrees) around the planet
const ISLAND_ANGLES: [f32; 3] = [25.0, 150.0, 260.0];

pub struct FixedDemoScene {
    seed: u64,
    planet: Planet,
    water: PlanetWater,
    goo: Vec<GooBall>,
    wheels: Vec<Wheel>,
    islands: Vec<Decoration>,
    mouse: UserMouse,
}

impl FixedDemoScene {
    /// Build the scene into the engine's world and queue its textures
    pub fn new(engine: &mut GameEngine, settings: &Settings) -> Result<Self, ConfigError> {
        settings.validate()?;
        let seed = settings.scene.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = Pcg32::seed_from_u64(seed);
        let now = engine.time();
        let radius = settings.scene.planet_radius;

        let wheel_texture = engine.loader.enqueue(WHEEL.name, WHEEL.url);
        let island_texture = engine.loader.enqueue(ISLAND.name, ISLAND.url);

        let world = engine.simulator.world_mut();
        let planet = Planet::new(
            world,
            &mut rng,
            PlanetOptions {
                size: radius,
                position: Vec2::ZERO,
            },
            now,
        );

        let water_settings = &settings.water;
        let config = WaterConfig::new(
            0.0,
            360.0,
            planet.position(),
            water_settings.radial_offset,
            water_settings.height,
        )?
        .with_wave(water_settings.wave_params())
        .with_min_step_length(settings.min_step_length());
        let water = PlanetWater::new(world, &mut rng, config, now)?;

        let count = settings.goo_count();
        let goo = (0..count)
            .map(|i| {
                let angle = i as f32 / count as f32 * std::f32::consts::TAU;
                let distance = (rng.random::<f32>() + 1.5) * radius;
                let options = GooOptions {
                    position: Vec2::from_angle(angle) * distance,
                    size: rng.random::<f32>() * 0.4 + 0.8,
                    ..Default::default()
                };
                GooBall::new(world, &mut rng, options, now)
            })
            .collect();

        let wheels = vec![
            Wheel::new(
                &mut rng,
                WheelOptions {
                    texture: wheel_texture,
                    size: radius * 3.4,
                    speed: 0.02,
                    opacity: 0.35,
                    blend: BlendMode::Add,
                    ..Default::default()
                },
                now,
            ),
            Wheel::new(
                &mut rng,
                WheelOptions {
                    texture: wheel_texture,
                    size: radius * 4.6,
                    speed: -0.01,
                    opacity: 0.2,
                    blend: BlendMode::Screen,
                    ..Default::default()
                },
                now,
            ),
        ];

        let surface = water_settings.radial_offset + water_settings.height;
        let islands = ISLAND_ANGLES
            .iter()
            .map(|&angle| {
                let options = DecorationOptions {
                    texture: island_texture,
                    texture_size: ISLAND.size(),
                    // Sit on the surface, bottom center anchored
                    anchor: Vec2::new(0.5, 0.8),
                    position: polar_to_cartesian(planet.position(), surface, angle),
                    size: Some(DecorationSize::Width(radius * 0.5)),
                    angle: Some(angle),
                    ..Default::default()
                };
                Decoration::new(&mut rng, options, now)
            })
            .collect();

        let mouse = UserMouse::new(
            &mut rng,
            &engine.renderer.transform,
            CursorOptions::base(),
            CursorOptions::selection(),
            now,
        );

        log::info!(
            "demo scene (seed {seed}): {count} goo, {} wave samples",
            water.mesh().sample_count()
        );

        Ok(Self {
            seed,
            planet,
            water,
            goo,
            wheels,
            islands,
            mouse,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn planet(&self) -> &Planet {
        &self.planet
    }

    pub fn water(&self) -> &PlanetWater {
        &self.water
    }

    pub fn goo(&self) -> &[GooBall] {
        &self.goo
    }

    pub fn mouse(&self) -> &UserMouse {
        &self.mouse
    }
}

impl Scene for FixedDemoScene {
    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        self.mouse.update(ctx);
        self.water.update(ctx);
        for goo in &mut self.goo {
            goo.update(ctx);
        }
    }

    fn render(&mut self, renderer: &mut Renderer, ctx: &RenderContext<'_>) {
        let background = renderer.layer_mut(RenderLayer::Background);
        for wheel in &mut self.wheels {
            wheel.render(background, ctx);
        }
        self.planet.render(background, ctx);

        let interactable = renderer.layer_mut(RenderLayer::Interactable);
        for goo in &mut self.goo {
            goo.render(interactable, ctx);
        }
        self.water.render(interactable, ctx);

        let decoration = renderer.layer_mut(RenderLayer::Decoration);
        for island in &mut self.islands {
            island.render(decoration, ctx);
        }
        self.mouse.render(decoration, ctx);
    }
}
