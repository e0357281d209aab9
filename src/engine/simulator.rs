//! Physics stepping
//!
//! Converts frame deltas (seconds) into clamped millisecond steps with a
//! time correction factor, the way the physics world expects them.

use glam::Vec2;

use crate::consts::MAX_FRAME_DT;
use crate::settings::PhysicsSettings;
use crate::sim::World;

#[derive(Debug)]
pub struct Simulator {
    world: World,
    max_dt: f32,
    last_dt_ms: Option<f32>,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(&PhysicsSettings::default())
    }
}

impl Simulator {
    pub fn new(settings: &PhysicsSettings) -> Self {
        let mut world = World::new(Vec2::from(settings.gravity));
        world.gravity_scale = settings.gravity_scale;
        Self {
            world,
            max_dt: settings.max_frame_dt.min(MAX_FRAME_DT),
            last_dt_ms: None,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Step the world by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        let dt = dt.clamp(0.0, self.max_dt);
        let dt_ms = dt * 1000.0;
        if dt_ms <= 0.0 {
            return;
        }
        let correction = match self.last_dt_ms {
            Some(last) if last > 0.0 => dt_ms / last,
            _ => 1.0,
        };
        self.world.step(dt_ms, correction);
        self.last_dt_ms = Some(dt_ms);
    }

    /// Remove every body
    pub fn destroy(&mut self) {
        self.world.clear();
        self.last_dt_ms = None;
    }
}
