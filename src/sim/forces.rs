//! Force laws attached to planets and water shells

use glam::Vec2;

use super::physics::{Body, ForceLaw};
use crate::consts::{ATTRACTOR_STRENGTH, BUOYANCY_FACTOR, BUOYANCY_ORDER};

/// Pulls every body toward the source, linearly with distance
#[derive(Debug, Clone, Copy)]
pub struct PointAttractor {
    pub strength: f32,
}

impl Default for PointAttractor {
    fn default() -> Self {
        Self {
            strength: ATTRACTOR_STRENGTH,
        }
    }
}

impl ForceLaw for PointAttractor {
    fn force(&self, source: &Body, target: &Body) -> Option<Vec2> {
        Some((source.position - target.position) * self.strength)
    }
}

/// Pushes bodies inside a water shell back out, harder the deeper they sink
///
/// Weight of displaced fluid, with `factor` and `order` tweaking how dense
/// the water feels.
#[derive(Debug, Clone, Copy)]
pub struct Buoyancy {
    pub center: Vec2,
    pub radial_offset: f32,
    pub height: f32,
    pub factor: f32,
    /// Below 1, deeper water pushes proportionally harder
    pub order: f32,
}

impl Buoyancy {
    pub fn new(center: Vec2, radial_offset: f32, height: f32) -> Self {
        Self {
            center,
            radial_offset,
            height,
            factor: BUOYANCY_FACTOR,
            order: BUOYANCY_ORDER,
        }
    }

    /// Fraction of the band below a point: 1 at the floor, 0 at the surface
    pub fn submersion(&self, displacement: Vec2) -> f32 {
        1.0 - ((displacement.length() - self.radial_offset) / self.height).clamp(0.0, 1.0)
    }

    /// Force on a body of `mass` at `displacement` from the center
    pub fn force_at(&self, displacement: Vec2, mass: f32) -> Vec2 {
        let submersion = self.submersion(displacement);
        displacement * (mass * self.factor * ATTRACTOR_STRENGTH * submersion.powf(self.order))
    }
}

impl ForceLaw for Buoyancy {
    fn force(&self, source: &Body, target: &Body) -> Option<Vec2> {
        // Only bodies actually in the water
        if target.is_static || !source.collides(target) {
            return None;
        }
        Some(self.force_at(target.position - self.center, target.mass))
    }
}
