//! Collision shapes, filters and narrow-phase tests
//!
//! Only two shapes exist: circles (planets, goo) and sectors (the sensor
//! region of a water shell, from its center out to the undisturbed surface).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arc::ArcSpan;
use crate::polar_angle;

/// Collision category bits
pub mod categories {
    pub const NONE: u32 = 0b0;
    pub const ANY: u32 = 0xffff_ffff;

    /// The mouse constraint
    pub const MOUSE: u32 = 0b1;
    /// Immovable bodies
    pub const RIGID: u32 = 0b10;
    /// Full physics bodies
    pub const DYNAMIC: u32 = 0b100;
    /// All physics
    pub const PHYSICS: u32 = RIGID | DYNAMIC;
}

/// Which bodies may touch which
///
/// Two bodies in the same non-zero group always collide (positive group) or
/// never collide (negative group); otherwise each body's mask must include
/// the other's category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionFilter {
    pub group: i32,
    pub category: u32,
    pub mask: u32,
}

impl Default for CollisionFilter {
    fn default() -> Self {
        Self {
            group: 0,
            category: 0b1,
            mask: categories::ANY,
        }
    }
}

impl CollisionFilter {
    pub const fn new(category: u32, mask: u32) -> Self {
        Self {
            group: 0,
            category,
            mask,
        }
    }

    pub fn can_collide(&self, other: &CollisionFilter) -> bool {
        if self.group == other.group && self.group != 0 {
            return self.group > 0;
        }
        (self.mask & other.category) != 0 && (other.mask & self.category) != 0
    }
}

/// Body shape, relative to the body position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle { radius: f32 },
    /// Pie slice from the body position out to `radius` over `arc`
    Sector { radius: f32, arc: ArcSpan },
}

impl Shape {
    /// Bounding radius around the body position
    pub fn radius(&self) -> f32 {
        match *self {
            Shape::Circle { radius } | Shape::Sector { radius, .. } => radius,
        }
    }

    /// Area (used for mass)
    pub fn area(&self) -> f32 {
        match *self {
            Shape::Circle { radius } => std::f32::consts::PI * radius * radius,
            Shape::Sector { radius, arc } => {
                0.5 * radius * radius * arc.span().min(360.0) * crate::DEG_TO_RAD
            }
        }
    }

    /// Check if a point (relative to the body position) is inside
    pub fn contains(&self, local: Vec2) -> bool {
        match *self {
            Shape::Circle { radius } => local.length_squared() <= radius * radius,
            Shape::Sector { radius, arc } => {
                local.length_squared() <= radius * radius
                    && (local == Vec2::ZERO || arc.contains_angle(polar_angle(local)))
            }
        }
    }
}

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Contact point (if hit)
    pub point: Vec2,
    /// Contact normal, pointing from the first shape toward the second
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check two circles
pub fn circle_circle(pos_a: Vec2, radius_a: f32, pos_b: Vec2, radius_b: f32) -> CollisionResult {
    let delta = pos_b - pos_a;
    let dist = delta.length();
    let reach = radius_a + radius_b;
    if dist >= reach {
        return CollisionResult::miss();
    }

    // Concentric circles push apart along +x
    let normal = if dist > f32::EPSILON {
        delta / dist
    } else {
        Vec2::X
    };
    CollisionResult {
        hit: true,
        point: pos_a + normal * radius_a,
        normal,
        penetration: reach - dist,
    }
}

/// Check a circle against a sector (radial walls are ignored)
pub fn sector_circle(
    sector_pos: Vec2,
    sector_radius: f32,
    arc: &ArcSpan,
    circle_pos: Vec2,
    circle_radius: f32,
) -> CollisionResult {
    let delta = circle_pos - sector_pos;
    let dist = delta.length();
    if dist >= sector_radius + circle_radius {
        return CollisionResult::miss();
    }
    // A circle sitting on the apex touches every sector
    if dist > circle_radius && !arc.contains_angle(polar_angle(delta)) {
        return CollisionResult::miss();
    }

    let normal = if dist > f32::EPSILON {
        delta / dist
    } else {
        Vec2::X
    };
    CollisionResult {
        hit: true,
        point: sector_pos + normal * dist.min(sector_radius),
        normal,
        penetration: sector_radius + circle_radius - dist,
    }
}

/// Check two shapes; the normal points from `a` toward `b`
pub fn shapes_collide(pos_a: Vec2, a: &Shape, pos_b: Vec2, b: &Shape) -> CollisionResult {
    match (*a, *b) {
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
            circle_circle(pos_a, ra, pos_b, rb)
        }
        (Shape::Sector { radius, arc }, Shape::Circle { radius: rb }) => {
            sector_circle(pos_a, radius, &arc, pos_b, rb)
        }
        (Shape::Circle { radius: ra }, Shape::Sector { radius, arc }) => {
            let mut result = sector_circle(pos_b, radius, &arc, pos_a, ra);
            result.normal = -result.normal;
            result
        }
        // Sectors are sensors around fixed centers, they never meet each other
        (Shape::Sector { .. }, Shape::Sector { .. }) => CollisionResult::miss(),
    }
}
