//! Goo Planet - a tiny planet with goo, wobbling water and a mouse
//!
//! Core modules:
//! - `sim`: Deterministic simulation (radial mesh, wave field, physics world)
//! - `actors`: Planet, goo, water shell, decorations and mouse
//! - `engine`: Actor base, clock, loader, simulator and the frame step
//! - `renderer`: Layered drawables tessellated into vertex batches
//! - `scene`: The fixed demo scene
//! - `settings`: Data-driven tunables

pub mod actors;
pub mod engine;
pub mod error;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal update rate (ticks per second)
    pub const TARGET_FPS: f32 = 30.0;
    /// Largest frame delta the simulator will integrate (seconds)
    pub const MAX_FRAME_DT: f32 = 1.0 / 30.0;

    /// Matter-style gravity scale applied on top of the gravity vector
    pub const GRAVITY_SCALE: f32 = 0.001;
    /// Default air friction for dynamic bodies
    pub const DEFAULT_FRICTION_AIR: f32 = 0.01;
    /// Default contact friction
    pub const DEFAULT_FRICTION: f32 = 0.1;
    /// Inertia multiplier for circles (resists spinning up too fast)
    pub const INERTIA_SCALE: f32 = 4.0;

    /// Spring constant coupling neighbouring wave samples
    pub const WAVE_SPRING_CONSTANT: f32 = 0.005;
    /// Default multiplicative velocity decay per tick
    pub const WAVE_DAMPING: f32 = 0.95;
    /// Target arc length between two wave samples (world units)
    pub const WAVE_MIN_STEP_LENGTH: f32 = 1.0;

    /// Number of sine terms in the decorative background ripple
    pub const BACKGROUND_WAVE_TERMS: usize = 5;
    /// Apparent scroll speed of the background ripple
    pub const BACKGROUND_WAVE_VELOCITY: f32 = 30.0;
    /// Upper bound for the random background frequencies
    pub const BACKGROUND_COMPRESSION: f32 = 0.9;

    /// Buoyancy: < 1 makes deeper water push harder
    pub const BUOYANCY_ORDER: f32 = 0.5;
    /// Buoyancy: flat multiplier
    pub const BUOYANCY_FACTOR: f32 = 2.0;
    /// Attractor strength for planets and buoyancy
    pub const ATTRACTOR_STRENGTH: f32 = 1e-6;

    /// Goo roll torque
    pub const GOO_ROLL_STRENGTH: f32 = 5e-5;
    /// How often the goo changes roll direction
    pub const GOO_ROLL_FREQUENCY: f32 = 0.5;
    /// Speed at which goo starts stretching
    pub const GOO_STRETCH_VELOCITY: f32 = 0.7;

    /// Length of generated actor identifiers
    pub const ACTOR_ID_LENGTH: usize = 20;
}

/// Degrees to radians factor
pub const DEG_TO_RAD: f32 = std::f32::consts::PI / 180.0;

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    angle.rem_euclid(360.0)
}

/// Unit direction for a polar angle in degrees (0° points up, angles grow clockwise)
#[inline]
pub fn polar_direction(angle_deg: f32) -> Vec2 {
    let theta = angle_deg * DEG_TO_RAD;
    Vec2::new(theta.sin(), -theta.cos())
}

/// Convert polar (r, angle in degrees) around `center` to cartesian
#[inline]
pub fn polar_to_cartesian(center: Vec2, r: f32, angle_deg: f32) -> Vec2 {
    center + polar_direction(angle_deg) * r
}

/// Polar angle in degrees of a displacement, in the same convention as `polar_direction`
///
/// The result lies in (-90, 270].
#[inline]
pub fn polar_angle(displacement: Vec2) -> f32 {
    90.0 + displacement.y.atan2(displacement.x) / DEG_TO_RAD
}
