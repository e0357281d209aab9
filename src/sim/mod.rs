//! Deterministic simulation module
//!
//! Everything that moves lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by body ID)
//! - No rendering or platform dependencies

pub mod arc;
pub mod collision;
pub mod forces;
pub mod mesh;
pub mod overlay;
pub mod physics;
pub mod surface;
pub mod wave;

pub use arc::ArcSpan;
pub use collision::{CollisionFilter, CollisionResult, Shape, categories};
pub use forces::{Buoyancy, PointAttractor};
pub use mesh::RadialMesh;
pub use overlay::BackgroundOverlay;
pub use physics::{
    Body, BodyId, BodyOptions, CollisionEvent, CollisionPhase, ForceLaw, MouseConstraint, World,
};
pub use surface::build_polygon;
pub use wave::{WaveField, WaveParams};
