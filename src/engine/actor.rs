//! Actor base
//!
//! Every actor carries an `ActorId`: a random identifier, a stable offset
//! hashed from it (used to desynchronise otherwise identical animations) and
//! its creation time on the engine clock.

use rand::Rng;

use crate::consts::ACTOR_ID_LENGTH;
use crate::engine::input::PointerState;
use crate::renderer::Layer;
use crate::sim::World;

/// URL-safe identifier alphabet
const ID_ALPHABET: &[u8] = b"useandom-26T198340PX75pxJACKVERYMINDBUSHWOLF_GQZbfghjklqvwyzrict";

/// Rolling hash base
const HASH_BASE: u64 = 11;
/// Rolling hash modulus
const HASH_MODULUS: u64 = 100_000_032;

/// Identity and age of an actor
#[derive(Debug, Clone, PartialEq)]
pub struct ActorId {
    identifier: String,
    unique_offset: f64,
    created_at: f32,
}

impl ActorId {
    /// Random identifier, created at engine time `created_at` (seconds)
    pub fn new<R: Rng>(rng: &mut R, created_at: f32) -> Self {
        let identifier = (0..ACTOR_ID_LENGTH)
            .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
            .collect::<String>();
        Self::from_identifier(identifier, created_at)
    }

    pub fn from_identifier(identifier: String, created_at: f32) -> Self {
        let unique_offset = polynomial_hash(&identifier);
        Self {
            identifier,
            unique_offset,
            created_at,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Large stable number derived from the identifier
    pub fn unique_offset(&self) -> f64 {
        self.unique_offset
    }

    /// `unique_offset` folded into one turn, safe to add to an f32 phase
    pub fn phase_offset(&self) -> f32 {
        self.unique_offset.rem_euclid(std::f64::consts::TAU) as f32
    }

    pub fn created_at(&self) -> f32 {
        self.created_at
    }

    /// Seconds since creation
    pub fn lifetime(&self, now: f32) -> f32 {
        now - self.created_at
    }
}

/// Sum of (char + 1) * (p^i mod m)
fn polynomial_hash(input: &str) -> f64 {
    let mut power = 1u64;
    let mut hash = 0.0;
    for ch in input.chars() {
        hash += (ch as u64 + 1) as f64 * power as f64;
        power = power * HASH_BASE % HASH_MODULUS;
    }
    hash
}

/// Everything an actor may touch while updating
pub struct UpdateContext<'a> {
    pub world: &'a mut World,
    pub pointer: &'a PointerState,
    /// Frame delta (seconds)
    pub dt: f32,
    /// Engine time (seconds)
    pub time: f32,
}

/// Read-only view while rendering
pub struct RenderContext<'a> {
    pub world: &'a World,
    /// Engine time (seconds)
    pub time: f32,
}

/// Something that lives in the scene
pub trait Actor {
    fn id(&self) -> &ActorId;

    /// Add behaviours, once per simulation tick
    fn update(&mut self, _ctx: &mut UpdateContext<'_>) {}

    /// Draw into the layer chosen by the scene
    fn render(&mut self, _layer: &mut Layer, _ctx: &RenderContext<'_>) {}
}
