//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// 2D vertex with position, texture coordinate and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            uv: [0.0, 0.0],
            color,
        }
    }

    pub const fn textured(x: f32, y: f32, u: f32, v: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            uv: [u, v],
            color,
        }
    }
}

/// Convert a 0xRRGGBB color and an alpha into RGBA floats
pub fn hex_to_rgba(hex: u32, alpha: f32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        alpha.clamp(0.0, 1.0),
    ]
}

/// Colors for scene elements (0xRRGGBB)
pub mod colors {
    pub const PLANET: u32 = 0x000000;
    pub const GOO: u32 = 0x000000;
    pub const WATER: u32 = 0x000000;
    pub const WATER_ALPHA: f32 = 0.65;
    pub const CURSOR: u32 = 0xffffff;
    pub const CURSOR_SELECTION: u32 = 0x00ccff;
    pub const WHITE: u32 = 0xffffff;
    pub const BACKGROUND: u32 = 0x8fc7e8;
}
