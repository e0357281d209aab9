//! Tessellation of 2D primitives into triangle lists
//!
//! Every function appends to a caller-owned buffer and maps local points
//! through `xf` (local → screen).

use glam::{Affine2, Vec2};
use std::f32::consts::PI;

use super::vertex::Vertex;

#[inline]
fn push(out: &mut Vec<Vertex>, xf: &Affine2, point: Vec2, color: [f32; 4]) {
    let p = xf.transform_point2(point);
    out.push(Vertex::new(p.x, p.y, color));
}

/// Filled circle around the local origin
pub fn circle(out: &mut Vec<Vertex>, xf: &Affine2, radius: f32, color: [f32; 4], segments: u32) {
    let segments = segments.max(3);
    out.reserve((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        push(out, xf, Vec2::ZERO, color);
        push(out, xf, Vec2::from_angle(theta1) * radius, color);
        push(out, xf, Vec2::from_angle(theta2) * radius, color);
    }
}

/// Star-shaped polygon, fanned from the vertex centroid
pub fn polygon(out: &mut Vec<Vertex>, xf: &Affine2, points: &[Vec2], color: [f32; 4]) {
    if points.len() < 3 {
        return;
    }
    let centroid = points.iter().copied().sum::<Vec2>() / points.len() as f32;
    out.reserve(points.len() * 3);

    for (i, &p1) in points.iter().enumerate() {
        let p2 = points[(i + 1) % points.len()];
        push(out, xf, centroid, color);
        push(out, xf, p1, color);
        push(out, xf, p2, color);
    }
}

/// Closed band: the first half of `points` is one edge, the second half the
/// opposite edge in reverse. Point `i` pairs with point `len - 1 - i`.
pub fn band(out: &mut Vec<Vertex>, xf: &Affine2, points: &[Vec2], color: [f32; 4]) {
    let half = points.len() / 2;
    if half < 2 {
        return;
    }
    let last = points.len() - 1;
    out.reserve((half - 1) * 6);

    for i in 0..half - 1 {
        let outer1 = points[i];
        let outer2 = points[i + 1];
        let inner1 = points[last - i];
        let inner2 = points[last - i - 1];

        // Two triangles per segment
        push(out, xf, outer1, color);
        push(out, xf, inner1, color);
        push(out, xf, outer2, color);

        push(out, xf, outer2, color);
        push(out, xf, inner1, color);
        push(out, xf, inner2, color);
    }
}

/// Textured quad of `size`, with `anchor` (0..1) at the local origin
pub fn quad(out: &mut Vec<Vertex>, xf: &Affine2, size: Vec2, anchor: Vec2, color: [f32; 4]) {
    let min = -anchor * size;
    let corners = [
        (min, Vec2::new(0.0, 0.0)),
        (min + Vec2::new(size.x, 0.0), Vec2::new(1.0, 0.0)),
        (min + size, Vec2::new(1.0, 1.0)),
        (min + Vec2::new(0.0, size.y), Vec2::new(0.0, 1.0)),
    ];
    for index in [0, 1, 2, 0, 2, 3] {
        let (local, uv) = corners[index];
        let p = xf.transform_point2(local);
        out.push(Vertex::textured(p.x, p.y, uv.x, uv.y, color));
    }
}
