//! Water surface polygon
//!
//! Rebuilds the band between the shell floor and the displaced surface.
//! Runs every render for every shell, so it writes into a caller-owned
//! buffer instead of allocating.

use glam::Vec2;

use super::mesh::RadialMesh;
use super::overlay::BackgroundOverlay;
use super::wave::WaveField;

/// Fill `out` with the band polygon: displaced surface start → end, then the
/// floor end → start
pub fn build_polygon(
    mesh: &RadialMesh,
    field: &WaveField,
    overlay: &BackgroundOverlay,
    elapsed_seconds: f32,
    out: &mut Vec<Vec2>,
) {
    out.clear();
    out.reserve(mesh.sample_count() * 2);

    let center = mesh.center();
    let radial_offset = mesh.radial_offset();
    out.extend(
        mesh.directions()
            .iter()
            .zip(field.heights())
            .enumerate()
            .map(|(i, (direction, height))| {
                let surface =
                    radial_offset + height + overlay.compute_height(i as f32, elapsed_seconds);
                center + *direction * surface
            }),
    );
    out.extend_from_slice(mesh.inner_vertices());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::arc::ArcSpan;
    use crate::sim::wave::WaveParams;

    fn shell(arc: ArcSpan) -> (RadialMesh, WaveField) {
        let mesh = RadialMesh::new(arc, Vec2::ZERO, 20.0, 10.0, 1.0).unwrap();
        let field = WaveField::new(&mesh, WaveParams::for_height(10.0)).unwrap();
        (mesh, field)
    }

    /// Twice the signed area of a closed polygon (positive is clockwise on a y-down screen)
    fn signed_area2(points: &[Vec2]) -> f32 {
        let n = points.len();
        (0..n)
            .map(|i| {
                let a = points[i];
                let b = points[(i + 1) % n];
                a.x * b.y - b.x * a.y
            })
            .sum()
    }

    #[test]
    fn test_calm_polygon_matches_mesh() {
        let (mesh, field) = shell(ArcSpan::new(0.0, 180.0).unwrap());
        let mut points = Vec::new();
        build_polygon(&mesh, &field, &BackgroundOverlay::flat(), 0.0, &mut points);

        let count = mesh.sample_count();
        assert_eq!(points.len(), count * 2);
        for (p, outer) in points[..count].iter().zip(mesh.outer_vertices()) {
            assert!((*p - *outer).length() < 1e-4);
        }
        assert_eq!(&points[count..], mesh.inner_vertices());
    }

    #[test]
    fn test_band_winding_is_clockwise() {
        let (mesh, field) = shell(ArcSpan::new(0.0, 180.0).unwrap());
        let mut points = Vec::new();
        build_polygon(&mesh, &field, &BackgroundOverlay::flat(), 0.0, &mut points);
        // Half annulus area: π(30² − 20²)/2
        let area = signed_area2(&points) / 2.0;
        let expected = std::f32::consts::PI * (900.0 - 400.0) / 2.0;
        assert!(area > 0.0);
        assert!((area - expected).abs() / expected < 0.01);
    }

    #[test]
    fn test_wave_heights_displace_surface() {
        let (mesh, mut field) = shell(ArcSpan::full());
        field.set_height(10, 14.0);
        let mut points = Vec::new();
        build_polygon(&mesh, &field, &BackgroundOverlay::flat(), 0.0, &mut points);
        assert!((points[10].length() - 34.0).abs() < 1e-3);
        assert!((points[11].length() - 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_buffer_is_reused() {
        let (mesh, field) = shell(ArcSpan::full());
        let mut points = Vec::new();
        build_polygon(&mesh, &field, &BackgroundOverlay::flat(), 0.0, &mut points);
        let capacity = points.capacity();
        let ptr = points.as_ptr();
        build_polygon(&mesh, &field, &BackgroundOverlay::flat(), 1.0, &mut points);
        assert_eq!(points.capacity(), capacity);
        assert_eq!(points.as_ptr(), ptr);
    }
}
