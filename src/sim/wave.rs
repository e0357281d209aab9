//! Wave height field
//!
//! A 1D chain of damped springs laid along the radial mesh. Each interior
//! sample is pulled toward its two neighbours and toward the baseline
//! height; the two end samples are anchors and never move on their own.
//!
//! Integration is explicit Euler with constants tuned for the nominal
//! 30 Hz tick, so `advance` does not scale by `dt`.
//!
//! See <https://gamedev.stackexchange.com/questions/44547/how-do-i-create-2d-water-with-dynamic-waves>

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::mesh::RadialMesh;
use crate::consts::{WAVE_DAMPING, WAVE_SPRING_CONSTANT};
use crate::error::{ConfigError, require_positive};
use crate::polar_angle;

/// Tunables for a wave field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveParams {
    /// Coupling between neighbours and toward the baseline
    pub spring_constant: f32,
    /// Velocity multiplier applied every tick (1 = no damping)
    pub damping: f32,
    /// Half-width of the calm band; outside it the baseline pull escalates
    pub wave_height: f32,
}

impl WaveParams {
    /// Default parameters for a shell of the given baseline height
    pub fn for_height(height: f32) -> Self {
        Self {
            spring_constant: WAVE_SPRING_CONSTANT,
            damping: WAVE_DAMPING,
            wave_height: height * 0.5,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("spring_constant", self.spring_constant)?;
        require_positive("wave_height", self.wave_height)?;
        if !(self.damping.is_finite() && (0.0..=1.0).contains(&self.damping)) {
            return Err(ConfigError::InvalidParameter {
                name: "damping",
                value: self.damping,
            });
        }
        Ok(())
    }
}

/// Heights and velocities of every mesh sample
#[derive(Debug, Clone)]
pub struct WaveField {
    baseline: f32,
    params: WaveParams,
    heights: Vec<f32>,
    velocities: Vec<f32>,
}

impl WaveField {
    /// A calm field sized to the mesh, every sample resting at the baseline
    pub fn new(mesh: &RadialMesh, params: WaveParams) -> Result<Self, ConfigError> {
        params.validate()?;
        let count = mesh.sample_count();
        Ok(Self {
            baseline: mesh.height(),
            params,
            heights: vec![mesh.height(); count],
            velocities: vec![0.0; count],
        })
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    pub fn velocities(&self) -> &[f32] {
        &self.velocities
    }

    pub fn baseline(&self) -> f32 {
        self.baseline
    }

    pub fn params(&self) -> &WaveParams {
        &self.params
    }

    /// Number of samples
    #[inline]
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Directly displace one sample (splashes, tests)
    pub fn set_height(&mut self, index: usize, height: f32) {
        self.heights[index] = height;
    }

    /// Sum of squared interior velocities, a proxy for the energy left in the field
    ///
    /// The anchors are skipped: an impact can write their velocity but
    /// `advance` never integrates it.
    pub fn kinetic_energy(&self) -> f32 {
        let last = self.velocities.len().saturating_sub(1);
        self.velocities
            .get(1..last)
            .map_or(0.0, |interior| interior.iter().map(|v| v * v).sum())
    }

    /// Relax the field by one tick
    pub fn advance(&mut self, _dt: f32) {
        let WaveParams {
            spring_constant,
            damping,
            wave_height,
        } = self.params;
        let baseline = self.baseline;
        let heights = &mut self.heights;
        let velocities = &mut self.velocities;

        for i in 1..heights.len().saturating_sub(1) {
            let height = heights[i];
            let force_left = (heights[i - 1] - height) * spring_constant;
            let force_right = (heights[i + 1] - height) * spring_constant;
            let mut force_baseline = (baseline - height) * spring_constant;

            // Pull harder once outside the calm band
            let baseline_delta = (baseline - height).abs();
            if baseline_delta > wave_height {
                force_baseline *= (1.0 + baseline_delta / wave_height).sqrt();
            }

            // Unit mass
            let acceleration = force_left + force_right + force_baseline;
            velocities[i] = velocities[i] * damping + acceleration;
            heights[i] += velocities[i];
        }
    }

    /// Sample index hit by something at `displacement` from the shell center
    pub fn impact_index(mesh: &RadialMesh, displacement: Vec2) -> usize {
        mesh.index_for_angle(polar_angle(displacement))
    }

    /// Kick the sample nearest to an impact
    ///
    /// The sample velocity is overwritten, not accumulated, so a burst of
    /// contacts on one spot cannot pile up.
    pub fn apply_impact(
        &mut self,
        mesh: &RadialMesh,
        displacement: Vec2,
        velocity: Vec2,
        mass: f32,
    ) -> usize {
        let index = Self::impact_index(mesh, displacement);
        let power = displacement.normalize_or_zero().dot(velocity) * mass;
        self.velocities[index] = power * self.params.wave_height;
        log::trace!("wave impact at sample {index} with power {power}");
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polar_direction;
    use crate::sim::arc::ArcSpan;
    use proptest::prelude::*;

    fn shell(arc: ArcSpan, params: impl FnOnce(f32) -> WaveParams) -> (RadialMesh, WaveField) {
        let mesh = RadialMesh::new(arc, Vec2::ZERO, 20.0, 10.0, 1.0).unwrap();
        let field = WaveField::new(&mesh, params(mesh.height())).unwrap();
        (mesh, field)
    }

    #[test]
    fn test_calm_field_stays_calm() {
        let (_, mut field) = shell(ArcSpan::full(), WaveParams::for_height);
        for _ in 0..100 {
            field.advance(1.0 / 30.0);
        }
        assert!(field.heights().iter().all(|h| *h == 10.0));
        assert_eq!(field.kinetic_energy(), 0.0);
    }

    #[test]
    fn test_converges_to_baseline() {
        let (mesh, mut field) = shell(ArcSpan::full(), WaveParams::for_height);
        for i in (3..mesh.steps() - 3).step_by(7) {
            field.set_height(i, 10.0 + (i % 5) as f32 * 2.0 - 4.0);
        }
        for _ in 0..5000 {
            field.advance(1.0 / 30.0);
        }
        for (i, h) in field.heights().iter().enumerate() {
            assert!((h - 10.0).abs() < 1e-2, "sample {i} at {h}");
        }
    }

    #[test]
    fn test_boundaries_never_move() {
        let (mesh, mut field) = shell(ArcSpan::new(0.0, 120.0).unwrap(), WaveParams::for_height);
        let last = mesh.steps();
        field.set_height(1, 25.0);
        field.set_height(last - 1, -5.0);
        for _ in 0..500 {
            field.advance(1.0 / 30.0);
            assert_eq!(field.heights()[0], 10.0);
            assert_eq!(field.heights()[last], 10.0);
            assert_eq!(field.velocities()[0], 0.0);
            assert_eq!(field.velocities()[last], 0.0);
        }
    }

    #[test]
    fn test_impact_index_at_arc_ends_and_middle() {
        let arc = ArcSpan::new(30.0, 150.0).unwrap();
        let (mesh, mut field) = shell(arc, WaveParams::for_height);
        let n = mesh.steps();
        let down = Vec2::new(0.0, 1.0);

        assert_eq!(field.apply_impact(&mesh, polar_direction(30.0) * 25.0, down, 1.0), 0);
        assert_eq!(field.apply_impact(&mesh, polar_direction(150.0) * 25.0, down, 1.0), n);
        let middle = field.apply_impact(&mesh, polar_direction(90.0) * 25.0, down, 1.0);
        assert!(middle.abs_diff(n / 2) <= 1);
        assert_eq!(middle, ((n as f32) / 2.0).round() as usize);
    }

    #[test]
    fn test_impact_overwrites_velocity() {
        let arc = ArcSpan::new(30.0, 150.0).unwrap();
        let (mesh, mut field) = shell(arc, WaveParams::for_height);
        let at = polar_direction(90.0) * 25.0;
        // Moving straight inward
        let inward = -polar_direction(90.0);

        let index = field.apply_impact(&mesh, at, inward * 2.0, 3.0);
        assert!((field.velocities()[index] - (-6.0 * 5.0)).abs() < 1e-4);

        let again = field.apply_impact(&mesh, at, inward * 0.5, 1.0);
        assert_eq!(index, again);
        assert!((field.velocities()[index] - (-0.5 * 5.0)).abs() < 1e-4);
    }

    #[test]
    fn test_impact_at_center_has_no_power() {
        let (mesh, mut field) = shell(ArcSpan::full(), WaveParams::for_height);
        let index = field.apply_impact(&mesh, Vec2::ZERO, Vec2::new(3.0, 4.0), 2.0);
        assert_eq!(field.velocities()[index], 0.0);
    }

    #[test]
    fn test_single_displacement_spreads_and_dissipates() {
        let (_, mut field) = shell(ArcSpan::full(), |height| WaveParams {
            spring_constant: 0.005,
            damping: 0.1,
            wave_height: height * 0.5,
        });
        let baseline = field.baseline();
        field.set_height(5, baseline * 2.0);

        field.advance(1.0 / 30.0);
        // Neighbours are pulled up, the peak starts to fall
        assert!(field.heights()[4] > baseline);
        assert!(field.heights()[6] > baseline);
        assert!(field.heights()[5] < baseline * 2.0);

        let mut energy = Vec::new();
        for _ in 0..1000 {
            field.advance(1.0 / 30.0);
            energy.push(field.kinetic_energy());
        }
        assert!(field.heights()[5] < baseline * 1.01);
        assert!(energy[999] < 1e-6);
        // Aggregate energy trends down window over window
        let window = |w: &[f32]| w.iter().sum::<f32>();
        assert!(window(&energy[100..200]) <= window(&energy[0..100]));
        assert!(window(&energy[500..600]) <= window(&energy[100..200]));
    }

    #[test]
    fn test_one_tick_exact_values() {
        let (_, mut field) = shell(ArcSpan::full(), |_| WaveParams {
            spring_constant: 0.005,
            damping: 0.1,
            wave_height: 5.0,
        });
        field.set_height(5, 20.0);
        field.advance(1.0 / 30.0);

        let k = 0.005f32;
        let h = field.heights();
        assert!(h[..4].iter().all(|h| *h == 10.0));
        // Swept in place: sample 4 sees the raised peak
        assert!((h[4] - 10.05).abs() < 1e-5, "h4 = {}", h[4]);
        // Sample 5 sees the already updated h4 and escalates its baseline pull
        let expected = 20.0 + ((10.05 - 20.0) * k - 10.0 * k - 10.0 * k * 3.0f32.sqrt());
        assert!((h[5] - expected).abs() < 1e-4, "h5 = {}", h[5]);
        assert!((h[5] - 19.81365).abs() < 1e-4);
        assert!((field.velocities()[4] - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_anchor_impact_leaves_no_energy() {
        let (mesh, mut field) = shell(ArcSpan::full(), WaveParams::for_height);
        // Straight down through 12 o'clock hits sample 0
        let down = Vec2::new(0.0, 1.0);
        let index = field.apply_impact(&mesh, polar_direction(0.0) * 25.0, down, 1.0);
        assert_eq!(index, 0);
        assert_ne!(field.velocities()[0], 0.0);
        assert_eq!(field.kinetic_energy(), 0.0);

        field.set_height(3, 16.0);
        assert_eq!(field.kinetic_energy(), 0.0);
        field.advance(1.0 / 30.0);
        assert!(field.kinetic_energy() > 0.0);
        for _ in 0..10_000 {
            field.advance(1.0 / 30.0);
        }
        assert!(field.kinetic_energy() < 1e-8);
        assert!(field.heights().iter().all(|h| (h - 10.0).abs() < 1e-3));
    }

    #[test]
    fn test_rejects_bad_params() {
        let mesh = RadialMesh::new(ArcSpan::full(), Vec2::ZERO, 20.0, 10.0, 1.0).unwrap();
        let mut params = WaveParams::for_height(10.0);
        params.damping = 1.5;
        assert!(WaveField::new(&mesh, params).is_err());
        params.damping = 0.9;
        params.wave_height = 0.0;
        assert!(WaveField::new(&mesh, params).is_err());
    }

    proptest! {
        #[test]
        fn prop_field_matches_mesh_and_settles(
            span in 20.0f32..360.0,
            kick in -20.0f32..20.0,
            damping in 0.1f32..0.9,
        ) {
            let arc = ArcSpan::new(0.0, span).unwrap();
            let mesh = RadialMesh::new(arc, Vec2::ZERO, 20.0, 10.0, 1.0).unwrap();
            let mut field = WaveField::new(&mesh, WaveParams {
                spring_constant: 0.005,
                damping,
                wave_height: 5.0,
            }).unwrap();
            prop_assert_eq!(field.len(), mesh.sample_count());

            let middle = mesh.steps() / 2;
            field.set_height(middle.max(1), 10.0 + kick);
            for _ in 0..4000 {
                field.advance(1.0 / 30.0);
            }
            prop_assert_eq!(field.heights().len(), mesh.sample_count());
            for h in field.heights() {
                prop_assert!((h - 10.0).abs() < 0.05);
            }
        }
    }
}
