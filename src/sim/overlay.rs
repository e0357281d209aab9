//! Decorative background ripple
//!
//! A handful of sine terms with random phase, amplitude and frequency laid
//! over the simulated surface. Drawn once per shell so every shell wobbles
//! in its own way, then never touched again.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{BACKGROUND_COMPRESSION, BACKGROUND_WAVE_TERMS, BACKGROUND_WAVE_VELOCITY};

/// One sine term of the ripple
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RippleTerm {
    pub offset: f32,
    pub amplitude: f32,
    pub frequency_stretch: f32,
    pub phase_stretch: f32,
}

/// Fixed sum of sine terms sampled by mesh index and time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundOverlay {
    terms: [RippleTerm; BACKGROUND_WAVE_TERMS],
    velocity_scale: f32,
}

impl BackgroundOverlay {
    /// Draw random terms scaled to a shell's wave height
    pub fn random<R: Rng>(rng: &mut R, wave_height: f32) -> Self {
        let terms = std::array::from_fn(|_| RippleTerm {
            offset: (rng.random::<f32>() - 0.5) * wave_height * 0.5,
            amplitude: (rng.random::<f32>() * 0.4 + 0.1) * wave_height * 0.5,
            frequency_stretch: rng.random::<f32>() * BACKGROUND_COMPRESSION,
            phase_stretch: rng.random::<f32>() * BACKGROUND_COMPRESSION,
        });
        Self::from_terms(terms)
    }

    pub fn from_terms(terms: [RippleTerm; BACKGROUND_WAVE_TERMS]) -> Self {
        Self {
            terms,
            velocity_scale: BACKGROUND_WAVE_VELOCITY,
        }
    }

    /// An overlay that adds nothing
    pub fn flat() -> Self {
        Self::from_terms(
            [RippleTerm {
                offset: 0.0,
                amplitude: 0.0,
                frequency_stretch: 0.0,
                phase_stretch: 0.0,
            }; BACKGROUND_WAVE_TERMS],
        )
    }

    pub fn terms(&self) -> &[RippleTerm] {
        &self.terms
    }

    /// Ripple height at a sample offset and elapsed time
    pub fn compute_height(&self, sample_offset: f32, elapsed_seconds: f32) -> f32 {
        let phase = elapsed_seconds * self.velocity_scale;
        self.terms
            .iter()
            .map(|term| {
                term.offset
                    + term.amplitude
                        * (sample_offset * term.frequency_stretch + phase * term.phase_stretch)
                            .sin()
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Largest excursion the ripple can ever reach from zero
    fn max_excursion(overlay: &BackgroundOverlay) -> f32 {
        overlay
            .terms()
            .iter()
            .map(|term| term.offset.abs() + term.amplitude)
            .sum()
    }

    #[test]
    fn test_same_seed_same_overlay() {
        let a = BackgroundOverlay::random(&mut Pcg32::seed_from_u64(7), 5.0);
        let b = BackgroundOverlay::random(&mut Pcg32::seed_from_u64(7), 5.0);
        assert_eq!(a, b);
        let c = BackgroundOverlay::random(&mut Pcg32::seed_from_u64(8), 5.0);
        assert_ne!(a, c);
    }

    #[test]
    fn test_compute_height_is_pure() {
        let overlay = BackgroundOverlay::random(&mut Pcg32::seed_from_u64(42), 5.0);
        let first = overlay.compute_height(12.0, 3.25);
        for _ in 0..10 {
            assert_eq!(overlay.compute_height(12.0, 3.25), first);
        }
        assert!(first.abs() <= max_excursion(&overlay) + 1e-5);
    }

    #[test]
    fn test_term_ranges() {
        let wave_height = 4.0;
        let overlay = BackgroundOverlay::random(&mut Pcg32::seed_from_u64(3), wave_height);
        for term in overlay.terms() {
            assert!(term.offset.abs() <= wave_height * 0.25);
            assert!(term.amplitude >= 0.1 * wave_height * 0.5 - 1e-6);
            assert!(term.amplitude <= 0.5 * wave_height * 0.5 + 1e-6);
            assert!((0.0..BACKGROUND_COMPRESSION).contains(&term.frequency_stretch));
            assert!((0.0..BACKGROUND_COMPRESSION).contains(&term.phase_stretch));
        }
    }

    #[test]
    fn test_known_terms() {
        let term = RippleTerm {
            offset: 1.0,
            amplitude: 2.0,
            frequency_stretch: 0.5,
            phase_stretch: 0.0,
        };
        let overlay = BackgroundOverlay::from_terms([term; BACKGROUND_WAVE_TERMS]);
        let expected = 5.0 * (1.0 + 2.0 * (3.0_f32 * 0.5).sin());
        assert!((overlay.compute_height(3.0, 100.0) - expected).abs() < 1e-4);
        assert_eq!(BackgroundOverlay::flat().compute_height(3.0, 1.0), 0.0);
    }
}
