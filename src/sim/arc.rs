//! Angular span of a water shell
//!
//! Angles are in degrees with 0° at 12 o'clock, growing clockwise on screen.
//! Unlike a normalized arc, a span keeps its raw start/end so a full ring is
//! `0..360` rather than collapsing to an empty range.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::normalize_degrees;

/// An angular range `[start, end]` in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcSpan {
    pub start: f32,
    pub end: f32,
}

impl ArcSpan {
    pub fn new(start: f32, end: f32) -> Result<Self, ConfigError> {
        if !start.is_finite() || !end.is_finite() || end <= start {
            return Err(ConfigError::InvalidAngleRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The full ring
    pub fn full() -> Self {
        Self {
            start: 0.0,
            end: 360.0,
        }
    }

    /// Angular extent in degrees
    #[inline]
    pub fn span(&self) -> f32 {
        self.end - self.start
    }

    /// Whether the span covers the whole ring
    #[inline]
    pub fn is_full(&self) -> bool {
        self.span() >= 360.0
    }

    /// Angle at fraction `t` of the span (t = 0 → start, t = 1 → end)
    #[inline]
    pub fn angle_at(&self, t: f32) -> f32 {
        self.start + t * self.span()
    }

    /// Fraction in [0, 1] of the span an angle sits at
    ///
    /// The angle is first taken relative to `start` around the ring. Angles
    /// that fall outside the span snap to whichever end is nearer.
    pub fn fraction_of(&self, angle: f32) -> f32 {
        let span = self.span();
        if self.is_full() {
            return (normalize_degrees(angle - self.start) / span).clamp(0.0, 1.0);
        }

        let offset = normalize_degrees(angle - self.start);
        if offset <= span {
            (offset / span).clamp(0.0, 1.0)
        } else if offset - span < 360.0 - offset {
            1.0
        } else {
            0.0
        }
    }

    /// Check if an angle is within the span
    pub fn contains_angle(&self, angle: f32) -> bool {
        self.is_full() || normalize_degrees(angle - self.start) <= self.span()
    }
}
