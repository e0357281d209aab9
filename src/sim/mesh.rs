//! Radial mesh for a water shell
//!
//! A ring of samples spread along an arc around a center. Each sample has a
//! unit direction, an inner vertex on the shell floor and an outer vertex on
//! the undisturbed surface.
//!
//! Inner vertices are stored back to front (index 0 is the sample at the end
//! angle) and outer vertices front to back. Concatenating outer then inner
//! walks the band clockwise, which is what the surface polygon relies on.

use glam::Vec2;

use super::arc::ArcSpan;
use crate::error::{ConfigError, require_non_negative, require_positive};
use crate::{DEG_TO_RAD, polar_direction};

/// Ordered samples of a shell along its arc
#[derive(Debug, Clone)]
pub struct RadialMesh {
    arc: ArcSpan,
    center: Vec2,
    radial_offset: f32,
    height: f32,
    steps: usize,
    directions: Vec<Vec2>,
    inner_vertices: Vec<Vec2>,
    outer_vertices: Vec<Vec2>,
}

impl RadialMesh {
    /// Build the mesh, with `floor(arc_length / min_step_length)` steps
    pub fn new(
        arc: ArcSpan,
        center: Vec2,
        radial_offset: f32,
        height: f32,
        min_step_length: f32,
    ) -> Result<Self, ConfigError> {
        let radial_offset = require_non_negative("radial_offset", radial_offset)?;
        let height = require_positive("height", height)?;
        let min_step_length = require_positive("min_step_length", min_step_length)?;

        let steps = Self::steps_for(&arc, radial_offset, height, min_step_length)?;

        let mut directions = Vec::with_capacity(steps + 1);
        let mut inner_vertices = Vec::with_capacity(steps + 1);
        let mut outer_vertices = Vec::with_capacity(steps + 1);
        for i in 0..=steps {
            let angle = arc.angle_at(i as f32 / steps as f32);
            let direction = polar_direction(angle);
            directions.push(direction);
            outer_vertices.push(center + direction * (radial_offset + height));
            inner_vertices.push(center + direction * radial_offset);
        }
        // Floor runs end → start
        inner_vertices.reverse();

        Ok(Self {
            arc,
            center,
            radial_offset,
            height,
            steps,
            directions,
            inner_vertices,
            outer_vertices,
        })
    }

    /// Number of steps for a shell; positive arcs shorter than one step get one
    pub fn steps_for(
        arc: &ArcSpan,
        radial_offset: f32,
        height: f32,
        min_step_length: f32,
    ) -> Result<usize, ConfigError> {
        let arc_length = (radial_offset + height) * arc.span() * DEG_TO_RAD;
        if !arc_length.is_finite() || arc_length <= 0.0 {
            return Err(ConfigError::DegenerateArc {
                arc_length,
                min_step_length,
            });
        }
        Ok(((arc_length / min_step_length).floor() as usize).max(1))
    }

    /// Number of steps N (samples are 0..=N)
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Number of samples (N + 1)
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.steps + 1
    }

    pub fn arc(&self) -> &ArcSpan {
        &self.arc
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn radial_offset(&self) -> f32 {
        self.radial_offset
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Radius of the undisturbed surface
    #[inline]
    pub fn outer_radius(&self) -> f32 {
        self.radial_offset + self.height
    }

    /// Angle of sample `i` in degrees
    pub fn angle_at(&self, i: usize) -> f32 {
        self.arc.angle_at(i as f32 / self.steps as f32)
    }

    /// Unit direction of sample `i`
    #[inline]
    pub fn direction(&self, i: usize) -> Vec2 {
        self.directions[i]
    }

    pub fn directions(&self) -> &[Vec2] {
        &self.directions
    }

    /// Floor vertices, end angle first
    pub fn inner_vertices(&self) -> &[Vec2] {
        &self.inner_vertices
    }

    /// Undisturbed surface vertices, start angle first
    pub fn outer_vertices(&self) -> &[Vec2] {
        &self.outer_vertices
    }

    /// Nearest sample index for an angle in degrees
    pub fn index_for_angle(&self, angle: f32) -> usize {
        let step = self.arc.fraction_of(angle);
        ((step * self.steps as f32).round() as usize).min(self.steps)
    }
}
