//! Fault-plane height synthesis.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};
use rand::Rng;
use tracing::debug;

use crate::config::{GenerationConfig, GridBounds};
use crate::grid::Grid;

/// Vertical cutting plane through `point`, described by its horizontal normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaultPlane {
    pub point: Vec2,
    /// Unit vector `(cos θ, sin θ)`.
    pub normal: Vec2,
}

impl FaultPlane {
    pub fn from_angle(point: Vec2, theta: f32) -> Self {
        Self {
            point,
            normal: Vec2::new(theta.cos(), theta.sin()),
        }
    }

    /// Signed distance of `(x, y)` from the plane.
    pub fn side(&self, x: f32, y: f32) -> f32 {
        (Vec2::new(x, y) - self.point).dot(self.normal)
    }

    /// Points strictly on the positive side are raised; everything else,
    /// including points on the plane, is lowered.
    pub fn raises(&self, x: f32, y: f32) -> bool {
        self.side(x, y) > 0.0
    }
}

/// Builds relief by superimposing many random fault planes.
///
/// Each iteration draws a point inside the grid bounds and a direction,
/// then shifts every vertex by `+delta` or `-delta` depending on its side.
#[derive(Debug, Clone)]
pub struct FaultPartitionGenerator {
    iterations: usize,
    delta: f32,
}

impl Default for FaultPartitionGenerator {
    fn default() -> Self {
        let config = GenerationConfig::default();
        Self::new(config.fault_iterations, config.fault_delta)
    }
}

impl FaultPartitionGenerator {
    pub fn new(iterations: usize, delta: f32) -> Self {
        Self { iterations, delta }
    }

    /// Sets the number of fault planes.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the per-plane height step.
    pub fn with_delta(mut self, delta: f32) -> Self {
        self.delta = delta;
        self
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Draws the next plane: point x, point y, then angle.
    pub fn draw_plane(&self, bounds: &GridBounds, rng: &mut impl Rng) -> FaultPlane {
        let point = bounds.random_point(rng);
        let theta = rng.gen_range(0.0..TAU);
        FaultPlane::from_angle(point, theta)
    }

    /// Shifts every position by one plane. Only z is written.
    pub fn apply_plane(&self, plane: &FaultPlane, positions: &mut [Vec3]) {
        for p in positions.iter_mut() {
            if plane.raises(p.x, p.y) {
                p.z += self.delta;
            } else {
                p.z -= self.delta;
            }
        }
    }

    /// Runs all iterations against the grid, drawing one plane per iteration.
    pub fn apply(&self, grid: &mut Grid, rng: &mut impl Rng) {
        let bounds = grid.topology.bounds();

        for _ in 0..self.iterations {
            let plane = self.draw_plane(&bounds, rng);
            self.apply_plane(&plane, &mut grid.positions);
        }

        debug!(
            "Applied {} fault planes (delta {}) to {} vertices",
            self.iterations,
            self.delta,
            grid.positions.len()
        );
    }
}
