//! Configuration types for terrain generation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::errors::MeshError;

/// World-space rectangle covered by the grid, in the XY plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl GridBounds {
    pub const fn new(min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// The square `[-1, 1] x [-1, 1]`.
    pub const UNIT: GridBounds = GridBounds::new(-1.0, 1.0, -1.0, 1.0);

    /// Returns a random point within the bounds (edges included).
    ///
    /// `x` is drawn before `y`; fault generation relies on that order.
    pub fn random_point(&self, rng: &mut impl rand::Rng) -> Vec2 {
        let x = rng.gen_range(self.min_x..=self.max_x);
        let y = rng.gen_range(self.min_y..=self.max_y);
        Vec2::new(x, y)
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    /// Whether `(x, y)` lies inside the bounds (edges included).
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Rejects non-finite or empty ranges, and spans too wide to represent.
    pub fn validate(&self) -> Result<(), MeshError> {
        let all_finite = [self.min_x, self.max_x, self.min_y, self.max_y]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(MeshError::InvalidParameter(format!(
                "bounds must be finite, got {self:?}"
            )));
        }
        if self.min_x >= self.max_x {
            return Err(MeshError::InvalidParameter(format!(
                "min_x ({}) must be less than max_x ({})",
                self.min_x, self.max_x
            )));
        }
        if self.min_y >= self.max_y {
            return Err(MeshError::InvalidParameter(format!(
                "min_y ({}) must be less than max_y ({})",
                self.min_y, self.max_y
            )));
        }
        if !self.width().is_finite() || !self.height().is_finite() {
            return Err(MeshError::InvalidParameter(format!(
                "bounds span must be finite, got {self:?}"
            )));
        }
        Ok(())
    }
}

impl Default for GridBounds {
    fn default() -> Self {
        Self::UNIT
    }
}

/// Full set of inputs for one generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Subdivisions per axis.
    pub div: usize,

    /// World-space extent of the grid.
    pub bounds: GridBounds,

    /// Number of fault planes applied.
    pub fault_iterations: usize,

    /// Height added to (or removed from) each vertex per fault plane.
    pub fault_delta: f32,

    /// Seed for the fault plane sequence.
    pub seed: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            div: 64,
            bounds: GridBounds::UNIT,
            fault_iterations: 400,
            fault_delta: 0.002,
            seed: 42,
        }
    }
}

impl GenerationConfig {
    /// Smooth, low relief terrain.
    pub fn gentle() -> Self {
        Self {
            div: 48,
            fault_iterations: 300,
            fault_delta: 0.0015,
            ..Default::default()
        }
    }

    /// Dense grid with many faults for sharp, broken relief.
    pub fn rugged() -> Self {
        Self {
            div: 128,
            fault_iterations: 1000,
            fault_delta: 0.003,
            ..Default::default()
        }
    }

    /// Fails fast on anything that would make the grid or fault pass meaningless.
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.div < 1 {
            return Err(MeshError::InvalidParameter(
                "div must be at least 1".to_string(),
            ));
        }
        self.bounds.validate()?;
        if !self.fault_delta.is_finite() {
            return Err(MeshError::InvalidParameter(format!(
                "fault_delta must be finite, got {}",
                self.fault_delta
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GenerationConfig::default().validate().is_ok());
        assert!(GenerationConfig::gentle().validate().is_ok());
        assert!(GenerationConfig::rugged().validate().is_ok());
    }

    #[test]
    fn test_zero_div_rejected() {
        let config = GenerationConfig {
            div: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(MeshError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_degenerate_bounds_rejected() {
        assert!(GridBounds::new(1.0, 1.0, -1.0, 1.0).validate().is_err());
        assert!(GridBounds::new(-1.0, 1.0, 2.0, -2.0).validate().is_err());
        assert!(GridBounds::new(f32::NAN, 1.0, -1.0, 1.0).validate().is_err());
    }

    #[test]
    fn test_overflowing_span_rejected() {
        let wide_x = GridBounds::new(-3.0e38, 3.0e38, -1.0, 1.0);
        assert!(wide_x.width().is_infinite());
        assert!(matches!(
            wide_x.validate(),
            Err(MeshError::InvalidParameter(_))
        ));

        let wide_y = GridBounds::new(-1.0, 1.0, -f32::MAX, f32::MAX);
        assert!(wide_y.validate().is_err());

        // Largest representable span is still accepted.
        let widest = GridBounds::new(0.0, f32::MAX, -1.0, 1.0);
        assert!(widest.validate().is_ok());
    }

    #[test]
    fn test_non_finite_delta_rejected() {
        let config = GenerationConfig {
            fault_delta: f32::INFINITY,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_random_point_within_bounds() {
        let bounds = GridBounds::new(-3.0, 5.0, 10.0, 12.0);
        let mut rng = rand::rngs::StdRng::seed_from_u64(12345);
        for _ in 0..1000 {
            let p = bounds.random_point(&mut rng);
            assert!(bounds.contains(p.x, p.y), "{p:?} escaped {bounds:?}");
        }
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GenerationConfig =
            serde_json::from_str(r#"{ "div": 8, "seed": 7 }"#).unwrap();
        assert_eq!(config.div, 8);
        assert_eq!(config.seed, 7);
        assert_eq!(config.fault_iterations, 400);
        assert_eq!(config.bounds, GridBounds::UNIT);
    }
}
