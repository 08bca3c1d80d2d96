//! Fluent builder for one generation request.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::banding::HeightIntervalColorBanding;
use crate::config::{GenerationConfig, GridBounds};
use crate::edges::EdgeExtractor;
use crate::errors::MeshError;
use crate::generators::FaultPartitionGenerator;
use crate::grid::GridTopology;
use crate::mesh::Mesh;
use crate::normals::NormalEstimator;

/// Result of a generation run.
#[derive(Debug)]
pub struct MeshResult {
    pub mesh: Mesh,
    /// Populated if metrics tracking was enabled.
    pub metrics: Option<MeshMetrics>,
}

/// Timing and size figures from one generation run.
#[derive(Debug, Clone)]
pub struct MeshMetrics {
    /// Wall time for the whole pipeline (milliseconds).
    pub generation_time_ms: u64,
    pub vertex_count: usize,
    pub face_count: usize,
    pub edge_count: usize,
    pub fault_iterations: usize,
}

/// Builder for a terrain mesh.
///
/// # Example
///
/// ```rust
/// use terrain_mesh::prelude::*;
///
/// let result = MeshBuilder::new()
///     .with_div(16)
///     .with_bounds(GridBounds::new(-2.0, 2.0, -2.0, 2.0))
///     .with_fault_iterations(300)
///     .with_fault_delta(0.01)
///     .with_seed(7)
///     .build()?;
///
/// assert_eq!(result.mesh.vertex_count(), 17 * 17);
/// # Ok::<(), MeshError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MeshBuilder {
    config: GenerationConfig,
    normals: NormalEstimator,
    track_metrics: bool,
}

impl Default for MeshBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshBuilder {
    /// Creates a builder with the default configuration.
    pub fn new() -> Self {
        Self::from_config(GenerationConfig::default())
    }

    pub fn from_config(config: GenerationConfig) -> Self {
        Self {
            config,
            normals: NormalEstimator::default(),
            track_metrics: false,
        }
    }

    /// Sets subdivisions per axis.
    pub fn with_div(mut self, div: usize) -> Self {
        self.config.div = div;
        self
    }

    /// Sets the world-space extent.
    pub fn with_bounds(mut self, bounds: GridBounds) -> Self {
        self.config.bounds = bounds;
        self
    }

    /// Sets the number of fault planes.
    pub fn with_fault_iterations(mut self, iterations: usize) -> Self {
        self.config.fault_iterations = iterations;
        self
    }

    /// Sets the per-plane height step.
    pub fn with_fault_delta(mut self, delta: f32) -> Self {
        self.config.fault_delta = delta;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Replaces the normal estimator.
    pub fn with_normal_estimator(mut self, normals: NormalEstimator) -> Self {
        self.normals = normals;
        self
    }

    /// Enables timing and count metrics on the result.
    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.track_metrics = enabled;
        self
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Generates the mesh from the configured seed.
    pub fn build(&self) -> Result<MeshResult, MeshError> {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        self.build_with_rng(&mut rng)
    }

    /// Generates the mesh drawing fault planes from `rng`. The configured seed is ignored.
    pub fn build_with_rng(&self, rng: &mut impl Rng) -> Result<MeshResult, MeshError> {
        // Validation happens before any buffer exists.
        self.config.validate()?;
        let topology = GridTopology::new(self.config.div, self.config.bounds)?;

        let start_time = if self.track_metrics {
            Some(Instant::now())
        } else {
            None
        };

        let mut grid = topology.build();

        FaultPartitionGenerator::new(self.config.fault_iterations, self.config.fault_delta)
            .apply(&mut grid, rng);

        let normals = self.normals.estimate(&grid.positions, &grid.triangles);
        let edges = EdgeExtractor::new().extract(&grid.triangles);
        let (interval, thresholds) = HeightIntervalColorBanding::new().compute(&grid.positions);

        let mesh = Mesh::from_parts(
            topology,
            &grid.positions,
            &normals,
            &grid.triangles,
            &edges,
            interval,
            thresholds,
        );

        info!(
            "Generated terrain: {} vertices, {} faces, z in [{}, {}]",
            mesh.vertex_count(),
            mesh.face_count(),
            interval.min_z,
            interval.max_z
        );

        let metrics = start_time.map(|start| MeshMetrics {
            generation_time_ms: start.elapsed().as_millis() as u64,
            vertex_count: mesh.vertex_count(),
            face_count: mesh.face_count(),
            edge_count: mesh.edge_count(),
            fault_iterations: self.config.fault_iterations,
        });

        Ok(MeshResult { mesh, metrics })
    }
}

/// Generates a terrain mesh in one call.
#[allow(clippy::too_many_arguments)]
pub fn generate(
    div: usize,
    min_x: f32,
    max_x: f32,
    min_y: f32,
    max_y: f32,
    fault_iterations: usize,
    fault_delta: f32,
    seed: u64,
) -> Result<Mesh, MeshError> {
    MeshBuilder::new()
        .with_div(div)
        .with_bounds(GridBounds::new(min_x, max_x, min_y, max_y))
        .with_fault_iterations(fault_iterations)
        .with_fault_delta(fault_delta)
        .with_seed(seed)
        .build()
        .map(|result| result.mesh)
}
