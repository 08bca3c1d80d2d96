//! Per-vertex normal estimation from triangle geometry.

use glam::Vec3;
use tracing::{debug, warn};

/// Normal assigned to vertices no triangle touches.
pub const DEFAULT_NORMAL: Vec3 = Vec3::Z;

/// Accumulates face normals at each vertex and normalizes the result.
///
/// Face normals are the unnormalized cross product `(v2 - v1) x (v3 - v1)`,
/// so larger triangles weigh more.
#[derive(Debug, Clone)]
pub struct NormalEstimator {
    /// Accumulated lengths at or below this are treated as zero.
    epsilon: f32,
}

impl Default for NormalEstimator {
    fn default() -> Self {
        Self { epsilon: 1e-12 }
    }
}

impl NormalEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the zero-length threshold.
    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Face normal of one triangle, in winding order.
    pub fn face_normal(v1: Vec3, v2: Vec3, v3: Vec3) -> Vec3 {
        (v2 - v1).cross(v3 - v1)
    }

    /// Computes one unit normal per position.
    ///
    /// # Panics
    ///
    /// Panics if any triangle references an index `>= positions.len()`.
    /// Triangles from [`GridTopology::build`](crate::grid::GridTopology::build)
    /// always satisfy this.
    pub fn estimate(&self, positions: &[Vec3], triangles: &[[u32; 3]]) -> Vec<Vec3> {
        let mut normals = vec![Vec3::ZERO; positions.len()];

        for &[a, b, c] in triangles {
            let (a, b, c) = (a as usize, b as usize, c as usize);
            assert!(
                a < positions.len() && b < positions.len() && c < positions.len(),
                "triangle [{a}, {b}, {c}] references a vertex past {}",
                positions.len()
            );
            let n = Self::face_normal(positions[a], positions[b], positions[c]);

            normals[a] += n;
            normals[b] += n;
            normals[c] += n;
        }

        let mut degenerate = 0usize;
        for n in normals.iter_mut() {
            let len = n.length();
            if len > self.epsilon {
                *n /= len;
            } else {
                *n = DEFAULT_NORMAL;
                degenerate += 1;
            }
        }

        if degenerate > 0 {
            warn!(
                "{} vertices had no usable normal; using {}",
                degenerate, DEFAULT_NORMAL
            );
        }
        debug!(
            "Estimated {} vertex normals from {} faces",
            normals.len(),
            triangles.len()
        );

        normals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridBounds;
    use crate::grid::GridTopology;

    fn assert_unit(n: Vec3) {
        assert!((n.length() - 1.0).abs() < 1e-5, "{n} is not unit length");
    }

    #[test]
    fn test_flat_grid_points_up() {
        let grid = GridTopology::new(4, GridBounds::UNIT).unwrap().build();
        let normals = NormalEstimator::new().estimate(&grid.positions, &grid.triangles);
        assert_eq!(normals.len(), grid.positions.len());
        for n in normals {
            assert!((n - Vec3::Z).length() < 1e-6, "{n} should point up");
        }
    }

    #[test]
    fn test_face_normal_is_cross_product() {
        let n = NormalEstimator::face_normal(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 3.0, 0.0),
        );
        assert_eq!(n, Vec3::new(0.0, 0.0, 6.0));
    }

    #[test]
    fn test_sloped_plane() {
        // z = x: every face normal is parallel to (-1, 0, 1).
        let mut grid = GridTopology::new(3, GridBounds::UNIT).unwrap().build();
        for p in grid.positions.iter_mut() {
            p.z = p.x;
        }
        let expected = Vec3::new(-1.0, 0.0, 1.0).normalize();
        let normals = NormalEstimator::new().estimate(&grid.positions, &grid.triangles);
        for n in normals {
            assert_unit(n);
            assert!((n - expected).length() < 1e-5, "{n} != {expected}");
        }
    }

    #[test]
    fn test_each_face_counted_once_per_vertex() {
        // Two faces at right angles sharing edge (0, 1).
        let positions = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, -1.0),
        ];
        let triangles = vec![[0, 1, 2], [0, 1, 3]];
        let normals = NormalEstimator::new().estimate(&positions, &triangles);

        let shared = Vec3::new(0.0, 1.0, 1.0).normalize();
        assert!((normals[0] - shared).length() < 1e-6);
        assert!((normals[1] - shared).length() < 1e-6);
        assert!((normals[2] - Vec3::Z).length() < 1e-6);
        assert!((normals[3] - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_untouched_vertex_keeps_default() {
        let positions = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(5.0, 5.0, 5.0),
        ];
        let normals = NormalEstimator::new().estimate(&positions, &[[0, 1, 2]]);
        assert_eq!(normals[3], DEFAULT_NORMAL);
        assert!(normals.iter().all(|n| n.is_finite()));
    }

    #[test]
    fn test_epsilon_threshold() {
        // A sliver whose accumulated normal is tiny but non-zero.
        let positions = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1e-3, 0.0, 0.0),
            Vec3::new(0.0, 1e-3, 0.0),
        ];
        let strict = NormalEstimator::new().with_epsilon(1e-3);
        let normals = strict.estimate(&positions, &[[0, 1, 2]]);
        assert!(normals.iter().all(|&n| n == DEFAULT_NORMAL));

        let normals = NormalEstimator::new().estimate(&positions, &[[0, 1, 2]]);
        assert!(normals.iter().all(|n| (*n - Vec3::Z).length() < 1e-6));
    }

    #[test]
    #[should_panic(expected = "references a vertex past 3")]
    fn test_triangle_past_positions_panics() {
        let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        NormalEstimator::new().estimate(&positions, &[[0, 1, 3]]);
    }

    #[test]
    fn test_cancelling_faces_fall_back_to_default() {
        let positions = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        let normals = NormalEstimator::new().estimate(&positions, &[[0, 1, 2], [0, 2, 1]]);
        assert!(normals.iter().all(|&n| n == DEFAULT_NORMAL));
    }
}
