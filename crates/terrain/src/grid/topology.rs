use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GridBounds;
use crate::errors::{ElementKind, MeshError, check_index};

/// Largest subdivision count whose vertex indices still fit in a `u32`.
pub const MAX_DIV: usize = 65_534;

/// Row/column address of a lattice vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCoord {
    pub row: usize,
    pub col: usize,
}

impl GridCoord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Shape of the lattice: subdivision count and world-space extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridTopology {
    div: usize,
    bounds: GridBounds,
}

impl GridTopology {
    /// Validates the parameters; nothing is allocated on failure.
    pub fn new(div: usize, bounds: GridBounds) -> Result<Self, MeshError> {
        if div < 1 {
            return Err(MeshError::InvalidParameter(
                "div must be at least 1".to_string(),
            ));
        }
        if div > MAX_DIV {
            return Err(MeshError::InvalidParameter(format!(
                "div must be at most {MAX_DIV}, got {div}"
            )));
        }
        bounds.validate()?;
        Ok(Self { div, bounds })
    }

    pub fn div(&self) -> usize {
        self.div
    }

    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Vertices per row (and per column).
    pub fn side(&self) -> usize {
        self.div + 1
    }

    pub fn vertex_count(&self) -> usize {
        self.side() * self.side()
    }

    pub fn face_count(&self) -> usize {
        2 * self.div * self.div
    }

    /// Linear index of the vertex at `(row, col)`.
    pub fn index_of(&self, row: usize, col: usize) -> Result<usize, MeshError> {
        check_index(ElementKind::Row, row, self.side())?;
        check_index(ElementKind::Column, col, self.side())?;
        Ok(row * self.side() + col)
    }

    /// Row/column address of a linear vertex index.
    pub fn coord_of(&self, index: usize) -> Result<GridCoord, MeshError> {
        check_index(ElementKind::Vertex, index, self.vertex_count())?;
        Ok(GridCoord::new(index / self.side(), index % self.side()))
    }

    /// Emits the flat lattice and its triangle list.
    pub fn build(&self) -> Grid {
        let positions = self.lattice_positions();
        let triangles = self.triangles();

        debug!(
            "Built {}x{} grid: {} vertices, {} triangles",
            self.div,
            self.div,
            positions.len(),
            triangles.len()
        );

        Grid {
            topology: *self,
            positions,
            triangles,
        }
    }

    fn lattice_positions(&self) -> Vec<Vec3> {
        let b = &self.bounds;
        let steps = self.div as f32;
        let mut positions = Vec::with_capacity(self.vertex_count());

        for i in 0..self.side() {
            let y = lerp(b.min_y, b.max_y, i as f32 / steps);
            for j in 0..self.side() {
                let x = lerp(b.min_x, b.max_x, j as f32 / steps);
                positions.push(Vec3::new(x, y, 0.0));
            }
        }

        positions
    }

    fn triangles(&self) -> Vec<[u32; 3]> {
        let side = self.side() as u32;
        let mut triangles = Vec::with_capacity(self.face_count());

        for i in 0..self.div as u32 {
            for j in 0..self.div as u32 {
                let a = i * side + j;
                let b = a + 1;
                let c = a + side;
                let d = c + 1;

                // Both triangles share the (i, j) -> (i + 1, j + 1) diagonal.
                triangles.push([a, b, c]);
                triangles.push([b, d, c]);
            }
        }

        triangles
    }
}

/// Hits both endpoints exactly, so the last row and column land on the max bound.
fn lerp(min: f32, max: f32, t: f32) -> f32 {
    min * (1.0 - t) + max * t
}

/// Working buffers for one generation pass.
///
/// Only the z component of `positions` changes after [`GridTopology::build`].
#[derive(Debug, Clone)]
pub struct Grid {
    pub topology: GridTopology,
    pub positions: Vec<Vec3>,
    pub triangles: Vec<[u32; 3]>,
}
