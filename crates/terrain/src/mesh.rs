//! The finished, immutable terrain mesh.

use glam::Vec3;
use serde::Serialize;

use crate::banding::{ColorBandThresholds, ElevationBand, HeightInterval};
use crate::config::GridBounds;
use crate::errors::{ElementKind, MeshError, check_index};
use crate::grid::{GridCoord, GridTopology};

/// Position and normal of one vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
}

/// Vertex indices of one triangle, in winding order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub vertices: [u32; 3],
}

/// One wireframe line segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub start: u32,
    pub end: u32,
}

/// Counts, extent and banding of a mesh, without the buffers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshSummary {
    pub div: usize,
    pub bounds: GridBounds,
    pub vertex_count: usize,
    pub face_count: usize,
    pub edge_count: usize,
    pub height_interval: HeightInterval,
    pub thresholds: ColorBandThresholds,
}

/// Generated terrain, laid out as flat buffers ready for upload.
///
/// Positions and normals hold three floats per vertex, `indices` three
/// vertex indices per face and `edge_indices` two per edge (six per face).
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    topology: GridTopology,
    positions: Vec<f32>,
    normals: Vec<f32>,
    indices: Vec<u32>,
    edge_indices: Vec<u32>,
    height_interval: HeightInterval,
    thresholds: ColorBandThresholds,
}

impl Mesh {
    pub(crate) fn from_parts(
        topology: GridTopology,
        positions: &[Vec3],
        normals: &[Vec3],
        triangles: &[[u32; 3]],
        edges: &[[u32; 2]],
        height_interval: HeightInterval,
        thresholds: ColorBandThresholds,
    ) -> Self {
        Self {
            topology,
            positions: positions.iter().flat_map(|p| p.to_array()).collect(),
            normals: normals.iter().flat_map(|n| n.to_array()).collect(),
            indices: triangles.iter().flatten().copied().collect(),
            edge_indices: edges.iter().flatten().copied().collect(),
            height_interval,
            thresholds,
        }
    }

    pub fn topology(&self) -> &GridTopology {
        &self.topology
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn face_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn edge_count(&self) -> usize {
        self.edge_indices.len() / 2
    }

    /// `x, y, z` per vertex.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Unit `nx, ny, nz` per vertex.
    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    /// Triangle list indices.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Line list indices for wireframe drawing.
    pub fn edge_indices(&self) -> &[u32] {
        &self.edge_indices
    }

    pub fn height_interval(&self) -> HeightInterval {
        self.height_interval
    }

    pub fn thresholds(&self) -> ColorBandThresholds {
        self.thresholds
    }

    pub fn vertex(&self, index: usize) -> Result<Vertex, MeshError> {
        let i = check_index(ElementKind::Vertex, index, self.vertex_count())? * 3;
        Ok(Vertex {
            position: Vec3::from_slice(&self.positions[i..i + 3]),
            normal: Vec3::from_slice(&self.normals[i..i + 3]),
        })
    }

    /// Vertex at a grid coordinate; same storage as [`Mesh::vertex`].
    pub fn vertex_at(&self, row: usize, col: usize) -> Result<Vertex, MeshError> {
        self.vertex(self.topology.index_of(row, col)?)
    }

    pub fn coord_of(&self, index: usize) -> Result<GridCoord, MeshError> {
        self.topology.coord_of(index)
    }

    pub fn face(&self, index: usize) -> Result<Face, MeshError> {
        let i = check_index(ElementKind::Face, index, self.face_count())? * 3;
        Ok(Face {
            vertices: [self.indices[i], self.indices[i + 1], self.indices[i + 2]],
        })
    }

    pub fn edge(&self, index: usize) -> Result<Edge, MeshError> {
        let i = check_index(ElementKind::Edge, index, self.edge_count())? * 2;
        Ok(Edge {
            start: self.edge_indices[i],
            end: self.edge_indices[i + 1],
        })
    }

    pub fn vertices(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.positions
            .chunks_exact(3)
            .zip(self.normals.chunks_exact(3))
            .map(|(p, n)| Vertex {
                position: Vec3::from_slice(p),
                normal: Vec3::from_slice(n),
            })
    }

    /// Band of every vertex, in vertex order.
    pub fn vertex_bands(&self) -> Vec<ElevationBand> {
        self.positions
            .chunks_exact(3)
            .map(|p| self.thresholds.band_for(p[2]))
            .collect()
    }

    pub fn summary(&self) -> MeshSummary {
        MeshSummary {
            div: self.topology.div(),
            bounds: self.topology.bounds(),
            vertex_count: self.vertex_count(),
            face_count: self.face_count(),
            edge_count: self.edge_count(),
            height_interval: self.height_interval,
            thresholds: self.thresholds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::banding::HeightIntervalColorBanding;
    use crate::edges::EdgeExtractor;
    use crate::normals::NormalEstimator;

    fn flat_mesh(div: usize) -> Mesh {
        let grid = GridTopology::new(div, GridBounds::UNIT).unwrap().build();
        let normals = NormalEstimator::new().estimate(&grid.positions, &grid.triangles);
        let edges = EdgeExtractor::new().extract(&grid.triangles);
        let (interval, thresholds) = HeightIntervalColorBanding::new().compute(&grid.positions);
        Mesh::from_parts(
            grid.topology,
            &grid.positions,
            &normals,
            &grid.triangles,
            &edges,
            interval,
            thresholds,
        )
    }

    #[test]
    fn test_buffer_lengths() {
        let mesh = flat_mesh(3);
        assert_eq!(mesh.positions().len(), 3 * 16);
        assert_eq!(mesh.normals().len(), 3 * 16);
        assert_eq!(mesh.indices().len(), 3 * 18);
        assert_eq!(mesh.edge_indices().len(), 6 * 18);
        assert_eq!(mesh.edge_count(), 3 * mesh.face_count());
        assert_eq!(mesh.topology().div(), 3);
    }

    #[test]
    fn test_linear_and_grid_access_agree() {
        let mesh = flat_mesh(2);
        for index in 0..mesh.vertex_count() {
            let coord = mesh.coord_of(index).unwrap();
            assert_eq!(
                mesh.vertex(index).unwrap(),
                mesh.vertex_at(coord.row, coord.col).unwrap()
            );
        }
        assert_eq!(
            mesh.vertex_at(1, 2).unwrap().position,
            Vec3::new(1.0, 0.0, 0.0)
        );
    }

    #[test]
    fn test_out_of_range_access_fails() {
        let mesh = flat_mesh(1);
        assert!(matches!(
            mesh.vertex(4),
            Err(MeshError::IndexOutOfRange {
                kind: ElementKind::Vertex,
                index: 4,
                len: 4
            })
        ));
        assert!(mesh.face(2).is_err());
        assert!(mesh.edge(6).is_err());
        assert!(mesh.vertex_at(0, 2).is_err());
    }

    #[test]
    fn test_face_and_edge_access() {
        let mesh = flat_mesh(1);
        assert_eq!(mesh.face(1).unwrap().vertices, [1, 3, 2]);
        assert_eq!(mesh.edge(2).unwrap(), Edge { start: 2, end: 0 });
    }

    #[test]
    fn test_vertices_iterator_matches_accessor() {
        let mesh = flat_mesh(2);
        let all: Vec<Vertex> = mesh.vertices().collect();
        assert_eq!(all.len(), mesh.vertex_count());
        assert_eq!(all[4], mesh.vertex(4).unwrap());
    }

    #[test]
    fn test_flat_mesh_single_band() {
        let mesh = flat_mesh(2);
        assert!(
            mesh.vertex_bands()
                .iter()
                .all(|&b| b == ElevationBand::Top)
        );
    }

    #[test]
    fn test_summary_serializes() {
        let summary = flat_mesh(1).summary();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["vertex_count"], 4);
        assert_eq!(json["face_count"], 2);
        assert_eq!(json["edge_count"], 6);
        assert_eq!(json["thresholds"]["bot_start"], 0.0);
    }
}
