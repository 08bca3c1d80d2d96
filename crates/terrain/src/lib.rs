//! Procedural terrain mesh generation.
//!
//! This crate builds a triangulated height-field surface and the derived
//! data a renderer needs: vertex normals, a wireframe line list and four
//! elevation thresholds for color banding.
//!
//! # Quick Start
//!
//! ```rust
//! use terrain_mesh::prelude::*;
//!
//! let mesh = generate(32, -1.0, 1.0, -1.0, 1.0, 500, 0.005, 42)?;
//!
//! assert_eq!(mesh.vertex_count(), 33 * 33);
//! assert_eq!(mesh.edge_indices().len(), 6 * mesh.face_count());
//! let bands = mesh.thresholds();
//! assert!(bands.top_start >= bands.bot_start);
//! # Ok::<(), MeshError>(())
//! ```
//!
//! The pipeline runs in a fixed order:
//! [`GridTopology`](grid::GridTopology) →
//! [`FaultPartitionGenerator`](generators::FaultPartitionGenerator) →
//! [`NormalEstimator`](normals::NormalEstimator) →
//! [`EdgeExtractor`](edges::EdgeExtractor) and
//! [`HeightIntervalColorBanding`](banding::HeightIntervalColorBanding).

pub mod banding;
pub mod builders;
pub mod config;
pub mod edges;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod mesh;
pub mod normals;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::banding::{
        ColorBandThresholds, ElevationBand, HeightInterval, HeightIntervalColorBanding,
    };
    pub use crate::builders::{MeshBuilder, MeshMetrics, MeshResult, generate};
    pub use crate::config::{GenerationConfig, GridBounds};
    pub use crate::edges::EdgeExtractor;
    pub use crate::errors::{ElementKind, MeshError};
    pub use crate::generators::{FaultPartitionGenerator, FaultPlane};
    pub use crate::grid::{Grid, GridCoord, GridTopology};
    pub use crate::mesh::{Edge, Face, Mesh, MeshSummary, Vertex};
    pub use crate::normals::NormalEstimator;
}
