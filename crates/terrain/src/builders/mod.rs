//! Fluent builders for generating meshes.
//!
//! The [`MeshBuilder`] runs the whole pipeline: grid, fault planes,
//! normals, wireframe edges and color bands.

mod mesh;

pub use mesh::{MeshBuilder, MeshMetrics, MeshResult, generate};
