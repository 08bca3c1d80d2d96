//! Rectangular grid lattice and its triangulation.
//!
//! Vertices are emitted row-major: row `i` steps along y, column `j` along x,
//! and the vertex at `(i, j)` has linear index `i * (div + 1) + j`.

mod topology;

pub use topology::{Grid, GridCoord, GridTopology, MAX_DIV};
