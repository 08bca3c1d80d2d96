//! Wireframe line-list derivation.

/// Emits the three edges of each triangle as vertex-index pairs.
///
/// Output is `(v1, v2), (v2, v3), (v3, v1)` per triangle, in triangle order.
/// Edges shared by two triangles appear twice. Only indices are read, so the
/// result does not depend on heights or normals.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeExtractor;

impl EdgeExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, triangles: &[[u32; 3]]) -> Vec<[u32; 2]> {
        triangles
            .iter()
            .flat_map(|&[a, b, c]| [[a, b], [b, c], [c, a]])
            .collect()
    }
}
