use std::fmt;

use thiserror::Error;

/// What kind of element an out-of-range access was aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Vertex,
    Face,
    Edge,
    Row,
    Column,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::Vertex => "vertex",
            ElementKind::Face => "face",
            ElementKind::Edge => "edge",
            ElementKind::Row => "row",
            ElementKind::Column => "column",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("{kind} index {index} out of range (len {len})")]
    IndexOutOfRange {
        kind: ElementKind,
        index: usize,
        len: usize,
    },
}

impl MeshError {
    pub(crate) fn out_of_range(kind: ElementKind, index: usize, len: usize) -> Self {
        MeshError::IndexOutOfRange { kind, index, len }
    }
}

/// Checks `index < len`, producing an [`MeshError::IndexOutOfRange`] otherwise.
pub(crate) fn check_index(kind: ElementKind, index: usize, len: usize) -> Result<usize, MeshError> {
    if index < len {
        Ok(index)
    } else {
        Err(MeshError::out_of_range(kind, index, len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let err = MeshError::out_of_range(ElementKind::Face, 8, 8);
        assert_eq!(err.to_string(), "face index 8 out of range (len 8)");
    }

    #[test]
    fn test_check_index() {
        assert_eq!(check_index(ElementKind::Vertex, 3, 4), Ok(3));
        assert!(matches!(
            check_index(ElementKind::Vertex, 4, 4),
            Err(MeshError::IndexOutOfRange { index: 4, len: 4, .. })
        ));
    }
}
