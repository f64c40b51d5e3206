//! Mesh generation error types.

/// Errors raised while building a sphere mesh.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    /// The sampling resolution or scale cannot produce a valid mesh.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A vertex ended up with no usable accumulated normal.
    #[error("degenerate geometry: vertex {vertex} has a zero accumulated normal")]
    DegenerateGeometry {
        /// Index of the offending vertex.
        vertex: usize,
    },
}
