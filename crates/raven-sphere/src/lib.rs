//! Procedural sky sphere generation: unit sphere sampling, fixed-winding
//! triangulation, and area-weighted vertex normals.

mod builder;
mod error;
mod mesh;
mod normals;

pub use builder::{
    MIN_HEIGHT, MIN_WIDTH, MeshCounts, SphereMeshBuilder, build_sphere, expected_counts,
    sample_positions, triangulate,
};
pub use error::MeshError;
pub use mesh::{Mesh, Vertex};
pub use normals::{NormalFacing, accumulate_vertex_normals, face_normal};
