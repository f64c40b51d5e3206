//! Immutable sphere mesh: vertex records plus a triangle-list index buffer.

use glam::Vec3;

/// A single sky sphere vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    /// Position on the (possibly scaled) sphere surface.
    pub position: Vec3,
    /// Normalized, area-weighted average of the incident face normals.
    pub normal: Vec3,
}

/// The output of a sphere build.
///
/// Never mutated after construction; consumers only read it when creating
/// GPU buffers.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl Mesh {
    pub(crate) fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        debug_assert_eq!(indices.len() % 3, 0);
        Self { vertices, indices }
    }

    /// Vertex records in generation order: rings first, then the two poles.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Triangle-list indices.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of vertex records.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangle-list indices.
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Number of triangles, always `index_count() / 3`.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate over vertex positions.
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices.iter().map(|v| v.position)
    }

    /// Iterate over triangles as index triples, in emission order.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }
}
