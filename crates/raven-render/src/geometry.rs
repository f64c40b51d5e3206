use raven_sphere::Mesh;

use crate::vertex::SkyVertex;

/// CPU-side vertex and index data ready for upload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SkyGeometry {
    pub vertices: Vec<SkyVertex>,
    pub indices: Vec<u32>,
}

impl SkyGeometry {
    pub fn from_mesh(mesh: &Mesh) -> Self {
        Self {
            vertices: mesh.vertices().iter().map(SkyVertex::from).collect(),
            indices: mesh.indices().to_vec(),
        }
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raven_sphere::build_sphere;

    #[test]
    fn test_reference_sky_byte_sizes() {
        let mesh = build_sphere(32, 16).unwrap();
        let geometry = SkyGeometry::from_mesh(&mesh);
        assert_eq!(geometry.vertices.len(), 450);
        assert_eq!(geometry.vertex_bytes().len(), 450 * 24);
        assert_eq!(geometry.index_bytes().len(), 2604 * 4);
        assert_eq!(geometry.index_count(), 2604);
    }

    #[test]
    fn test_records_follow_mesh_order() {
        let mesh = build_sphere(4, 4).unwrap();
        let geometry = SkyGeometry::from_mesh(&mesh);
        for (gpu, v) in geometry.vertices.iter().zip(mesh.vertices()) {
            assert_eq!(gpu.position, v.position.to_array());
            assert_eq!(gpu.normal, v.normal.to_array());
        }
        assert_eq!(geometry.indices, mesh.indices());
    }
}
