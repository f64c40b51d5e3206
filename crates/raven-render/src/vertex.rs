//! Canonical vertex layout for the sky sphere.
//!
//! | Location | Offset | Format    | Field    |
//! |----------|--------|-----------|----------|
//! | 0        | 0      | Float32x3 | position |
//! | 1        | 12     | Float32x3 | normal   |

use std::mem;

use bytemuck::{Pod, Zeroable};
use raven_sphere::Vertex;
use wgpu::{VertexAttribute, VertexBufferLayout, VertexFormat, VertexStepMode};

/// GPU vertex record: position and normal, tightly packed.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct SkyVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

static_assertions::assert_eq_size!(SkyVertex, [u8; 24]);

impl From<&Vertex> for SkyVertex {
    fn from(v: &Vertex) -> Self {
        Self {
            position: v.position.to_array(),
            normal: v.normal.to_array(),
        }
    }
}

pub const SKY_VERTEX_ATTRIBUTES: [VertexAttribute; 2] = [
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: 0,
        shader_location: 0,
    },
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: mem::size_of::<[f32; 3]>() as u64,
        shader_location: 1,
    },
];

/// Layout used by every pipeline that draws [`SkyVertex`] buffers.
pub const SKY_VERTEX_LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
    array_stride: mem::size_of::<SkyVertex>() as u64,
    step_mode: VertexStepMode::Vertex,
    attributes: &SKY_VERTEX_ATTRIBUTES,
};

const _: () = assert!(SKY_VERTEX_ATTRIBUTES[0].offset == mem::offset_of!(SkyVertex, position) as u64);
const _: () = assert!(SKY_VERTEX_ATTRIBUTES[1].offset == mem::offset_of!(SkyVertex, normal) as u64);
const _: () = assert!(
    SKY_VERTEX_ATTRIBUTES[1].offset + 12 <= mem::size_of::<SkyVertex>() as u64,
    "last attribute exceeds vertex stride"
);

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_layout_stride_and_locations() {
        assert_eq!(SKY_VERTEX_LAYOUT.array_stride, 24);
        assert_eq!(SKY_VERTEX_LAYOUT.step_mode, VertexStepMode::Vertex);
        let locations: Vec<u32> = SKY_VERTEX_LAYOUT
            .attributes
            .iter()
            .map(|a| a.shader_location)
            .collect();
        assert_eq!(locations, vec![0, 1]);
    }

    #[test]
    fn test_from_mesh_vertex() {
        let v = Vertex {
            position: Vec3::new(0.0, 1.0, 0.0),
            normal: Vec3::new(0.0, 1.0, 0.0),
        };
        let gpu = SkyVertex::from(&v);
        assert_eq!(gpu.position, [0.0, 1.0, 0.0]);
        assert_eq!(bytemuck::bytes_of(&gpu).len(), 24);
    }
}
