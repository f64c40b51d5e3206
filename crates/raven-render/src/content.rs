//! Turning a finished mesh plus material into something drawable.

use raven_sphere::Mesh;
use tracing::debug;
use wgpu::util::DeviceExt;

use crate::error::RenderError;
use crate::geometry::SkyGeometry;

/// Sky shading parameters. The sky is a vertical gradient from `horizon` at
/// the equator to `zenith` at the north pole.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialSpec {
    pub label: String,
    /// Linear RGB.
    pub zenith: [f32; 3],
    /// Linear RGB.
    pub horizon: [f32; 3],
}

impl Default for MaterialSpec {
    fn default() -> Self {
        Self {
            label: "skydome".to_string(),
            zenith: [0.08, 0.22, 0.6],
            horizon: [0.65, 0.78, 0.92],
        }
    }
}

/// Builds a renderable model from a mesh and a material.
pub trait ContentBuilder {
    type Model;

    fn build(&mut self, mesh: &Mesh, material: &MaterialSpec) -> Result<Self::Model, RenderError>;
}

/// Uploaded sky mesh.
pub struct SkyModel {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
    pub material: MaterialSpec,
}

impl SkyModel {
    pub fn bind<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
    }

    pub fn draw(&self, render_pass: &mut wgpu::RenderPass) {
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// [`ContentBuilder`] that uploads into GPU buffers on `device`.
pub struct GpuContentBuilder<'a> {
    device: &'a wgpu::Device,
}

impl<'a> GpuContentBuilder<'a> {
    pub fn new(device: &'a wgpu::Device) -> Self {
        Self { device }
    }
}

impl ContentBuilder for GpuContentBuilder<'_> {
    type Model = SkyModel;

    fn build(&mut self, mesh: &Mesh, material: &MaterialSpec) -> Result<SkyModel, RenderError> {
        let geometry = SkyGeometry::from_mesh(mesh);
        if geometry.is_empty() {
            return Err(RenderError::EmptyGeometry);
        }

        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{}-vertices", material.label)),
                contents: geometry.vertex_bytes(),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            });
        let index_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{}-indices", material.label)),
                contents: geometry.index_bytes(),
                usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            });

        debug!(
            "Uploaded {} ({} vertices, {} indices)",
            material.label,
            geometry.vertices.len(),
            geometry.index_count()
        );

        Ok(SkyModel {
            vertex_buffer,
            index_buffer,
            index_count: geometry.index_count(),
            material: material.clone(),
        })
    }
}
