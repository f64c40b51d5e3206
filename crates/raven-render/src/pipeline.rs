//! Sky render pipeline: one uniform block, one indexed draw.

use std::num::NonZeroU64;

use wgpu::util::DeviceExt;

use crate::content::SkyModel;
use crate::uniform::SkyUniform;
use crate::vertex::SKY_VERTEX_LAYOUT;

pub struct SkyPipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl SkyPipeline {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sky-shader"),
            source: wgpu::ShaderSource::Wgsl(SKY_SHADER_SOURCE.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sky-bind-group-layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(size_of::<SkyUniform>() as u64),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sky-pipeline-layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sky-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[SKY_VERTEX_LAYOUT],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Seen from inside regardless of normal facing.
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        Self {
            pipeline,
            bind_group_layout,
        }
    }
}

/// Pipeline, uniform buffer and model for drawing the sky each frame.
pub struct SkyRenderer {
    pipeline: SkyPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    model: SkyModel,
}

impl SkyRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        model: SkyModel,
        initial: &SkyUniform,
    ) -> Self {
        let pipeline = SkyPipeline::new(device, surface_format);
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("sky-uniform"),
            contents: bytemuck::bytes_of(initial),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sky-bind-group"),
            layout: &pipeline.bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        Self {
            pipeline,
            uniform_buffer,
            bind_group,
            model,
        }
    }

    pub fn model(&self) -> &SkyModel {
        &self.model
    }

    pub fn update(&self, queue: &wgpu::Queue, uniform: &SkyUniform) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniform));
    }

    /// Record a pass that clears `target` and draws the sky into it.
    pub fn encode(&self, encoder: &mut wgpu::CommandEncoder, target: &wgpu::TextureView) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("sky-pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
        pass.set_pipeline(&self.pipeline.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        self.model.bind(&mut pass);
        self.model.draw(&mut pass);
    }
}

pub const SKY_SHADER_SOURCE: &str = r#"
struct SkyUniform {
    world: mat4x4<f32>,
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
    zenith: vec4<f32>,
    horizon: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> sky: SkyUniform;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) direction: vec3<f32>,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    let clip = sky.projection * sky.view * sky.world * vec4<f32>(in.position, 1.0);
    // Pin to just inside the far plane.
    out.clip_position = vec4<f32>(clip.xy, clip.w * 0.99999, clip.w);
    out.direction = in.position;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let up = normalize(in.direction).y;
    let t = clamp(up, 0.0, 1.0);
    let below = clamp(-up, 0.0, 1.0);
    let color = mix(sky.horizon.rgb, sky.zenith.rgb, t) * (1.0 - 0.6 * below);
    return vec4<f32>(color, 1.0);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentBuilder, GpuContentBuilder, MaterialSpec};
    use glam::{Mat4, Vec3};

    fn create_test_device() -> Option<(wgpu::Device, wgpu::Queue)> {
        pollster::block_on(async {
            let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
            let adapter = instance
                .request_adapter(&wgpu::RequestAdapterOptions {
                    force_fallback_adapter: true,
                    ..Default::default()
                })
                .await
                .ok()?;
            adapter
                .request_device(&wgpu::DeviceDescriptor::default())
                .await
                .ok()
        })
    }

    #[test]
    fn test_shader_uniform_fields_match_struct() {
        for field in ["world", "view", "projection", "zenith", "horizon"] {
            assert!(SKY_SHADER_SOURCE.contains(&format!("{field}:")), "missing {field}");
        }
        // Every uniform field is consumed by a shader stage.
        for field in ["world", "view", "projection", "zenith", "horizon"] {
            assert!(SKY_SHADER_SOURCE.contains(&format!("sky.{field}")), "unused {field}");
        }
    }

    #[test]
    fn test_renderer_draws_offscreen() {
        let Some((device, queue)) = create_test_device() else {
            return;
        };
        let format = wgpu::TextureFormat::Rgba8UnormSrgb;
        let mesh = raven_sphere::build_sphere(32, 16).unwrap();
        let material = MaterialSpec::default();
        let model = GpuContentBuilder::new(&device).build(&mesh, &material).unwrap();
        let uniform = SkyUniform::new(
            Vec3::new(0.0, 0.0, 10.0),
            1000.0,
            Mat4::look_at_rh(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::Y),
            Mat4::perspective_rh(std::f32::consts::FRAC_PI_4, 1.0, 0.01, 1000.0),
            &material,
        );
        let renderer = SkyRenderer::new(&device, format, model, &uniform);
        renderer.update(&queue, &uniform);

        let target = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("sky-test-target"),
            size: wgpu::Extent3d {
                width: 64,
                height: 64,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = target.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("sky-test-encoder"),
        });
        renderer.encode(&mut encoder, &view);
        queue.submit([encoder.finish()]);
        assert_eq!(renderer.model().index_count, 2604);
    }
}
