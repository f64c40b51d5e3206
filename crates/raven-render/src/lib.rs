//! GPU side of the sky: vertex format, uploads, the sky pipeline and the
//! window surface.

mod content;
mod context;
mod error;
mod geometry;
mod pipeline;
mod uniform;
mod vertex;

pub use content::{ContentBuilder, GpuContentBuilder, MaterialSpec, SkyModel};
pub use context::{RenderContext, init_render_context_blocking};
pub use error::RenderError;
pub use geometry::SkyGeometry;
pub use pipeline::{SKY_SHADER_SOURCE, SkyPipeline, SkyRenderer};
pub use uniform::{SkyUniform, sky_world_matrix};
pub use vertex::{SKY_VERTEX_ATTRIBUTES, SKY_VERTEX_LAYOUT, SkyVertex};
