use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::content::MaterialSpec;

/// Places the unit sky sphere around the camera, scaled to `radius`.
pub fn sky_world_matrix(camera_position: Vec3, radius: f32) -> Mat4 {
    Mat4::from_translation(camera_position) * Mat4::from_scale(Vec3::splat(radius))
}

/// Per-frame sky shader inputs. Matches `SkyUniform` in the WGSL source.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SkyUniform {
    pub world: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub zenith: [f32; 4],
    pub horizon: [f32; 4],
}

static_assertions::assert_eq_size!(SkyUniform, [u8; 224]);

impl SkyUniform {
    pub fn new(
        camera_position: Vec3,
        radius: f32,
        view: Mat4,
        projection: Mat4,
        material: &MaterialSpec,
    ) -> Self {
        let [zr, zg, zb] = material.zenith;
        let [hr, hg, hb] = material.horizon;
        Self {
            world: sky_world_matrix(camera_position, radius).to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
            zenith: [zr, zg, zb, 1.0],
            horizon: [hr, hg, hb, 1.0],
        }
    }
}
