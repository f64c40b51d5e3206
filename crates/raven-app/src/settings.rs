//! Translating persisted configuration into component settings.

use glam::Vec3;
use raven_camera::{CameraSettings, MovementPolicy, OrbitLimits, Perspective};
use raven_config::{CameraConfig, CameraPolicy, Config, SkyConfig};
use raven_render::MaterialSpec;
use raven_sphere::{MeshError, NormalFacing, SphereMeshBuilder};

pub fn camera_settings(camera: &CameraConfig) -> CameraSettings {
    CameraSettings {
        pitch_limit: camera.pitch_limit,
        speed: camera.speed,
        mouse_speed_x: camera.mouse_speed_x,
        mouse_speed_y: camera.mouse_speed_y,
        edge_margin: camera.edge_margin,
        perspective: Perspective {
            fov_y: camera.fov_y,
            near: camera.near,
            far: camera.far,
        },
    }
}

/// Orbit distance is measured from the configured target.
pub fn movement_policy(camera: &CameraConfig) -> MovementPolicy {
    match camera.policy {
        CameraPolicy::FreeFly => MovementPolicy::FreeFly,
        CameraPolicy::Orbit => MovementPolicy::Orbit(OrbitLimits {
            focus: Vec3::from(camera.target),
            min_distance: camera.min_distance,
            max_distance: camera.max_distance,
        }),
    }
}

pub fn sky_builder(sky: &SkyConfig) -> Result<SphereMeshBuilder, MeshError> {
    let facing = if sky.outward_normals {
        NormalFacing::Outward
    } else {
        NormalFacing::Inward
    };
    Ok(SphereMeshBuilder::new(sky.width, sky.height)?.with_facing(facing))
}

/// Radius the unit sky mesh is drawn at.
pub fn sky_radius(config: &Config) -> f32 {
    if config.sky.scale_to_far_plane {
        config.camera.far
    } else {
        1.0
    }
}

pub fn sky_material() -> MaterialSpec {
    MaterialSpec::default()
}
