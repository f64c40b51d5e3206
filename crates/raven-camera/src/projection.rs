use glam::Mat4;

use crate::bounds::WindowBounds;
use crate::error::CameraError;

/// Right-handed perspective projection parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Perspective {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Perspective {
    fn default() -> Self {
        Self {
            fov_y: std::f32::consts::FRAC_PI_4,
            near: 0.01,
            far: 1000.0,
        }
    }
}

impl Perspective {
    pub fn validate(&self) -> Result<(), CameraError> {
        if !(self.fov_y > 0.0 && self.fov_y < std::f32::consts::PI) {
            return Err(CameraError::InvalidConfiguration(format!(
                "field of view {} is outside (0, pi)",
                self.fov_y
            )));
        }
        if !(self.near > 0.0 && self.far > self.near && self.far.is_finite()) {
            return Err(CameraError::InvalidConfiguration(format!(
                "clip planes must satisfy 0 < near < far, got near={} far={}",
                self.near, self.far
            )));
        }
        Ok(())
    }

    /// Projection matrix for the given window. Recompute on resize.
    pub fn matrix(&self, bounds: WindowBounds) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, bounds.aspect_ratio(), self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn test_default_matches_reference_constants() {
        let p = Perspective::default();
        assert_eq!(p.fov_y, std::f32::consts::FRAC_PI_4);
        assert_eq!(p.near, 0.01);
        assert_eq!(p.far, 1000.0);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_near_plane_maps_to_zero_depth() {
        let p = Perspective::default();
        let m = p.matrix(WindowBounds::new(800, 600).unwrap());
        let clip = m * Vec4::new(0.0, 0.0, -p.near, 1.0);
        assert!((clip.z / clip.w).abs() < 1e-4);
        let clip = m * Vec4::new(0.0, 0.0, -p.far, 1.0);
        assert!((clip.z / clip.w - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_invalid_planes_rejected() {
        let p = Perspective {
            near: 10.0,
            far: 1.0,
            ..Default::default()
        };
        assert!(p.validate().is_err());
        let p = Perspective {
            fov_y: 0.0,
            ..Default::default()
        };
        assert!(p.validate().is_err());
    }
}
