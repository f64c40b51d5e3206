//! Tuning constants for the camera controller.

use crate::error::CameraError;
use crate::projection::Perspective;

/// Maximum absolute pitch in radians.
pub const PITCH_LIMIT: f32 = 1.4;
/// World units moved per update while a movement key is held.
pub const SPEED: f32 = 0.25;
/// Radians of yaw per pixel of horizontal pointer motion.
pub const MOUSE_SPEED_X: f32 = 0.0045;
/// Radians of pitch per pixel of vertical pointer motion.
pub const MOUSE_SPEED_Y: f32 = 0.0025;
/// Distance in pixels from a window edge that triggers a pointer recentre.
pub const EDGE_MARGIN: i32 = 20;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraSettings {
    pub pitch_limit: f32,
    /// Per-update step. Not scaled by frame time.
    pub speed: f32,
    pub mouse_speed_x: f32,
    pub mouse_speed_y: f32,
    pub edge_margin: i32,
    pub perspective: Perspective,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            pitch_limit: PITCH_LIMIT,
            speed: SPEED,
            mouse_speed_x: MOUSE_SPEED_X,
            mouse_speed_y: MOUSE_SPEED_Y,
            edge_margin: EDGE_MARGIN,
            perspective: Perspective::default(),
        }
    }
}

impl CameraSettings {
    pub fn validate(&self) -> Result<(), CameraError> {
        if !(self.pitch_limit > 0.0 && self.pitch_limit < std::f32::consts::FRAC_PI_2) {
            return Err(CameraError::InvalidConfiguration(format!(
                "pitch limit {} must lie in (0, pi/2)",
                self.pitch_limit
            )));
        }
        for (name, value) in [
            ("speed", self.speed),
            ("mouse_speed_x", self.mouse_speed_x),
            ("mouse_speed_y", self.mouse_speed_y),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CameraError::InvalidConfiguration(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if self.edge_margin < 0 {
            return Err(CameraError::InvalidConfiguration(format!(
                "edge margin must be non-negative, got {}",
                self.edge_margin
            )));
        }
        self.perspective.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(CameraSettings::default().validate().is_ok());
    }

    #[test]
    fn test_pitch_limit_past_vertical_rejected() {
        let s = CameraSettings {
            pitch_limit: 1.6,
            ..Default::default()
        };
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_negative_speed_rejected() {
        let s = CameraSettings {
            speed: -1.0,
            ..Default::default()
        };
        assert!(s.validate().is_err());
    }
}
