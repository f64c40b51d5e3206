//! Movement policies: how held keys translate the camera.

use glam::Vec3;
use raven_input::{Key, KeySet};

use crate::error::CameraError;

/// Allowed orbit distance range around a focus point.
///
/// The distance is the camera's offset from `focus` along world +Z, so a
/// camera on the far side of the focus has a negative distance and is never
/// inside the range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitLimits {
    pub focus: Vec3,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitLimits {
    fn default() -> Self {
        Self {
            focus: Vec3::ZERO,
            min_distance: 5.0,
            max_distance: 15.0,
        }
    }
}

impl OrbitLimits {
    pub fn validate(&self) -> Result<(), CameraError> {
        if !(self.min_distance.is_finite()
            && self.max_distance.is_finite()
            && self.min_distance <= self.max_distance)
        {
            return Err(CameraError::InvalidConfiguration(format!(
                "orbit range [{}, {}] is empty",
                self.min_distance, self.max_distance
            )));
        }
        Ok(())
    }

    /// Signed offset from the focus along world Z.
    pub fn distance(&self, position: Vec3) -> f32 {
        position.z - self.focus.z
    }

    /// Whether `position` lies within `[min_distance, max_distance]`.
    pub fn contains(&self, position: Vec3) -> bool {
        let d = self.distance(position);
        d >= self.min_distance && d <= self.max_distance
    }

    /// How far `position` lies outside the range, zero when inside.
    pub fn overshoot(&self, position: Vec3) -> f32 {
        let d = self.distance(position);
        (self.min_distance - d).max(d - self.max_distance).max(0.0)
    }

    /// Whether a zoom step from `from` to `to` may be taken.
    ///
    /// A step is refused only when it ends outside the range and further from
    /// it than it started, so a camera that drifted out can always zoom back.
    pub fn permits_step(&self, from: Vec3, to: Vec3) -> bool {
        self.contains(to) || self.overshoot(to) <= self.overshoot(from)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum MovementPolicy {
    /// WASD along the view direction, Space / Ctrl along world up.
    #[default]
    FreeFly,
    /// Strafe and vertical movement only; the wheel zooms within limits.
    Orbit(OrbitLimits),
}

impl MovementPolicy {
    pub fn orbit() -> Self {
        Self::Orbit(OrbitLimits::default())
    }

    pub fn is_orbit(&self) -> bool {
        matches!(self, Self::Orbit(_))
    }

    pub fn validate(&self) -> Result<(), CameraError> {
        match self {
            Self::FreeFly => Ok(()),
            Self::Orbit(limits) => limits.validate(),
        }
    }

    /// Sum of the displacements for every held movement key.
    pub fn translation(&self, keys: KeySet, direction: Vec3, up: Vec3, speed: f32) -> Vec3 {
        let left = up.cross(direction);
        let mut offset = Vec3::ZERO;
        if keys.contains(Key::Left) {
            offset += left * speed;
        }
        if keys.contains(Key::Right) {
            offset -= left * speed;
        }
        match self {
            Self::FreeFly => {
                if keys.contains(Key::Forward) {
                    offset += direction * speed;
                }
                if keys.contains(Key::Back) {
                    offset -= direction * speed;
                }
                if keys.contains(Key::Up) {
                    offset += up * speed;
                }
                if keys.contains(Key::Down) {
                    offset -= up * speed;
                }
            }
            // Forward and back double as ascend and descend here.
            Self::Orbit(_) => {
                if keys.contains(Key::Up) || keys.contains(Key::Forward) {
                    offset += up * speed;
                }
                if keys.contains(Key::Down) || keys.contains(Key::Back) {
                    offset -= up * speed;
                }
            }
        }
        offset
    }
}
