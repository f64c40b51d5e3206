//! The per-frame camera state machine.

use std::time::Duration;

use glam::{IVec2, Mat4, Quat, Vec3};
use raven_input::{InputSample, Pointer};
use tracing::{info, trace};

use crate::bounds::WindowBounds;
use crate::error::CameraError;
use crate::policy::MovementPolicy;
use crate::settings::CameraSettings;

/// Whether [`CameraController::update`] reacts to input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControllerState {
    #[default]
    Active,
    /// Input is ignored; the last view matrix stays valid.
    Disabled,
}

/// Camera pose plus the pointer sample the next delta is measured from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    pub position: Vec3,
    /// Unit view direction.
    pub direction: Vec3,
    /// Unit world up. Never changes after construction.
    pub up: Vec3,
    pub prev_pointer: Pointer,
}

impl CameraState {
    /// `asin(direction.y)`.
    pub fn pitch(&self) -> f32 {
        self.direction.y.clamp(-1.0, 1.0).asin()
    }

    /// Heading in `[0, 2*pi]`, zero when looking down -Z. Both ends occur:
    /// a direction of `(-0.0, _, -1)` reads as exactly `2*pi`.
    pub fn yaw(&self) -> f32 {
        std::f32::consts::PI - self.direction.x.atan2(self.direction.z)
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.direction, self.up)
    }
}

/// Result of one [`CameraController::update`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameOutcome {
    pub view: Mat4,
    /// Where the host must move the OS cursor, if the pointer hit the edge
    /// margin this frame.
    pub recenter: Option<IVec2>,
}

#[derive(Clone, Debug)]
pub struct CameraController {
    state: CameraState,
    activity: ControllerState,
    policy: MovementPolicy,
    settings: CameraSettings,
    view: Mat4,
}

impl CameraController {
    /// Camera at `position` looking along `direction` with world +Y up.
    ///
    /// An orbit policy requires `position` to start inside its distance range.
    ///
    /// The previous pointer starts at the window centre, so the host should
    /// place the cursor there before the first update.
    pub fn new(
        position: Vec3,
        direction: Vec3,
        bounds: WindowBounds,
        policy: MovementPolicy,
        settings: CameraSettings,
    ) -> Result<Self, CameraError> {
        settings.validate()?;
        policy.validate()?;
        if !position.is_finite() {
            return Err(CameraError::InvalidConfiguration(format!(
                "camera position {position} is not finite"
            )));
        }
        let up = Vec3::Y;
        let direction = direction.try_normalize().ok_or_else(|| {
            CameraError::InvalidConfiguration(format!(
                "view direction {direction} cannot be normalized"
            ))
        })?;
        if up.cross(direction).length_squared() < 1e-12 {
            return Err(CameraError::InvalidConfiguration(format!(
                "view direction {direction} is parallel to up"
            )));
        }

        check_orbit_start(&policy, position)?;

        let center = bounds.center();
        let state = CameraState {
            position,
            direction,
            up,
            prev_pointer: Pointer::new(center.x, center.y, 0),
        };
        info!(
            "Camera created at {position} facing {direction} ({})",
            if policy.is_orbit() { "orbit" } else { "free-fly" }
        );
        Ok(Self {
            view: state.view(),
            state,
            activity: ControllerState::Active,
            policy,
            settings,
        })
    }

    /// Camera at `position` facing `target`.
    pub fn looking_at(
        position: Vec3,
        target: Vec3,
        bounds: WindowBounds,
        policy: MovementPolicy,
        settings: CameraSettings,
    ) -> Result<Self, CameraError> {
        if position == target {
            return Err(CameraError::InvalidConfiguration(format!(
                "camera position and target coincide at {position}"
            )));
        }
        Self::new(position, target - position, bounds, policy, settings)
    }

    /// Advance one frame.
    ///
    /// Movement is a fixed step per call; `_elapsed` is accepted for
    /// interface stability but does not scale anything.
    pub fn update(
        &mut self,
        input: &InputSample,
        bounds: WindowBounds,
        _elapsed: Duration,
    ) -> FrameOutcome {
        if self.activity == ControllerState::Disabled {
            return FrameOutcome {
                view: self.view,
                recenter: None,
            };
        }

        let speed = self.settings.speed;
        let pointer = input.pointer;
        let prev = self.state.prev_pointer;

        self.state.position +=
            self.policy
                .translation(input.keys, self.state.direction, self.state.up, speed);

        if let MovementPolicy::Orbit(limits) = self.policy {
            let zoom = match pointer.scroll.cmp(&prev.scroll) {
                std::cmp::Ordering::Greater => Some(self.state.direction * speed),
                std::cmp::Ordering::Less => Some(-self.state.direction * speed),
                std::cmp::Ordering::Equal => None,
            };
            if let Some(step) = zoom {
                let candidate = self.state.position + step;
                if limits.permits_step(self.state.position, candidate) {
                    self.state.position = candidate;
                }
            }
        }

        self.rotate(pointer.x - prev.x, pointer.y - prev.y);

        let at = IVec2::new(pointer.x, pointer.y);
        let recenter = if bounds.is_near_edge(at, self.settings.edge_margin) {
            let center = bounds.center();
            trace!("Pointer at {at} inside edge margin, recentring to {center}");
            self.state.prev_pointer = pointer.moved_to(center.x, center.y);
            Some(center)
        } else {
            self.state.prev_pointer = pointer;
            None
        };

        self.view = self.state.view();
        FrameOutcome {
            view: self.view,
            recenter,
        }
    }

    fn rotate(&mut self, dx: i32, dy: i32) {
        let up = self.state.up;
        let mut direction = self.state.direction;

        if dx != 0 {
            let yaw = Quat::from_axis_angle(up, -self.settings.mouse_speed_x * dx as f32);
            direction = (yaw * direction).normalize_or(direction);
        }

        if dy != 0 {
            let angle = self.settings.mouse_speed_y * dy as f32;
            let limit = self.settings.pitch_limit;
            let pitch = direction.y.clamp(-1.0, 1.0).asin();
            // Clamp by rejection: past the limit only steps back toward level apply.
            let allowed = (pitch < limit || angle > 0.0) && (pitch > -limit || angle < 0.0);
            if allowed {
                if let Some(axis) = up.cross(direction).try_normalize() {
                    let pitch_rot = Quat::from_axis_angle(axis, angle);
                    direction = (pitch_rot * direction).normalize_or(direction);
                }
            }
        }

        self.state.direction = direction;
    }

    /// Current pose and previous pointer sample.
    pub fn state(&self) -> &CameraState {
        &self.state
    }

    /// Whether input is currently applied.
    pub fn controller_state(&self) -> ControllerState {
        self.activity
    }

    /// Shorthand for `controller_state() == ControllerState::Active`.
    pub fn is_enabled(&self) -> bool {
        self.activity == ControllerState::Active
    }

    /// Resume reacting to input. `pointer` becomes the previous sample so the
    /// cursor travel while disabled does not turn the camera.
    pub fn enable(&mut self, pointer: Pointer) {
        self.activity = ControllerState::Active;
        self.state.prev_pointer = pointer;
    }

    /// Stop reacting to input. The view matrix is kept.
    pub fn disable(&mut self) {
        self.activity = ControllerState::Disabled;
    }

    /// [`enable`](Self::enable) or [`disable`](Self::disable) from a flag.
    pub fn set_enabled(&mut self, enabled: bool, pointer: Pointer) {
        if enabled {
            self.enable(pointer);
        } else {
            self.disable();
        }
    }

    /// Active movement policy.
    pub fn policy(&self) -> MovementPolicy {
        self.policy
    }

    /// Swap the movement policy. An orbit policy requires the current
    /// position to lie inside its distance range.
    pub fn set_policy(&mut self, policy: MovementPolicy) -> Result<(), CameraError> {
        policy.validate()?;
        check_orbit_start(&policy, self.state.position)?;
        info!(
            "Camera policy switched to {}",
            if policy.is_orbit() { "orbit" } else { "free-fly" }
        );
        self.policy = policy;
        Ok(())
    }

    /// Tuning constants this camera was built with.
    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    /// World-space eye position.
    pub fn position(&self) -> Vec3 {
        self.state.position
    }

    /// Unit view direction.
    pub fn direction(&self) -> Vec3 {
        self.state.direction
    }

    /// Unit world up.
    pub fn up(&self) -> Vec3 {
        self.state.up
    }

    /// Elevation of the view direction in radians.
    pub fn pitch(&self) -> f32 {
        self.state.pitch()
    }

    /// Heading in radians, see [`CameraState::yaw`].
    pub fn yaw(&self) -> f32 {
        self.state.yaw()
    }

    /// View matrix as of the last update.
    pub fn view(&self) -> Mat4 {
        self.view
    }

    /// Column-major view matrix for upload.
    pub fn view_cols(&self) -> [[f32; 4]; 4] {
        self.view.to_cols_array_2d()
    }

    /// Perspective projection for the given window size.
    pub fn projection(&self, bounds: WindowBounds) -> Mat4 {
        self.settings.perspective.matrix(bounds)
    }
}

fn check_orbit_start(policy: &MovementPolicy, position: Vec3) -> Result<(), CameraError> {
    if let MovementPolicy::Orbit(limits) = policy
        && !limits.contains(position)
    {
        return Err(CameraError::InvalidConfiguration(format!(
            "orbit distance {} is outside [{}, {}]",
            limits.distance(position),
            limits.min_distance,
            limits.max_distance
        )));
    }
    Ok(())
}
