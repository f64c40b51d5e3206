//! Frame-stepped camera controller with free-fly and orbit movement.
//!
//! [`CameraController`] turns one [`InputSample`](raven_input::InputSample)
//! per frame into a new pose and view matrix. Mouse look is pointer-locked:
//! when the cursor drifts within the edge margin of the window the controller
//! asks the host to recentre it.

mod bounds;
mod controller;
mod error;
mod policy;
mod projection;
mod settings;

pub use bounds::WindowBounds;
pub use controller::{CameraController, CameraState, ControllerState, FrameOutcome};
pub use error::CameraError;
pub use policy::{MovementPolicy, OrbitLimits};
pub use projection::Perspective;
pub use settings::{
    CameraSettings, EDGE_MARGIN, MOUSE_SPEED_X, MOUSE_SPEED_Y, PITCH_LIMIT, SPEED,
};
