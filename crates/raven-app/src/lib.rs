//! Raven viewer: a sky sphere around a free-fly or orbit camera.

pub mod app;
pub mod error;
pub mod scene;
pub mod settings;

pub use app::run;
pub use error::AppError;
pub use scene::{FrameReport, Scene};
