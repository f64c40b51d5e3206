use raven_camera::CameraError;
use raven_config::ConfigError;
use raven_render::RenderError;
use raven_sphere::MeshError;

/// Anything that stops the viewer from starting or keeps it from running.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("sky mesh: {0}")]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Camera(#[from] CameraError),

    #[error("renderer: {0}")]
    Render(#[from] RenderError),

    #[error("event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("no platform config directory; pass --config")]
    NoConfigDir,
}
