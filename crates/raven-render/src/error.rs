/// Errors raised while setting up the GPU or uploading sky content.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("no compatible GPU adapter found")]
    NoAdapter,

    #[error("failed to request GPU device: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),

    #[error("failed to create surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),

    /// Surface was lost and reconfiguring it did not help.
    #[error("surface lost")]
    SurfaceLost,

    #[error("out of GPU memory")]
    OutOfMemory,

    /// Acquiring the next frame timed out. Skip the frame.
    #[error("timed out acquiring surface texture")]
    Timeout,

    #[error("mesh has no triangles to upload")]
    EmptyGeometry,
}
