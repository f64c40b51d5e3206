//! Camera error types.

/// Errors raised when a camera cannot be set up.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CameraError {
    /// The requested setup cannot produce a usable camera.
    #[error("invalid camera configuration: {0}")]
    InvalidConfiguration(String),
}
