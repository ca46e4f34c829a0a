use glint_math::MathError;
use thiserror::Error;

/// Errors raised by [`crate::CameraBuilder::build`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("Missing camera setting: {0}")]
    Missing(&'static str),

    #[error("Camera direction and up vectors are not orthogonal")]
    NotOrthogonal,

    #[error("Camera {0} must be positive")]
    NonPositive(&'static str),

    #[error("Resolution must be at least 1x1")]
    InvalidResolution,

    #[error("Camera vectors must not be zero")]
    ZeroVector,
}

impl From<MathError> for CameraError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::ZeroVector => CameraError::ZeroVector,
        }
    }
}

/// Errors raised when reading settings or writing images.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to write image: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid render settings: {0}")]
    Settings(#[from] serde_json::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;
