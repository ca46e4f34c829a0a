use thiserror::Error;

/// Errors raised by vector algebra on degenerate input.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    #[error("Zero vector cannot be used as a direction")]
    ZeroVector,
}

pub type MathResult<T> = Result<T, MathError>;
