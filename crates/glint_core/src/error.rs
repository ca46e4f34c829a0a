use glint_math::MathError;
use thiserror::Error;

/// Errors raised when a geometry or light is built from degenerate input.
///
/// These only occur at construction time. Degenerate situations met while
/// intersecting (parallel rays, tangents) are reported as "no hits" instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Degenerate vector: {0}")]
    Math(#[from] MathError),

    #[error("Two or more points are identical")]
    IdenticalPoints,

    #[error("The points are collinear")]
    CollinearPoints,

    #[error("Radius must be positive, got {0}")]
    NonPositiveRadius(f64),

    #[error("Height must be positive, got {0}")]
    NonPositiveHeight(f64),

    #[error("A polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("Polygon vertex {0} is not on the plane of the first three")]
    NotCoplanar(usize),

    #[error("Polygon is not convex at vertex {0}")]
    NotConvex(usize),
}

pub type GeometryResult<T> = Result<T, GeometryError>;
