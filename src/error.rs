use thiserror::Error;

use crate::kernel::ShapeKind;

/// Top-level error type for reactor layer generation.
#[derive(Debug, Error)]
pub enum TokamakError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Structural problems with the caller's input, detected before any kernel work.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("build must contain exactly one plasma entry, found {count}")]
    PlasmaCount { count: usize },

    #[error("build entry {index} has thickness {thickness}, expected a positive finite value")]
    InvalidThickness { index: usize, thickness: f64 },

    #[error("radial and vertical builds are misaligned: {0}")]
    MisalignedBuilds(String),

    #[error("extra cut shape {index} is a {kind}, expected a solid")]
    InvalidCutShape { index: usize, kind: ShapeKind },

    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("duplicate part name: {0}")]
    DuplicatePartName(String),
}

/// Errors raised while constructing or combining solids.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("extra intersect shape {index} does not overlap the reactor")]
    EmptyIntersection { index: usize },

    #[error("shape handle does not refer to a live shape")]
    UnknownShape,

    #[error("boolean operand is a {0}, expected a solid")]
    NotASolid(ShapeKind),

    #[error("kernel operation failed: {0}")]
    Kernel(String),
}

/// Convenience type alias for results using [`TokamakError`].
pub type Result<T> = std::result::Result<T, TokamakError>;
