use thiserror::Error;

/// Top-level error type for the setout toolkit.
#[derive(Debug, Error)]
pub enum SetoutError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Sampling(#[from] SamplingError),

    #[error(transparent)]
    Measure(#[from] MeasureError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to curve sampling.
#[derive(Debug, Error)]
pub enum SamplingError {
    #[error("division count must be at least 1, got {0}")]
    InvalidDivisions(usize),

    #[error("curve tessellation produced no chords")]
    EmptyTessellation,
}

/// Errors related to distance measurement.
#[derive(Debug, Error)]
pub enum MeasureError {
    #[error("at least {needed} points are required, got {got}")]
    NotEnoughPoints { needed: usize, got: usize },
}

/// Errors related to the host document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("placement rejected: {0}")]
    PlacementRejected(String),
}

/// Errors related to interactive command workflows.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("invalid selection: {0}")]
    InvalidSelection(String),
}

/// Convenience type alias for results using [`SetoutError`].
pub type Result<T> = std::result::Result<T, SetoutError>;
