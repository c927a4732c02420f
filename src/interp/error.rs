use thiserror::Error;

use crate::frame::FrameError;

/// Errors produced while building sample sets, fitting, or evaluating.
#[derive(Debug, Error)]
pub enum InterpError {
    /// Column lookup or typing failure while extracting samples from a frame.
    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error("length mismatch: x has {x_len} values, y has {y_len}")]
    LengthMismatch { x_len: usize, y_len: usize },

    #[error("duplicate abscissa: x = {0} appears more than once")]
    DuplicateAbscissa(f64),

    #[error("insufficient points: got {got}, need at least {needed}")]
    InsufficientPoints { got: usize, needed: usize },

    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    #[error("evaluation point {point} outside domain [{min}, {max}]")]
    OutOfDomain { point: f64, min: f64, max: f64 },

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}
