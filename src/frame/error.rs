use thiserror::Error;

use super::column::ColumnKind;

/// Errors produced by the columnar data layer.
///
/// Every fallible frame operation returns one of these so a binding layer
/// can translate failures into host-language exceptions without string
/// matching.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("type mismatch in column '{column}': expected {expected}, got {got}")]
    TypeMismatch {
        column: String,
        expected: ColumnKind,
        got: String,
    },

    #[error("unsupported cast: {from} -> {to}")]
    UnsupportedCast { from: ColumnKind, to: ColumnKind },

    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("length mismatch: column '{column}' has {got} rows, frame has {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        got: usize,
    },

    #[error("duplicate column name '{0}'")]
    DuplicateName(String),

    #[error("column '{0}' not found")]
    ColumnNotFound(String),

    #[error("malformed document: {0}")]
    MalformedDocument(String),

    #[error("column '{0}' has no usable values")]
    EmptyColumn(String),

    #[error("quantile probability {0} outside [0, 1]")]
    InvalidQuantile(f64),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
