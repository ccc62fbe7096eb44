//! Crate-level error types

use thiserror::Error;

/// Errors raised by evaluation, data handling, and the CLI layer
#[derive(Debug, Error)]
pub enum Error {
    /// Task name not recognized by the dispatcher
    #[error("'{0}' should be chosen from ['annotation', 'denoising', 'imputation', 'clustering']")]
    UnsupportedTask(String),

    /// Task recognized but deliberately disabled in this release
    #[error("task disabled: {0}")]
    TaskDisabled(&'static str),

    /// Invalid or missing parameter for the requested operation
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Array shapes do not line up
    #[error("shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },

    /// Named annotation column or embedding slot not present
    #[error("field not found: {0}")]
    FieldNotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Shape-mismatch helper from two (rows, cols) pairs
    pub fn shape(expected: (usize, usize), actual: (usize, usize)) -> Self {
        Error::ShapeMismatch {
            expected: format!("{}x{}", expected.0, expected.1),
            actual: format!("{}x{}", actual.0, actual.1),
        }
    }
}

/// Result type for celda operations
pub type Result<T> = std::result::Result<T, Error>;
