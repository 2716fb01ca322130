//! Rubric loading errors.

use super::error_code::{self, CspErrorCode};

/// Errors that can occur while loading or validating a scoring rubric.
#[derive(Debug, thiserror::Error)]
pub enum RubricError {
    #[error("Cannot read rubric {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Rubric parse error in {path}: {message}")]
    Yaml { path: String, message: String },

    #[error("Rubric missing required field: {field}")]
    MissingField { field: String },

    #[error("Rubric dimensions must be a non-empty list")]
    NoDimensions,
}

impl CspErrorCode for RubricError {
    fn error_code(&self) -> &'static str {
        error_code::RUBRIC_ERROR
    }
}
