//! Survey import errors.

use super::error_code::{self, CspErrorCode};

/// Errors that can occur while turning raw survey payloads into records.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Malformed survey JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Response {response_id}: {field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        response_id: String,
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Response {response_id}: field '{field}' must not be empty")]
    EmptyField { response_id: String, field: String },
}

impl CspErrorCode for ImportError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfRange { .. } => error_code::RANGE_ERROR,
            Self::Json(_) | Self::EmptyField { .. } => error_code::IMPORT_ERROR,
        }
    }
}
