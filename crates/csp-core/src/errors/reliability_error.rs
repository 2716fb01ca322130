//! Inter-rater reliability errors.

use super::error_code::{self, CspErrorCode};

/// Errors raised by agreement statistics over paired label sequences.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReliabilityError {
    #[error("Label sequences must be same length (left={left}, right={right})")]
    LengthMismatch { left: usize, right: usize },
}

impl CspErrorCode for ReliabilityError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::LengthMismatch { .. } => error_code::LENGTH_MISMATCH,
        }
    }
}
