//! CspErrorCode trait for structured error reporting.

/// Every error enum implements this to expose a stable, machine-readable
/// code alongside its human-readable message.
pub trait CspErrorCode {
    /// Returns the error code string (e.g., "CONFIG_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const IMPORT_ERROR: &str = "IMPORT_ERROR";
pub const RANGE_ERROR: &str = "RANGE_ERROR";
pub const LENGTH_MISMATCH: &str = "LENGTH_MISMATCH";
pub const RUBRIC_ERROR: &str = "RUBRIC_ERROR";
