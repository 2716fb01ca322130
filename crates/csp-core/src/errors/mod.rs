//! Error handling for the CSP engine.
//! One error enum per subsystem, `thiserror` only.
//!
//! Statistics, scoring and graph operations are total functions and have no
//! error type; only the fallible edges (config, import, rubric loading,
//! reliability inputs) do.

pub mod config_error;
pub mod error_code;
pub mod import_error;
pub mod reliability_error;
pub mod rubric_error;

pub use config_error::ConfigError;
pub use error_code::CspErrorCode;
pub use import_error::ImportError;
pub use reliability_error::ReliabilityError;
pub use rubric_error::RubricError;
