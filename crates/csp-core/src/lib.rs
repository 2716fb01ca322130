//! # csp-core
//!
//! Shared foundation for the capability-spillover (CSP) assessment engine:
//! record types handed over by the storage layer, one error enum per
//! subsystem, layered TOML configuration and tracing setup.
//!
//! Nothing in this crate performs analysis. The algorithms live in
//! `csp-analysis`, which depends on these types.

pub mod config;
pub mod errors;
pub mod tracing;
pub mod types;

pub use config::CspConfig;
pub use errors::CspErrorCode;
