//! Configuration system for the CSP engine.
//! TOML-based, layered resolution: overrides > env > project > user > defaults.

pub mod aggregation_config;
pub mod calibration_config;
pub mod csp_config;
pub mod forecast_config;
pub mod graph_config;
pub mod label_config;

pub use aggregation_config::{AggregationConfig, StdConvention};
pub use calibration_config::{CalibrationConfig, OutcomeMode};
pub use csp_config::{ConfigOverrides, CspConfig};
pub use forecast_config::ForecastConfig;
pub use graph_config::{CommunityMethod, GraphConfig};
pub use label_config::LabelConfig;
