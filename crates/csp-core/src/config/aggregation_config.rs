//! Survey aggregation configuration.

use serde::{Deserialize, Serialize};

/// Denominator used for the per-dimension standard deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StdConvention {
    /// Divide by n.
    #[default]
    Population,
    /// Divide by n - 1.
    Sample,
}

impl StdConvention {
    pub fn parse_name(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "population" => Some(Self::Population),
            "sample" => Some(Self::Sample),
            _ => None,
        }
    }
}

/// Configuration for the aggregation engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AggregationConfig {
    /// Credible level of the empirical interval. Default: 0.90.
    pub credible_level: Option<f64>,
    /// Apply calibration weights. Default: true.
    pub weighted: Option<bool>,
    /// Standard deviation convention. Default: population.
    pub std_convention: Option<StdConvention>,
    /// Aggregate topics on the rayon pool. Default: false.
    pub parallel: Option<bool>,
}

impl AggregationConfig {
    pub fn effective_credible_level(&self) -> f64 {
        self.credible_level.unwrap_or(0.90)
    }

    pub fn effective_weighted(&self) -> bool {
        self.weighted.unwrap_or(true)
    }

    pub fn effective_std_convention(&self) -> StdConvention {
        self.std_convention.unwrap_or_default()
    }

    pub fn effective_parallel(&self) -> bool {
        self.parallel.unwrap_or(false)
    }
}
