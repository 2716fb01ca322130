//! Forecasting and portfolio configuration.

use serde::{Deserialize, Serialize};

/// Configuration for risk/reward scoring and portfolio tiers.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ForecastConfig {
    /// Upper end of the rubric; default benefit is `ceiling - csp`. Default: 5.0.
    pub benefit_ceiling: Option<f64>,
    /// Ratio multiplier used when the CSP score is zero. Default: 10.0.
    pub zero_risk_multiplier: Option<f64>,
    /// Ratio at or above which a topic is high priority. Default: 2.0.
    pub high_priority_ratio: Option<f64>,
    /// Ratio at or above which a topic is moderate priority. Default: 1.0.
    pub moderate_priority_ratio: Option<f64>,
    /// Ratio at or above which a topic is low priority. Default: 0.5.
    pub low_priority_ratio: Option<f64>,
    /// CSP uncertainty above which estimates are flagged as highly uncertain. Default: 1.5.
    pub high_uncertainty: Option<f64>,
    /// CSP uncertainty above which estimates are flagged as moderately uncertain. Default: 0.8.
    pub moderate_uncertainty: Option<f64>,
}

impl ForecastConfig {
    pub fn effective_benefit_ceiling(&self) -> f64 {
        self.benefit_ceiling.unwrap_or(5.0)
    }

    pub fn effective_zero_risk_multiplier(&self) -> f64 {
        self.zero_risk_multiplier.unwrap_or(10.0)
    }

    pub fn effective_high_priority_ratio(&self) -> f64 {
        self.high_priority_ratio.unwrap_or(2.0)
    }

    pub fn effective_moderate_priority_ratio(&self) -> f64 {
        self.moderate_priority_ratio.unwrap_or(1.0)
    }

    pub fn effective_low_priority_ratio(&self) -> f64 {
        self.low_priority_ratio.unwrap_or(0.5)
    }

    pub fn effective_high_uncertainty(&self) -> f64 {
        self.high_uncertainty.unwrap_or(1.5)
    }

    pub fn effective_moderate_uncertainty(&self) -> f64 {
        self.moderate_uncertainty.unwrap_or(0.8)
    }
}
