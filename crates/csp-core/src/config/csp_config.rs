//! Top-level CSP configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{
    AggregationConfig, CalibrationConfig, CommunityMethod, ForecastConfig, GraphConfig,
    LabelConfig, OutcomeMode, StdConvention,
};
use crate::errors::ConfigError;
use crate::types::IntentLabel;

/// Project-level config file name.
pub const PROJECT_CONFIG_FILE: &str = "csp.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Programmatic overrides (`ConfigOverrides`)
/// 2. Environment variables (`CSP_*`)
/// 3. Project config (`csp.toml` in project root)
/// 4. User config (`~/.csp/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CspConfig {
    pub calibration: CalibrationConfig,
    pub aggregation: AggregationConfig,
    pub forecast: ForecastConfig,
    pub graph: GraphConfig,
    pub labels: LabelConfig,
}

/// Caller-supplied overrides, applied last.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub credible_level: Option<f64>,
    pub weighted: Option<bool>,
    pub parallel: Option<bool>,
    pub outcome_mode: Option<OutcomeMode>,
    pub community_method: Option<CommunityMethod>,
}

impl CspConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): programmatic overrides
        if let Some(o) = overrides {
            Self::apply_overrides(&mut config, o);
        }

        Self::validate(&config)?;
        tracing::debug!(root = %root.display(), "configuration resolved");
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: CspConfig = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &CspConfig) -> Result<(), ConfigError> {
        let unit = |field: &str, value: Option<f64>| -> Result<(), ConfigError> {
            match value {
                Some(v) if !(0.0..=1.0).contains(&v) => Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must be between 0.0 and 1.0".to_string(),
                }),
                _ => Ok(()),
            }
        };
        unit("calibration.neutral_brier", config.calibration.neutral_brier)?;
        unit("calibration.neutral_weight", config.calibration.neutral_weight)?;

        if let Some(level) = config.aggregation.credible_level {
            if !(level > 0.0 && level < 1.0) {
                return Err(ConfigError::ValidationFailed {
                    field: "aggregation.credible_level".to_string(),
                    message: "must be strictly between 0.0 and 1.0".to_string(),
                });
            }
        }

        let f = &config.forecast;
        if f.effective_benefit_ceiling() <= 0.0 {
            return Err(ConfigError::ValidationFailed {
                field: "forecast.benefit_ceiling".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if !(f.effective_high_priority_ratio() >= f.effective_moderate_priority_ratio()
            && f.effective_moderate_priority_ratio() >= f.effective_low_priority_ratio())
        {
            return Err(ConfigError::ValidationFailed {
                field: "forecast.*_priority_ratio".to_string(),
                message: "thresholds must satisfy high >= moderate >= low".to_string(),
            });
        }
        if f.effective_high_uncertainty() < f.effective_moderate_uncertainty() {
            return Err(ConfigError::ValidationFailed {
                field: "forecast.high_uncertainty".to_string(),
                message: "must be >= forecast.moderate_uncertainty".to_string(),
            });
        }

        if let Some(d) = config.graph.pagerank_damping {
            if !(d > 0.0 && d < 1.0) {
                return Err(ConfigError::ValidationFailed {
                    field: "graph.pagerank_damping".to_string(),
                    message: "must be strictly between 0.0 and 1.0".to_string(),
                });
            }
        }
        if config.graph.pagerank_max_iterations == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "graph.pagerank_max_iterations".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        for (raw, canonical) in &config.labels.aliases {
            if IntentLabel::from_canonical(canonical).is_none() {
                return Err(ConfigError::InvalidValue {
                    field: format!("labels.aliases.{raw}"),
                    message: format!("'{canonical}' is not a canonical intent label"),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.csp/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".csp").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut CspConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: CspConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it has a value.
    fn merge(base: &mut CspConfig, other: &CspConfig) {
        // Calibration
        let (b, o) = (&mut base.calibration, &other.calibration);
        if o.neutral_brier.is_some() {
            b.neutral_brier = o.neutral_brier;
        }
        if o.neutral_weight.is_some() {
            b.neutral_weight = o.neutral_weight;
        }
        if o.outcome_mode.is_some() {
            b.outcome_mode = o.outcome_mode;
        }

        // Aggregation
        let (b, o) = (&mut base.aggregation, &other.aggregation);
        if o.credible_level.is_some() {
            b.credible_level = o.credible_level;
        }
        if o.weighted.is_some() {
            b.weighted = o.weighted;
        }
        if o.std_convention.is_some() {
            b.std_convention = o.std_convention;
        }
        if o.parallel.is_some() {
            b.parallel = o.parallel;
        }

        // Forecast
        let (b, o) = (&mut base.forecast, &other.forecast);
        if o.benefit_ceiling.is_some() {
            b.benefit_ceiling = o.benefit_ceiling;
        }
        if o.zero_risk_multiplier.is_some() {
            b.zero_risk_multiplier = o.zero_risk_multiplier;
        }
        if o.high_priority_ratio.is_some() {
            b.high_priority_ratio = o.high_priority_ratio;
        }
        if o.moderate_priority_ratio.is_some() {
            b.moderate_priority_ratio = o.moderate_priority_ratio;
        }
        if o.low_priority_ratio.is_some() {
            b.low_priority_ratio = o.low_priority_ratio;
        }
        if o.high_uncertainty.is_some() {
            b.high_uncertainty = o.high_uncertainty;
        }
        if o.moderate_uncertainty.is_some() {
            b.moderate_uncertainty = o.moderate_uncertainty;
        }

        // Graph
        let (b, o) = (&mut base.graph, &other.graph);
        if o.community_method.is_some() {
            b.community_method = o.community_method;
        }
        if o.modularity_max_nodes.is_some() {
            b.modularity_max_nodes = o.modularity_max_nodes;
        }
        if o.pagerank_damping.is_some() {
            b.pagerank_damping = o.pagerank_damping;
        }
        if o.pagerank_tolerance.is_some() {
            b.pagerank_tolerance = o.pagerank_tolerance;
        }
        if o.pagerank_max_iterations.is_some() {
            b.pagerank_max_iterations = o.pagerank_max_iterations;
        }

        // Labels: aliases accumulate, later layers win per key.
        for (raw, canonical) in &other.labels.aliases {
            base.labels.aliases.insert(raw.clone(), canonical.clone());
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `CSP_AGGREGATION_CREDIBLE_LEVEL`, `CSP_GRAPH_COMMUNITY_METHOD`, etc.
    /// Unparseable values are ignored.
    fn apply_env_overrides(config: &mut CspConfig) {
        if let Ok(val) = std::env::var("CSP_AGGREGATION_CREDIBLE_LEVEL") {
            if let Ok(v) = val.parse::<f64>() {
                config.aggregation.credible_level = Some(v);
            }
        }
        if let Ok(val) = std::env::var("CSP_AGGREGATION_WEIGHTED") {
            if let Ok(v) = val.parse::<bool>() {
                config.aggregation.weighted = Some(v);
            }
        }
        if let Ok(val) = std::env::var("CSP_AGGREGATION_PARALLEL") {
            if let Ok(v) = val.parse::<bool>() {
                config.aggregation.parallel = Some(v);
            }
        }
        if let Ok(val) = std::env::var("CSP_AGGREGATION_STD_CONVENTION") {
            if let Some(v) = StdConvention::parse_name(&val) {
                config.aggregation.std_convention = Some(v);
            }
        }
        if let Ok(val) = std::env::var("CSP_CALIBRATION_OUTCOME_MODE") {
            if let Some(v) = OutcomeMode::parse_name(&val) {
                config.calibration.outcome_mode = Some(v);
            }
        }
        if let Ok(val) = std::env::var("CSP_FORECAST_ZERO_RISK_MULTIPLIER") {
            if let Ok(v) = val.parse::<f64>() {
                config.forecast.zero_risk_multiplier = Some(v);
            }
        }
        if let Ok(val) = std::env::var("CSP_GRAPH_COMMUNITY_METHOD") {
            if let Some(v) = CommunityMethod::parse_name(&val) {
                config.graph.community_method = Some(v);
            }
        }
        if let Ok(val) = std::env::var("CSP_GRAPH_PAGERANK_DAMPING") {
            if let Ok(v) = val.parse::<f64>() {
                config.graph.pagerank_damping = Some(v);
            }
        }
    }

    fn apply_overrides(config: &mut CspConfig, o: &ConfigOverrides) {
        if let Some(v) = o.credible_level {
            config.aggregation.credible_level = Some(v);
        }
        if let Some(v) = o.weighted {
            config.aggregation.weighted = Some(v);
        }
        if let Some(v) = o.parallel {
            config.aggregation.parallel = Some(v);
        }
        if let Some(v) = o.outcome_mode {
            config.calibration.outcome_mode = Some(v);
        }
        if let Some(v) = o.community_method {
            config.graph.community_method = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
