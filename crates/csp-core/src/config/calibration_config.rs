//! Calibration configuration.

use serde::{Deserialize, Serialize};

/// How a calibration question's `true_answer` is turned into a Brier outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeMode {
    /// Use the graded probability directly as the outcome. Historical
    /// behaviour; conflates probability estimation with event forecasting.
    #[default]
    Graded,
    /// Threshold the answer at 0.5 into a 0/1 event outcome.
    Binary,
}

impl OutcomeMode {
    pub fn parse_name(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "graded" => Some(Self::Graded),
            "binary" => Some(Self::Binary),
            _ => None,
        }
    }

    /// Map a question's known answer to the outcome used in the Brier score.
    pub fn outcome(&self, true_answer: f64) -> f64 {
        match self {
            Self::Graded => true_answer,
            Self::Binary => {
                if true_answer >= 0.5 {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

/// Configuration for respondent calibration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Brier score assumed for respondents without calibration history. Default: 0.25.
    pub neutral_brier: Option<f64>,
    /// Weight assigned to respondents without calibration history. Default: 0.75.
    pub neutral_weight: Option<f64>,
    /// Outcome mapping for graded answers. Default: graded.
    pub outcome_mode: Option<OutcomeMode>,
}

impl CalibrationConfig {
    pub fn effective_neutral_brier(&self) -> f64 {
        self.neutral_brier.unwrap_or(0.25)
    }

    pub fn effective_neutral_weight(&self) -> f64 {
        self.neutral_weight.unwrap_or(0.75)
    }

    pub fn effective_outcome_mode(&self) -> OutcomeMode {
        self.outcome_mode.unwrap_or_default()
    }
}
