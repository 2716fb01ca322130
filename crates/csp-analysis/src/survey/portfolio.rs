//! Portfolio tiers and recommendation records.

use std::fmt;

use csp_core::config::ForecastConfig;
use serde::{Deserialize, Serialize};

use super::forecasting::TopicAssessment;

/// Priority tier derived from the risk/reward ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortfolioCategory {
    HighPriority,
    ModeratePriority,
    LowPriority,
    Caution,
}

impl PortfolioCategory {
    /// Tier for a ratio; thresholds are inclusive lower bounds.
    pub fn classify(ratio: f64, config: &ForecastConfig) -> Self {
        if ratio >= config.effective_high_priority_ratio() {
            Self::HighPriority
        } else if ratio >= config.effective_moderate_priority_ratio() {
            Self::ModeratePriority
        } else if ratio >= config.effective_low_priority_ratio() {
            Self::LowPriority
        } else {
            Self::Caution
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::HighPriority => "high_priority",
            Self::ModeratePriority => "moderate_priority",
            Self::LowPriority => "low_priority",
            Self::Caution => "caution",
        }
    }

    fn recommendation(self, assessment: &TopicAssessment) -> String {
        match self {
            Self::HighPriority => format!(
                "Strongly recommend funding. High safety benefit ({:?}) with manageable spillover risk.",
                assessment.safety_benefit
            ),
            Self::ModeratePriority => {
                "Recommend funding with monitoring. Balanced risk-reward profile.".to_string()
            }
            Self::LowPriority => format!(
                "Consider carefully. Moderate spillover concerns (CSP: {:?}).",
                assessment.csp_score
            ),
            Self::Caution => format!(
                "Exercise caution. High spillover potential (CSP: {:?}) relative to safety benefit.",
                assessment.csp_score
            ),
        }
    }
}

impl fmt::Display for PortfolioCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much the CSP uncertainty should temper a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UncertaintyLevel {
    High,
    Moderate,
    Confident,
}

impl UncertaintyLevel {
    /// Thresholds are strict: exactly 1.5 is moderate, exactly 0.8 is confident.
    pub fn classify(csp_uncertainty: f64, config: &ForecastConfig) -> Self {
        if csp_uncertainty > config.effective_high_uncertainty() {
            Self::High
        } else if csp_uncertainty > config.effective_moderate_uncertainty() {
            Self::Moderate
        } else {
            Self::Confident
        }
    }

    pub fn note(self) -> &'static str {
        match self {
            Self::High => "High uncertainty - more expert input recommended.",
            Self::Moderate => "Moderate uncertainty in estimates.",
            Self::Confident => "Relatively confident estimates.",
        }
    }
}

/// One ranked entry of the funding portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioRecommendation {
    pub rank: usize,
    pub topic: String,
    pub category: PortfolioCategory,
    pub csp_score: f64,
    pub safety_benefit: f64,
    pub risk_reward_ratio: f64,
    pub recommendation: String,
    pub uncertainty_level: UncertaintyLevel,
    pub uncertainty_note: String,
}

impl PortfolioRecommendation {
    pub fn from_assessment(assessment: &TopicAssessment, config: &ForecastConfig) -> Self {
        let category = PortfolioCategory::classify(assessment.risk_reward_ratio, config);
        let uncertainty_level = UncertaintyLevel::classify(assessment.csp_uncertainty, config);

        Self {
            rank: assessment.rank,
            topic: assessment.topic.clone(),
            category,
            csp_score: assessment.csp_score,
            safety_benefit: assessment.safety_benefit,
            risk_reward_ratio: assessment.risk_reward_ratio,
            recommendation: category.recommendation(assessment),
            uncertainty_level,
            uncertainty_note: uncertainty_level.note().to_string(),
        }
    }
}

/// Map ranked assessments to recommendations, keeping input order.
///
/// Assessments are expected to be sorted already (as produced by
/// `generate_risk_reward_matrix`), so `budget` keeps the top entries.
/// `None` and `Some(0)` both mean no limit.
pub fn rank_portfolio_options(
    assessments: &[TopicAssessment],
    budget: Option<usize>,
    config: &ForecastConfig,
) -> Vec<PortfolioRecommendation> {
    let take = match budget {
        Some(limit) if limit > 0 => limit,
        _ => assessments.len(),
    };
    assessments
        .iter()
        .take(take)
        .map(|a| PortfolioRecommendation::from_assessment(a, config))
        .collect()
}
