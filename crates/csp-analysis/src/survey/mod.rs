//! Expert survey engine: calibration → aggregation → forecasting → portfolio.

pub mod aggregation;
pub mod calibration;
pub mod forecasting;
pub mod importer;
pub mod portfolio;
pub mod topics;

pub use aggregation::{DimensionStatistic, DimensionStats, SurveyAggregator};
pub use calibration::{
    apply_calibration, brier_score, calibration_weight, CalibrationEngine, CalibrationResult,
    CalibrationTable,
};
pub use forecasting::{
    assess_topic, compute_csp_score, generate_risk_reward_matrix, rank_assessments,
    risk_reward_ratio, SafetyBenefitEstimate, TopicAssessment,
};
pub use importer::{group_score_rows, import_from_json_str, validate_response, ScoreRow};
pub use portfolio::{
    rank_portfolio_options, PortfolioCategory, PortfolioRecommendation, UncertaintyLevel,
};
pub use topics::{ExactTopicResolver, TopicResolver};
