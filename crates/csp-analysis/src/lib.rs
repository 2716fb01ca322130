//! # csp-analysis
//!
//! Algorithms of the capability-spillover assessment engine.
//!
//! ## Survey pipeline
//!
//! | Stage | Module | Output |
//! |-------|--------|--------|
//! | Calibration | [`survey::calibration`] | Brier score and trust weight per respondent |
//! | Aggregation | [`survey::aggregation`] | `DimensionStatistic` per topic and dimension |
//! | Forecasting | [`survey::forecasting`] | Ranked `TopicAssessment`s |
//! | Portfolio | [`survey::portfolio`] | Priority tiers and recommendations |
//!
//! ## Citation diffusion
//!
//! [`graph`] builds the directed citation graph, detects communities, counts
//! citations between intent categories and derives the spillover score.
//! [`labels`] folds labeler output onto the intent vocabulary first.
//!
//! [`rubric`] loads the scoring rubric and measures inter-rater agreement;
//! [`case_study`] bundles both engines' output for a single topic.
//!
//! Every operation is a synchronous function over data already in memory.
//! The only mutation is the calibration write-back onto survey responses.

pub mod case_study;
pub mod graph;
pub mod labels;
pub mod rubric;
pub mod stats;
pub mod survey;

pub use case_study::{gather_case_study, CaseStudyData, GraphStats};
pub use graph::{analyze_citations, build_graph, CitationGraph, CitationReport, DiffusionFlow};
pub use survey::{
    CalibrationEngine, DimensionStatistic, PortfolioRecommendation, SurveyAggregator,
    TopicAssessment,
};
