//! Forecasting engine and portfolio tiers over a small survey.

use std::collections::HashMap;

use csp_analysis::survey::{
    generate_risk_reward_matrix, rank_portfolio_options, CalibrationTable, PortfolioCategory,
    SafetyBenefitEstimate, SurveyAggregator, UncertaintyLevel,
};
use csp_core::config::{AggregationConfig, ForecastConfig};
use csp_core::types::{SurveyResponse, TopicEntry};

fn survey() -> Vec<SurveyResponse> {
    vec![
        SurveyResponse::new("r1", "e1")
            .with_entry(TopicEntry::new("a").with_dimension("d1", 1.0, 0.0))
            .with_entry(TopicEntry::new("b").with_dimension("d1", 4.0, 0.0)),
    ]
}

fn topics() -> Vec<String> {
    vec!["a".to_string(), "b".to_string(), "c".to_string()]
}

#[test]
fn test_matrix_sorted_with_dense_ranks() {
    let responses = survey();
    let agg = SurveyAggregator::new(&responses, CalibrationTable::new(), &AggregationConfig::default());
    let matrix = generate_risk_reward_matrix(&agg, &topics(), None, &ForecastConfig::default());

    let order: Vec<&str> = matrix.iter().map(|a| a.topic.as_str()).collect();
    assert_eq!(order, vec!["c", "a", "b"]);
    let ranks: Vec<usize> = matrix.iter().map(|a| a.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3]);

    // No survey data: zero risk, maximal uncertainty, ratio via the multiplier.
    let c = &matrix[0];
    assert_eq!((c.csp_score, c.csp_uncertainty), (0.0, 1.0));
    assert_eq!(c.safety_benefit, 5.0);
    assert_eq!(c.risk_reward_ratio, 50.0);

    let a = &matrix[1];
    assert_eq!(a.csp_score, 1.0);
    assert_eq!(a.safety_benefit, 4.0);
    assert_eq!(a.risk_reward_ratio, 4.0);

    assert_eq!(matrix[2].risk_reward_ratio, 0.25);
}

#[test]
fn test_benefit_override_reorders() {
    let responses = survey();
    let agg = SurveyAggregator::new(&responses, CalibrationTable::new(), &AggregationConfig::default());
    let mut estimates = HashMap::new();
    estimates.insert("b".to_string(), SafetyBenefitEstimate::new(20.0, 0.2));

    let matrix =
        generate_risk_reward_matrix(&agg, &topics(), Some(&estimates), &ForecastConfig::default());
    let b = matrix.iter().find(|a| a.topic == "b").unwrap();
    assert_eq!(b.risk_reward_ratio, 5.0);
    assert_eq!(b.safety_benefit_uncertainty, 0.2);
    assert_eq!(b.rank, 2);
}

#[test]
fn test_portfolio_tiers_and_notes() {
    let responses = survey();
    let agg = SurveyAggregator::new(&responses, CalibrationTable::new(), &AggregationConfig::default());
    let config = ForecastConfig::default();
    let matrix = generate_risk_reward_matrix(&agg, &topics(), None, &config);

    let portfolio = rank_portfolio_options(&matrix, None, &config);
    assert_eq!(portfolio.len(), 3);

    assert_eq!(portfolio[0].topic, "c");
    assert_eq!(portfolio[0].category, PortfolioCategory::HighPriority);
    assert_eq!(portfolio[0].uncertainty_level, UncertaintyLevel::Moderate);
    assert!(portfolio[0].recommendation.starts_with("Strongly recommend funding"));

    assert_eq!(portfolio[1].uncertainty_note, "Relatively confident estimates.");

    let b = &portfolio[2];
    assert_eq!(b.category, PortfolioCategory::Caution);
    assert!(b.recommendation.contains("(CSP: 4.0)"));
    assert!(portfolio[0].recommendation.contains("High safety benefit (5.0)"));
    assert_eq!(b.rank, 3);
}

#[test]
fn test_budget_truncates_to_top_entries_and_zero_means_unlimited() {
    let responses = survey();
    let agg = SurveyAggregator::new(&responses, CalibrationTable::new(), &AggregationConfig::default());
    let config = ForecastConfig::default();
    let matrix = generate_risk_reward_matrix(&agg, &topics(), None, &config);

    let top2 = rank_portfolio_options(&matrix, Some(2), &config);
    assert_eq!(
        top2.iter().map(|r| r.topic.as_str()).collect::<Vec<_>>(),
        vec!["c", "a"]
    );
    assert_eq!(rank_portfolio_options(&matrix, Some(0), &config).len(), 3);
    assert_eq!(rank_portfolio_options(&matrix, Some(10), &config).len(), 3);
}

#[test]
fn test_custom_thresholds() {
    let responses = survey();
    let agg = SurveyAggregator::new(&responses, CalibrationTable::new(), &AggregationConfig::default());
    let config = ForecastConfig {
        high_priority_ratio: Some(100.0),
        ..Default::default()
    };
    let matrix = generate_risk_reward_matrix(&agg, &topics(), None, &config);
    let portfolio = rank_portfolio_options(&matrix, None, &config);
    assert_eq!(portfolio[0].category, PortfolioCategory::ModeratePriority);
}
