//! Risk/reward forecasting over aggregated survey dimensions.

use std::collections::HashMap;

use csp_core::config::ForecastConfig;
use serde::{Deserialize, Serialize};

use super::aggregation::{DimensionStats, SurveyAggregator};
use crate::stats::{cmp_f64, round2};

/// Caller-supplied safety-benefit estimate for one topic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SafetyBenefitEstimate {
    pub benefit: f64,
    pub uncertainty: f64,
}

impl SafetyBenefitEstimate {
    pub fn new(benefit: f64, uncertainty: f64) -> Self {
        Self { benefit, uncertainty }
    }
}

/// Forecast for a single topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicAssessment {
    pub topic: String,
    /// Mean of dimension means (0-5).
    pub csp_score: f64,
    /// Root-mean-square of dimension stds.
    pub csp_uncertainty: f64,
    pub safety_benefit: f64,
    pub safety_benefit_uncertainty: f64,
    pub risk_reward_ratio: f64,
    /// 1-based position after sorting by ratio; 0 until ranked.
    pub rank: usize,
}

/// Overall CSP score and its uncertainty from dimension statistics.
///
/// The score is the unweighted mean of dimension means; the uncertainty is
/// the root-mean-square of dimension stds, which treats dimensions as
/// independent. No dimensions yields `(0.0, 1.0)`: zero risk with maximal
/// uncertainty, not a confident zero.
pub fn compute_csp_score(dimension_stats: &DimensionStats) -> (f64, f64) {
    if dimension_stats.is_empty() {
        return (0.0, 1.0);
    }

    let k = dimension_stats.len() as f64;
    let mean = dimension_stats.values().map(|d| d.mean).sum::<f64>() / k;
    let rms = (dimension_stats.values().map(|d| d.std * d.std).sum::<f64>() / k).sqrt();

    (round2(mean), round2(rms))
}

/// Safety benefit per unit of spillover risk.
///
/// Defined piecewise so a zero CSP score never divides: the ratio becomes
/// `safety_benefit × zero_risk_multiplier` instead.
pub fn risk_reward_ratio(safety_benefit: f64, csp_score: f64, zero_risk_multiplier: f64) -> f64 {
    if csp_score > 0.0 {
        safety_benefit / csp_score
    } else {
        safety_benefit * zero_risk_multiplier
    }
}

/// Assess each topic and rank them by risk/reward ratio, best first.
///
/// Without an override for a topic, benefit is modelled as the mirror image
/// of risk: `benefit_ceiling − csp_score` with the CSP uncertainty. Ties keep
/// the order in which topics were given. Ranks are dense, `1..=N`.
pub fn generate_risk_reward_matrix(
    aggregator: &SurveyAggregator<'_>,
    topics: &[String],
    safety_benefit_estimates: Option<&HashMap<String, SafetyBenefitEstimate>>,
    config: &ForecastConfig,
) -> Vec<TopicAssessment> {
    let mut assessments: Vec<TopicAssessment> = topics
        .iter()
        .map(|topic| {
            let stats = aggregator.aggregate(topic);
            assess_topic(topic, &stats, safety_benefit_estimates.and_then(|m| m.get(topic)), config)
        })
        .collect();

    rank_assessments(&mut assessments);
    tracing::info!(topics = assessments.len(), "risk/reward matrix generated");
    assessments
}

/// Build an unranked assessment from one topic's dimension statistics.
pub fn assess_topic(
    topic: &str,
    stats: &DimensionStats,
    estimate: Option<&SafetyBenefitEstimate>,
    config: &ForecastConfig,
) -> TopicAssessment {
    let (csp_score, csp_uncertainty) = compute_csp_score(stats);

    let (safety_benefit, benefit_uncertainty) = match estimate {
        Some(e) => (e.benefit, e.uncertainty),
        None => (config.effective_benefit_ceiling() - csp_score, csp_uncertainty),
    };

    let ratio = risk_reward_ratio(
        safety_benefit,
        csp_score,
        config.effective_zero_risk_multiplier(),
    );

    TopicAssessment {
        topic: topic.to_string(),
        csp_score,
        csp_uncertainty,
        safety_benefit: round2(safety_benefit),
        safety_benefit_uncertainty: round2(benefit_uncertainty),
        risk_reward_ratio: round2(ratio),
        rank: 0,
    }
}

/// Stable sort by ratio descending, then assign dense 1-based ranks.
pub fn rank_assessments(assessments: &mut [TopicAssessment]) {
    assessments.sort_by(|a, b| cmp_f64(&b.risk_reward_ratio, &a.risk_reward_ratio));
    for (i, a) in assessments.iter_mut().enumerate() {
        a.rank = i + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::aggregation::DimensionStatistic;

    fn stat(mean: f64, std: f64) -> DimensionStatistic {
        DimensionStatistic {
            mean,
            median: mean,
            std,
            min: mean,
            max: mean,
            n: 1,
            scores: vec![mean],
            credible_interval: (mean, mean),
            credible_level: 0.9,
        }
    }

    #[test]
    fn test_csp_score_empty_is_zero_with_max_uncertainty() {
        assert_eq!(compute_csp_score(&DimensionStats::new()), (0.0, 1.0));
    }

    #[test]
    fn test_csp_score_mean_and_rms() {
        let mut stats = DimensionStats::new();
        stats.insert("d1".into(), stat(2.0, 3.0));
        stats.insert("d2".into(), stat(4.0, 4.0));
        // mean 3.0, rms sqrt((9 + 16) / 2) = 3.5355
        assert_eq!(compute_csp_score(&stats), (3.0, 3.54));
    }

    #[test]
    fn test_ratio_zero_csp_uses_multiplier() {
        assert_eq!(risk_reward_ratio(5.0, 0.0, 10.0), 50.0);
        assert_eq!(risk_reward_ratio(3.0, 1.5, 10.0), 2.0);
    }

    #[test]
    fn test_default_benefit_mirrors_risk() {
        let mut stats = DimensionStats::new();
        stats.insert("d1".into(), stat(2.0, 0.5));
        let a = assess_topic("t", &stats, None, &ForecastConfig::default());
        assert_eq!(a.safety_benefit, 3.0);
        assert_eq!(a.safety_benefit_uncertainty, 0.5);
        assert_eq!(a.risk_reward_ratio, 1.5);
    }

    #[test]
    fn test_override_benefit() {
        let mut stats = DimensionStats::new();
        stats.insert("d1".into(), stat(2.0, 0.5));
        let est = SafetyBenefitEstimate::new(4.0, 0.3);
        let a = assess_topic("t", &stats, Some(&est), &ForecastConfig::default());
        assert_eq!(a.safety_benefit, 4.0);
        assert_eq!(a.safety_benefit_uncertainty, 0.3);
        assert_eq!(a.risk_reward_ratio, 2.0);
    }

    #[test]
    fn test_rank_is_dense_and_stable() {
        let mk = |t: &str, r: f64| TopicAssessment {
            topic: t.into(),
            csp_score: 1.0,
            csp_uncertainty: 0.0,
            safety_benefit: r,
            safety_benefit_uncertainty: 0.0,
            risk_reward_ratio: r,
            rank: 0,
        };
        let mut v = vec![mk("a", 1.0), mk("b", 3.0), mk("c", 1.0), mk("d", 2.0)];
        rank_assessments(&mut v);
        let order: Vec<&str> = v.iter().map(|a| a.topic.as_str()).collect();
        assert_eq!(order, vec!["b", "d", "a", "c"]);
        let ranks: Vec<usize> = v.iter().map(|a| a.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
    }
}
