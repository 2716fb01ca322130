//! Weighted aggregation of survey scores into per-dimension distributions.
//!
//! Each score carries an effective weight of
//! `respondent_calibration_weight × (1 − stated_uncertainty)`, so a
//! well-calibrated respondent who is unsure about one estimate is still
//! down-weighted for that estimate. Only the mean is weighted; median, std
//! and the credible interval describe the raw sample.

use std::collections::{BTreeMap, BTreeSet};

use csp_core::config::{AggregationConfig, StdConvention};
use csp_core::types::SurveyResponse;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Median, Statistics};

use super::calibration::{CalibrationEngine, CalibrationTable};
use super::topics::{ExactTopicResolver, TopicResolver};
use crate::stats::{credible_interval, round2};

/// Distribution of one rubric dimension for one topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionStatistic {
    /// Weighted mean, rounded to 2 decimals.
    pub mean: f64,
    /// Unweighted median, rounded to 2 decimals.
    pub median: f64,
    /// Unweighted standard deviation; 0.0 for a single sample.
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub n: usize,
    /// Raw scores in collection order.
    pub scores: Vec<f64>,
    /// Empirical credible interval at `credible_level`.
    pub credible_interval: (f64, f64),
    pub credible_level: f64,
}

/// Dimension id → statistic.
pub type DimensionStats = BTreeMap<String, DimensionStatistic>;

/// Aggregates survey responses per topic.
pub struct SurveyAggregator<'a> {
    responses: &'a [SurveyResponse],
    weights: CalibrationTable,
    resolver: Box<dyn TopicResolver>,
    config: AggregationConfig,
}

impl<'a> SurveyAggregator<'a> {
    /// Aggregator over `responses` using precomputed calibration weights.
    pub fn new(
        responses: &'a [SurveyResponse],
        weights: CalibrationTable,
        config: &AggregationConfig,
    ) -> Self {
        Self {
            responses,
            weights,
            resolver: Box::new(ExactTopicResolver),
            config: config.clone(),
        }
    }

    /// Aggregator whose weights are computed from calibration history for
    /// every respondent present in `responses`.
    pub fn from_calibration(
        responses: &'a [SurveyResponse],
        engine: &CalibrationEngine<'_>,
        config: &AggregationConfig,
    ) -> Self {
        Self::new(responses, engine.table_for(responses), config)
    }

    /// Replace the topic resolver.
    pub fn with_resolver(mut self, resolver: impl TopicResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn weights(&self) -> &CalibrationTable {
        &self.weights
    }

    /// Responses with at least one entry for `topic`.
    pub fn responses_for_topic(&self, topic: &str) -> Vec<&'a SurveyResponse> {
        self.responses
            .iter()
            .filter(|r| r.responses.iter().any(|e| self.resolver.matches(&e.topic, topic)))
            .collect()
    }

    /// Aggregate `topic` with the configured weighting.
    pub fn aggregate(&self, topic: &str) -> DimensionStats {
        self.aggregate_responses(topic, self.config.effective_weighted())
    }

    /// Aggregate every dimension scored for `topic`.
    ///
    /// With `weighted == false` every respondent weight is 1.0 and only the
    /// stated uncertainty shapes the mean. Respondents missing from the
    /// calibration table also weigh 1.0.
    pub fn aggregate_responses(&self, topic: &str, weighted: bool) -> DimensionStats {
        let matching = self.responses_for_topic(topic);
        if matching.is_empty() {
            tracing::debug!(topic, "no survey responses for topic");
            return DimensionStats::new();
        }

        // dimension -> [(score, effective_weight)]
        let mut samples: BTreeMap<&str, Vec<(f64, f64)>> = BTreeMap::new();
        for response in &matching {
            let respondent_weight = if weighted {
                self.weights.weight(&response.respondent_id).unwrap_or(1.0)
            } else {
                1.0
            };

            for entry in response
                .responses
                .iter()
                .filter(|e| self.resolver.matches(&e.topic, topic))
            {
                for (dim_id, dim) in &entry.dimensions {
                    let effective_weight = respondent_weight * (1.0 - dim.uncertainty);
                    samples
                        .entry(dim_id.as_str())
                        .or_default()
                        .push((dim.score, effective_weight));
                }
            }
        }

        let level = self.config.effective_credible_level();
        let convention = self.config.effective_std_convention();
        let result: DimensionStats = samples
            .into_iter()
            .filter(|(_, s)| !s.is_empty())
            .map(|(dim_id, s)| (dim_id.to_string(), summarize(&s, level, convention)))
            .collect();

        tracing::debug!(
            topic,
            responses = matching.len(),
            dimensions = result.len(),
            weighted,
            "topic aggregated"
        );
        result
    }

    /// Every topic present across all responses, under the resolver's keys.
    pub fn topics(&self) -> BTreeSet<String> {
        self.responses
            .iter()
            .flat_map(|r| r.responses.iter())
            .map(|e| self.resolver.canonical(&e.topic).into_owned())
            .collect()
    }

    /// Aggregate every topic independently.
    ///
    /// Topics share no state, so with `aggregation.parallel` enabled they are
    /// computed on the rayon pool.
    pub fn all_topic_aggregations(&self) -> BTreeMap<String, DimensionStats> {
        let topics: Vec<String> = self.topics().into_iter().collect();
        let aggregate = |topic: String| {
            let stats = self.aggregate(&topic);
            (topic, stats)
        };

        let result: BTreeMap<String, DimensionStats> = if self.config.effective_parallel() {
            topics.into_par_iter().map(aggregate).collect()
        } else {
            topics.into_iter().map(aggregate).collect()
        };

        tracing::info!(topics = result.len(), "aggregated all survey topics");
        result
    }
}

/// Reduce `(score, weight)` samples to a [`DimensionStatistic`].
fn summarize(samples: &[(f64, f64)], level: f64, convention: StdConvention) -> DimensionStatistic {
    let scores: Vec<f64> = samples.iter().map(|(s, _)| *s).collect();
    let n = scores.len();

    let total_weight: f64 = samples.iter().map(|(_, w)| w).sum();
    let mean = if total_weight > 0.0 {
        samples.iter().map(|(s, w)| s * w).sum::<f64>() / total_weight
    } else {
        scores.iter().mean()
    };

    let median = Data::new(scores.clone()).median();
    let std = if n < 2 {
        0.0
    } else {
        match convention {
            StdConvention::Population => scores.iter().population_std_dev(),
            StdConvention::Sample => scores.iter().std_dev(),
        }
    };

    let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    DimensionStatistic {
        mean: round2(mean),
        median: round2(median),
        std: round2(std),
        min,
        max,
        n,
        credible_interval: credible_interval(&scores, level),
        credible_level: level,
        scores,
    }
}
