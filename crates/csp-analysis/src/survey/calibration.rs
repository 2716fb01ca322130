//! Respondent calibration: Brier scoring of probability estimates and the
//! trust weight derived from it.
//!
//! Calibration weights are also cached on every `SurveyResponse` of the
//! respondent (`calibration_score`). That cache is rebuilt from source data
//! by [`apply_calibration`]; it is never accumulated.

use std::collections::BTreeMap;

use csp_core::config::CalibrationConfig;
use csp_core::types::{CalibrationQuestion, CalibrationResponse, FxHashMap, SurveyResponse};
use serde::{Deserialize, Serialize};

/// Brier score of `(predicted, outcome)` pairs: the mean squared error.
///
/// Lower is better, 0.0 is perfect. Empty input scores 1.0, the worst value,
/// so that a respondent with nothing to score never looks well calibrated.
pub fn brier_score(predictions: &[(f64, f64)]) -> f64 {
    if predictions.is_empty() {
        return 1.0;
    }
    let total: f64 = predictions
        .iter()
        .map(|(predicted, actual)| (predicted - actual).powi(2))
        .sum();
    total / predictions.len() as f64
}

/// Trust weight for a Brier score: `max(0, 1 - brier)`.
///
/// Perfect (0.0) → 1.0, chance (0.25) → 0.75, worst (1.0) → 0.0.
pub fn calibration_weight(brier: f64) -> f64 {
    (1.0 - brier).max(0.0)
}

/// Calibration outcome for one respondent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationResult {
    pub brier: f64,
    pub weight: f64,
    /// Responses that joined to a known question.
    pub matched_questions: usize,
    /// True when the neutral default was used for lack of history.
    pub is_default: bool,
}

/// Respondent id → calibration weight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalibrationTable {
    weights: BTreeMap<String, f64>,
}

impl CalibrationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, respondent_id: impl Into<String>, weight: f64) {
        self.weights.insert(respondent_id.into(), weight);
    }

    pub fn weight(&self, respondent_id: &str) -> Option<f64> {
        self.weights.get(respondent_id).copied()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl FromIterator<(String, f64)> for CalibrationTable {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            weights: iter.into_iter().collect(),
        }
    }
}

/// Joins calibration responses to their questions and scores respondents.
pub struct CalibrationEngine<'a> {
    questions: FxHashMap<&'a str, &'a CalibrationQuestion>,
    by_respondent: FxHashMap<&'a str, Vec<&'a CalibrationResponse>>,
    config: CalibrationConfig,
}

impl<'a> CalibrationEngine<'a> {
    pub fn new(
        questions: &'a [CalibrationQuestion],
        responses: &'a [CalibrationResponse],
        config: &CalibrationConfig,
    ) -> Self {
        let questions = questions
            .iter()
            .map(|q| (q.question_id.as_str(), q))
            .collect();

        let mut by_respondent: FxHashMap<&str, Vec<&CalibrationResponse>> = FxHashMap::default();
        for response in responses {
            by_respondent
                .entry(response.respondent_id.as_str())
                .or_default()
                .push(response);
        }

        Self {
            questions,
            by_respondent,
            config: config.clone(),
        }
    }

    /// Score one respondent.
    ///
    /// Each calibration response whose question is known contributes a
    /// `(predicted_probability, outcome)` pair, where the outcome comes from
    /// the question's `true_answer` under the configured [`OutcomeMode`].
    /// The default graded mode uses the probability directly, which treats a
    /// graded answer as if it were a binary event. Respondents with no
    /// usable history get the neutral default (0.25, 0.75) rather than the
    /// worst case.
    ///
    /// [`OutcomeMode`]: csp_core::config::OutcomeMode
    pub fn calibrate_respondent(&self, respondent_id: &str) -> CalibrationResult {
        let mode = self.config.effective_outcome_mode();
        let predictions: Vec<(f64, f64)> = self
            .by_respondent
            .get(respondent_id)
            .map(|responses| {
                responses
                    .iter()
                    .filter_map(|r| {
                        self.questions
                            .get(r.question_id.as_str())
                            .map(|q| (r.predicted_probability, mode.outcome(q.true_answer)))
                    })
                    .collect()
            })
            .unwrap_or_default();

        if predictions.is_empty() {
            return CalibrationResult {
                brier: self.config.effective_neutral_brier(),
                weight: self.config.effective_neutral_weight(),
                matched_questions: 0,
                is_default: true,
            };
        }

        let brier = brier_score(&predictions);
        CalibrationResult {
            brier,
            weight: calibration_weight(brier),
            matched_questions: predictions.len(),
            is_default: false,
        }
    }

    /// Weights for every respondent that has at least one survey response.
    pub fn table_for(&self, responses: &[SurveyResponse]) -> CalibrationTable {
        let mut table = CalibrationTable::new();
        let mut defaulted = 0usize;
        for response in responses {
            if table.weight(&response.respondent_id).is_some() {
                continue;
            }
            let result = self.calibrate_respondent(&response.respondent_id);
            if result.is_default {
                defaulted += 1;
            }
            table.insert(response.respondent_id.clone(), result.weight);
        }
        tracing::debug!(
            respondents = table.len(),
            defaulted,
            "calibration table computed"
        );
        table
    }

    /// Recompute one respondent's weight and write it onto all of their
    /// survey responses.
    pub fn recalibrate_respondent(
        &self,
        responses: &mut [SurveyResponse],
        respondent_id: &str,
    ) -> CalibrationResult {
        let result = self.calibrate_respondent(respondent_id);
        for response in responses
            .iter_mut()
            .filter(|r| r.respondent_id == respondent_id)
        {
            response.calibration_score = Some(result.weight);
        }
        result
    }
}

/// Write table weights onto survey responses, overwriting any cached value.
///
/// Responses whose respondent is missing from the table are left untouched.
/// Returns the number of responses updated. Running it twice with the same
/// table leaves the responses unchanged.
pub fn apply_calibration(responses: &mut [SurveyResponse], table: &CalibrationTable) -> usize {
    let mut updated = 0;
    for response in responses.iter_mut() {
        if let Some(weight) = table.weight(&response.respondent_id) {
            response.calibration_score = Some(weight);
            updated += 1;
        }
    }
    updated
}
