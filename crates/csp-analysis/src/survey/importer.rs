//! Survey import: JSON payloads and flat score rows.

use csp_core::errors::ImportError;
use csp_core::types::collections::FxHashMap;
use csp_core::types::{DimensionScore, SurveyResponse, TopicEntry, SCORE_MAX, SCORE_MIN};
use serde::{Deserialize, Serialize};

/// Parse one `SurveyResponse` object or an array of them, validating each.
pub fn import_from_json_str(text: &str) -> Result<Vec<SurveyResponse>, ImportError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let responses: Vec<SurveyResponse> = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        vec![serde_json::from_value(value)?]
    };

    for response in &responses {
        validate_response(response)?;
    }

    tracing::info!(count = responses.len(), "imported survey responses");
    Ok(responses)
}

/// Check ids are non-empty, scores lie in `[0, 5]` and uncertainties in `[0, 1]`.
pub fn validate_response(response: &SurveyResponse) -> Result<(), ImportError> {
    let rid = &response.response_id;
    if rid.trim().is_empty() {
        return Err(ImportError::EmptyField {
            response_id: rid.clone(),
            field: "response_id".to_string(),
        });
    }
    if response.respondent_id.trim().is_empty() {
        return Err(ImportError::EmptyField {
            response_id: rid.clone(),
            field: "respondent_id".to_string(),
        });
    }

    for entry in &response.responses {
        for (dim, score) in &entry.dimensions {
            check_range(rid, &entry.topic, dim, "score", score.score, SCORE_MIN, SCORE_MAX)?;
            check_range(rid, &entry.topic, dim, "uncertainty", score.uncertainty, 0.0, 1.0)?;
        }
    }
    Ok(())
}

fn check_range(
    response_id: &str,
    topic: &str,
    dimension: &str,
    what: &str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), ImportError> {
    // NaN fails the contains check as well.
    if (min..=max).contains(&value) {
        return Ok(());
    }
    Err(ImportError::OutOfRange {
        response_id: response_id.to_string(),
        field: format!("{topic}/{dimension}.{what}"),
        value,
        min,
        max,
    })
}

/// One flat `(respondent, topic, dimension, score, uncertainty?)` row, as
/// found in spreadsheet exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRow {
    pub respondent_id: String,
    pub topic: String,
    pub dimension_id: String,
    pub score: f64,
    #[serde(default)]
    pub uncertainty: Option<f64>,
}

impl ScoreRow {
    pub fn new(
        respondent_id: impl Into<String>,
        topic: impl Into<String>,
        dimension_id: impl Into<String>,
        score: f64,
        uncertainty: Option<f64>,
    ) -> Self {
        Self {
            respondent_id: respondent_id.into(),
            topic: topic.into(),
            dimension_id: dimension_id.into(),
            score,
            uncertainty,
        }
    }
}

/// Group flat rows into one `SurveyResponse` per respondent.
///
/// Respondents and their topics keep first-seen order. A repeated
/// `(respondent, topic, dimension)` row overwrites the earlier score.
/// `stamp` becomes both `created_at` and the suffix of
/// `resp_<respondent>_<stamp>`.
pub fn group_score_rows(
    rows: &[ScoreRow],
    stamp: &str,
) -> Result<Vec<SurveyResponse>, ImportError> {
    let mut respondent_index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut responses: Vec<SurveyResponse> = Vec::new();

    for row in rows {
        let idx = *respondent_index
            .entry(row.respondent_id.as_str())
            .or_insert_with(|| {
                let mut r = SurveyResponse::new(
                    format!("resp_{}_{}", row.respondent_id, stamp),
                    row.respondent_id.clone(),
                );
                r.created_at = stamp.to_string();
                responses.push(r);
                responses.len() - 1
            });

        let response = &mut responses[idx];
        let entry = match response.responses.iter().position(|e| e.topic == row.topic) {
            Some(pos) => &mut response.responses[pos],
            None => {
                response.responses.push(TopicEntry::new(row.topic.clone()));
                let last = response.responses.len() - 1;
                &mut response.responses[last]
            }
        };
        let uncertainty = row.uncertainty.unwrap_or(0.5);
        entry
            .dimensions
            .insert(row.dimension_id.clone(), DimensionScore::new(row.score, uncertainty));
    }

    for response in &responses {
        validate_response(response)?;
    }

    tracing::info!(
        rows = rows.len(),
        respondents = responses.len(),
        "grouped score rows"
    );
    Ok(responses)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let text = r#"{"response_id":"r1","respondent_id":"e1",
            "responses":[{"topic":"t","dimensions":{"d1":{}}}]}"#;
        let out = import_from_json_str(text).unwrap();
        let dim = out[0].responses[0].dimensions["d1"];
        assert_eq!(dim.score, 0.0);
        assert_eq!(dim.uncertainty, 0.5);
    }

    #[test]
    fn test_uncertainty_out_of_range_rejected() {
        let text = r#"[{"response_id":"r1","respondent_id":"e1",
            "responses":[{"topic":"t","dimensions":{"d1":{"score":2,"uncertainty":1.5}}}]}]"#;
        let err = import_from_json_str(text).unwrap_err();
        assert!(matches!(err, ImportError::OutOfRange { .. }));
    }

    #[test]
    fn test_grouping_overwrites_repeated_dimension() {
        let rows = vec![
            ScoreRow::new("e1", "t", "d1", 1.0, None),
            ScoreRow::new("e1", "t", "d1", 3.0, Some(0.2)),
        ];
        let out = group_score_rows(&rows, "s").unwrap();
        assert_eq!(out.len(), 1);
        let dim = out[0].responses[0].dimensions["d1"];
        assert_eq!(dim.score, 3.0);
        assert_eq!(dim.uncertainty, 0.2);
    }
}
