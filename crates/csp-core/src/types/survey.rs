//! Expert survey records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Lower bound of the scoring rubric.
pub const SCORE_MIN: f64 = 0.0;
/// Upper bound of the scoring rubric.
pub const SCORE_MAX: f64 = 5.0;

fn default_uncertainty() -> f64 {
    0.5
}

/// One respondent's score for one rubric dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    /// Score in `[0, 5]`. Missing values import as 0.0.
    #[serde(default)]
    pub score: f64,
    /// Self-reported uncertainty in `[0, 1]`. Missing values import as 0.5.
    #[serde(default = "default_uncertainty")]
    pub uncertainty: f64,
}

impl DimensionScore {
    pub fn new(score: f64, uncertainty: f64) -> Self {
        Self { score, uncertainty }
    }
}

/// All dimension scores a respondent gave for a single topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicEntry {
    /// Free-text topic label, matched exactly.
    pub topic: String,
    #[serde(default)]
    pub dimensions: BTreeMap<String, DimensionScore>,
}

impl TopicEntry {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            dimensions: BTreeMap::new(),
        }
    }

    /// Builder-style helper used by importers and tests.
    pub fn with_dimension(mut self, id: impl Into<String>, score: f64, uncertainty: f64) -> Self {
        self.dimensions
            .insert(id.into(), DimensionScore::new(score, uncertainty));
        self
    }
}

/// One submission by one respondent.
///
/// Immutable once stored, except for `calibration_score`, which is a cache of
/// the respondent's calibration weight and is overwritten on every
/// recalibration.
///
/// On the wire the calibration cache is a nested object,
/// `"calibration": {"score": .., "notes": ..}`, or `null` when no score is
/// cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SurveyResponseRecord", into = "SurveyResponseRecord")]
pub struct SurveyResponse {
    pub response_id: String,
    pub respondent_id: String,
    pub created_at: String,
    pub calibration_score: Option<f64>,
    pub calibration_notes: Option<String>,
    pub responses: Vec<TopicEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CalibrationRecord {
    #[serde(default)]
    score: Option<f64>,
    #[serde(default)]
    notes: Option<String>,
}

/// Serialized shape of [`SurveyResponse`].
#[derive(Serialize, Deserialize)]
struct SurveyResponseRecord {
    response_id: String,
    respondent_id: String,
    #[serde(default)]
    created_at: String,
    #[serde(default)]
    calibration: Option<CalibrationRecord>,
    #[serde(default)]
    responses: Vec<TopicEntry>,
}

impl From<SurveyResponseRecord> for SurveyResponse {
    fn from(record: SurveyResponseRecord) -> Self {
        let calibration = record.calibration.unwrap_or_default();
        Self {
            response_id: record.response_id,
            respondent_id: record.respondent_id,
            created_at: record.created_at,
            calibration_score: calibration.score,
            calibration_notes: calibration.notes,
            responses: record.responses,
        }
    }
}

impl From<SurveyResponse> for SurveyResponseRecord {
    fn from(response: SurveyResponse) -> Self {
        let calibration = response.calibration_score.map(|score| CalibrationRecord {
            score: Some(score),
            notes: response.calibration_notes,
        });
        Self {
            response_id: response.response_id,
            respondent_id: response.respondent_id,
            created_at: response.created_at,
            calibration,
            responses: response.responses,
        }
    }
}

impl SurveyResponse {
    pub fn new(response_id: impl Into<String>, respondent_id: impl Into<String>) -> Self {
        Self {
            response_id: response_id.into(),
            respondent_id: respondent_id.into(),
            created_at: String::new(),
            calibration_score: None,
            calibration_notes: None,
            responses: Vec::new(),
        }
    }

    pub fn with_entry(mut self, entry: TopicEntry) -> Self {
        self.responses.push(entry);
        self
    }

    /// Topic labels in submission order (may repeat).
    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.responses.iter().map(|e| e.topic.as_str())
    }
}

/// A probability-estimation question with a known answer, used only to
/// measure respondent calibration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationQuestion {
    pub question_id: String,
    #[serde(default)]
    pub question_text: String,
    /// The known correct probability.
    pub true_answer: f64,
    #[serde(default)]
    pub category: String,
}

/// A respondent's predicted probability for one calibration question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationResponse {
    pub respondent_id: String,
    pub question_id: String,
    pub predicted_probability: f64,
}

impl CalibrationResponse {
    pub fn new(
        respondent_id: impl Into<String>,
        question_id: impl Into<String>,
        predicted_probability: f64,
    ) -> Self {
        Self {
            respondent_id: respondent_id.into(),
            question_id: question_id.into(),
            predicted_probability,
        }
    }
}
