//! Intent-label vocabulary and label records produced by the labeling
//! subsystem.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category assigned to papers that have no label.
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// Confidence below which a label is routed to human audit.
pub const AUDIT_CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Closed intent vocabulary. The serialized form is lowercase and
/// underscore-separated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentLabel {
    SafetyUse,
    CapabilityUse,
    Mixed,
    Unclear,
}

impl IntentLabel {
    pub const ALL: [IntentLabel; 4] = [
        Self::SafetyUse,
        Self::CapabilityUse,
        Self::Mixed,
        Self::Unclear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SafetyUse => "safety_use",
            Self::CapabilityUse => "capability_use",
            Self::Mixed => "mixed",
            Self::Unclear => "unclear",
        }
    }

    /// Parse the canonical spelling only. Variants such as `safety-use` are
    /// rejected here; mapping them is the job of an explicit alias table.
    pub fn from_canonical(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.as_str() == raw)
    }
}

impl fmt::Display for IntentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a label was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelMethod {
    Rules,
    Llm,
    Human,
    Mixed,
}

/// Review state of a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    #[default]
    Pending,
    Verified,
    Disputed,
}

impl AuditStatus {
    /// Low-confidence labels wait for human review; the rest are accepted.
    pub fn route(confidence: f64) -> Self {
        if confidence < AUDIT_CONFIDENCE_THRESHOLD {
            Self::Pending
        } else {
            Self::Verified
        }
    }
}

fn default_confidence() -> f64 {
    0.5
}

/// A label record for one paper.
///
/// `label` is kept as the raw string the labeler emitted so that spelling
/// drift can be detected downstream instead of being lost at parse time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperLabel {
    #[serde(default)]
    pub label_id: String,
    pub paper_id: String,
    pub label: String,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    pub method: LabelMethod,
    #[serde(default)]
    pub audit_status: AuditStatus,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub evidence_spans: Vec<String>,
}

impl PaperLabel {
    pub fn new(paper_id: impl Into<String>, label: impl Into<String>, method: LabelMethod) -> Self {
        let paper_id = paper_id.into();
        Self {
            label_id: format!("label_{paper_id}"),
            paper_id,
            label: label.into(),
            confidence: default_confidence(),
            method,
            audit_status: AuditStatus::Pending,
            created_at: String::new(),
            evidence_spans: Vec::new(),
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// The canonical intent, if the raw label is spelled canonically.
    pub fn intent(&self) -> Option<IntentLabel> {
        IntentLabel::from_canonical(&self.label)
    }
}
