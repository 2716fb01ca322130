use std::collections::BTreeMap;

use csp_core::config::LabelConfig;
use csp_core::types::{AuditStatus, IntentLabel, PaperLabel};
use serde::{Deserialize, Serialize};

/// Paper id → label string.
pub type LabelMap = BTreeMap<String, String>;

/// A label that is neither canonical nor covered by an alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelMismatch {
    pub paper_id: String,
    pub raw_label: String,
}

/// Result of normalising a label map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedLabels {
    /// Canonical labels, or the raw label where no mapping applied.
    pub labels: LabelMap,
    /// Labels kept verbatim because no mapping applied.
    pub mismatches: Vec<LabelMismatch>,
    /// Number of labels rewritten through the alias table.
    pub aliased: usize,
}

impl NormalizedLabels {
    pub fn is_clean(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Build a label map from records; a later record for the same paper wins.
pub fn label_map_from_records(records: &[PaperLabel]) -> LabelMap {
    records
        .iter()
        .map(|r| (r.paper_id.clone(), r.label.clone()))
        .collect()
}

/// Fold labels onto the canonical vocabulary.
///
/// Canonical labels pass through. Labels listed in `config.aliases` are
/// rewritten. Anything else is kept verbatim and reported; it will land in
/// its own category in the diffusion flow rather than being merged.
pub fn normalize_labels(labels: &LabelMap, config: &LabelConfig) -> NormalizedLabels {
    let mut out = NormalizedLabels::default();

    for (paper_id, raw) in labels {
        let label = if IntentLabel::from_canonical(raw).is_some() {
            raw.clone()
        } else if let Some(target) = config.aliases.get(raw) {
            out.aliased += 1;
            target.clone()
        } else {
            out.mismatches.push(LabelMismatch {
                paper_id: paper_id.clone(),
                raw_label: raw.clone(),
            });
            raw.clone()
        };
        out.labels.insert(paper_id.clone(), label);
    }

    if !out.mismatches.is_empty() {
        let mut spellings: Vec<&str> = out.mismatches.iter().map(|m| m.raw_label.as_str()).collect();
        spellings.sort_unstable();
        spellings.dedup();
        tracing::warn!(
            mismatches = out.mismatches.len(),
            spellings = ?spellings,
            "labels outside the intent vocabulary kept verbatim"
        );
    }

    out
}

/// Audit status for a fresh label of the given confidence.
pub fn route_audit_status(confidence: f64) -> AuditStatus {
    AuditStatus::route(confidence)
}
