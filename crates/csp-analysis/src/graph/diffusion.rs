//! Citation flow between intent categories.

use std::collections::BTreeMap;

use csp_core::types::{IntentLabel, UNKNOWN_CATEGORY};

use super::citation_graph::CitationGraph;
use crate::labels::LabelMap;

/// Citing category → cited category → number of citation edges.
pub type DiffusionFlow = BTreeMap<String, BTreeMap<String, u64>>;

/// Count citation edges by `(label(citing), label(cited))`.
///
/// Papers absent from `labels` count as `"unknown"`. Labels are used exactly
/// as given; normalise them first if spelling drift is possible.
pub fn compute_diffusion_flow(graph: &CitationGraph, labels: &LabelMap) -> DiffusionFlow {
    let category = |paper: &str| -> String {
        labels
            .get(paper)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_CATEGORY)
            .to_string()
    };

    let mut flow = DiffusionFlow::new();
    for (citing, cited) in graph.citations() {
        *flow
            .entry(category(citing))
            .or_default()
            .entry(category(cited))
            .or_default() += 1;
    }
    flow
}

/// Share of capability-use citations that land on safety-use papers.
///
/// `flow[capability_use][safety_use] / Σ flow[capability_use]`, in `[0, 1]`.
/// A missing or all-zero capability row gives 0.0.
pub fn compute_spillover_score(flow: &DiffusionFlow) -> f64 {
    let Some(row) = flow.get(IntentLabel::CapabilityUse.as_str()) else {
        return 0.0;
    };
    let total: u64 = row.values().sum();
    if total == 0 {
        return 0.0;
    }
    let hits = row
        .get(IntentLabel::SafetyUse.as_str())
        .copied()
        .unwrap_or(0);
    hits as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_row_is_zero() {
        let mut flow = DiffusionFlow::new();
        flow.entry("capability_use".into())
            .or_default()
            .insert("safety_use".into(), 0);
        assert_eq!(compute_spillover_score(&flow), 0.0);
    }

    #[test]
    fn test_row_without_safety_target() {
        let mut flow = DiffusionFlow::new();
        flow.entry("capability_use".into())
            .or_default()
            .insert("mixed".into(), 4);
        assert_eq!(compute_spillover_score(&flow), 0.0);
    }
}
