//! One-call citation analysis bundle for the reporting layer.

use std::collections::BTreeMap;

use csp_core::CspConfig;
use csp_core::types::Paper;
use serde::Serialize;

use super::centrality::compute_centrality;
use super::citation_graph::{build_graph, CitationGraph};
use super::communities::{detect_communities, CommunityAssignment};
use super::diffusion::{compute_diffusion_flow, compute_spillover_score, DiffusionFlow};
use crate::labels::{normalize_labels, LabelMap, LabelMismatch};

/// Everything the graph engine derives from one paper set.
#[derive(Debug, Clone, Serialize)]
pub struct CitationReport {
    #[serde(skip)]
    pub graph: CitationGraph,
    pub node_count: usize,
    pub edge_count: usize,
    pub communities: CommunityAssignment,
    pub diffusion_flow: DiffusionFlow,
    pub spillover_score: f64,
    pub centrality: BTreeMap<String, f64>,
    /// Labels that were neither canonical nor aliased.
    pub label_mismatches: Vec<LabelMismatch>,
}

/// Build the graph, normalise labels through the configured aliases, then
/// derive communities, flow, spillover and centrality.
pub fn analyze_citations(papers: &[Paper], labels: &LabelMap, config: &CspConfig) -> CitationReport {
    let graph = build_graph(papers);
    let normalized = normalize_labels(labels, &config.labels);

    let communities = detect_communities(&graph, &config.graph);
    let diffusion_flow = compute_diffusion_flow(&graph, &normalized.labels);
    let spillover_score = compute_spillover_score(&diffusion_flow);
    let centrality = compute_centrality(&graph, &config.graph);

    tracing::info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        communities = communities.community_count,
        method = communities.method.name(),
        spillover = spillover_score,
        mismatches = normalized.mismatches.len(),
        "citation analysis complete"
    );

    CitationReport {
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        graph,
        communities,
        diffusion_flow,
        spillover_score,
        centrality,
        label_mismatches: normalized.mismatches,
    }
}
