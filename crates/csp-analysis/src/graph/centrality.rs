//! PageRank centrality over the directed citation graph.

use std::collections::BTreeMap;

use csp_core::config::GraphConfig;
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use super::citation_graph::CitationGraph;

/// PageRank score per paper id. Scores sum to 1; an empty graph gives an
/// empty map.
///
/// Power iteration with uniform teleport. Mass sitting on nodes without
/// outgoing citations is spread uniformly each round. Iteration stops once
/// the L1 change drops below `N × tolerance`, or after the iteration cap, in
/// which case the last iterate is returned.
pub fn compute_centrality(graph: &CitationGraph, config: &GraphConfig) -> BTreeMap<String, f64> {
    let n = graph.node_count();
    if n == 0 {
        return BTreeMap::new();
    }

    let damping = config.effective_pagerank_damping();
    let tolerance = config.effective_pagerank_tolerance() * n as f64;
    let max_iterations = config.effective_pagerank_max_iterations();
    let nf = n as f64;

    let g = &graph.graph;
    let out_degree: Vec<usize> = g
        .node_indices()
        .map(|i| g.edges_directed(i, Direction::Outgoing).count())
        .collect();

    let mut scores = vec![1.0 / nf; n];
    let mut converged = false;

    for _ in 0..max_iterations {
        let dangling: f64 = (0..n)
            .filter(|&i| out_degree[i] == 0)
            .map(|i| scores[i])
            .sum();
        let base = (1.0 - damping) / nf + damping * dangling / nf;

        let mut next = vec![base; n];
        for edge in g.edge_references() {
            let (s, t) = (edge.source().index(), edge.target().index());
            next[t] += damping * scores[s] / out_degree[s] as f64;
        }

        let diff: f64 = next.iter().zip(&scores).map(|(a, b)| (a - b).abs()).sum();
        scores = next;
        if diff < tolerance {
            converged = true;
            break;
        }
    }

    if !converged {
        tracing::warn!(
            nodes = n,
            iterations = max_iterations,
            "pagerank did not converge; returning last iterate"
        );
    }

    g.node_indices()
        .map(|i| (graph.paper_id(i).to_string(), scores[i.index()]))
        .collect()
}
