//! Community detection on the undirected view of the citation graph.
//!
//! Greedy modularity maximisation (Clauset-Newman-Moore) when applicable,
//! otherwise weakly connected components. Community ids are 0-based and
//! ordered by community size, largest first; ties go to the community holding
//! the earliest-inserted paper. Ids are only comparable within one call.

use std::collections::{BTreeMap, BTreeSet};

use csp_core::config::{CommunityMethod, GraphConfig};
use petgraph::unionfind::UnionFind;
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

use super::citation_graph::CitationGraph;

/// Community membership plus the algorithm that actually produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityAssignment {
    pub method: CommunityMethod,
    /// Paper id → community id.
    pub membership: BTreeMap<String, usize>,
    pub community_count: usize,
}

impl CommunityAssignment {
    pub fn community_of(&self, paper_id: &str) -> Option<usize> {
        self.membership.get(paper_id).copied()
    }

    /// Paper ids grouped by community id.
    pub fn members(&self) -> Vec<Vec<&str>> {
        let mut groups = vec![Vec::new(); self.community_count];
        for (paper, &id) in &self.membership {
            groups[id].push(paper.as_str());
        }
        groups
    }
}

/// Detect communities with the configured method.
///
/// Modularity is undefined without edges and too slow past
/// `modularity_max_nodes`; both cases fall back to connected components
/// without error.
pub fn detect_communities(graph: &CitationGraph, config: &GraphConfig) -> CommunityAssignment {
    let n = graph.node_count();
    let edges = undirected_edges(graph);

    let mut method = config.effective_community_method();
    if method == CommunityMethod::GreedyModularity {
        if edges.is_empty() {
            tracing::debug!(nodes = n, "no edges; falling back to connected components");
            method = CommunityMethod::ConnectedComponents;
        } else if n > config.effective_modularity_max_nodes() {
            tracing::debug!(
                nodes = n,
                cap = config.effective_modularity_max_nodes(),
                "graph over modularity node cap; falling back to connected components"
            );
            method = CommunityMethod::ConnectedComponents;
        }
    }

    let groups = match method {
        CommunityMethod::GreedyModularity => greedy_modularity(n, &edges),
        CommunityMethod::ConnectedComponents => connected_components(n, &edges),
    };

    let assignment = assign_ids(graph, groups, method);
    tracing::debug!(
        method = method.name(),
        communities = assignment.community_count,
        "communities detected"
    );
    assignment
}

/// Distinct undirected edges `(lo, hi)` by node index, self-loops dropped.
fn undirected_edges(graph: &CitationGraph) -> Vec<(usize, usize)> {
    let set: BTreeSet<(usize, usize)> = graph
        .graph
        .edge_references()
        .filter_map(|e| {
            let (a, b) = (e.source().index(), e.target().index());
            match a.cmp(&b) {
                std::cmp::Ordering::Less => Some((a, b)),
                std::cmp::Ordering::Greater => Some((b, a)),
                std::cmp::Ordering::Equal => None,
            }
        })
        .collect();
    set.into_iter().collect()
}

fn connected_components(n: usize, edges: &[(usize, usize)]) -> Vec<Vec<usize>> {
    let mut uf = UnionFind::<usize>::new(n);
    for &(a, b) in edges {
        uf.union(a, b);
    }

    let mut by_root: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for node in 0..n {
        by_root.entry(uf.find(node)).or_default().push(node);
    }
    by_root.into_values().collect()
}

/// Clauset-Newman-Moore agglomeration.
///
/// Starts from singletons and repeatedly merges the adjacent pair with the
/// largest modularity gain `dQ = 2 (e_ij - a_i a_j)` while that gain is
/// positive. Equal gains resolve to the lowest `(i, j)` pair.
fn greedy_modularity(n: usize, edges: &[(usize, usize)]) -> Vec<Vec<usize>> {
    let two_m = 2.0 * edges.len() as f64;

    // e[i][j]: fraction of edge ends joining i and j (each side).
    let mut e: Vec<BTreeMap<usize, f64>> = vec![BTreeMap::new(); n];
    let mut a = vec![0.0f64; n];
    for &(u, v) in edges {
        *e[u].entry(v).or_default() += 1.0 / two_m;
        *e[v].entry(u).or_default() += 1.0 / two_m;
        a[u] += 1.0 / two_m;
        a[v] += 1.0 / two_m;
    }

    let mut members: Vec<Vec<usize>> = (0..n).map(|i| vec![i]).collect();
    let mut active = vec![true; n];

    loop {
        let mut best: Option<(f64, usize, usize)> = None;
        for i in 0..n {
            if !active[i] {
                continue;
            }
            for (&j, &e_ij) in e[i].range(i + 1..) {
                let dq = 2.0 * (e_ij - a[i] * a[j]);
                if best.map_or(true, |(b, _, _)| dq > b) {
                    best = Some((dq, i, j));
                }
            }
        }

        let Some((dq, i, j)) = best else { break };
        if dq <= 0.0 {
            break;
        }

        // Fold j into i.
        let row_j = std::mem::take(&mut e[j]);
        for (k, e_jk) in row_j {
            if k == i {
                continue;
            }
            *e[i].entry(k).or_default() += e_jk;
            e[k].remove(&j);
            *e[k].entry(i).or_default() += e_jk;
        }
        e[i].remove(&j);
        a[i] += a[j];
        a[j] = 0.0;
        let moved = std::mem::take(&mut members[j]);
        members[i].extend(moved);
        active[j] = false;
    }

    members
        .into_iter()
        .zip(active)
        .filter_map(|(m, alive)| alive.then_some(m))
        .collect()
}

fn assign_ids(
    graph: &CitationGraph,
    mut groups: Vec<Vec<usize>>,
    method: CommunityMethod,
) -> CommunityAssignment {
    for g in &mut groups {
        g.sort_unstable();
    }
    groups.sort_by(|x, y| y.len().cmp(&x.len()).then_with(|| x[0].cmp(&y[0])));

    let mut membership = BTreeMap::new();
    for (id, group) in groups.iter().enumerate() {
        for &node in group {
            let paper = graph.paper_id(petgraph::graph::NodeIndex::new(node));
            membership.insert(paper.to_string(), id);
        }
    }

    CommunityAssignment {
        method,
        membership,
        community_count: groups.len(),
    }
}
