//! Directed citation graph over paper ids.

use csp_core::types::collections::FxHashMap;
use csp_core::types::Paper;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

/// Node payload. `title` and `year` are absent for papers that are only
/// known as citation targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperNode {
    pub paper_id: String,
    pub title: Option<String>,
    pub year: Option<i32>,
}

/// Edge `(P, C)` means P cites C. Duplicate citations collapse to one edge.
#[derive(Debug, Clone, Default)]
pub struct CitationGraph {
    pub graph: DiGraph<PaperNode, ()>,
    /// Paper id → node, for O(1) lookup.
    pub node_index: FxHashMap<String, NodeIndex>,
}

impl CitationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn get_node(&self, paper_id: &str) -> Option<NodeIndex> {
        self.node_index.get(paper_id).copied()
    }

    pub fn contains(&self, paper_id: &str) -> bool {
        self.node_index.contains_key(paper_id)
    }

    pub fn node(&self, paper_id: &str) -> Option<&PaperNode> {
        self.get_node(paper_id).map(|idx| &self.graph[idx])
    }

    /// Paper id of a node index.
    pub fn paper_id(&self, idx: NodeIndex) -> &str {
        &self.graph[idx].paper_id
    }

    pub fn has_citation(&self, citing: &str, cited: &str) -> bool {
        match (self.get_node(citing), self.get_node(cited)) {
            (Some(a), Some(b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    /// Add a paper, or fill in the metadata of a node created earlier as a
    /// bare citation target.
    pub fn add_paper(&mut self, paper: &Paper) -> NodeIndex {
        let idx = self.ensure_node(&paper.paper_id);
        let node = &mut self.graph[idx];
        node.title = Some(paper.title.clone());
        node.year = paper.year;
        idx
    }

    /// Node for `paper_id`, created without metadata if missing.
    pub fn ensure_node(&mut self, paper_id: &str) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(paper_id) {
            return idx;
        }
        let idx = self.graph.add_node(PaperNode {
            paper_id: paper_id.to_string(),
            title: None,
            year: None,
        });
        self.node_index.insert(paper_id.to_string(), idx);
        idx
    }

    /// Record that `citing` cites `cited`. Repeats are no-ops.
    pub fn add_citation(&mut self, citing: &str, cited: &str) {
        let a = self.ensure_node(citing);
        let b = self.ensure_node(cited);
        self.graph.update_edge(a, b, ());
    }

    /// `(citing, cited)` paper id pairs in edge insertion order.
    pub fn citations(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.graph.edge_references().map(move |e| {
            (
                self.graph[e.source()].paper_id.as_str(),
                self.graph[e.target()].paper_id.as_str(),
            )
        })
    }
}

/// Build the citation graph for `papers`, including dangling targets.
pub fn build_graph(papers: &[Paper]) -> CitationGraph {
    let mut graph = CitationGraph::new();
    for paper in papers {
        graph.add_paper(paper);
        for cited in &paper.citations {
            graph.add_citation(&paper.paper_id, cited);
        }
    }
    tracing::debug!(
        papers = papers.len(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "citation graph built"
    );
    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dangling_target_has_no_metadata() {
        let g = build_graph(&[Paper::new("A", "Alpha").with_year(2020).citing(["X"])]);
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.node("A").unwrap().year, Some(2020));
        assert!(g.node("X").unwrap().title.is_none());
    }

    #[test]
    fn test_late_paper_fills_dangling_node() {
        let g = build_graph(&[
            Paper::new("A", "Alpha").citing(["B"]),
            Paper::new("B", "Beta").with_year(2019),
        ]);
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.node("B").unwrap().title.as_deref(), Some("Beta"));
    }

    #[test]
    fn test_duplicate_citations_collapse() {
        let g = build_graph(&[Paper::new("A", "Alpha").citing(["B", "B"])]);
        assert_eq!(g.edge_count(), 1);
        assert!(g.has_citation("A", "B"));
        assert!(!g.has_citation("B", "A"));
    }
}
