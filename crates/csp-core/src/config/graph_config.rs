//! Citation graph configuration.

use serde::{Deserialize, Serialize};

/// Community detection algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommunityMethod {
    /// Clauset-Newman-Moore greedy modularity maximisation.
    #[default]
    GreedyModularity,
    /// Weakly connected components.
    ConnectedComponents,
}

impl CommunityMethod {
    pub fn parse_name(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "greedy_modularity" | "modularity" => Some(Self::GreedyModularity),
            "connected_components" | "components" => Some(Self::ConnectedComponents),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::GreedyModularity => "greedy_modularity",
            Self::ConnectedComponents => "connected_components",
        }
    }
}

/// Configuration for the citation graph engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GraphConfig {
    /// Preferred community algorithm. Default: greedy modularity.
    pub community_method: Option<CommunityMethod>,
    /// Graphs with more nodes than this skip modularity and use components. Default: 20000.
    pub modularity_max_nodes: Option<usize>,
    /// PageRank damping factor. Default: 0.85.
    pub pagerank_damping: Option<f64>,
    /// PageRank per-node convergence tolerance. Default: 1e-6.
    pub pagerank_tolerance: Option<f64>,
    /// PageRank iteration cap. Default: 100.
    pub pagerank_max_iterations: Option<usize>,
}

impl GraphConfig {
    pub fn effective_community_method(&self) -> CommunityMethod {
        self.community_method.unwrap_or_default()
    }

    pub fn effective_modularity_max_nodes(&self) -> usize {
        self.modularity_max_nodes.unwrap_or(20_000)
    }

    pub fn effective_pagerank_damping(&self) -> f64 {
        self.pagerank_damping.unwrap_or(0.85)
    }

    pub fn effective_pagerank_tolerance(&self) -> f64 {
        self.pagerank_tolerance.unwrap_or(1e-6)
    }

    pub fn effective_pagerank_max_iterations(&self) -> usize {
        self.pagerank_max_iterations.unwrap_or(100)
    }
}
