//! Citation graph engine: construction, communities, diffusion between
//! intent categories, spillover and centrality.
//!
//! Independent of the survey pipeline; the two only meet in
//! [`crate::case_study`].

pub mod centrality;
pub mod citation_graph;
pub mod communities;
pub mod diffusion;
pub mod report;

pub use centrality::compute_centrality;
pub use citation_graph::{build_graph, CitationGraph, PaperNode};
pub use communities::{detect_communities, CommunityAssignment};
pub use diffusion::{compute_diffusion_flow, compute_spillover_score, DiffusionFlow};
pub use report::{analyze_citations, CitationReport};
