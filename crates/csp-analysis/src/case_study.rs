//! Case-study bundle: the papers, labels, survey statistics, forecast and
//! citation diffusion for one topic, gathered for the reporting layer.

use csp_core::types::collections::FxHashSet;
use csp_core::types::{Paper, PaperLabel};
use csp_core::CspConfig;
use serde::Serialize;

use crate::graph::{build_graph, compute_diffusion_flow, compute_spillover_score, DiffusionFlow};
use crate::labels::{label_map_from_records, normalize_labels};
use crate::stats::round_to;
use crate::survey::aggregation::{DimensionStats, SurveyAggregator};
use crate::survey::forecasting::{assess_topic, TopicAssessment};

/// Citation statistics over the topic's papers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    /// Rounded to three decimals.
    pub spillover_score: f64,
    pub diffusion_flow: DiffusionFlow,
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseStudyData {
    pub topic: String,
    pub paper_count: usize,
    pub papers: Vec<Paper>,
    pub labels: Vec<PaperLabel>,
    pub survey_stats: DimensionStats,
    pub assessment: TopicAssessment,
    pub graph_stats: GraphStats,
}

/// Gather everything known about `topic`.
///
/// Papers are selected by case-insensitive substring match of the topic in
/// title plus abstract. The graph only covers the selected papers and the
/// papers they cite.
pub fn gather_case_study(
    topic: &str,
    papers: &[Paper],
    labels: &[PaperLabel],
    aggregator: &SurveyAggregator<'_>,
    config: &CspConfig,
) -> CaseStudyData {
    let needle = topic.to_lowercase();
    let topic_papers: Vec<Paper> = papers
        .iter()
        .filter(|p| p.searchable_text().contains(&needle))
        .cloned()
        .collect();

    let selected: FxHashSet<&str> = topic_papers.iter().map(|p| p.paper_id.as_str()).collect();
    let topic_labels: Vec<PaperLabel> = labels
        .iter()
        .filter(|l| selected.contains(l.paper_id.as_str()))
        .cloned()
        .collect();

    let survey_stats = aggregator.aggregate(topic);
    let mut assessment = assess_topic(topic, &survey_stats, None, &config.forecast);
    assessment.rank = 1;

    let graph = build_graph(&topic_papers);
    let label_map = normalize_labels(&label_map_from_records(&topic_labels), &config.labels).labels;
    let diffusion_flow = compute_diffusion_flow(&graph, &label_map);
    let spillover = compute_spillover_score(&diffusion_flow);

    let graph_stats = GraphStats {
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        spillover_score: round_to(spillover, 3),
        diffusion_flow,
    };

    tracing::info!(
        topic,
        papers = topic_papers.len(),
        labels = topic_labels.len(),
        dimensions = survey_stats.len(),
        "case study gathered"
    );

    CaseStudyData {
        topic: topic.to_string(),
        paper_count: topic_papers.len(),
        papers: topic_papers,
        labels: topic_labels,
        survey_stats,
        assessment,
        graph_stats,
    }
}
