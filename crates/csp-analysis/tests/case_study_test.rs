//! Case-study bundle for one topic.

use csp_analysis::survey::{CalibrationTable, SurveyAggregator};
use csp_analysis::gather_case_study;
use csp_core::types::{LabelMethod, Paper, PaperLabel, SurveyResponse, TopicEntry};
use csp_core::CspConfig;

fn corpus() -> (Vec<Paper>, Vec<PaperLabel>) {
    let papers = vec![
        Paper::new("P1", "Scaling interpretability to frontier models").citing(["P2", "P4", "P5"]),
        Paper::new("P2", "Circuits")
            .with_abstract("Mechanistic Interpretability of attention heads"),
        Paper::new("P3", "Robot grasping").citing(["P1"]),
        Paper::new("P4", "An interpretability benchmark"),
        Paper::new("P5", "Interpretability survey").with_year(2023),
    ];
    let labels = vec![
        PaperLabel::new("P1", "capability_use", LabelMethod::Llm),
        PaperLabel::new("P2", "safety_use", LabelMethod::Human),
        PaperLabel::new("P3", "capability_use", LabelMethod::Rules),
        PaperLabel::new("P4", "mixed", LabelMethod::Rules),
        PaperLabel::new("P5", "mixed", LabelMethod::Rules),
    ];
    (papers, labels)
}

#[test]
fn test_case_study_bundle() {
    let (papers, labels) = corpus();
    let responses = vec![SurveyResponse::new("r1", "e1")
        .with_entry(TopicEntry::new("interpretability").with_dimension("d1", 2.0, 0.0))];
    let config = CspConfig::default();
    let agg = SurveyAggregator::new(&responses, CalibrationTable::new(), &config.aggregation);

    let data = gather_case_study("Interpretability", &papers, &labels, &agg, &config);

    assert_eq!(data.paper_count, 4);
    assert!(data.papers.iter().all(|p| p.paper_id != "P3"));
    assert_eq!(data.labels.len(), 4);

    // Survey topics match exactly, so the capitalised topic has no survey data.
    assert!(data.survey_stats.is_empty());
    assert_eq!(data.assessment.rank, 1);
    assert_eq!(data.assessment.risk_reward_ratio, 50.0);

    assert_eq!(data.graph_stats.node_count, 4);
    assert_eq!(data.graph_stats.edge_count, 3);
    assert_eq!(data.graph_stats.spillover_score, 0.333);
    assert_eq!(data.graph_stats.diffusion_flow["capability_use"]["mixed"], 2);
}

#[test]
fn test_case_study_uses_survey_for_exact_topic() {
    let (papers, labels) = corpus();
    let responses = vec![SurveyResponse::new("r1", "e1")
        .with_entry(TopicEntry::new("interpretability").with_dimension("d1", 2.0, 0.0))];
    let config = CspConfig::default();
    let agg = SurveyAggregator::new(&responses, CalibrationTable::new(), &config.aggregation);

    let data = gather_case_study("interpretability", &papers, &labels, &agg, &config);
    assert_eq!(data.survey_stats["d1"].mean, 2.0);
    assert_eq!(data.assessment.csp_score, 2.0);
    assert_eq!(data.assessment.safety_benefit, 3.0);
    assert_eq!(data.assessment.risk_reward_ratio, 1.5);

    let json = serde_json::to_value(&data).unwrap();
    assert_eq!(json["graph_stats"]["node_count"], 4);
}
