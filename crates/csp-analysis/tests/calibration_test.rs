//! Calibration engine: Brier scoring, neutral defaults and write-back.

use csp_analysis::survey::{
    apply_calibration, brier_score, calibration_weight, CalibrationEngine, CalibrationTable,
};
use csp_core::config::{CalibrationConfig, OutcomeMode};
use csp_core::types::{CalibrationQuestion, CalibrationResponse, SurveyResponse, TopicEntry};

fn question(id: &str, answer: f64) -> CalibrationQuestion {
    CalibrationQuestion {
        question_id: id.to_string(),
        question_text: format!("question {id}"),
        true_answer: answer,
        category: "forecasting".to_string(),
    }
}

fn fixtures() -> (Vec<CalibrationQuestion>, Vec<CalibrationResponse>) {
    let questions = vec![question("q1", 1.0), question("q2", 0.0), question("q3", 0.7)];
    let responses = vec![
        CalibrationResponse::new("e1", "q1", 0.9),
        CalibrationResponse::new("e1", "q2", 0.1),
        CalibrationResponse::new("e2", "q_unknown", 0.4),
        CalibrationResponse::new("e3", "q3", 0.6),
    ];
    (questions, responses)
}

#[test]
fn test_brier_reference_values() {
    assert_eq!(brier_score(&[(1.0, 1.0), (0.0, 0.0), (1.0, 1.0)]), 0.0);
    assert_eq!(brier_score(&[(0.0, 1.0), (1.0, 0.0)]), 1.0);
    let chance = brier_score(&[(0.5, 1.0), (0.5, 0.0)]);
    assert!((0.2..=0.3).contains(&chance));
    assert_eq!(brier_score(&[]), 1.0);
}

#[test]
fn test_weight_reference_values() {
    assert_eq!(calibration_weight(0.0), 1.0);
    assert_eq!(calibration_weight(0.25), 0.75);
    assert_eq!(calibration_weight(1.0), 0.0);
    assert_eq!(calibration_weight(1.4), 0.0);
}

#[test]
fn test_calibrate_joins_questions() {
    let (questions, responses) = fixtures();
    let engine = CalibrationEngine::new(&questions, &responses, &CalibrationConfig::default());

    let r = engine.calibrate_respondent("e1");
    assert!(!r.is_default);
    assert_eq!(r.matched_questions, 2);
    assert!((r.brier - 0.01).abs() < 1e-12);
    assert!((r.weight - 0.99).abs() < 1e-12);
}

#[test]
fn test_unknown_questions_and_no_history_get_neutral_default() {
    let (questions, responses) = fixtures();
    let engine = CalibrationEngine::new(&questions, &responses, &CalibrationConfig::default());

    for respondent in ["e2", "nobody"] {
        let r = engine.calibrate_respondent(respondent);
        assert!(r.is_default, "{respondent} should use the neutral default");
        assert_eq!((r.brier, r.weight), (0.25, 0.75));
    }
}

#[test]
fn test_graded_answer_used_directly_by_default() {
    let (questions, responses) = fixtures();
    let engine = CalibrationEngine::new(&questions, &responses, &CalibrationConfig::default());
    // (0.6 - 0.7)^2
    let r = engine.calibrate_respondent("e3");
    assert!((r.brier - 0.01).abs() < 1e-9);
}

#[test]
fn test_binary_mode_thresholds_outcome() {
    let (questions, responses) = fixtures();
    let config = CalibrationConfig {
        outcome_mode: Some(OutcomeMode::Binary),
        ..Default::default()
    };
    let engine = CalibrationEngine::new(&questions, &responses, &config);
    // 0.7 counts as the event happening: (0.6 - 1.0)^2
    let r = engine.calibrate_respondent("e3");
    assert!((r.brier - 0.16).abs() < 1e-9);
}

#[test]
fn test_recalibration_overwrites_every_response_of_respondent() {
    let (questions, responses) = fixtures();
    let engine = CalibrationEngine::new(&questions, &responses, &CalibrationConfig::default());

    let mut survey = vec![
        SurveyResponse::new("r1", "e1").with_entry(TopicEntry::new("t")),
        SurveyResponse::new("r2", "e1").with_entry(TopicEntry::new("u")),
        SurveyResponse::new("r3", "e2"),
    ];
    survey[0].calibration_score = Some(0.1);

    engine.recalibrate_respondent(&mut survey, "e1");
    let first: Vec<Option<f64>> = survey.iter().map(|r| r.calibration_score).collect();
    engine.recalibrate_respondent(&mut survey, "e1");
    let second: Vec<Option<f64>> = survey.iter().map(|r| r.calibration_score).collect();

    assert_eq!(first, second);
    assert!((survey[0].calibration_score.unwrap() - 0.99).abs() < 1e-12);
    assert_eq!(survey[0].calibration_score, survey[1].calibration_score);
    assert_eq!(survey[2].calibration_score, None);
}

#[test]
fn test_table_for_and_apply() {
    let (questions, responses) = fixtures();
    let engine = CalibrationEngine::new(&questions, &responses, &CalibrationConfig::default());

    let mut survey = vec![
        SurveyResponse::new("r1", "e1"),
        SurveyResponse::new("r2", "e2"),
        SurveyResponse::new("r3", "e1"),
    ];
    let table = engine.table_for(&survey);
    assert_eq!(table.len(), 2);
    assert_eq!(table.weight("e2"), Some(0.75));

    assert_eq!(apply_calibration(&mut survey, &table), 3);
    assert_eq!(survey[1].calibration_score, Some(0.75));

    let partial: CalibrationTable = [("e2".to_string(), 0.5)].into_iter().collect();
    assert_eq!(apply_calibration(&mut survey, &partial), 1);
    assert_eq!(survey[1].calibration_score, Some(0.5));
}
