//! Property-based tests for the numeric invariants of the engine.
//!
//!   - agreement statistics are symmetric and bounded
//!   - credible interval bounds are sample members
//!   - ranks are dense and follow the ratio order
//!   - spillover and calibration weights stay in [0, 1]

use std::collections::BTreeMap;

use proptest::prelude::*;

use csp_analysis::graph::{compute_spillover_score, DiffusionFlow};
use csp_analysis::rubric::{cohens_kappa, percent_agreement};
use csp_analysis::stats::credible_interval;
use csp_analysis::survey::{brier_score, calibration_weight, rank_assessments, TopicAssessment};

fn assessment(topic: String, ratio: f64) -> TopicAssessment {
    TopicAssessment {
        topic,
        csp_score: 1.0,
        csp_uncertainty: 0.0,
        safety_benefit: ratio,
        safety_benefit_uncertainty: 0.0,
        risk_reward_ratio: ratio,
        rank: 0,
    }
}

proptest! {
    #[test]
    fn prop_agreement_symmetric(pairs in prop::collection::vec((0u8..4, 0u8..4), 1..60)) {
        let (a, b): (Vec<u8>, Vec<u8>) = pairs.into_iter().unzip();
        let ab = percent_agreement(&a, &b).unwrap();
        let ba = percent_agreement(&b, &a).unwrap();
        prop_assert_eq!(ab, ba);
        prop_assert!((0.0..=1.0).contains(&ab));
        prop_assert_eq!(ab == 1.0, a == b);

        let k_ab = cohens_kappa(&a, &b).unwrap();
        let k_ba = cohens_kappa(&b, &a).unwrap();
        prop_assert!((k_ab - k_ba).abs() < 1e-12);
        prop_assert!(k_ab <= 1.0 + 1e-12);
    }

    #[test]
    fn prop_credible_bounds_are_members(
        cents in prop::collection::vec(0u32..=500, 1..80),
        level in 0.5f64..0.99,
    ) {
        let values: Vec<f64> = cents.iter().map(|&c| c as f64 / 100.0).collect();
        let (lo, hi) = credible_interval(&values, level);
        prop_assert!(lo <= hi);
        prop_assert!(values.contains(&lo), "lower {} not in sample", lo);
        prop_assert!(values.contains(&hi), "upper {} not in sample", hi);
    }

    #[test]
    fn prop_ranks_dense_and_ordered(ratios in prop::collection::vec(0.0f64..60.0, 0..40)) {
        let mut v: Vec<TopicAssessment> = ratios
            .iter()
            .enumerate()
            .map(|(i, &r)| assessment(format!("t{i}"), r))
            .collect();
        rank_assessments(&mut v);

        let ranks: Vec<usize> = v.iter().map(|a| a.rank).collect();
        let expected: Vec<usize> = (1..=v.len()).collect();
        prop_assert_eq!(ranks, expected);
        for w in v.windows(2) {
            prop_assert!(w[0].risk_reward_ratio >= w[1].risk_reward_ratio);
        }
    }

    #[test]
    fn prop_spillover_bounded(
        row in prop::collection::btree_map("[a-z_]{1,16}", 0u64..50, 0..6),
        safety in 0u64..50,
    ) {
        let mut cap: BTreeMap<String, u64> = row;
        cap.insert("safety_use".to_string(), safety);
        let mut flow = DiffusionFlow::new();
        flow.insert("capability_use".to_string(), cap);

        let s = compute_spillover_score(&flow);
        prop_assert!((0.0..=1.0).contains(&s));
    }

    #[test]
    fn prop_weight_bounded(pairs in prop::collection::vec((0.0f64..=1.0, 0.0f64..=1.0), 0..30)) {
        let brier = brier_score(&pairs);
        prop_assert!((0.0..=1.0).contains(&brier));
        let w = calibration_weight(brier);
        prop_assert!((0.0..=1.0).contains(&w));
        prop_assert!((w + brier - 1.0).abs() < 1e-12);
    }
}
