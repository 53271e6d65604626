//! Projection boundary and monotonicity checks

use std::collections::BTreeSet;

use super::fixtures::synthetic;
use crate::config::PolicyConfig;
use crate::error::ParameterError;
use crate::projection::{
    Baselines, Intervention, ScenarioParams, benefits_projection, combine_interventions,
    intervention_projection, project_roi, roi_projection,
};

#[test]
fn test_roi_non_decreasing_in_participation() {
    let policy = PolicyConfig::default();
    let baselines = Baselines::from_dataset(&synthetic(400, 13), &policy);

    let mut previous = f64::NEG_INFINITY;
    for participation_pct in (10..=100).map(f64::from) {
        let params = ScenarioParams {
            participation_pct,
            ..Default::default()
        };
        let roi = roi_projection(&params, &baselines, &policy).unwrap().roi;
        assert!(roi >= previous, "roi dropped at {participation_pct}%");
        previous = roi;
    }
}

#[test]
fn test_zero_cost_guard_without_fault() {
    for cost_basis in [0.0, -0.0, -10.0] {
        assert_eq!(
            project_roi(50_000.0, 0.42, 0.65, cost_basis),
            Err(ParameterError::ZeroCostBasis)
        );
    }
}

#[test]
fn test_every_model_rejects_invalid_params() {
    let policy = PolicyConfig::default();
    let baselines = Baselines::from_dataset(&synthetic(50, 2), &policy);
    let params = ScenarioParams {
        participation_pct: 5.0,
        ..Default::default()
    };

    assert!(roi_projection(&params, &baselines, &policy).is_err());
    assert!(benefits_projection(&params, &baselines, &policy).is_err());
    assert!(intervention_projection(&params, &baselines, &policy).is_err());
}

#[test]
fn test_invalid_policy_is_rejected() {
    let policy = PolicyConfig {
        effectiveness: -0.1,
        ..Default::default()
    };
    let baselines = Baselines::from_dataset(&synthetic(50, 2), &PolicyConfig::default());
    assert!(matches!(
        roi_projection(&ScenarioParams::default(), &baselines, &policy),
        Err(ParameterError::InvalidPolicy { .. })
    ));
}

#[test]
fn test_all_interventions_through_params() {
    let policy = PolicyConfig::default();
    let baselines = Baselines::from_dataset(&synthetic(100, 4), &policy);
    let params = ScenarioParams {
        interventions: Intervention::ALL.into_iter().collect::<BTreeSet<_>>(),
        headcount: 10,
        ..Default::default()
    };

    let projection = intervention_projection(&params, &baselines, &policy).unwrap();
    let expected = combine_interventions(Intervention::ALL);
    assert_eq!(projection.combined, expected);
    assert_eq!(projection.implementation_cost, 19_500.0);
    assert_eq!(projection.baseline_treatment_rate, baselines.treatment_rate);
}
