use serde::{Deserialize, Serialize};

use super::{Baselines, ScenarioParams};
use crate::config::PolicyConfig;
use crate::error::{ParameterError, Result};
use crate::model::CompanySize;

/// Result of the effectiveness arithmetic
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiOutcome {
    pub adjusted_loss: f64,
    pub savings: f64,
    /// `(savings - cost_basis) / cost_basis`
    pub roi: f64,
}

/// Effectiveness model on raw numbers.
///
/// `participation` is a fraction and is clamped to [0, 1]. A cost basis that is
/// zero, negative or not finite is a precondition failure: ROI has no meaning
/// without a program to pay for.
pub fn project_roi(
    baseline_loss: f64,
    effectiveness: f64,
    participation: f64,
    cost_basis: f64,
) -> Result<RoiOutcome> {
    if !(cost_basis.is_finite() && cost_basis > 0.0) {
        return Err(ParameterError::ZeroCostBasis);
    }

    let participation = participation.clamp(0.0, 1.0);
    let adjusted_loss = baseline_loss * (1.0 - effectiveness * participation);
    let savings = baseline_loss - adjusted_loss;

    Ok(RoiOutcome {
        adjusted_loss,
        savings,
        roi: (savings - cost_basis) / cost_basis,
    })
}

/// Loss attributable to one company-size bucket, scaled to the headcount
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentSavings {
    pub company_size: CompanySize,
    pub savings_potential: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiProjection {
    pub baseline_loss: f64,
    pub adjusted_loss: f64,
    pub savings: f64,
    pub program_cost_total: f64,
    pub roi: f64,
    pub segments: Vec<SegmentSavings>,
}

pub fn roi_projection(
    params: &ScenarioParams,
    baselines: &Baselines,
    policy: &PolicyConfig,
) -> Result<RoiProjection> {
    params.validate()?;
    policy.validate()?;

    let headcount = f64::from(params.headcount);
    let baseline_loss = baselines.mean_loss_rate * params.avg_salary * headcount;
    let cost_basis = params.cost_basis();
    let outcome = project_roi(
        baseline_loss,
        policy.effectiveness,
        params.participation(),
        cost_basis,
    )?;

    let respondents = baselines.respondents.max(1) as f64;
    let segments = baselines
        .segment_loss_rates
        .iter()
        .map(|segment| SegmentSavings {
            company_size: segment.company_size,
            savings_potential: segment.mean_loss_rate * params.avg_salary * headcount
                / respondents,
        })
        .collect();

    tracing::debug!(
        baseline_loss,
        savings = outcome.savings,
        roi = outcome.roi,
        "roi projection"
    );

    Ok(RoiProjection {
        baseline_loss,
        adjusted_loss: outcome.adjusted_loss,
        savings: outcome.savings,
        program_cost_total: cost_basis,
        roi: outcome.roi,
        segments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::SegmentLossRate;

    #[test]
    fn test_zero_cost_basis_is_rejected() {
        assert_eq!(
            project_roi(1_000.0, 0.42, 0.5, 0.0),
            Err(ParameterError::ZeroCostBasis)
        );
        assert_eq!(
            project_roi(1_000.0, 0.42, 0.5, f64::NAN),
            Err(ParameterError::ZeroCostBasis)
        );
    }

    #[test]
    fn test_boundary_participation() {
        let none = project_roi(10_000.0, 0.42, 0.0, 1_000.0).unwrap();
        assert_eq!(none.savings, 0.0);
        assert_eq!(none.adjusted_loss, 10_000.0);
        assert_eq!(none.roi, -1.0);

        let full = project_roi(10_000.0, 0.42, 1.0, 1_000.0).unwrap();
        assert!((full.savings - 4_200.0).abs() < 1e-9);
        assert!((full.roi - 3.2).abs() < 1e-9);
    }

    #[test]
    fn test_projection_matches_hand_calculation() {
        let baselines = Baselines {
            respondents: 4,
            mean_loss_rate: 0.10,
            loss_rate_with_benefits: 0.0,
            loss_rate_without_benefits: 0.0,
            treatment_rate: 0.0,
            high_interference_rate: 0.0,
            segment_loss_rates: vec![SegmentLossRate {
                company_size: CompanySize::OneToFive,
                mean_loss_rate: 0.2,
            }],
        };
        let params = ScenarioParams {
            avg_salary: 100_000.0,
            program_cost: 1_000.0,
            headcount: 100,
            participation_pct: 50.0,
            ..Default::default()
        };

        let projection = roi_projection(&params, &baselines, &PolicyConfig::default()).unwrap();

        // 0.10 * 100k * 100 = 1M baseline; savings = 1M * 0.42 * 0.5
        assert!((projection.baseline_loss - 1_000_000.0).abs() < 1e-6);
        assert!((projection.savings - 210_000.0).abs() < 1e-6);
        assert!((projection.program_cost_total - 100_000.0).abs() < 1e-9);
        assert!((projection.roi - 1.1).abs() < 1e-9);
        assert!((projection.segments[0].savings_potential - 500_000.0).abs() < 1e-6);
    }
}
