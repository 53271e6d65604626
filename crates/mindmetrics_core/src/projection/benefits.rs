use serde::{Deserialize, Serialize};

use super::{Baselines, ScenarioParams};
use crate::config::PolicyConfig;
use crate::error::Result;

/// Savings implied by the loss gap between employees with and without
/// mental health benefits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenefitsProjection {
    pub loss_rate_with_benefits: f64,
    pub loss_rate_without_benefits: f64,
    pub savings_per_employee: f64,
    pub total_savings: f64,
    /// Benchmark budget: a fixed share of salary
    pub recommended_budget_per_employee: f64,
}

pub fn benefits_projection(
    params: &ScenarioParams,
    baselines: &Baselines,
    policy: &PolicyConfig,
) -> Result<BenefitsProjection> {
    params.validate()?;
    policy.validate()?;

    let gap = baselines.loss_rate_without_benefits - baselines.loss_rate_with_benefits;
    let savings_per_employee = gap * params.avg_salary;

    Ok(BenefitsProjection {
        loss_rate_with_benefits: baselines.loss_rate_with_benefits,
        loss_rate_without_benefits: baselines.loss_rate_without_benefits,
        savings_per_employee,
        total_savings: savings_per_employee * f64::from(params.headcount),
        recommended_budget_per_employee: params.avg_salary * policy.recommended_budget_share,
    })
}
