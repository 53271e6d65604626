//! Workplace interventions and their combined effect.
//!
//! Each intervention has a fixed annual cost per employee and an effect range
//! (increase in treatment-seeking rate). Combining interventions simply adds
//! costs and adds effect ranges elementwise. This is a fixed policy table, not
//! a statistical model; real effects overlap and would not stack linearly.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Baselines, ScenarioParams};
use crate::config::PolicyConfig;
use crate::error::{ParameterError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Intervention {
    #[serde(rename = "Manager Training")]
    ManagerTraining,
    #[serde(rename = "Therapy Coverage")]
    TherapyCoverage,
    #[serde(rename = "Flexible Hours")]
    FlexibleHours,
    #[serde(rename = "Mental Health Days")]
    MentalHealthDays,
}

impl Intervention {
    pub const ALL: [Intervention; 4] = [
        Intervention::ManagerTraining,
        Intervention::TherapyCoverage,
        Intervention::FlexibleHours,
        Intervention::MentalHealthDays,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Intervention::ManagerTraining => "Manager Training",
            Intervention::TherapyCoverage => "Therapy Coverage",
            Intervention::FlexibleHours => "Flexible Hours",
            Intervention::MentalHealthDays => "Mental Health Days",
        }
    }

    /// Annual cost per employee, dollars
    #[must_use]
    pub fn cost(self) -> f64 {
        match self {
            Intervention::ManagerTraining => 500.0,
            Intervention::TherapyCoverage => 1_200.0,
            Intervention::FlexibleHours => 200.0,
            Intervention::MentalHealthDays => 50.0,
        }
    }

    #[must_use]
    pub fn effect(self) -> EffectRange {
        match self {
            Intervention::ManagerTraining => EffectRange::new(0.08, 0.15),
            Intervention::TherapyCoverage => EffectRange::new(0.12, 0.25),
            Intervention::FlexibleHours => EffectRange::new(0.05, 0.12),
            Intervention::MentalHealthDays => EffectRange::new(0.03, 0.08),
        }
    }
}

impl fmt::Display for Intervention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Intervention {
    type Err = ParameterError;

    /// Accepts the display name in any case, with spaces, dashes or underscores
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| if c == '-' || c == '_' { ' ' } else { c })
            .collect::<String>()
            .to_lowercase();

        Self::ALL
            .into_iter()
            .find(|i| i.name().to_lowercase() == normalized)
            .ok_or_else(|| ParameterError::UnknownIntervention(s.to_string()))
    }
}

/// `[min, max]` effect on the treatment-seeking rate
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EffectRange {
    pub min: f64,
    pub max: f64,
}

impl EffectRange {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    #[must_use]
    pub fn scale(&self, factor: f64) -> Self {
        Self::new(self.min * factor, self.max * factor)
    }
}

impl std::ops::Add for EffectRange {
    type Output = EffectRange;

    fn add(self, rhs: Self) -> Self::Output {
        EffectRange::new(self.min + rhs.min, self.max + rhs.max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedIntervention {
    pub selected: Vec<Intervention>,
    /// Per employee, dollars
    pub total_cost: f64,
    pub effect: EffectRange,
}

/// Add up costs and effect ranges of the selected interventions.
///
/// Duplicates count once. An empty selection costs nothing and has no effect.
#[must_use]
pub fn combine_interventions(
    selected: impl IntoIterator<Item = Intervention>,
) -> CombinedIntervention {
    let selected: Vec<Intervention> = selected
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let (total_cost, effect) = selected
        .iter()
        .fold((0.0, EffectRange::default()), |(cost, effect), i| {
            (cost + i.cost(), effect + i.effect())
        });

    CombinedIntervention {
        selected,
        total_cost,
        effect,
    }
}

/// Projected outcome of an intervention package for the scenario headcount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterventionProjection {
    pub combined: CombinedIntervention,
    pub baseline_treatment_rate: f64,
    pub baseline_high_interference_rate: f64,
    pub treatment_rate_increase: EffectRange,
    pub interference_reduction: EffectRange,
    pub productivity_gain: f64,
    pub retention_gain: f64,
    pub implementation_cost: f64,
    pub net_benefit: f64,
}

pub fn intervention_projection(
    params: &ScenarioParams,
    baselines: &Baselines,
    policy: &PolicyConfig,
) -> Result<InterventionProjection> {
    params.validate()?;
    policy.validate()?;

    let combined = combine_interventions(params.interventions.iter().copied());
    let employees = f64::from(params.headcount);
    let mid_effect = combined.effect.midpoint();

    let productivity_gain =
        mid_effect * policy.productivity_factor * params.avg_salary * employees;
    let retention_gain =
        mid_effect * policy.retention_factor * policy.retention_multiplier * params.avg_salary;
    let implementation_cost = combined.total_cost * employees;

    Ok(InterventionProjection {
        baseline_treatment_rate: baselines.treatment_rate,
        baseline_high_interference_rate: baselines.high_interference_rate,
        treatment_rate_increase: combined.effect,
        interference_reduction: combined.effect.scale(policy.interference_reduction_factor),
        productivity_gain,
        retention_gain,
        implementation_cost,
        net_benefit: productivity_gain + retention_gain - implementation_cost,
        combined,
    })
}
