use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::Intervention;
use crate::error::ParameterError;

/// Closed interval of accepted values for one parameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
}

impl ParamRange {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }

    fn check(&self, parameter: &'static str, value: f64) -> Result<(), ParameterError> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(ParameterError::OutOfRange {
                parameter,
                value,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Average annual salary, dollars
pub const SALARY_RANGE: ParamRange = ParamRange::new(50_000.0, 200_000.0);
/// Annual program cost per employee, dollars
pub const PROGRAM_COST_RANGE: ParamRange = ParamRange::new(100.0, 5_000.0);
/// Employees covered
pub const HEADCOUNT_RANGE: ParamRange = ParamRange::new(10.0, 50_000.0);
/// Program participation, percent
pub const PARTICIPATION_RANGE: ParamRange = ParamRange::new(10.0, 100.0);

fn default_salary() -> f64 {
    85_000.0
}

fn default_program_cost() -> f64 {
    1_200.0
}

fn default_headcount() -> u32 {
    250
}

fn default_participation() -> f64 {
    65.0
}

fn default_interventions() -> BTreeSet<Intervention> {
    BTreeSet::from([Intervention::ManagerTraining])
}

/// User-adjustable inputs to the projection models.
///
/// Never persisted by the engine; callers build a fresh value for every
/// projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioParams {
    #[serde(default = "default_salary")]
    pub avg_salary: f64,
    #[serde(default = "default_program_cost")]
    pub program_cost: f64,
    #[serde(default = "default_headcount")]
    pub headcount: u32,
    /// Percent, not fraction
    #[serde(default = "default_participation")]
    pub participation_pct: f64,
    #[serde(default = "default_interventions")]
    pub interventions: BTreeSet<Intervention>,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            avg_salary: default_salary(),
            program_cost: default_program_cost(),
            headcount: default_headcount(),
            participation_pct: default_participation(),
            interventions: default_interventions(),
        }
    }
}

impl ScenarioParams {
    /// Reject any parameter outside its declared range
    pub fn validate(&self) -> Result<(), ParameterError> {
        SALARY_RANGE.check("avg_salary", self.avg_salary)?;
        PROGRAM_COST_RANGE.check("program_cost", self.program_cost)?;
        HEADCOUNT_RANGE.check("headcount", f64::from(self.headcount))?;
        PARTICIPATION_RANGE.check("participation_pct", self.participation_pct)?;
        Ok(())
    }

    /// Participation as a fraction in [0, 1]
    #[must_use]
    pub fn participation(&self) -> f64 {
        self.participation_pct / 100.0
    }

    /// Total program spend: `program_cost * headcount`
    #[must_use]
    pub fn cost_basis(&self) -> f64 {
        self.program_cost * f64::from(self.headcount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(ScenarioParams::default().validate(), Ok(()));
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        let params = ScenarioParams {
            avg_salary: 200_000.0,
            program_cost: 100.0,
            headcount: 10,
            participation_pct: 100.0,
            ..Default::default()
        };
        assert_eq!(params.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_out_of_range() {
        let low_salary = ScenarioParams {
            avg_salary: 49_999.0,
            ..Default::default()
        };
        assert_eq!(
            low_salary.validate(),
            Err(ParameterError::OutOfRange {
                parameter: "avg_salary",
                value: 49_999.0,
                min: 50_000.0,
                max: 200_000.0,
            })
        );

        let zero_headcount = ScenarioParams {
            headcount: 0,
            ..Default::default()
        };
        assert!(matches!(
            zero_headcount.validate(),
            Err(ParameterError::OutOfRange {
                parameter: "headcount",
                ..
            })
        ));

        let nan_participation = ScenarioParams {
            participation_pct: f64::NAN,
            ..Default::default()
        };
        assert!(nan_participation.validate().is_err());
    }
}
