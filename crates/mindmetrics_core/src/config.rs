//! Policy constants for the projection models
//!
//! The effectiveness factor, loss rates and gain multipliers are presented by
//! the dashboard as "empirical". They are not derived from the survey data and
//! nothing here tries to calibrate them; they are plain configuration with
//! documented defaults.

use serde::{Deserialize, Serialize};

use crate::error::ParameterError;
use crate::risk::DEFAULT_HIGH_RISK_THRESHOLD;
use crate::scales::CategoryScale;

fn default_effectiveness() -> f64 {
    0.42
}

fn default_high_risk_threshold() -> f64 {
    DEFAULT_HIGH_RISK_THRESHOLD
}

fn default_interference_reduction_factor() -> f64 {
    0.6
}

fn default_productivity_factor() -> f64 {
    0.15
}

fn default_retention_factor() -> f64 {
    0.1
}

fn default_retention_multiplier() -> f64 {
    2.0
}

fn default_recommended_budget_share() -> f64 {
    0.03
}

/// Tunable constants shared by the projection models.
///
/// Every field has a default, so a partial YAML `policy:` section only needs
/// to name what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Fractional loss reduction of a fully-attended program
    #[serde(default = "default_effectiveness")]
    pub effectiveness: f64,

    /// Composite scores above this are high risk
    #[serde(default = "default_high_risk_threshold")]
    pub high_risk_threshold: f64,

    /// Interference reduction per unit of treatment-rate increase
    #[serde(default = "default_interference_reduction_factor")]
    pub interference_reduction_factor: f64,

    /// Share of salary recovered per unit of intervention effect
    #[serde(default = "default_productivity_factor")]
    pub productivity_factor: f64,

    /// Turnover reduction per unit of intervention effect
    #[serde(default = "default_retention_factor")]
    pub retention_factor: f64,

    /// Replacement cost of a departing employee, in salaries
    #[serde(default = "default_retention_multiplier")]
    pub retention_multiplier: f64,

    /// Suggested program budget as a share of salary
    #[serde(default = "default_recommended_budget_share")]
    pub recommended_budget_share: f64,

    /// Loss rates used by the ROI model
    #[serde(default = "CategoryScale::productivity_loss")]
    pub productivity_loss: CategoryScale,

    /// Loss rates used by the benefits comparison
    #[serde(default = "CategoryScale::interference_cost")]
    pub interference_cost: CategoryScale,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            effectiveness: default_effectiveness(),
            high_risk_threshold: default_high_risk_threshold(),
            interference_reduction_factor: default_interference_reduction_factor(),
            productivity_factor: default_productivity_factor(),
            retention_factor: default_retention_factor(),
            retention_multiplier: default_retention_multiplier(),
            recommended_budget_share: default_recommended_budget_share(),
            productivity_loss: CategoryScale::productivity_loss(),
            interference_cost: CategoryScale::interference_cost(),
        }
    }
}

impl PolicyConfig {
    /// Reject non-finite constants and fractions outside [0, 1]
    pub fn validate(&self) -> Result<(), ParameterError> {
        let fractions = [
            ("effectiveness", self.effectiveness),
            ("high_risk_threshold", self.high_risk_threshold),
            (
                "interference_reduction_factor",
                self.interference_reduction_factor,
            ),
            ("productivity_factor", self.productivity_factor),
            ("retention_factor", self.retention_factor),
            ("recommended_budget_share", self.recommended_budget_share),
        ];
        for (constant, value) in fractions {
            if !value.is_finite() {
                return Err(ParameterError::InvalidPolicy {
                    constant,
                    value,
                    reason: "must be finite",
                });
            }
            if !(0.0..=1.0).contains(&value) {
                return Err(ParameterError::InvalidPolicy {
                    constant,
                    value,
                    reason: "must lie in [0, 1]",
                });
            }
        }

        if !self.retention_multiplier.is_finite() || self.retention_multiplier < 0.0 {
            return Err(ParameterError::InvalidPolicy {
                constant: "retention_multiplier",
                value: self.retention_multiplier,
                reason: "must be a non-negative number",
            });
        }

        for (constant, scale) in [
            ("productivity_loss", &self.productivity_loss),
            ("interference_cost", &self.interference_cost),
        ] {
            if let Some(entry) = scale
                .entries
                .iter()
                .find(|e| !(0.0..=1.0).contains(&e.value))
            {
                return Err(ParameterError::InvalidPolicy {
                    constant,
                    value: entry.value,
                    reason: "loss rates must lie in [0, 1]",
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(PolicyConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_out_of_range_effectiveness() {
        let policy = PolicyConfig {
            effectiveness: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            policy.validate(),
            Err(ParameterError::InvalidPolicy {
                constant: "effectiveness",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_nan() {
        let policy = PolicyConfig {
            productivity_factor: f64::NAN,
            ..Default::default()
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_loss_rate() {
        let mut policy = PolicyConfig::default();
        policy.productivity_loss.entries[3].value = 25.0;
        assert!(matches!(
            policy.validate(),
            Err(ParameterError::InvalidPolicy {
                constant: "productivity_loss",
                ..
            })
        ));
    }
}
