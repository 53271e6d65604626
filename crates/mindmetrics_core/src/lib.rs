//! Workplace mental-health survey metrics engine
//!
//! This crate turns a normalized survey table (2014 and 2016 vintages) into the
//! derived numbers a dashboard renders. It supports:
//! - Year-over-year aggregate rates (treatment seeking, workplace support)
//! - Category x category cross-tabulations with fixed axis orderings
//! - Ordinal/one-hot encoding and Pearson correlation matrices
//! - Weighted composite risk scores per respondent
//! - Scenario projections (benefits comparison, program ROI, interventions)
//!
//! Every computation is a pure function of a [`Dataset`] plus, for projections,
//! a validated [`ScenarioParams`] and [`PolicyConfig`].
//!
//! ```ignore
//! use mindmetrics_core::{Dataset, rates, projection, PolicyConfig, ScenarioParams};
//!
//! let dataset = Dataset::new(records)?;
//! let trend = rates::treatment_rate_by_year(&dataset);
//!
//! let policy = PolicyConfig::default();
//! let baselines = projection::Baselines::from_dataset(&dataset, &policy);
//! let roi = projection::roi_projection(&ScenarioParams::default(), &baselines, &policy)?;
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod cache;
pub mod correlation;
pub mod crosstab;
pub mod error;
pub mod projection;
pub mod rates;
pub mod risk;
pub mod scales;
pub mod stats;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use cache::CorrelationCache;
pub use config::PolicyConfig;
pub use error::{DatasetError, ParameterError};
pub use model::{CompanySize, Dataset, Field, Interference, SurveyRecord, SurveyYear};
pub use projection::{Intervention, ScenarioParams};
