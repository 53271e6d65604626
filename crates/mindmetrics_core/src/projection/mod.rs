//! Scenario projections.
//!
//! Three independent models share one parameter boundary:
//! - **Benefits comparison**: loss among employees without benefits minus loss
//!   among those with benefits, scaled by salary and headcount
//! - **Effectiveness / ROI**: baseline loss reduced by
//!   `effectiveness * participation`, compared against program cost
//! - **Intervention combiner**: fixed cost and effect range per intervention,
//!   added together
//!
//! Every public entry point validates [`ScenarioParams`] and the
//! [`crate::PolicyConfig`] before computing and returns
//! [`crate::ParameterError`] instead of producing nonsensical numbers.
//! The arithmetic itself lives in small total functions that the entry points
//! call once inputs are known to be valid.

mod baseline;
mod benefits;
mod interventions;
mod params;
mod roi;

pub use baseline::{Baselines, SegmentLossRate};
pub use benefits::{BenefitsProjection, benefits_projection};
pub use interventions::{
    CombinedIntervention, EffectRange, Intervention, InterventionProjection,
    combine_interventions, intervention_projection,
};
pub use params::{
    HEADCOUNT_RANGE, PARTICIPATION_RANGE, PROGRAM_COST_RANGE, ParamRange, SALARY_RANGE,
    ScenarioParams,
};
pub use roi::{RoiOutcome, RoiProjection, SegmentSavings, project_roi, roi_projection};
