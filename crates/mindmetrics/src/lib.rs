//! Command-line front end for the mindmetrics engine
//!
//! Loads a survey dataset (JSON) and an optional scenario file (YAML), runs
//! the metrics for the requested dashboard page and prints the result.

pub mod format;
pub mod loader;
pub mod logging;
pub mod report;

#[cfg(test)]
mod tests;

pub use loader::{LoadError, ScenarioFile, ScenarioOverrides, load_dataset, load_scenario};
pub use logging::init_logging;
pub use report::{OutputFormat, Page, Report};
