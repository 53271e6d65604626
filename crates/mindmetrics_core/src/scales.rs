//! Categorical -> numeric mapping tables.
//!
//! Every label-to-number conversion in the engine goes through a
//! [`CategoryScale`]: a named, versioned, total function over labels. Labels
//! absent from the table (and missing answers) map to the scale's fallback.
//! The correlation builder and the risk scorer share these tables, so a
//! label always means the same number wherever it is used.

use serde::{Deserialize, Serialize};

/// One `label -> value` pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleEntry {
    pub label: String,
    pub value: f64,
}

/// A finite, total mapping from category labels to numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScale {
    pub name: String,
    /// Bumped whenever an entry or the fallback changes
    pub version: u32,
    pub entries: Vec<ScaleEntry>,
    /// Image of every unmapped or missing label
    pub fallback: f64,
}

impl CategoryScale {
    pub fn new(name: &str, version: u32, entries: &[(&str, f64)], fallback: f64) -> Self {
        Self {
            name: name.to_string(),
            version,
            entries: entries
                .iter()
                .map(|(label, value)| ScaleEntry {
                    label: (*label).to_string(),
                    value: *value,
                })
                .collect(),
            fallback,
        }
    }

    /// Value for a label that appears in the table; `None` otherwise
    #[must_use]
    pub fn lookup(&self, label: Option<&str>) -> Option<f64> {
        let label = label?;
        self.entries
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.value)
    }

    /// Total mapping: unmapped or missing labels yield the fallback
    #[must_use]
    pub fn map(&self, label: Option<&str>) -> f64 {
        self.lookup(label).unwrap_or(self.fallback)
    }

    /// Largest value in the table (the fallback excluded)
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.entries
            .iter()
            .map(|entry| entry.value)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// `work_interfere` ordinal: Never 0 .. Often 3, unmapped 0
    #[must_use]
    pub fn work_interference() -> Self {
        Self::new(
            "work_interference_ordinal",
            1,
            &[("Never", 0.0), ("Rarely", 1.0), ("Sometimes", 2.0), ("Often", 3.0)],
            0.0,
        )
    }

    /// `leave` ordinal: Very easy 0 .. Very difficult 4, unmapped as "Don't know"
    #[must_use]
    pub fn leave_difficulty() -> Self {
        Self::new(
            "leave_difficulty_ordinal",
            1,
            &[
                ("Very easy", 0.0),
                ("Somewhat easy", 1.0),
                ("Don't know", 2.0),
                ("Somewhat difficult", 3.0),
                ("Very difficult", 4.0),
            ],
            2.0,
        )
    }

    /// Shared risk scale used by the composite risk score
    #[must_use]
    pub fn risk() -> Self {
        Self::new(
            "risk",
            1,
            &[
                ("Yes", 1.0),
                ("No", 0.0),
                ("Sometimes", 0.5),
                ("Often", 1.0),
                ("Rarely", 0.25),
                ("Very difficult", 1.0),
                ("Somewhat difficult", 0.6),
            ],
            0.0,
        )
    }

    /// Share of salary lost to interference, used by the benefits comparison
    #[must_use]
    pub fn interference_cost() -> Self {
        Self::new(
            "interference_cost",
            1,
            &[("Never", 0.0), ("Rarely", 0.05), ("Sometimes", 0.15), ("Often", 0.30)],
            0.0,
        )
    }

    /// Productivity loss rate (fraction of salary) used by the ROI model
    #[must_use]
    pub fn productivity_loss() -> Self {
        Self::new(
            "productivity_loss",
            1,
            &[("Never", 0.0), ("Rarely", 0.03), ("Sometimes", 0.12), ("Often", 0.25)],
            0.0,
        )
    }
}
