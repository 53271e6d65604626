//! Category x category counts.
//!
//! Axis orderings either come from a fixed list (company-size buckets,
//! interference levels, No/Yes) or, when none is given, from the labels
//! present in the data sorted lexicographically. Rows whose value on either
//! axis is missing or excluded are skipped.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::model::{CompanySize, Dataset, Field, Interference, TREATMENT_ORDER};

/// Ordering policy for one axis
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum AxisOrder {
    /// Labels present in the data, sorted
    #[default]
    Sorted,
    /// Exactly these labels, in this order; other labels are dropped
    Fixed(Vec<String>),
}

impl AxisOrder {
    #[must_use]
    pub fn fixed(labels: &[&str]) -> Self {
        AxisOrder::Fixed(labels.iter().map(|l| (*l).to_string()).collect())
    }

    #[must_use]
    pub fn company_size() -> Self {
        Self::fixed(&CompanySize::labels())
    }

    #[must_use]
    pub fn interference() -> Self {
        Self::fixed(&Interference::labels())
    }

    #[must_use]
    pub fn treatment() -> Self {
        Self::fixed(&TREATMENT_ORDER)
    }

    fn resolve<'a>(&self, observed: impl Iterator<Item = &'a str>) -> Vec<String> {
        match self {
            AxisOrder::Fixed(labels) => labels.clone(),
            AxisOrder::Sorted => observed
                .collect::<BTreeSet<_>>()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

/// What to tabulate and how to order it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossTabSpec {
    pub rows: Field,
    pub columns: Field,
    pub row_order: AxisOrder,
    pub column_order: AxisOrder,
    /// Labels dropped from both axes before counting
    pub exclude: Vec<String>,
}

impl CrossTabSpec {
    #[must_use]
    pub fn new(rows: Field, columns: Field) -> Self {
        Self {
            rows,
            columns,
            row_order: AxisOrder::Sorted,
            column_order: AxisOrder::Sorted,
            exclude: Vec::new(),
        }
    }

    #[must_use]
    pub fn row_order(mut self, order: AxisOrder) -> Self {
        self.row_order = order;
        self
    }

    #[must_use]
    pub fn column_order(mut self, order: AxisOrder) -> Self {
        self.column_order = order;
        self
    }

    #[must_use]
    pub fn exclude(mut self, label: &str) -> Self {
        self.exclude.push(label.to_string());
        self
    }

    fn admits(&self, label: &str) -> bool {
        !self.exclude.iter().any(|excluded| excluded == label)
    }
}

/// Counts indexed `[row][column]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossTab {
    pub row_field: Field,
    pub column_field: Field,
    pub row_labels: Vec<String>,
    pub column_labels: Vec<String>,
    pub counts: Vec<Vec<u64>>,
}

impl CrossTab {
    #[must_use]
    pub fn get(&self, row: &str, column: &str) -> Option<u64> {
        let r = self.row_labels.iter().position(|l| l == row)?;
        let c = self.column_labels.iter().position(|l| l == column)?;
        Some(self.counts[r][c])
    }

    #[must_use]
    pub fn row_totals(&self) -> Vec<u64> {
        self.counts.iter().map(|row| row.iter().sum()).collect()
    }

    #[must_use]
    pub fn column_totals(&self) -> Vec<u64> {
        (0..self.column_labels.len())
            .map(|c| self.counts.iter().map(|row| row[c]).sum())
            .collect()
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.row_totals().iter().sum()
    }
}

#[must_use]
pub fn cross_tab(dataset: &Dataset, spec: &CrossTabSpec) -> CrossTab {
    let pairs: Vec<(&str, &str)> = dataset
        .iter()
        .filter_map(|record| {
            let row = record.label(spec.rows)?;
            let column = record.label(spec.columns)?;
            (spec.admits(row) && spec.admits(column)).then_some((row, column))
        })
        .collect();

    let row_labels = spec.row_order.resolve(pairs.iter().map(|(r, _)| *r));
    let column_labels = spec.column_order.resolve(pairs.iter().map(|(_, c)| *c));

    let row_index: FxHashMap<&str, usize> = row_labels
        .iter()
        .enumerate()
        .map(|(i, l)| (l.as_str(), i))
        .collect();
    let column_index: FxHashMap<&str, usize> = column_labels
        .iter()
        .enumerate()
        .map(|(i, l)| (l.as_str(), i))
        .collect();

    let mut counts = vec![vec![0u64; column_labels.len()]; row_labels.len()];
    for (row, column) in pairs {
        if let (Some(&r), Some(&c)) = (row_index.get(row), column_index.get(column)) {
            counts[r][c] += 1;
        }
    }

    CrossTab {
        row_field: spec.rows,
        column_field: spec.columns,
        row_labels,
        column_labels,
        counts,
    }
}

/// One-way counts of a single field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub field: Field,
    pub labels: Vec<String>,
    pub counts: Vec<u64>,
}

impl Distribution {
    #[must_use]
    pub fn get(&self, label: &str) -> Option<u64> {
        let i = self.labels.iter().position(|l| l == label)?;
        Some(self.counts[i])
    }
}

#[must_use]
pub fn distribution(
    dataset: &Dataset,
    field: Field,
    order: &AxisOrder,
    exclude: &[&str],
) -> Distribution {
    let values: Vec<&str> = dataset
        .iter()
        .filter_map(|record| record.label(field))
        .filter(|label| !exclude.contains(label))
        .collect();

    let labels = order.resolve(values.iter().copied());
    let mut tally: FxHashMap<&str, u64> = FxHashMap::default();
    for value in values {
        *tally.entry(value).or_insert(0) += 1;
    }
    let counts = labels
        .iter()
        .map(|label| tally.get(label.as_str()).copied().unwrap_or(0))
        .collect();

    Distribution {
        field,
        labels,
        counts,
    }
}

// ============================================================================
// Named views
// ============================================================================

#[must_use]
pub fn treatment_by_gender(dataset: &Dataset) -> CrossTab {
    cross_tab(
        dataset,
        &CrossTabSpec::new(Field::Gender, Field::Treatment).column_order(AxisOrder::treatment()),
    )
}

#[must_use]
pub fn treatment_by_company_size(dataset: &Dataset) -> CrossTab {
    cross_tab(
        dataset,
        &CrossTabSpec::new(Field::NoEmployees, Field::Treatment)
            .row_order(AxisOrder::company_size())
            .column_order(AxisOrder::treatment()),
    )
}

#[must_use]
pub fn treatment_by_family_history(dataset: &Dataset) -> CrossTab {
    cross_tab(
        dataset,
        &CrossTabSpec::new(Field::FamilyHistory, Field::Treatment)
            .column_order(AxisOrder::treatment()),
    )
}

#[must_use]
pub fn interference_distribution(dataset: &Dataset) -> Distribution {
    distribution(
        dataset,
        Field::WorkInterfere,
        &AxisOrder::interference(),
        &[Interference::NOT_APPLICABLE],
    )
}

#[must_use]
pub fn interference_by_benefits(dataset: &Dataset) -> CrossTab {
    cross_tab(
        dataset,
        &CrossTabSpec::new(Field::Benefits, Field::WorkInterfere)
            .column_order(AxisOrder::interference())
            .exclude(Interference::NOT_APPLICABLE),
    )
}

#[must_use]
pub fn interference_by_company_size(dataset: &Dataset) -> CrossTab {
    cross_tab(
        dataset,
        &CrossTabSpec::new(Field::NoEmployees, Field::WorkInterfere)
            .row_order(AxisOrder::company_size())
            .column_order(AxisOrder::interference())
            .exclude(Interference::NOT_APPLICABLE),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SurveyRecord, SurveyYear};

    fn row(size: &str, interfere: &str, treated: bool) -> SurveyRecord {
        SurveyRecord::new(SurveyYear::Y2014)
            .with(Field::NoEmployees, size)
            .with(Field::WorkInterfere, interfere)
            .with_treatment(treated)
    }

    #[test]
    fn test_fixed_order_includes_empty_categories() {
        let data = Dataset::new(vec![
            row("More than 1000", "Often", true),
            row("1-5", "Never", false),
            row("1-5", "Rarely", true),
        ])
        .unwrap();

        let tab = treatment_by_company_size(&data);
        assert_eq!(tab.row_labels, CompanySize::labels().map(str::to_string));
        assert_eq!(tab.column_labels, vec!["No", "Yes"]);
        assert_eq!(tab.get("1-5", "No"), Some(1));
        assert_eq!(tab.get("1-5", "Yes"), Some(1));
        assert_eq!(tab.get("6-25", "Yes"), Some(0));
        assert_eq!(tab.get("More than 1000", "Yes"), Some(1));
        assert_eq!(tab.total(), 3);
    }

    #[test]
    fn test_interference_views_drop_not_applicable() {
        let data = Dataset::new(vec![
            row("1-5", "N/A", false),
            row("1-5", "Sometimes", false),
            row("6-25", "Sometimes", true),
        ])
        .unwrap();

        let dist = interference_distribution(&data);
        assert_eq!(dist.labels, vec!["Never", "Rarely", "Sometimes", "Often"]);
        assert_eq!(dist.counts, vec![0, 0, 2, 0]);

        let tab = interference_by_company_size(&data);
        assert_eq!(tab.total(), 2);
        assert!(!tab.column_labels.iter().any(|l| l == "N/A"));
    }

    #[test]
    fn test_sorted_order_is_independent_of_row_order() {
        let a = Dataset::new(vec![
            SurveyRecord::new(SurveyYear::Y2014).with(Field::Gender, "Male"),
            SurveyRecord::new(SurveyYear::Y2014).with(Field::Gender, "Female"),
            SurveyRecord::new(SurveyYear::Y2014).with(Field::Gender, "Other"),
        ])
        .unwrap();
        let b = Dataset::new(a.records().iter().rev().cloned().collect()).unwrap();

        assert_eq!(treatment_by_gender(&a), treatment_by_gender(&b));
        assert_eq!(
            treatment_by_gender(&a).row_labels,
            vec!["Female", "Male", "Other"]
        );
    }

    #[test]
    fn test_missing_values_are_skipped() {
        let data = Dataset::new(vec![
            SurveyRecord::new(SurveyYear::Y2014).with(Field::Benefits, "Yes"),
            SurveyRecord::new(SurveyYear::Y2014)
                .with(Field::Benefits, "Yes")
                .with(Field::WorkInterfere, "Often"),
        ])
        .unwrap();
        let tab = interference_by_benefits(&data);
        assert_eq!(tab.row_labels, vec!["Yes"]);
        assert_eq!(tab.column_totals(), vec![0, 0, 0, 1]);
    }
}
