//! Year-over-year aggregate rates.
//!
//! A rate is the fraction of qualifying rows in a survey year whose field holds
//! the positive label. Every year present in the dataset gets an entry; a
//! year without qualifying rows reports 0 rather than NaN.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{Dataset, Field, SurveyYear};
use crate::stats::fraction;

/// Rate per survey year, each in [0, 1]
pub type YearlyRates = BTreeMap<SurveyYear, f64>;

/// Which rows count toward the denominator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RateFilter {
    /// Any non-missing answer
    #[default]
    Recognized,
    /// Only `Yes` and `No`; "Don't know"/"Not sure" answers are excluded
    YesNoOnly,
}

impl RateFilter {
    fn admits(self, label: &str) -> bool {
        match self {
            RateFilter::Recognized => true,
            RateFilter::YesNoOnly => label == "Yes" || label == "No",
        }
    }
}

/// Field, positive label and row filter for a rate computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTarget {
    pub field: Field,
    pub positive: String,
    pub filter: RateFilter,
}

impl RateTarget {
    #[must_use]
    pub fn new(field: Field, positive: &str, filter: RateFilter) -> Self {
        Self {
            field,
            positive: positive.to_string(),
            filter,
        }
    }

    /// "Sought treatment"
    #[must_use]
    pub fn treatment() -> Self {
        Self::new(Field::Treatment, "Yes", RateFilter::Recognized)
    }

    /// Share of `Yes` among `Yes`/`No` answers to a support question
    #[must_use]
    pub fn support(field: Field) -> Self {
        Self::new(field, "Yes", RateFilter::YesNoOnly)
    }
}

/// Fraction of qualifying rows per year whose field equals the positive label
#[must_use]
pub fn yearly_rate(dataset: &Dataset, target: &RateTarget) -> YearlyRates {
    // (positive, qualifying) per year; every present year is seeded
    let mut counts: BTreeMap<SurveyYear, (usize, usize)> = BTreeMap::new();

    for record in dataset {
        let entry = counts.entry(record.year).or_default();
        let Some(label) = record.label(target.field) else {
            continue;
        };
        if !target.filter.admits(label) {
            continue;
        }
        entry.1 += 1;
        if label == target.positive {
            entry.0 += 1;
        }
    }

    counts
        .into_iter()
        .map(|(year, (positive, qualifying))| (year, fraction(positive, qualifying)))
        .collect()
}

#[must_use]
pub fn treatment_rate_by_year(dataset: &Dataset) -> YearlyRates {
    yearly_rate(dataset, &RateTarget::treatment())
}

/// One support question's yearly `Yes` share
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportSeries {
    pub field: Field,
    pub label: String,
    pub rates: YearlyRates,
}

/// Perception of workplace support over time
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SupportTrends {
    pub series: Vec<SupportSeries>,
}

impl SupportTrends {
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&YearlyRates> {
        self.series
            .iter()
            .find(|series| series.field == field)
            .map(|series| &series.rates)
    }
}

#[must_use]
pub fn support_trends(dataset: &Dataset) -> SupportTrends {
    let series = Field::SUPPORT
        .into_iter()
        .map(|field| SupportSeries {
            field,
            label: field.display_name().to_string(),
            rates: yearly_rate(dataset, &RateTarget::support(field)),
        })
        .collect();
    SupportTrends { series }
}

/// Treated vs untreated share within one survey year
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TreatmentSplit {
    pub no_treatment: f64,
    pub sought_treatment: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TreatmentTrend {
    pub by_year: BTreeMap<SurveyYear, TreatmentSplit>,
    /// Change in the sought-treatment share from 2014 to 2016
    pub delta: Option<f64>,
}

#[must_use]
pub fn treatment_trend(dataset: &Dataset) -> TreatmentTrend {
    let by_year: BTreeMap<SurveyYear, TreatmentSplit> = treatment_rate_by_year(dataset)
        .into_iter()
        .map(|(year, sought)| {
            (
                year,
                TreatmentSplit {
                    no_treatment: 1.0 - sought,
                    sought_treatment: sought,
                },
            )
        })
        .collect();

    let delta = match (by_year.get(&SurveyYear::Y2014), by_year.get(&SurveyYear::Y2016)) {
        (Some(before), Some(after)) => Some(after.sought_treatment - before.sought_treatment),
        _ => None,
    };

    TreatmentTrend { by_year, delta }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMissing {
    pub column: String,
    pub missing: usize,
}

/// Headline numbers for the overview page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub total_records: usize,
    /// Column count excluding `year`
    pub variables: usize,
    pub years: Vec<SurveyYear>,
    pub missing: Vec<ColumnMissing>,
}

#[must_use]
pub fn dataset_summary(dataset: &Dataset) -> DatasetSummary {
    let mut missing = vec![ColumnMissing {
        column: "age".to_string(),
        missing: dataset.iter().filter(|r| r.age.is_none()).count(),
    }];
    missing.extend(Field::FEATURES.into_iter().map(|field| ColumnMissing {
        column: field.name().to_string(),
        missing: dataset.iter().filter(|r| r.label(field).is_none()).count(),
    }));
    missing.push(ColumnMissing {
        column: Field::Year.name().to_string(),
        missing: 0,
    });

    DatasetSummary {
        total_records: dataset.len(),
        variables: missing.len() - 1,
        years: dataset.years().into_iter().collect(),
        missing,
    }
}
