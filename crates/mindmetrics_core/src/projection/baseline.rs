use serde::{Deserialize, Serialize};

use crate::config::PolicyConfig;
use crate::model::{CompanySize, Dataset, Field, Interference};
use crate::scales::CategoryScale;
use crate::stats::{fraction, mean};

/// Mean productivity-loss rate within one company-size bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentLossRate {
    pub company_size: CompanySize,
    pub mean_loss_rate: f64,
}

/// Dataset-derived aggregates the projection models start from.
///
/// Loss-rate means skip rows whose interference label is not in the scale
/// (`N/A`, missing); an empty group averages to 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Baselines {
    pub respondents: usize,
    /// Mean productivity loss (fraction of salary) over all rated rows
    pub mean_loss_rate: f64,
    /// Mean interference cost among `benefits = Yes`
    pub loss_rate_with_benefits: f64,
    /// Mean interference cost among `benefits = No`
    pub loss_rate_without_benefits: f64,
    /// Share of respondents who sought treatment
    pub treatment_rate: f64,
    /// Share of respondents reporting Sometimes/Often interference
    pub high_interference_rate: f64,
    /// Company-size buckets with at least one rated row, in bucket order
    pub segment_loss_rates: Vec<SegmentLossRate>,
}

impl Baselines {
    #[must_use]
    pub fn from_dataset(dataset: &Dataset, policy: &PolicyConfig) -> Self {
        let loss = &policy.productivity_loss;
        let cost = &policy.interference_cost;

        let rated = |scale: &CategoryScale, benefits: Option<&str>| -> Vec<f64> {
            dataset
                .iter()
                .filter(|r| benefits.is_none() || r.label(Field::Benefits) == benefits)
                .filter_map(|r| scale.lookup(r.label(Field::WorkInterfere)))
                .collect()
        };

        let treated = dataset.iter().filter(|r| r.treated()).count();
        let high_interference = dataset
            .iter()
            .filter(|r| {
                r.label(Field::WorkInterfere)
                    .and_then(Interference::from_label)
                    .is_some_and(Interference::is_high)
            })
            .count();

        let segment_loss_rates = CompanySize::ALL
            .into_iter()
            .filter_map(|size| {
                let rates: Vec<f64> = dataset
                    .iter()
                    .filter(|r| r.label(Field::NoEmployees) == Some(size.label()))
                    .filter_map(|r| loss.lookup(r.label(Field::WorkInterfere)))
                    .collect();
                (!rates.is_empty()).then(|| SegmentLossRate {
                    company_size: size,
                    mean_loss_rate: mean(&rates),
                })
            })
            .collect();

        Self {
            respondents: dataset.len(),
            mean_loss_rate: mean(&rated(loss, None)),
            loss_rate_with_benefits: mean(&rated(cost, Some("Yes"))),
            loss_rate_without_benefits: mean(&rated(cost, Some("No"))),
            treatment_rate: fraction(treated, dataset.len()),
            high_interference_rate: fraction(high_interference, dataset.len()),
            segment_loss_rates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SurveyRecord, SurveyYear};

    fn row(benefits: &str, interfere: &str) -> SurveyRecord {
        SurveyRecord::new(SurveyYear::Y2014)
            .with(Field::Benefits, benefits)
            .with(Field::WorkInterfere, interfere)
    }

    #[test]
    fn test_baselines_skip_unrated_rows() {
        let data = Dataset::new(vec![
            row("Yes", "Never"),
            row("Yes", "Rarely").with_treatment(true),
            row("No", "Often").with(Field::NoEmployees, "1-5"),
            row("No", "N/A").with(Field::NoEmployees, "1-5"),
        ])
        .unwrap();
        let baselines = Baselines::from_dataset(&data, &PolicyConfig::default());

        // (0 + 0.03 + 0.25) / 3, N/A excluded
        assert!((baselines.mean_loss_rate - 0.28 / 3.0).abs() < 1e-12);
        assert!((baselines.loss_rate_with_benefits - 0.025).abs() < 1e-12);
        assert!((baselines.loss_rate_without_benefits - 0.30).abs() < 1e-12);
        assert_eq!(baselines.treatment_rate, 0.25);
        assert_eq!(baselines.high_interference_rate, 0.25);

        assert_eq!(baselines.segment_loss_rates.len(), 1);
        assert_eq!(
            baselines.segment_loss_rates[0].company_size,
            CompanySize::OneToFive
        );
        assert!((baselines.segment_loss_rates[0].mean_loss_rate - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_empty_dataset_baselines_are_zero() {
        let data = Dataset::new(vec![]).unwrap();
        let baselines = Baselines::from_dataset(&data, &PolicyConfig::default());
        assert_eq!(baselines.mean_loss_rate, 0.0);
        assert_eq!(baselines.loss_rate_without_benefits, 0.0);
        assert_eq!(baselines.treatment_rate, 0.0);
        assert!(baselines.segment_loss_rates.is_empty());
    }
}
