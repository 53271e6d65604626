//! Encoded feature matrix and Pearson correlation.
//!
//! Encoding rules:
//! - `treatment` stays a single 0/1 column
//! - `work_interfere` and `leave` go through their ordinal scales
//! - every other feature is one-hot expanded with drop-first, categories in
//!   lexicographic order, so column layout never depends on row order
//!
//! Missing nominal answers encode as all-zero indicators.

use std::collections::BTreeSet;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::model::{Dataset, Field};
use crate::scales::CategoryScale;
use crate::stats::pearson;

/// Column-major numeric matrix with named columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedMatrix {
    pub columns: Vec<String>,
    /// `data[c][r]` is row `r` of column `c`
    pub data: Vec<Vec<f64>>,
}

impl EncodedMatrix {
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        let i = self.columns.iter().position(|c| c == name)?;
        Some(&self.data[i])
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.data.first().map_or(0, Vec::len)
    }

    fn push(&mut self, name: String, values: Vec<f64>) {
        self.columns.push(name);
        self.data.push(values);
    }

    /// Pairwise Pearson correlation over every column
    #[must_use]
    pub fn correlation(&self) -> CorrelationMatrix {
        let n = self.columns.len();
        let row = |i: usize| -> Vec<f64> {
            (0..n)
                .map(|j| {
                    if i == j {
                        1.0
                    } else {
                        pearson(&self.data[i], &self.data[j])
                    }
                })
                .collect()
        };

        #[cfg(feature = "parallel")]
        let rows: Vec<Vec<f64>> = (0..n).into_par_iter().map(row).collect();

        #[cfg(not(feature = "parallel"))]
        let rows: Vec<Vec<f64>> = (0..n).map(row).collect();

        CorrelationMatrix {
            columns: self.columns.clone(),
            values: rows.into_iter().flatten().collect(),
        }
    }
}

/// Square, symmetric correlation matrix stored row-major
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    values: Vec<f64>,
}

impl CorrelationMatrix {
    #[must_use]
    pub fn size(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.size() + j]
    }

    #[must_use]
    pub fn index_of(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    #[must_use]
    pub fn get_by_name(&self, a: &str, b: &str) -> Option<f64> {
        Some(self.get(self.index_of(a)?, self.index_of(b)?))
    }

    /// Rows of the matrix, for rendering
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks(self.size().max(1))
    }
}

/// Encode the fixed feature list of `dataset` into numeric columns
#[must_use]
pub fn encode(dataset: &Dataset) -> EncodedMatrix {
    let interference = CategoryScale::work_interference();
    let leave = CategoryScale::leave_difficulty();

    let mut matrix = EncodedMatrix {
        columns: Vec::new(),
        data: Vec::new(),
    };

    for field in Field::FEATURES {
        match field {
            Field::Treatment => matrix.push(
                field.name().to_string(),
                dataset.iter().map(|r| f64::from(r.treatment)).collect(),
            ),
            Field::WorkInterfere => matrix.push(
                field.name().to_string(),
                dataset
                    .iter()
                    .map(|r| interference.map(r.label(field)))
                    .collect(),
            ),
            Field::Leave => matrix.push(
                field.name().to_string(),
                dataset.iter().map(|r| leave.map(r.label(field))).collect(),
            ),
            nominal => {
                let categories: BTreeSet<&str> =
                    dataset.iter().filter_map(|r| r.label(nominal)).collect();
                // Drop the first category as the reference level
                for category in categories.into_iter().skip(1) {
                    matrix.push(
                        format!("{}_{}", nominal.name(), category),
                        dataset
                            .iter()
                            .map(|r| {
                                if r.label(nominal) == Some(category) {
                                    1.0
                                } else {
                                    0.0
                                }
                            })
                            .collect(),
                    );
                }
            }
        }
    }

    matrix
}

/// Correlation of one encoded column with the two target columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetCorrelation {
    pub feature: String,
    pub treatment: f64,
    pub work_interfere: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationReport {
    pub matrix: CorrelationMatrix,
    /// Every column against `treatment` and `work_interfere`, sorted by
    /// descending correlation with `treatment`
    pub targets: Vec<TargetCorrelation>,
}

#[must_use]
pub fn correlation_report(dataset: &Dataset) -> CorrelationReport {
    let matrix = encode(dataset).correlation();

    let treatment = matrix.index_of(Field::Treatment.name());
    let interfere = matrix.index_of(Field::WorkInterfere.name());

    let mut targets: Vec<TargetCorrelation> = matrix
        .columns
        .iter()
        .enumerate()
        .map(|(i, feature)| TargetCorrelation {
            feature: feature.clone(),
            treatment: treatment.map_or(0.0, |t| matrix.get(i, t)),
            work_interfere: interfere.map_or(0.0, |w| matrix.get(i, w)),
        })
        .collect();

    targets.sort_by(|a, b| {
        b.treatment
            .total_cmp(&a.treatment)
            .then_with(|| a.feature.cmp(&b.feature))
    });

    CorrelationReport { matrix, targets }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SurveyRecord, SurveyYear};

    fn sample() -> Dataset {
        Dataset::new(vec![
            SurveyRecord::new(SurveyYear::Y2014)
                .with(Field::Gender, "Male")
                .with(Field::WorkInterfere, "Often")
                .with(Field::Leave, "Very difficult")
                .with_treatment(true),
            SurveyRecord::new(SurveyYear::Y2014)
                .with(Field::Gender, "Female")
                .with(Field::WorkInterfere, "Never")
                .with(Field::Leave, "Very easy"),
            SurveyRecord::new(SurveyYear::Y2016)
                .with(Field::Gender, "Other")
                .with(Field::WorkInterfere, "N/A")
                .with_treatment(true),
        ])
        .unwrap()
    }

    #[test]
    fn test_encoding_layout() {
        let encoded = encode(&sample());

        // Female is the dropped reference category
        assert!(encoded.column("gender_Female").is_none());
        assert_eq!(encoded.column("gender_Male"), Some(&[1.0, 0.0, 0.0][..]));
        assert_eq!(encoded.column("gender_Other"), Some(&[0.0, 0.0, 1.0][..]));

        assert_eq!(encoded.column("treatment"), Some(&[1.0, 0.0, 1.0][..]));
        // N/A falls back to 0, missing leave falls back to "Don't know"
        assert_eq!(encoded.column("work_interfere"), Some(&[3.0, 0.0, 0.0][..]));
        assert_eq!(encoded.column("leave"), Some(&[4.0, 0.0, 2.0][..]));
        assert_eq!(encoded.num_rows(), 3);
    }

    #[test]
    fn test_single_category_field_produces_no_columns() {
        let data = Dataset::new(vec![
            SurveyRecord::new(SurveyYear::Y2014).with(Field::TechCompany, "Yes"),
            SurveyRecord::new(SurveyYear::Y2014).with(Field::TechCompany, "Yes"),
        ])
        .unwrap();
        let encoded = encode(&data);
        assert!(!encoded.columns.iter().any(|c| c.starts_with("tech_company")));
    }

    #[test]
    fn test_report_sorted_by_treatment() {
        let report = correlation_report(&sample());
        assert_eq!(report.targets[0].feature, "treatment");
        assert!((report.targets[0].treatment - 1.0).abs() < 1e-12);
        for pair in report.targets.windows(2) {
            assert!(pair[0].treatment >= pair[1].treatment);
        }
    }
}
