//! The immutable in-memory survey table

use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use super::{Field, SurveyRecord, SurveyYear};
use crate::error::DatasetError;

/// Normalized survey table.
///
/// Rows are validated once on construction and never mutated afterwards.
/// The content fingerprint identifies the table for memoization.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<SurveyRecord>,
    fingerprint: u64,
}

impl Dataset {
    /// Validate `records` and compute the content fingerprint.
    pub fn new(records: Vec<SurveyRecord>) -> Result<Self, DatasetError> {
        if let Some((row, record)) = records
            .iter()
            .enumerate()
            .find(|(_, record)| record.treatment > 1)
        {
            return Err(DatasetError::InvalidTreatment {
                row,
                value: record.treatment,
            });
        }

        let fingerprint = fingerprint(&records);
        tracing::debug!(rows = records.len(), fingerprint, "dataset constructed");

        Ok(Self {
            records,
            fingerprint,
        })
    }

    #[must_use]
    pub fn records(&self) -> &[SurveyRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SurveyRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Content hash over every field of every row, in row order
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// Survey vintages present in the data
    #[must_use]
    pub fn years(&self) -> BTreeSet<SurveyYear> {
        self.records.iter().map(|r| r.year).collect()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a SurveyRecord;
    type IntoIter = std::slice::Iter<'a, SurveyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn fingerprint(records: &[SurveyRecord]) -> u64 {
    let mut hasher = FxHasher::default();
    records.len().hash(&mut hasher);
    for record in records {
        record.year.hash(&mut hasher);
        record.treatment.hash(&mut hasher);
        record.age.map(f64::to_bits).hash(&mut hasher);
        for field in Field::FEATURES {
            if field != Field::Treatment {
                record.label(field).hash(&mut hasher);
            }
        }
    }
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_binary_treatment() {
        let mut bad = SurveyRecord::new(SurveyYear::Y2014);
        bad.treatment = 2;
        let err = Dataset::new(vec![SurveyRecord::new(SurveyYear::Y2014), bad]).unwrap_err();
        assert_eq!(err, DatasetError::InvalidTreatment { row: 1, value: 2 });
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let a = Dataset::new(vec![
            SurveyRecord::new(SurveyYear::Y2014).with(Field::Gender, "Female"),
        ])
        .unwrap();
        let b = Dataset::new(vec![
            SurveyRecord::new(SurveyYear::Y2014).with(Field::Gender, "Female"),
        ])
        .unwrap();
        let c = Dataset::new(vec![
            SurveyRecord::new(SurveyYear::Y2014).with(Field::Gender, "Male"),
        ])
        .unwrap();

        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn test_years_present() {
        let dataset = Dataset::new(vec![
            SurveyRecord::new(SurveyYear::Y2016),
            SurveyRecord::new(SurveyYear::Y2016),
        ])
        .unwrap();
        assert_eq!(
            dataset.years().into_iter().collect::<Vec<_>>(),
            vec![SurveyYear::Y2016]
        );
    }
}
