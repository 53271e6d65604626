//! Memoization of the correlation report.
//!
//! The encoded correlation matrix is the only expensive, parameter-independent
//! computation in the engine. `CorrelationCache` holds at most one report,
//! keyed by the dataset's content fingerprint. The cache is owned by the
//! caller; there is no global state.

use std::sync::Arc;

use crate::correlation::{CorrelationReport, correlation_report};
use crate::model::Dataset;

#[derive(Debug, Default)]
pub struct CorrelationCache {
    entry: Option<(u64, Arc<CorrelationReport>)>,
    hits: u64,
    misses: u64,
}

impl CorrelationCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached report for `dataset`, recomputing if the dataset
    /// fingerprint differs from the cached one.
    pub fn get_or_compute(&mut self, dataset: &Dataset) -> Arc<CorrelationReport> {
        let key = dataset.fingerprint();
        if let Some((cached_key, report)) = &self.entry
            && *cached_key == key
        {
            self.hits += 1;
            tracing::debug!(fingerprint = key, "correlation cache hit");
            return Arc::clone(report);
        }

        self.misses += 1;
        tracing::debug!(
            fingerprint = key,
            rows = dataset.len(),
            "correlation cache miss, encoding dataset"
        );
        let report = Arc::new(correlation_report(dataset));
        self.entry = Some((key, Arc::clone(&report)));
        report
    }

    /// Drop the cached report
    pub fn invalidate(&mut self) {
        if self.entry.take().is_some() {
            tracing::debug!("correlation cache invalidated");
        }
    }

    /// Fingerprint of the dataset currently cached, if any
    #[must_use]
    pub fn cached_fingerprint(&self) -> Option<u64> {
        self.entry.as_ref().map(|(key, _)| *key)
    }

    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Field, SurveyRecord, SurveyYear};

    fn dataset(gender: &str) -> Dataset {
        Dataset::new(vec![
            SurveyRecord::new(SurveyYear::Y2014)
                .with(Field::Gender, gender)
                .with_treatment(true),
            SurveyRecord::new(SurveyYear::Y2016).with(Field::Gender, "Female"),
        ])
        .unwrap()
    }

    #[test]
    fn test_hit_on_same_dataset() {
        let mut cache = CorrelationCache::new();
        let data = dataset("Male");

        let first = cache.get_or_compute(&data);
        let second = cache.get_or_compute(&data);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.hits(), 1);
    }

    #[test]
    fn test_equal_content_shares_entry() {
        let mut cache = CorrelationCache::new();
        let first = cache.get_or_compute(&dataset("Male"));
        let second = cache.get_or_compute(&dataset("Male"));
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_recompute_on_dataset_change() {
        let mut cache = CorrelationCache::new();
        let a = dataset("Male");
        let b = dataset("Other");

        cache.get_or_compute(&a);
        cache.get_or_compute(&b);

        assert_eq!(cache.misses(), 2);
        assert_eq!(cache.cached_fingerprint(), Some(b.fingerprint()));
    }

    #[test]
    fn test_invalidate_forces_recompute() {
        let mut cache = CorrelationCache::new();
        let data = dataset("Male");

        let first = cache.get_or_compute(&data);
        cache.invalidate();
        assert_eq!(cache.cached_fingerprint(), None);

        let second = cache.get_or_compute(&data);
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first, second);
        assert_eq!(cache.misses(), 2);
    }
}
