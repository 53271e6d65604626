//! Weighted composite risk score per respondent

use serde::{Deserialize, Serialize};

use crate::correlation::{CorrelationMatrix, EncodedMatrix};
use crate::model::{CompanySize, Dataset, Field, SurveyRecord};
use crate::scales::CategoryScale;
use crate::stats::{FiveNumberSummary, fraction};

/// Risk factors and their weights. Weights sum to 1.0.
pub const RISK_WEIGHTS: [(Field, f64); 5] = [
    (Field::FamilyHistory, 0.30),
    (Field::WorkInterfere, 0.25),
    (Field::Anonymity, 0.20),
    (Field::MentalHealthConsequence, 0.15),
    (Field::Leave, 0.10),
];

/// Scores strictly above this are "high risk" unless a policy overrides it
pub const DEFAULT_HIGH_RISK_THRESHOLD: f64 = 0.7;

/// Computes composite scores with a fixed risk scale
#[derive(Debug, Clone)]
pub struct RiskScorer {
    scale: CategoryScale,
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self {
            scale: CategoryScale::risk(),
        }
    }
}

impl RiskScorer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Weighted sum of the risk-scaled factors. Unknown labels contribute 0.
    #[must_use]
    pub fn score(&self, record: &SurveyRecord) -> f64 {
        RISK_WEIGHTS
            .iter()
            .map(|(field, weight)| self.scale.map(record.label(*field)) * weight)
            .sum()
    }

    #[must_use]
    pub fn scores(&self, dataset: &Dataset) -> Vec<f64> {
        dataset.iter().map(|record| self.score(record)).collect()
    }
}

#[must_use]
pub fn composite_score(record: &SurveyRecord) -> f64 {
    RiskScorer::new().score(record)
}

#[must_use]
pub fn composite_scores(dataset: &Dataset) -> Vec<f64> {
    RiskScorer::new().scores(dataset)
}

/// High-risk partition of the respondents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskSummary {
    pub threshold: f64,
    pub respondents: usize,
    pub high_risk: usize,
    pub high_risk_untreated: usize,
    /// `high_risk_untreated / respondents`, 0 when there are no respondents
    pub untreated_high_risk_share: f64,
}

#[must_use]
pub fn risk_summary(dataset: &Dataset, threshold: f64) -> RiskSummary {
    let scorer = RiskScorer::new();
    let mut high_risk = 0;
    let mut high_risk_untreated = 0;

    for record in dataset {
        if scorer.score(record) > threshold {
            high_risk += 1;
            if !record.treated() {
                high_risk_untreated += 1;
            }
        }
    }

    RiskSummary {
        threshold,
        respondents: dataset.len(),
        high_risk,
        high_risk_untreated,
        untreated_high_risk_share: fraction(high_risk_untreated, dataset.len()),
    }
}

/// Score distribution for one company size and treatment status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskProfile {
    pub company_size: CompanySize,
    pub treated: bool,
    pub count: usize,
    pub summary: FiveNumberSummary,
}

/// Score distributions grouped by company size, then untreated before treated.
///
/// Rows with an unrecognized company size are left out; empty groups are
/// omitted.
#[must_use]
pub fn risk_profiles(dataset: &Dataset) -> Vec<RiskProfile> {
    let scorer = RiskScorer::new();
    let mut groups: Vec<Vec<f64>> = vec![Vec::new(); CompanySize::ALL.len() * 2];

    for record in dataset {
        let Some(size) = record
            .label(Field::NoEmployees)
            .and_then(CompanySize::from_label)
        else {
            continue;
        };
        groups[size.ordinal() * 2 + usize::from(record.treated())].push(scorer.score(record));
    }

    groups
        .into_iter()
        .enumerate()
        .filter(|(_, scores)| !scores.is_empty())
        .map(|(i, scores)| RiskProfile {
            company_size: CompanySize::ALL[i / 2],
            treated: i % 2 == 1,
            count: scores.len(),
            summary: FiveNumberSummary::from_values(&scores),
        })
        .collect()
}

/// Pearson correlation between the risk-scaled factors
#[must_use]
pub fn risk_factor_correlation(dataset: &Dataset) -> CorrelationMatrix {
    let scale = CategoryScale::risk();
    let mut columns = Vec::with_capacity(RISK_WEIGHTS.len());
    let mut data = Vec::with_capacity(RISK_WEIGHTS.len());

    for (field, _) in RISK_WEIGHTS {
        columns.push(field.name().to_string());
        data.push(dataset.iter().map(|r| scale.map(r.label(field))).collect());
    }

    EncodedMatrix { columns, data }.correlation()
}
