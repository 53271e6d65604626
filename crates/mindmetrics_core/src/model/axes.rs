//! Shared category orderings.
//!
//! Company-size buckets and interference levels are displayed in a fixed
//! order everywhere they appear. The order is policy, not something read
//! from the data, so it lives here once.

use serde::{Deserialize, Serialize};

/// Display order for the treatment axis
pub const TREATMENT_ORDER: [&str; 2] = ["No", "Yes"];

/// Employer headcount bucket (`no_employees`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CompanySize {
    OneToFive,
    SixToTwentyFive,
    TwentySixToHundred,
    HundredToFiveHundred,
    FiveHundredToThousand,
    MoreThanThousand,
}

impl CompanySize {
    pub const ALL: [CompanySize; 6] = [
        CompanySize::OneToFive,
        CompanySize::SixToTwentyFive,
        CompanySize::TwentySixToHundred,
        CompanySize::HundredToFiveHundred,
        CompanySize::FiveHundredToThousand,
        CompanySize::MoreThanThousand,
    ];

    #[must_use]
    pub fn ordinal(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CompanySize::OneToFive => "1-5",
            CompanySize::SixToTwentyFive => "6-25",
            CompanySize::TwentySixToHundred => "26-100",
            CompanySize::HundredToFiveHundred => "100-500",
            CompanySize::FiveHundredToThousand => "500-1000",
            CompanySize::MoreThanThousand => "More than 1000",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.label() == label)
    }

    #[must_use]
    pub fn labels() -> [&'static str; 6] {
        Self::ALL.map(Self::label)
    }
}

/// How often mental health interferes with work (`work_interfere`).
///
/// The survey's `N/A` answer has no variant; views built on this axis drop it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Interference {
    Never,
    Rarely,
    Sometimes,
    Often,
}

impl Interference {
    pub const ALL: [Interference; 4] = [
        Interference::Never,
        Interference::Rarely,
        Interference::Sometimes,
        Interference::Often,
    ];

    /// Label the survey uses for "not applicable"
    pub const NOT_APPLICABLE: &'static str = "N/A";

    #[must_use]
    pub fn ordinal(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Interference::Never => "Never",
            Interference::Rarely => "Rarely",
            Interference::Sometimes => "Sometimes",
            Interference::Often => "Often",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.label() == label)
    }

    #[must_use]
    pub fn labels() -> [&'static str; 4] {
        Self::ALL.map(Self::label)
    }

    /// Sometimes or Often
    #[must_use]
    pub fn is_high(self) -> bool {
        matches!(self, Interference::Sometimes | Interference::Often)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_size_order_is_ascending() {
        assert_eq!(
            CompanySize::labels(),
            ["1-5", "6-25", "26-100", "100-500", "500-1000", "More than 1000"]
        );
        for (i, size) in CompanySize::ALL.iter().enumerate() {
            assert_eq!(size.ordinal(), i);
            assert_eq!(CompanySize::from_label(size.label()), Some(*size));
        }
    }

    #[test]
    fn test_interference_rejects_not_applicable() {
        assert_eq!(Interference::from_label("N/A"), None);
        assert_eq!(Interference::from_label("Often"), Some(Interference::Often));
        assert!(Interference::Sometimes.is_high());
        assert!(!Interference::Rarely.is_high());
    }
}
