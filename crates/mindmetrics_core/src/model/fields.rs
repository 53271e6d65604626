use std::fmt;

use serde::{Deserialize, Serialize};

/// Categorical columns of the survey schema.
///
/// `age` is the only non-categorical column and has no variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Gender,
    SelfEmployed,
    FamilyHistory,
    Treatment,
    WorkInterfere,
    Benefits,
    CareOptions,
    WellnessProgram,
    SeekHelp,
    Anonymity,
    Leave,
    MentalHealthConsequence,
    Coworkers,
    Supervisor,
    NoEmployees,
    TechCompany,
    Year,
}

impl Field {
    /// Feature list fed to the correlation builder (age and year excluded)
    pub const FEATURES: [Field; 16] = [
        Field::Gender,
        Field::SelfEmployed,
        Field::FamilyHistory,
        Field::Treatment,
        Field::WorkInterfere,
        Field::Benefits,
        Field::CareOptions,
        Field::WellnessProgram,
        Field::SeekHelp,
        Field::Anonymity,
        Field::Leave,
        Field::MentalHealthConsequence,
        Field::Coworkers,
        Field::Supervisor,
        Field::NoEmployees,
        Field::TechCompany,
    ];

    /// Workplace-support questions tracked year over year
    pub const SUPPORT: [Field; 5] = [
        Field::Benefits,
        Field::CareOptions,
        Field::WellnessProgram,
        Field::SeekHelp,
        Field::Anonymity,
    ];

    /// Column name as it appears in the dataset
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Field::Gender => "gender",
            Field::SelfEmployed => "self_employed",
            Field::FamilyHistory => "family_history",
            Field::Treatment => "treatment",
            Field::WorkInterfere => "work_interfere",
            Field::Benefits => "benefits",
            Field::CareOptions => "care_options",
            Field::WellnessProgram => "wellness_program",
            Field::SeekHelp => "seek_help",
            Field::Anonymity => "anonymity",
            Field::Leave => "leave",
            Field::MentalHealthConsequence => "mental_health_consequence",
            Field::Coworkers => "coworkers",
            Field::Supervisor => "supervisor",
            Field::NoEmployees => "no_employees",
            Field::TechCompany => "tech_company",
            Field::Year => "year",
        }
    }

    /// Display label for support-trend charts
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Field::Benefits => "Benefits",
            Field::CareOptions => "Care Options",
            Field::WellnessProgram => "Wellness Program",
            Field::SeekHelp => "Seek Help",
            Field::Anonymity => "Anonymity Protected",
            Field::Treatment => "Sought Treatment",
            Field::WorkInterfere => "Work Interference",
            Field::NoEmployees => "Number of Employees",
            Field::FamilyHistory => "Family History",
            other => other.name(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
