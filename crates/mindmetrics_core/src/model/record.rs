//! One survey respondent and the survey vintage it came from

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Field;
use crate::error::DatasetError;

/// Survey vintage. Only the 2014 and 2016 surveys exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum SurveyYear {
    Y2014,
    Y2016,
}

impl SurveyYear {
    pub const ALL: [SurveyYear; 2] = [SurveyYear::Y2014, SurveyYear::Y2016];

    #[must_use]
    pub fn as_u16(self) -> u16 {
        match self {
            SurveyYear::Y2014 => 2014,
            SurveyYear::Y2016 => 2016,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SurveyYear::Y2014 => "2014",
            SurveyYear::Y2016 => "2016",
        }
    }
}

impl TryFrom<u16> for SurveyYear {
    type Error = DatasetError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            2014 => Ok(SurveyYear::Y2014),
            2016 => Ok(SurveyYear::Y2016),
            other => Err(DatasetError::InvalidYear(other)),
        }
    }
}

impl From<SurveyYear> for u16 {
    fn from(year: SurveyYear) -> Self {
        year.as_u16()
    }
}

impl fmt::Display for SurveyYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single normalized survey row.
///
/// Categorical answers are free-text labels from the survey instrument;
/// `None` marks a missing answer. `treatment` is pre-normalized to 0/1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyRecord {
    pub year: SurveyYear,
    pub treatment: u8,
    #[serde(default)]
    pub age: Option<f64>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub self_employed: Option<String>,
    #[serde(default)]
    pub family_history: Option<String>,
    #[serde(default)]
    pub work_interfere: Option<String>,
    #[serde(default)]
    pub benefits: Option<String>,
    #[serde(default)]
    pub care_options: Option<String>,
    #[serde(default)]
    pub wellness_program: Option<String>,
    #[serde(default)]
    pub seek_help: Option<String>,
    #[serde(default)]
    pub anonymity: Option<String>,
    #[serde(default)]
    pub leave: Option<String>,
    #[serde(default)]
    pub mental_health_consequence: Option<String>,
    #[serde(default)]
    pub coworkers: Option<String>,
    #[serde(default)]
    pub supervisor: Option<String>,
    #[serde(default)]
    pub no_employees: Option<String>,
    #[serde(default)]
    pub tech_company: Option<String>,
}

impl SurveyRecord {
    /// An empty row for `year`: untreated, every answer missing.
    #[must_use]
    pub fn new(year: SurveyYear) -> Self {
        Self {
            year,
            treatment: 0,
            age: None,
            gender: None,
            self_employed: None,
            family_history: None,
            work_interfere: None,
            benefits: None,
            care_options: None,
            wellness_program: None,
            seek_help: None,
            anonymity: None,
            leave: None,
            mental_health_consequence: None,
            coworkers: None,
            supervisor: None,
            no_employees: None,
            tech_company: None,
        }
    }

    #[must_use]
    pub fn treated(&self) -> bool {
        self.treatment == 1
    }

    /// Label held by `field`, or `None` when the answer is missing.
    ///
    /// `treatment` reads as `"No"`/`"Yes"` and `year` as `"2014"`/`"2016"`.
    #[must_use]
    pub fn label(&self, field: Field) -> Option<&str> {
        let slot = match field {
            Field::Year => return Some(self.year.label()),
            Field::Treatment => return Some(if self.treated() { "Yes" } else { "No" }),
            Field::Gender => &self.gender,
            Field::SelfEmployed => &self.self_employed,
            Field::FamilyHistory => &self.family_history,
            Field::WorkInterfere => &self.work_interfere,
            Field::Benefits => &self.benefits,
            Field::CareOptions => &self.care_options,
            Field::WellnessProgram => &self.wellness_program,
            Field::SeekHelp => &self.seek_help,
            Field::Anonymity => &self.anonymity,
            Field::Leave => &self.leave,
            Field::MentalHealthConsequence => &self.mental_health_consequence,
            Field::Coworkers => &self.coworkers,
            Field::Supervisor => &self.supervisor,
            Field::NoEmployees => &self.no_employees,
            Field::TechCompany => &self.tech_company,
        };
        slot.as_deref()
    }

    /// Set a categorical answer. Writes to `treatment` or `year` are ignored;
    /// those columns are typed.
    pub fn set_label(&mut self, field: Field, value: Option<&str>) {
        let value = value.map(str::to_string);
        match field {
            Field::Year | Field::Treatment => {}
            Field::Gender => self.gender = value,
            Field::SelfEmployed => self.self_employed = value,
            Field::FamilyHistory => self.family_history = value,
            Field::WorkInterfere => self.work_interfere = value,
            Field::Benefits => self.benefits = value,
            Field::CareOptions => self.care_options = value,
            Field::WellnessProgram => self.wellness_program = value,
            Field::SeekHelp => self.seek_help = value,
            Field::Anonymity => self.anonymity = value,
            Field::Leave => self.leave = value,
            Field::MentalHealthConsequence => self.mental_health_consequence = value,
            Field::Coworkers => self.coworkers = value,
            Field::Supervisor => self.supervisor = value,
            Field::NoEmployees => self.no_employees = value,
            Field::TechCompany => self.tech_company = value,
        }
    }

    /// Builder-style [`Self::set_label`], handy for fixtures
    #[must_use]
    pub fn with(mut self, field: Field, value: &str) -> Self {
        self.set_label(field, Some(value));
        self
    }

    #[must_use]
    pub fn with_treatment(mut self, treated: bool) -> Self {
        self.treatment = u8::from(treated);
        self
    }
}
