//! Synthetic survey rows drawn from the real label sets

use rand::rngs::SmallRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};

use crate::model::{CompanySize, Dataset, Field, SurveyRecord, SurveyYear};

const GENDERS: &[&str] = &["Male", "Female", "Other"];
const YES_NO: &[&str] = &["Yes", "No"];
const YES_NO_UNSURE: &[&str] = &["Yes", "No", "Don't know"];
const INTERFERENCE: &[&str] = &["Never", "Rarely", "Sometimes", "Often", "N/A"];
const LEAVE: &[&str] = &[
    "Very easy",
    "Somewhat easy",
    "Don't know",
    "Somewhat difficult",
    "Very difficult",
];
const MAYBE: &[&str] = &["Yes", "No", "Maybe"];
const SOME: &[&str] = &["Yes", "No", "Some of them"];

fn pick<'a, R: Rng>(rng: &mut R, labels: &[&'a str]) -> Option<&'a str> {
    // Roughly one answer in twenty is left blank
    if rng.random_bool(0.05) {
        None
    } else {
        labels.choose(rng).copied()
    }
}

/// Generate `n` rows deterministically from `seed`
pub fn synthetic_records(n: usize, seed: u64) -> Vec<SurveyRecord> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let sizes = CompanySize::labels();

    (0..n)
        .map(|_| {
            let year = if rng.random_bool(0.5) {
                SurveyYear::Y2014
            } else {
                SurveyYear::Y2016
            };
            let mut record = SurveyRecord::new(year).with_treatment(rng.random_bool(0.5));
            record.age = Some(f64::from(rng.random_range(18..65_u8)));

            let answers: [(Field, &[&str]); 14] = [
                (Field::Gender, GENDERS),
                (Field::SelfEmployed, YES_NO),
                (Field::FamilyHistory, YES_NO),
                (Field::WorkInterfere, INTERFERENCE),
                (Field::Benefits, YES_NO_UNSURE),
                (Field::CareOptions, YES_NO_UNSURE),
                (Field::WellnessProgram, YES_NO_UNSURE),
                (Field::SeekHelp, YES_NO_UNSURE),
                (Field::Anonymity, YES_NO_UNSURE),
                (Field::Leave, LEAVE),
                (Field::MentalHealthConsequence, MAYBE),
                (Field::Coworkers, SOME),
                (Field::Supervisor, SOME),
                (Field::TechCompany, YES_NO),
            ];
            for (field, labels) in answers {
                record.set_label(field, pick(&mut rng, labels));
            }
            record.set_label(Field::NoEmployees, pick(&mut rng, &sizes));
            record
        })
        .collect()
}

pub fn synthetic(n: usize, seed: u64) -> Dataset {
    Dataset::new(synthetic_records(n, seed)).expect("synthetic rows are valid")
}

/// Same rows as `synthetic(n, seed)`, shuffled
pub fn shuffled(n: usize, seed: u64, shuffle_seed: u64) -> Dataset {
    let mut records = synthetic_records(n, seed);
    records.shuffle(&mut SmallRng::seed_from_u64(shuffle_seed));
    Dataset::new(records).expect("synthetic rows are valid")
}
